//! Built-in demonstration catalog used by `cflow search` when no `--catalog`
//! file is given.

use chrono::{DateTime, Duration, Utc};

use cf_core::entities::{Listing, SellerSummary};
use cf_core::enums::{Difficulty, PlagiarismStatus, PricingModel};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn seller(id: &str, full_name: &str, username: &str, avatar: bool, reputation: f64) -> SellerSummary {
    SellerSummary {
        id: id.to_string(),
        full_name: Some(full_name.to_string()),
        username: Some(username.to_string()),
        avatar_url: avatar.then(|| "/api/placeholder/32/32".to_string()),
        is_verified: true,
        reputation_score: reputation,
    }
}

/// Three featured listings, dated relative to `now`.
#[must_use]
pub fn listings(now: DateTime<Utc>) -> Vec<Listing> {
    vec![
        Listing {
            id: "1".into(),
            title: "React E-commerce Dashboard".into(),
            slug: "react-ecommerce-dashboard".into(),
            description: "A complete e-commerce admin dashboard built with React, TypeScript, and Tailwind CSS. Features include order management, product catalog, analytics, and user management.".into(),
            short_description: Some("Complete e-commerce admin dashboard with analytics".into()),
            category: Some("Web Development".into()),
            price: 149.0,
            pricing_model: PricingModel::OneTime,
            programming_languages: strings(&["React", "TypeScript", "Tailwind CSS"]),
            tags: strings(&["dashboard", "ecommerce", "admin"]),
            difficulty_level: Difficulty::Intermediate,
            rating_average: 4.8,
            rating_count: 24,
            download_count: 156,
            view_count: 1205,
            like_count: 89,
            plagiarism_status: PlagiarismStatus::Clean,
            is_featured: true,
            is_open_source: false,
            demo_url: Some("https://demo.example.com".into()),
            repository_url: None,
            created_at: now - Duration::days(7),
            seller: seller("seller1", "Alex Thompson", "alexdev", true, 4.9),
        },
        Listing {
            id: "2".into(),
            title: "Node.js API Authentication System".into(),
            slug: "nodejs-api-auth".into(),
            description: "Secure authentication system with JWT tokens, role-based access control, and password reset functionality.".into(),
            short_description: None,
            category: Some("APIs & Integrations".into()),
            price: 89.0,
            pricing_model: PricingModel::OneTime,
            programming_languages: strings(&["Node.js", "Express", "MongoDB"]),
            tags: strings(&["authentication", "api", "security"]),
            difficulty_level: Difficulty::Advanced,
            rating_average: 4.7,
            rating_count: 18,
            download_count: 89,
            view_count: 567,
            like_count: 45,
            plagiarism_status: PlagiarismStatus::Clean,
            is_featured: false,
            is_open_source: true,
            demo_url: None,
            repository_url: Some("https://github.com/example/repo".into()),
            created_at: now - Duration::days(3),
            seller: seller("seller2", "Sarah Chen", "sarahc", false, 4.8),
        },
        Listing {
            id: "3".into(),
            title: "Python Data Visualization Suite".into(),
            slug: "python-data-viz".into(),
            description: "Comprehensive data visualization library with interactive charts, graphs, and dashboard components.".into(),
            short_description: None,
            category: Some("Data Science & AI".into()),
            price: 199.0,
            pricing_model: PricingModel::Subscription,
            programming_languages: strings(&["Python", "Plotly", "Dash"]),
            tags: strings(&["data-science", "visualization", "charts"]),
            difficulty_level: Difficulty::Expert,
            rating_average: 4.9,
            rating_count: 31,
            download_count: 203,
            view_count: 1876,
            like_count: 127,
            plagiarism_status: PlagiarismStatus::Clean,
            is_featured: true,
            is_open_source: false,
            demo_url: Some("https://demo-dataviz.example.com".into()),
            repository_url: None,
            created_at: now - Duration::days(1),
            seller: seller("seller3", "Dr. Michael Rodriguez", "datamike", true, 4.95),
        },
    ]
}
