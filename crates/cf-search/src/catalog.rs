//! Option lists offered by the filter panel.

use cf_core::enums::{Difficulty, PlagiarismStatus, PricingModel, SortField};

pub const PROGRAMMING_LANGUAGES: [&str; 17] = [
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "C#",
    "C++",
    "Go",
    "Rust",
    "PHP",
    "Ruby",
    "Swift",
    "Kotlin",
    "Dart",
    "Scala",
    "HTML",
    "CSS",
    "SQL",
];

pub const CATEGORIES: [&str; 10] = [
    "Web Development",
    "Mobile Development",
    "Desktop Applications",
    "Games & Entertainment",
    "Data Science & AI",
    "DevOps & Tools",
    "Blockchain & Crypto",
    "APIs & Integrations",
    "Educational & Learning",
    "Open Source",
];

pub const DIFFICULTY_LEVELS: [Difficulty; 4] = Difficulty::ALL;

pub const PRICING_MODELS: [PricingModel; 3] = PricingModel::ALL;

/// Statuses a buyer may filter by. `blocked` listings are never shown.
pub const PLAGIARISM_STATUSES: [PlagiarismStatus; 3] = [
    PlagiarismStatus::Clean,
    PlagiarismStatus::Pending,
    PlagiarismStatus::Flagged,
];

/// Sort choices as `(field, label)` pairs, in menu order.
#[must_use]
pub fn sort_options() -> Vec<(SortField, &'static str)> {
    SortField::ALL.into_iter().map(|f| (f, f.label())).collect()
}

/// Button label for a snake_case token (`one_time` → `one time`).
#[must_use]
pub fn display_token(token: &str) -> String {
    token.replace('_', " ")
}

/// Case-insensitive lookup of a known language; returns the canonical spelling.
#[must_use]
pub fn canonical_language(input: &str) -> Option<&'static str> {
    let wanted = input.trim();
    PROGRAMMING_LANGUAGES
        .into_iter()
        .find(|lang| lang.eq_ignore_ascii_case(wanted))
}

/// Case-insensitive lookup of a known category; returns the canonical spelling.
#[must_use]
pub fn canonical_category(input: &str) -> Option<&'static str> {
    let wanted = input.trim();
    CATEGORIES
        .into_iter()
        .find(|category| category.eq_ignore_ascii_case(wanted))
}
