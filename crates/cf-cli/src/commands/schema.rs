use cf_core::entities::{Listing, Profile};
use cf_core::identity::{AuthUser, Session};
use cf_search::FilterState;
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output::output;

/// Handle `cflow schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_value(args.type_name)?, flags.format)
}

fn schema_value(kind: SchemaType) -> anyhow::Result<serde_json::Value> {
    let schema = match kind {
        SchemaType::Profile => schema_for!(Profile),
        SchemaType::Listing => schema_for!(Listing),
        SchemaType::Session => schema_for!(Session),
        SchemaType::User => schema_for!(AuthUser),
        SchemaType::FilterState => schema_for!(FilterState),
    };
    Ok(serde_json::to_value(schema)?)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(SchemaType::Profile, "Profile", "email")]
    #[case(SchemaType::Listing, "Listing", "seller")]
    #[case(SchemaType::Session, "Session", "access_token")]
    #[case(SchemaType::User, "AuthUser", "id")]
    #[case(SchemaType::FilterState, "FilterState", "price_range")]
    fn schema_names_type_and_fields(
        #[case] kind: SchemaType,
        #[case] title: &str,
        #[case] property: &str,
    ) {
        let schema = schema_value(kind).expect("schema should serialize");
        assert_eq!(schema["title"], title);
        assert!(
            schema["properties"].get(property).is_some(),
            "{title} schema lacks {property}"
        );
    }
}
