pub mod course;
pub mod course_enrollment;
pub mod mentorship;
pub mod opportunity;
pub mod opportunity_application;
pub mod portfolio;
pub mod user;

use sea_orm::entity::prelude::Json;
use serde::de::DeserializeOwned;

/// Decode a JSON column into its typed shape, falling back to the type's
/// default when the column is NULL or holds malformed content. Several
/// response builders rely on the fallback instead of failing the request.
pub fn decode_json_or_default<T>(value: Option<Json>) -> T
where
    T: DeserializeOwned + Default,
{
    value
        .map(|v| serde_json::from_value(v).unwrap_or_default())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_falls_back_on_null_column() {
        let tags: Vec<String> = decode_json_or_default(None);
        assert!(tags.is_empty());
    }

    #[test]
    fn decode_falls_back_on_malformed_content() {
        let tags: Vec<String> = decode_json_or_default(Some(json!({"not": "an array"})));
        assert!(tags.is_empty());
    }

    #[test]
    fn decode_passes_through_valid_content() {
        let tags: Vec<String> = decode_json_or_default(Some(json!(["drama", "noir"])));
        assert_eq!(tags, vec!["drama".to_string(), "noir".to_string()]);
    }
}
