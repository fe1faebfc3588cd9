//! Serde helpers for the backend's loose wire conventions.

use serde::{Deserialize, Deserializer};

/// Deserialize an id that may arrive as a JSON number or string.
///
/// The backend is inconsistent about whether numeric ids are sent as
/// numbers or strings, so ids stay string-backed client-side and every
/// wire type accepts both forms.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Str(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(n) => n.to_string(),
        Raw::Str(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
    }

    #[test]
    fn accepts_numeric_id() {
        let row: Row = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(row.id, "42");
    }

    #[test]
    fn accepts_string_id() {
        let row: Row = serde_json::from_str(r#"{"id": "42"}"#).unwrap();
        assert_eq!(row.id, "42");
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(serde_json::from_str::<Row>(r#"{"id": [1]}"#).is_err());
    }
}
