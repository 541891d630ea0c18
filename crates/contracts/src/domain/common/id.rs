use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts ids sent either as strings or as numbers; `null`/missing become "".
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Same as [`deserialize_id`] for optional references.
pub fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(default, deserialize_with = "deserialize_id")]
        id: String,
        #[serde(default, deserialize_with = "deserialize_opt_id")]
        parent: Option<String>,
    }

    #[test]
    fn test_numeric_and_string_ids() {
        let p: Wrapper = serde_json::from_str(r#"{"id": 17, "parent": "c-1"}"#).unwrap();
        assert_eq!(p.id, "17");
        assert_eq!(p.parent.as_deref(), Some("c-1"));

        let p: Wrapper = serde_json::from_str(r#"{"parent": null}"#).unwrap();
        assert_eq!(p.id, "");
        assert!(p.parent.is_none());
    }
}
