use serde_json::Value;

/// Text form of list-valued fields: items joined by `", "` for editing and
/// split back on commas with each piece trimmed. Empty pieces are kept, so
/// `"a,,b"` decodes to three items.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListCodec;

impl ListCodec {
    pub const SEPARATOR: char = ',';

    pub fn encode<S: AsRef<str>>(items: &[S]) -> String {
        items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
    }

    pub fn decode(text: &str) -> Vec<String> {
        text.split(Self::SEPARATOR).map(|s| s.trim().to_string()).collect()
    }

    /// Encodes a JSON array of strings; `None` for anything else.
    pub fn encode_value(value: &Value) -> Option<String> {
        let items = value.as_array()?;
        let strings: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
        strings.map(|s| Self::encode(s.as_slice()))
    }

    pub fn decode_value(text: &str) -> Value {
        Value::Array(Self::decode(text).into_iter().map(Value::String).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_trims_pieces() {
        assert_eq!(ListCodec::decode("a, b ,c"), ["a", "b", "c"]);
        assert_eq!(ListCodec::decode("solo"), ["solo"]);
        assert_eq!(ListCodec::decode("a,,b"), ["a", "", "b"]);
    }

    #[test]
    fn encode_joins_with_comma_space() {
        assert_eq!(ListCodec::encode(&["AE", "C4D"]), "AE, C4D");
        assert_eq!(ListCodec::encode::<&str>(&[]), "");
    }

    #[test]
    fn encode_value_only_for_string_lists() {
        assert_eq!(ListCodec::encode_value(&json!(["x", "y"])).as_deref(), Some("x, y"));
        assert_eq!(ListCodec::encode_value(&json!(["x", 1])), None);
        assert_eq!(ListCodec::encode_value(&json!("x")), None);
    }
}
