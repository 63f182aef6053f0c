//! Adapters for schema values whose XML form differs from the Rust primitive

/// `xsd:boolean` the way spreadsheet applications expect it: always written as `0`/`1`,
/// read from `0`, `1`, `true` or `false`.
///
/// Used on `Option<bool>` fields together with `default` and
/// `skip_serializing_if = "Option::is_none"`.
pub mod bool_int {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<bool>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(true) => serializer.serialize_str("1"),
            Some(false) => serializer.serialize_str("0"),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<bool>, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid boolean `{value}`")))
    }

    pub fn parse(value: &str) -> Option<bool> {
        match value.trim() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        }
    }
}
