pub mod flag {
    use serde::{Deserialize as _, Deserializer};

    /// Values a query flag accepts as "on". Anything else, including an empty
    /// value, is "off".
    pub const TRUTHY: [&str; 3] = ["1", "true", "yes"];

    pub fn is_truthy(value: &str) -> bool {
        let value = value.trim().to_lowercase();
        TRUTHY.contains(&value.as_str())
    }

    /// Lenient boolean for query strings such as `?in_ph=1` or `?in_ph=yes`.
    /// Never fails on unknown values.
    pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.as_deref().map(is_truthy).unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::flag;

    #[derive(Deserialize)]
    struct Params {
        #[serde(deserialize_with = "flag::deserialize_lenient", default)]
        in_ph: bool,
    }

    fn parse(json: &str) -> bool {
        serde_json::from_str::<Params>(json).unwrap().in_ph
    }

    #[test]
    fn truthy_values() {
        assert!(parse(r#"{"in_ph": "1"}"#));
        assert!(parse(r#"{"in_ph": "TRUE"}"#));
        assert!(parse(r#"{"in_ph": "Yes"}"#));
    }

    #[test]
    fn everything_else_is_false() {
        assert!(!parse(r#"{"in_ph": "0"}"#));
        assert!(!parse(r#"{"in_ph": ""}"#));
        assert!(!parse(r#"{"in_ph": "maybe"}"#));
        assert!(!parse(r#"{"in_ph": null}"#));
        assert!(!parse(r#"{}"#));
    }
}
