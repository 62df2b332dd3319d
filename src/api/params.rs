use std::collections::HashMap;

use crate::api::error::ApiError;

/// A bounded integer query parameter with a textual default.
#[derive(Debug, Clone, Copy)]
pub struct IntParam {
    pub name: &'static str,
    pub default: &'static str,
    pub min: i64,
}

pub const COMPUTE_N: IntParam = IntParam {
    name: "n",
    default: "10000",
    min: 2,
};

pub const PAYLOAD_SIZE: IntParam = IntParam {
    name: "size",
    default: "100",
    min: 1,
};

impl IntParam {
    /// Parses the raw value, or the default when the key is absent.
    ///
    /// Surrounding whitespace and a leading sign are accepted; an empty
    /// value, anything non-numeric and anything below `min` is rejected.
    pub fn parse(&self, raw: Option<&str>) -> Result<u64, ApiError> {
        let text = raw.unwrap_or(self.default).trim();
        match text.parse::<i64>() {
            Ok(value) if value >= self.min => {
                u64::try_from(value).map_err(|_| ApiError::InvalidParameter(self.name))
            }
            _ => Err(ApiError::InvalidParameter(self.name)),
        }
    }

    pub fn from_query(&self, query: &HashMap<String, String>) -> Result<u64, ApiError> {
        self.parse(query.get(self.name).map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        assert_eq!(COMPUTE_N.parse(None), Ok(10_000));
        assert_eq!(PAYLOAD_SIZE.parse(None), Ok(100));
    }

    #[test]
    fn test_accepts_valid_values() {
        assert_eq!(COMPUTE_N.parse(Some("2")), Ok(2));
        assert_eq!(COMPUTE_N.parse(Some(" 42 ")), Ok(42));
        assert_eq!(COMPUTE_N.parse(Some("+17")), Ok(17));
        assert_eq!(PAYLOAD_SIZE.parse(Some("1")), Ok(1));
    }

    #[test]
    fn test_rejects_below_minimum() {
        assert_eq!(COMPUTE_N.parse(Some("1")), Err(ApiError::InvalidParameter("n")));
        assert_eq!(COMPUTE_N.parse(Some("-5")), Err(ApiError::InvalidParameter("n")));
        assert_eq!(PAYLOAD_SIZE.parse(Some("0")), Err(ApiError::InvalidParameter("size")));
    }

    #[test]
    fn test_rejects_non_integers() {
        for raw in ["abc", "", "  ", "3.5", "1e3", "0x10", "99999999999999999999"] {
            assert_eq!(
                COMPUTE_N.parse(Some(raw)),
                Err(ApiError::InvalidParameter("n")),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_from_query() {
        let mut query = HashMap::new();
        assert_eq!(PAYLOAD_SIZE.from_query(&query), Ok(100));
        query.insert("size".to_string(), "3".to_string());
        assert_eq!(PAYLOAD_SIZE.from_query(&query), Ok(3));
        query.insert("other".to_string(), "x".to_string());
        assert_eq!(PAYLOAD_SIZE.from_query(&query), Ok(3));
    }
}
