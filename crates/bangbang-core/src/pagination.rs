use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// Query-string integer where an empty value (`?limit=`) means absent.
///
/// Needed for fields inside `#[serde(flatten)]` structs, where values arrive as strings.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Query-string pagination. Empty values (`?limit=`) are treated as absent.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_LIMIT),
            offset: Some(0),
        }
    }
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit_or(DEFAULT_LIMIT, MAX_LIMIT)
    }

    /// Limit clamped to `1..=max`, falling back to `default` when absent.
    pub fn limit_or(&self, default: i64, max: i64) -> i64 {
        self.limit.unwrap_or(default).clamp(1, max)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params_default() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_pagination_params_custom_values() {
        let params = PaginationParams {
            limit: Some(20),
            offset: Some(40),
        };
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn test_pagination_params_limit_boundaries() {
        let zero = PaginationParams {
            limit: Some(0),
            offset: None,
        };
        assert_eq!(zero.limit(), 1);

        let huge = PaginationParams {
            limit: Some(150),
            offset: None,
        };
        assert_eq!(huge.limit(), 100);

        let negative = PaginationParams {
            limit: Some(-10),
            offset: Some(-5),
        };
        assert_eq!(negative.limit(), 1);
        assert_eq!(negative.offset(), 0);
    }

    #[test]
    fn test_limit_or_uses_custom_default_and_max() {
        let params = PaginationParams {
            limit: None,
            offset: None,
        };
        assert_eq!(params.limit_or(50, 200), 50);

        let params = PaginationParams {
            limit: Some(500),
            offset: None,
        };
        assert_eq!(params.limit_or(50, 200), 200);
    }

    #[test]
    fn test_empty_query_values_are_ignored() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"limit":"","offset":"30"}"#).unwrap();
        assert_eq!(params.limit, None);
        assert_eq!(params.offset(), 30);
    }

    #[test]
    fn test_non_numeric_limit_is_rejected() {
        let result = serde_json::from_str::<PaginationParams>(r#"{"limit":"ten"}"#);
        assert!(result.is_err());
    }
}
