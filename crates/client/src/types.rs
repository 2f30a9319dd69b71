//! Request and response envelopes that only exist on the wire.

use serde::{Deserialize, Serialize};

/// `{"items": [...]}` list envelope used by the catalog endpoints.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ItemsEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// `{"meals": [...]}` envelope of the monthly summary report.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MealsEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub meals: Vec<T>,
}

/// FastAPI-style error body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub detail: serde_json::Value,
}

impl ApiErrorResponse {
    /// Human-readable message; validation errors carry a list instead of a string.
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Result of serving several portions of one meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServeOutcome {
    pub meal_id: i64,
    /// Portions the caller asked for
    pub requested: u32,
    /// Portions the backend accepted
    pub served: u32,
}

impl ServeOutcome {
    pub fn is_complete(&self) -> bool {
        self.served == self.requested
    }

    pub fn failed(&self) -> u32 {
        self.requested - self.served
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_string() {
        let body: ApiErrorResponse =
            serde_json::from_str(r#"{"detail":"Username already registered"}"#).unwrap();
        assert_eq!(body.message(), "Username already registered");
    }

    #[test]
    fn test_error_detail_list() {
        let body: ApiErrorResponse =
            serde_json::from_str(r#"{"detail":[{"loc":["body","phone"],"msg":"too short"}]}"#)
                .unwrap();
        assert!(body.message().contains("too short"));
    }

    #[test]
    fn test_items_envelope_tolerates_missing_items() {
        let env: ItemsEnvelope<i64> = serde_json::from_str("{}").unwrap();
        assert!(env.items.is_empty());
    }

    #[test]
    fn test_serve_outcome() {
        let partial = ServeOutcome {
            meal_id: 1,
            requested: 5,
            served: 3,
        };
        assert!(!partial.is_complete());
        assert_eq!(partial.failed(), 2);
    }
}
