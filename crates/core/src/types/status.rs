//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Order status as reported by the backend.
///
/// This is a closed set: an order with an unrecognized status string fails
/// deserialization instead of being coerced into a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Completed,
    Pending,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Pending => write!(f, "pending"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_lowercase() {
        let status: OrderStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, OrderStatus::Completed);
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        assert!(serde_json::from_str::<OrderStatus>("\"shipped\"").is_err());
        assert!(serde_json::from_str::<OrderStatus>("\"COMPLETED\"").is_err());
    }

    #[test]
    fn test_display_matches_wire_format() {
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
        let parsed: OrderStatus = "cancelled".parse().unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
    }
}
