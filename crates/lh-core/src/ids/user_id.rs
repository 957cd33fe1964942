use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Server-assigned account identifier.
///
/// Only ever produced by the account backend; the client never invents one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl_id!(UserId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_from_str() {
        let id: UserId = "u-42".into();
        assert_eq!(id.as_str(), "u-42");
        assert_eq!(id.to_string(), "u-42");
    }

    #[test]
    fn user_id_serializes_as_plain_string() {
        let id = UserId::new("abc".to_string());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
