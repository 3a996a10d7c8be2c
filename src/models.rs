//! Entities shared between the backend responses and the app context.

use serde::{Deserialize, Serialize};

/// Signed-in user as returned by `/api/get-user-info`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub credits: Option<UserCredits>,
}

impl User {
    /// True when a credits record exists and has nothing left.
    ///
    /// A user without a credits record is not blocked.
    pub fn out_of_credits(&self) -> bool {
        self.credits
            .as_ref()
            .is_some_and(|c| c.left_credits < 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserCredits {
    #[serde(default)]
    pub one_time_credits: i64,
    #[serde(default)]
    pub monthly_credits: i64,
    #[serde(default)]
    pub total_credits: i64,
    #[serde(default)]
    pub used_credits: i64,
    #[serde(default)]
    pub left_credits: i64,
}

/// A generated result. The shape belongs to the backend; only the identity
/// is interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cover(serde_json::Value);

impl Cover {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Cover carried in a response `data` field. Only an object is a cover;
    /// `false`, `""`, `0` and other scalars mean none was returned.
    pub fn from_data(value: serde_json::Value) -> Option<Self> {
        value.is_object().then(|| Self(value))
    }

    /// The `id` (or `uuid`) field, stringified when numeric.
    pub fn id(&self) -> Option<String> {
        let id = self.0.get("id").or_else(|| self.0.get("uuid"))?;
        match id {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_deserializes_partial_credits() {
        let user: User = serde_json::from_value(json!({
            "uuid": "u1",
            "email": "a@b.c",
            "credits": {"left_credits": 4}
        }))
        .unwrap();

        let credits = user.credits.clone().unwrap();
        assert_eq!(credits.left_credits, 4);
        assert_eq!(credits.total_credits, 0);
        assert!(!user.out_of_credits());
    }

    #[test]
    fn test_out_of_credits() {
        let mut user = User {
            credits: Some(UserCredits::default()),
            ..User::default()
        };
        assert!(user.out_of_credits());

        user.credits = None;
        assert!(!user.out_of_credits());
    }

    #[test]
    fn test_cover_id() {
        assert_eq!(Cover::new(json!({"id": "c1"})).id(), Some("c1".to_string()));
        assert_eq!(Cover::new(json!({"id": 7})).id(), Some("7".to_string()));
        assert_eq!(Cover::new(json!({"uuid": "x"})).id(), Some("x".to_string()));
        assert_eq!(Cover::new(json!({"img_url": "x"})).id(), None);
    }

    #[test]
    fn test_from_data_requires_object() {
        assert_eq!(
            Cover::from_data(json!({"id": "c1"})).and_then(|c| c.id()),
            Some("c1".to_string())
        );
        assert!(Cover::from_data(json!({})).is_some());
        for empty in [json!(false), json!(""), json!(0), json!("c1"), json!([{"id": "c1"}])] {
            assert!(Cover::from_data(empty).is_none());
        }
    }

    #[test]
    fn test_cover_is_transparent() {
        let cover: Cover = serde_json::from_value(json!({"id": "c1", "img_url": "u"})).unwrap();
        assert_eq!(serde_json::to_value(&cover).unwrap(), json!({"id": "c1", "img_url": "u"}));
    }
}
