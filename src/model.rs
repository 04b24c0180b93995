//! The `User` record and the contracts derived from it.

use crate::validation::{validate_fields, Presence, Validate, ValidationError, USER_FIELDS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// A stored user as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 1,
    "email": "john@doe.com",
    "firstName": "John",
    "lastName": "Doe",
    "createdAt": "2025-01-01T00:00:00.000Z",
    "updatedAt": "2025-01-01T00:00:00.000Z"
}))]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a create request. Server-generated fields are not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({ "email": "john@doe.com", "firstName": "John", "lastName": "Doe" }))]
pub struct NewUser {
    #[schema(format = "email")]
    pub email: String,
    #[schema(min_length = 1)]
    pub first_name: String,
    #[schema(min_length = 1)]
    pub last_name: String,
}

/// Body of an update request: any subset of the create fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({ "lastName": "Done" }))]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "email")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(min_length = 1)]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(min_length = 1)]
    pub last_name: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.first_name.is_none() && self.last_name.is_none()
    }
}

impl Validate for NewUser {
    fn validate(body: &Value) -> Result<Self, ValidationError> {
        let mut fields = validate_fields(body, &USER_FIELDS, Presence::Required)?;
        Ok(NewUser {
            email: fields.remove("email").unwrap_or_default(),
            first_name: fields.remove("firstName").unwrap_or_default(),
            last_name: fields.remove("lastName").unwrap_or_default(),
        })
    }
}

impl Validate for UserPatch {
    fn validate(body: &Value) -> Result<Self, ValidationError> {
        let mut fields = validate_fields(body, &USER_FIELDS, Presence::Optional)?;
        Ok(UserPatch {
            email: fields.remove("email"),
            first_name: fields.remove("firstName"),
            last_name: fields.remove("lastName"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn user_serializes_camel_case() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let user = User {
            id: 7,
            email: "john@doe.com".into(),
            first_name: "John".into(),
            last_name: "Doe".into(),
            created_at: at,
            updated_at: at,
        };
        let v = serde_json::to_value(&user).unwrap();
        assert_eq!(v["id"], 7);
        assert_eq!(v["firstName"], "John");
        assert_eq!(v["lastName"], "Doe");
        assert_eq!(v["createdAt"], "2025-01-02T03:04:05Z");
        assert!(v.get("first_name").is_none());
    }

    #[test]
    fn new_user_from_valid_body() {
        let user = NewUser::validate(&json!({
            "email": "john@doe.com",
            "firstName": "John",
            "lastName": "Doe",
            "id": 99
        }))
        .unwrap();
        assert_eq!(user.email, "john@doe.com");
        assert_eq!(user.first_name, "John");
        assert_eq!(user.last_name, "Doe");
    }

    #[test]
    fn patch_keeps_only_supplied_fields() {
        let patch = UserPatch::validate(&json!({ "lastName": "Done" })).unwrap();
        assert_eq!(patch.last_name.as_deref(), Some("Done"));
        assert!(patch.email.is_none() && patch.first_name.is_none());
        assert!(!patch.is_empty());

        assert!(UserPatch::validate(&json!({})).unwrap().is_empty());
        assert!(UserPatch::validate(&json!({ "unknown": 1 })).unwrap().is_empty());
    }
}
