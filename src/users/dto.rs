use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sign-in payload. The Firebase UID is an opaque external identifier;
/// the same UID always resolves to the same stored user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUserRequest {
    pub firebase_uid: String,
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub firebase_uid: String,
    pub email: String,
    pub display_name: String,
}

impl From<crate::users::repo::User> for UserResponse {
    fn from(u: crate::users::repo::User) -> Self {
        Self {
            id: u.id,
            firebase_uid: u.firebase_uid,
            email: u.email,
            display_name: u.display_name,
        }
    }
}
