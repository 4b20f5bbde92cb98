//! User-related DTOs for API requests and responses.

use crate::models::{Gender, NewUser, Seniority, UpdateUser, User};
use jiff_diesel::DateTime;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new user.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 255, message = "First name must be between 1 and 255 characters"))]
    #[schema(min_length = 1, max_length = 255, example = "Rick")]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "Last name must be between 1 and 255 characters"))]
    #[schema(min_length = 1, max_length = 255, example = "Sanchez")]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email", example = "rick@citadel.io")]
    pub email: String,
    pub gender: Gender,
    pub seniority: Seniority,
    pub experience: Option<String>,
}

impl CreateUserRequest {
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            gender: self.gender,
            seniority: self.seniority,
            experience: self.experience,
        }
    }
}

/// Request body for updating a user. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255, message = "First name must be between 1 and 255 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Last name must be between 1 and 255 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub seniority: Option<Seniority>,
    /// `null` clears the stored value; omit the key to keep it.
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, nullable)]
    pub experience: Option<Option<String>>,
}

/// Tells an explicit `null` (`Some(None)`) apart from a missing key (`None`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateUserRequest {
    pub fn into_update_user(self) -> UpdateUser {
        UpdateUser {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            gender: self.gender,
            seniority: self.seniority,
            experience: self.experience,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Gender,
    pub seniority: Seniority,
    pub experience: Option<String>,
    #[schema(example = "2024-01-01T12:00:00.000Z")]
    pub created_at: String,
    #[schema(example = "2024-01-01T12:00:00.000Z")]
    pub updated_at: String,
}

fn format_timestamp(value: DateTime) -> String {
    let dt = value.to_jiff();
    format!(
        "{}.{:03}Z",
        dt.strftime("%Y-%m-%dT%H:%M:%S"),
        dt.millisecond()
    )
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            gender: user.gender,
            seniority: user.seniority,
            experience: user.experience,
            created_at: format_timestamp(user.created_at),
            updated_at: format_timestamp(user.updated_at),
        }
    }
}
