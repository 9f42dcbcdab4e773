//! User-related DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stride_core::rules::not_blank;
use stride_core::{User, UserId, UserParticulars};
use utoipa::ToSchema;
use validator::Validate;

/// Request to register a new user.
///
/// `password_hash` is produced upstream; this service stores it as given.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(length(max = 64), custom(function = "not_blank"))]
    pub first_name: String,

    #[validate(length(max = 64), custom(function = "not_blank"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(custom(function = "not_blank"))]
    pub password_hash: String,

    pub token: Option<String>,

    pub refresh_token: Option<String>,
}

/// Request to add to a user's points.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddPointsRequest {
    #[validate(range(min = 1, message = "Points must be positive"))]
    pub points: i64,
}

/// Request to replace any subset of a user's particulars.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateParticularsRequest {
    #[validate(length(min = 1, max = 64))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub last_name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(length(min = 1))]
    pub password_hash: Option<String>,
}

impl From<UpdateParticularsRequest> for UserParticulars {
    fn from(request: UpdateParticularsRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password_hash: request.password_hash,
        }
    }
}

/// Request to set a user's timetable link.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTimetableRequest {
    #[validate(url(message = "Invalid timetable URL"))]
    pub timetable: String,
}

/// Request to store newly issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTokensRequest {
    #[validate(custom(function = "not_blank"))]
    pub token: String,

    #[validate(custom(function = "not_blank"))]
    pub refresh_token: String,
}

/// User response DTO. Credentials and tokens never leave the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub points: i64,
    pub timetable: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            points: user.points,
            timetable: user.timetable,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_core::ValidateExt;

    fn sign_up() -> SignUpRequest {
        SignUpRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            token: None,
            refresh_token: None,
        }
    }

    #[test]
    fn test_sign_up_shape() {
        assert!(sign_up().validate_request().is_ok());

        let bad = SignUpRequest {
            email: "not-an-email".to_string(),
            ..sign_up()
        };
        assert!(bad.validate_request().is_err());

        let blank = SignUpRequest {
            first_name: "   ".to_string(),
            ..sign_up()
        };
        assert!(blank.validate_request().is_err());
    }

    #[test]
    fn test_add_points_must_be_positive() {
        assert!(AddPointsRequest { points: 5 }.validate_request().is_ok());
        assert!(AddPointsRequest { points: 0 }.validate_request().is_err());
    }

    #[test]
    fn test_response_hides_credentials() {
        let mut user = User::new(
            "Ada".to_string(),
            "Lovelace".to_string(),
            "ada@example.com".to_string(),
            "secret-hash".to_string(),
        );
        user.token = Some("token".to_string());

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("token\":"));
    }
}
