//! User entity.

use crate::{Entity, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
///
/// The cache stores full snapshots of this struct, credential hash and tokens
/// included, so every field round-trips through serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// User's first name.
    pub first_name: String,

    /// User's last name.
    pub last_name: String,

    /// User's email address.
    pub email: String,

    /// Credential hash produced by the authentication layer.
    pub password_hash: String,

    /// Accumulated score.
    pub points: i64,

    /// External timetable link.
    pub timetable: Option<String>,

    /// Last issued access token.
    pub token: Option<String>,

    /// Last issued refresh token.
    pub refresh_token: Option<String>,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with zero points.
    #[must_use]
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            first_name,
            last_name,
            email,
            password_hash,
            points: 0,
            timetable: None,
            token: None,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the user's full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Applies a field-level update in place.
    pub fn apply(&mut self, update: &UserUpdate) {
        match update {
            UserUpdate::AddPoints(delta) => self.points += delta,
            UserUpdate::Particulars(particulars) => {
                if let Some(first_name) = &particulars.first_name {
                    self.first_name.clone_from(first_name);
                }
                if let Some(last_name) = &particulars.last_name {
                    self.last_name.clone_from(last_name);
                }
                if let Some(email) = &particulars.email {
                    self.email.clone_from(email);
                }
                if let Some(password_hash) = &particulars.password_hash {
                    self.password_hash.clone_from(password_hash);
                }
            }
            UserUpdate::Timetable(link) => self.timetable = Some(link.clone()),
            UserUpdate::Tokens {
                token,
                refresh_token,
            } => {
                self.token = Some(token.clone());
                self.refresh_token = Some(refresh_token.clone());
            }
        }
        self.updated_at = Utc::now();
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }
}

/// Optional replacements for a user's particulars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserParticulars {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserParticulars {
    /// Returns true when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
    }
}

/// A field-level update applied to one user in the primary store.
#[derive(Debug, Clone, PartialEq)]
pub enum UserUpdate {
    /// Increment points by the given amount.
    AddPoints(i64),
    /// Replace any subset of the user's particulars.
    Particulars(UserParticulars),
    /// Set the timetable link.
    Timetable(String),
    /// Replace the issued tokens.
    Tokens { token: String, refresh_token: String },
}

/// Orders users for the leaderboard: points descending, ties by id.
pub fn rank_users(users: &mut [User]) {
    users.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.id.cmp(&b.id)));
}
