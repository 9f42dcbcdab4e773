//! User service trait definition.

use crate::dto::{
    AddPointsRequest, SignUpRequest, UpdateParticularsRequest, UpdateTimetableRequest,
    UpdateTokensRequest, UserResponse,
};
use async_trait::async_trait;
use stride_core::{Interface, StrideResult, UserId};

/// User service trait.
///
/// Reads marked "cached" go through the cache; the `_uncached` variants read
/// the primary store directly. Every mutation writes the store first and then
/// syncs the cache.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Registers a new user with zero points.
    async fn sign_up(&self, request: SignUpRequest) -> StrideResult<UserResponse>;

    /// Gets a user by ID (cached).
    async fn get_user(&self, id: &UserId) -> StrideResult<UserResponse>;

    /// Gets a user by ID straight from the primary store.
    async fn get_user_uncached(&self, id: &UserId) -> StrideResult<UserResponse>;

    /// All users ranked by points, straight from the primary store.
    async fn list_users_uncached(&self) -> StrideResult<Vec<UserResponse>>;

    /// All users ranked by points (cached).
    async fn leaderboard(&self) -> StrideResult<Vec<UserResponse>>;

    /// Adds to a user's points.
    async fn add_points(&self, id: &UserId, request: AddPointsRequest) -> StrideResult<UserResponse>;

    /// Replaces any subset of a user's particulars.
    async fn update_particulars(
        &self,
        id: &UserId,
        request: UpdateParticularsRequest,
    ) -> StrideResult<UserResponse>;

    /// Sets a user's timetable link.
    async fn update_timetable(
        &self,
        id: &UserId,
        request: UpdateTimetableRequest,
    ) -> StrideResult<UserResponse>;

    /// Stores newly issued tokens.
    async fn update_tokens(&self, id: &UserId, request: UpdateTokensRequest) -> StrideResult<()>;

    /// Deletes a user.
    async fn delete_user(&self, id: &UserId) -> StrideResult<()>;
}
