//! User service implementation.

use crate::cache::{CacheInterface, CachePolicy, EntityCache, EntityKind, ListCache, View};
use crate::coordinator::MutationCoordinator;
use crate::dto::{
    AddPointsRequest, SignUpRequest, UpdateParticularsRequest, UpdateTimetableRequest,
    UpdateTokensRequest, UserResponse,
};
use crate::user_service::UserService;
use async_trait::async_trait;
use std::sync::Arc;
use stride_core::{
    StrideError, StrideResult, User, UserId, UserParticulars, UserUpdate, ValidateExt,
};
use stride_repository::UserRepository;
use tracing::{debug, info};

/// Cache-aside user service.
pub struct UserServiceImpl {
    users: Arc<dyn UserRepository>,
    entities: EntityCache,
    lists: ListCache,
    coordinator: MutationCoordinator,
}

impl UserServiceImpl {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        cache: Arc<dyn CacheInterface>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            users,
            entities: EntityCache::new(cache.clone(), policy.clone()),
            lists: ListCache::new(cache.clone(), policy.clone()),
            coordinator: MutationCoordinator::new(cache, policy),
        }
    }

    async fn cached_user(&self, id: &UserId) -> StrideResult<User> {
        self.entities
            .get(EntityKind::User, id.as_str(), || self.users.find_by_id(id))
            .await?
            .ok_or_else(|| StrideError::not_found("User", id))
    }

    /// Writes `update` to the store, then syncs the cache with the stored row.
    async fn update(&self, id: &UserId, update: UserUpdate) -> StrideResult<User> {
        let user = self
            .users
            .apply(id, &update)
            .await?
            .ok_or_else(|| StrideError::not_found("User", id))?;

        self.coordinator.user_updated(&user).await;
        Ok(user)
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn sign_up(&self, request: SignUpRequest) -> StrideResult<UserResponse> {
        debug!("Signing up user: {}", request.email);

        request.validate_request()?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(StrideError::conflict(format!(
                "Email '{}' already exists",
                request.email
            )));
        }

        let mut user = User::new(
            request.first_name,
            request.last_name,
            request.email,
            request.password_hash,
        );
        user.token = request.token;
        user.refresh_token = request.refresh_token;

        let saved = self.users.insert(&user).await?;
        self.coordinator.user_created(&saved).await;

        info!("User signed up: {}", saved.id);
        Ok(UserResponse::from(saved))
    }

    async fn get_user(&self, id: &UserId) -> StrideResult<UserResponse> {
        debug!("Getting user: {}", id);
        self.cached_user(id).await.map(UserResponse::from)
    }

    async fn get_user_uncached(&self, id: &UserId) -> StrideResult<UserResponse> {
        debug!("Getting user from store: {}", id);

        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| StrideError::not_found("User", id))?;

        Ok(UserResponse::from(user))
    }

    async fn list_users_uncached(&self) -> StrideResult<Vec<UserResponse>> {
        debug!("Listing users from store");

        let users = self.users.find_ranked().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn leaderboard(&self) -> StrideResult<Vec<UserResponse>> {
        debug!("Getting leaderboard");

        let users: Vec<User> = self
            .lists
            .get_list(&View::AllUsers, |_| self.users.find_ranked())
            .await?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn add_points(&self, id: &UserId, request: AddPointsRequest) -> StrideResult<UserResponse> {
        debug!("Adding {} points to user: {}", request.points, id);

        request.validate_request()?;

        let user = self.update(id, UserUpdate::AddPoints(request.points)).await?;

        info!("User {} now has {} points", id, user.points);
        Ok(UserResponse::from(user))
    }

    async fn update_particulars(
        &self,
        id: &UserId,
        request: UpdateParticularsRequest,
    ) -> StrideResult<UserResponse> {
        debug!("Updating particulars for user: {}", id);

        request.validate_request()?;

        let particulars = UserParticulars::from(request);
        if particulars.is_empty() {
            return Err(StrideError::validation("No particulars to update"));
        }

        let user = self.update(id, UserUpdate::Particulars(particulars)).await?;

        info!("User particulars updated: {}", id);
        Ok(UserResponse::from(user))
    }

    async fn update_timetable(
        &self,
        id: &UserId,
        request: UpdateTimetableRequest,
    ) -> StrideResult<UserResponse> {
        debug!("Updating timetable for user: {}", id);

        request.validate_request()?;

        let user = self.update(id, UserUpdate::Timetable(request.timetable)).await?;

        info!("User timetable updated: {}", id);
        Ok(UserResponse::from(user))
    }

    async fn update_tokens(&self, id: &UserId, request: UpdateTokensRequest) -> StrideResult<()> {
        debug!("Updating tokens for user: {}", id);

        request.validate_request()?;

        self.update(
            id,
            UserUpdate::Tokens {
                token: request.token,
                refresh_token: request.refresh_token,
            },
        )
        .await?;

        info!("User tokens updated: {}", id);
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> StrideResult<()> {
        debug!("Deleting user: {}", id);

        if !self.users.delete(id).await? {
            return Err(StrideError::not_found("User", id));
        }

        self.coordinator.user_deleted(id).await;

        info!("User deleted: {}", id);
        Ok(())
    }
}
