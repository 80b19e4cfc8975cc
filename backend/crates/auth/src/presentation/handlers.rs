//! HTTP Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Form, Json};
use std::sync::Arc;

use platform::clock::Clock;
use platform::password::{ClearTextPassword, PasswordHasher};

use crate::application::config::AuthConfig;
use crate::application::guard::AccessGuard;
use crate::application::token::TokenCodec;
use crate::application::{
    LoginInput, LoginUseCase, ProfileUpdate, ProfileUseCase, RefreshTokenUseCase,
    RegisterUseCase, RegistrationInput, UserAdminUseCase,
};
use crate::domain::entity::auth_context::AuthContext;
use crate::domain::policy::RoleRequirement;
use crate::domain::repository::{CredentialStore, ProfileStore};
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;
use crate::presentation::dto::{
    BlockUserRequest, LoginForm, LoginResponse, ProfileResponse, RefreshTokenRequest,
    RefreshTokenResponse, RegistrationRequest, RegistrationResponse, UpdateProfileRequest,
    UserResponse,
};
use crate::presentation::middleware::GuardState;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<S>
where
    S: CredentialStore + ProfileStore + Clone + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub codec: Arc<TokenCodec>,
    pub hasher: Arc<PasswordHasher>,
    pub clock: Arc<dyn Clock>,
}

impl<S> AuthAppState<S>
where
    S: CredentialStore + ProfileStore + Clone + Send + Sync + 'static,
{
    pub fn new(store: S, config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(store),
            codec: Arc::new(TokenCodec::new(config, Arc::clone(&clock))),
            hasher: Arc::new(PasswordHasher::new()),
            clock,
        }
    }

    /// Middleware state enforcing `requirement`
    pub fn guard(&self, requirement: RoleRequirement) -> GuardState<S> {
        GuardState {
            guard: AccessGuard::new(self.store.clone(), self.codec.clone()),
            requirement,
        }
    }
}

// ============================================================================
// Registration
// ============================================================================

/// POST /registration
pub async fn register<S>(
    State(state): State<AuthAppState<S>>,
    Json(req): Json<RegistrationRequest>,
) -> AuthResult<(StatusCode, Json<RegistrationResponse>)>
where
    S: CredentialStore + ProfileStore + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.store.clone(), state.hasher.clone());

    let user_id = use_case
        .execute(RegistrationInput {
            login: req.login,
            email: req.email,
            password: req.password,
            role: req.role,
            first_name: req.first_name,
            second_name: req.second_name,
            last_name: req.last_name,
            birth_date: req.birth_date,
            about: req.about,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(RegistrationResponse { user_id })))
}

// ============================================================================
// Authentication
// ============================================================================

/// POST /authentication
pub async fn login<S>(
    State(state): State<AuthAppState<S>>,
    Form(form): Form<LoginForm>,
) -> AuthResult<Json<LoginResponse>>
where
    S: CredentialStore + ProfileStore + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.store.clone(),
        state.codec.clone(),
        state.hasher.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            username: form.username,
            password: ClearTextPassword::new(form.password),
        })
        .await?;

    Ok(Json(LoginResponse {
        access_token: output.access_token,
        refresh_token: output.refresh_token,
        user_id: output.user_id,
        login: output.login,
        role: output.role,
    }))
}

/// POST /authentication/token
pub async fn refresh_token<S>(
    State(state): State<AuthAppState<S>>,
    Json(req): Json<RefreshTokenRequest>,
) -> AuthResult<Json<RefreshTokenResponse>>
where
    S: CredentialStore + ProfileStore + Clone + Send + Sync + 'static,
{
    let use_case = RefreshTokenUseCase::new(state.store.clone(), state.codec.clone());
    let output = use_case.execute(req.refresh_token).await?;

    Ok(Json(RefreshTokenResponse {
        access_token: output.access_token,
        refresh_token: output.refresh_token,
    }))
}

// ============================================================================
// Users
// ============================================================================

/// GET /users/{user_id}
pub async fn get_user<S>(
    State(state): State<AuthAppState<S>>,
    Path(user_id): Path<UserId>,
) -> AuthResult<Json<UserResponse>>
where
    S: CredentialStore + ProfileStore + Clone + Send + Sync + 'static,
{
    let use_case = UserAdminUseCase::new(state.store.clone(), state.clock.clone());
    let credential = use_case.get(&user_id).await?;
    Ok(Json(credential.into()))
}

/// PATCH /users/{user_id}
pub async fn block_user<S>(
    State(state): State<AuthAppState<S>>,
    Extension(actor): Extension<AuthContext>,
    Path(user_id): Path<UserId>,
    Json(req): Json<BlockUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    S: CredentialStore + ProfileStore + Clone + Send + Sync + 'static,
{
    tracing::debug!(actor = %actor.user_id, target_id = %user_id, blocked = req.blocked, "Block request");

    let use_case = UserAdminUseCase::new(state.store.clone(), state.clock.clone());
    let credential = use_case.set_blocked(&user_id, req.blocked).await?;
    Ok(Json(credential.into()))
}

/// DELETE /users/{user_id}
pub async fn delete_user<S>(
    State(state): State<AuthAppState<S>>,
    Extension(actor): Extension<AuthContext>,
    Path(user_id): Path<UserId>,
) -> AuthResult<StatusCode>
where
    S: CredentialStore + ProfileStore + Clone + Send + Sync + 'static,
{
    tracing::debug!(actor = %actor.user_id, target_id = %user_id, "Delete request");

    let use_case = UserAdminUseCase::new(state.store.clone(), state.clock.clone());
    use_case.delete(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Profiles
// ============================================================================

/// GET /users/{user_id}/profile
pub async fn get_profile<S>(
    State(state): State<AuthAppState<S>>,
    Path(user_id): Path<UserId>,
) -> AuthResult<Json<ProfileResponse>>
where
    S: CredentialStore + ProfileStore + Clone + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.store.clone());
    let profile = use_case.get(&user_id).await?;
    Ok(Json(profile.into()))
}

/// PATCH /users/{user_id}/profile
pub async fn update_profile<S>(
    State(state): State<AuthAppState<S>>,
    Extension(actor): Extension<AuthContext>,
    Path(user_id): Path<UserId>,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<Json<ProfileResponse>>
where
    S: CredentialStore + ProfileStore + Clone + Send + Sync + 'static,
{
    tracing::debug!(actor = %actor.user_id, target_id = %user_id, "Profile update request");

    let use_case = ProfileUseCase::new(state.store.clone());
    let profile = use_case
        .update(
            &user_id,
            ProfileUpdate {
                first_name: req.first_name,
                second_name: req.second_name,
                last_name: req.last_name,
                birth_date: req.birth_date,
                about: req.about,
            },
        )
        .await?;
    Ok(Json(profile.into()))
}
