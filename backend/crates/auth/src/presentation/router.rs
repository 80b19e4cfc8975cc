//! Auth Router

use axum::{
    Router,
    handler::Handler,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use platform::clock::{Clock, SystemClock};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::policy::RoleRequirement;
use crate::domain::repository::{CredentialStore, ProfileStore};
use crate::domain::value_object::user_role::Role;
use crate::infra::postgres::PgCredentialStore;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_role;

/// Moderators see anyone; users see themselves
pub const VIEW_USER: RoleRequirement = RoleRequirement::at_least_or_self(Role::MODERATOR);
/// Moderators only; nobody unblocks themselves
pub const BLOCK_USER: RoleRequirement = RoleRequirement::at_least(Role::MODERATOR);
/// Admins delete anyone; users may delete themselves
pub const DELETE_USER: RoleRequirement = RoleRequirement::at_least_or_self(Role::ADMIN);
/// Any signed-in user
pub const VIEW_PROFILE: RoleRequirement = RoleRequirement::at_least(Role::USER);
/// Every role already meets USER, so the self exemption never narrows this
pub const EDIT_PROFILE: RoleRequirement = RoleRequirement::at_least_or_self(Role::USER);

/// Create the Auth router with PostgreSQL credential store
pub fn auth_router(store: PgCredentialStore, config: &AuthConfig) -> Router {
    auth_router_generic(store, config, Arc::new(SystemClock))
}

/// Create a generic Auth router for any credential and profile store
pub fn auth_router_generic<S>(store: S, config: &AuthConfig, clock: Arc<dyn Clock>) -> Router
where
    S: CredentialStore + ProfileStore + Clone + Send + Sync + 'static,
{
    let state = AuthAppState::new(store, config, clock);

    Router::new()
        .route("/registration", post(handlers::register::<S>))
        .route("/authentication", post(handlers::login::<S>))
        .route("/authentication/token", post(handlers::refresh_token::<S>))
        .route(
            "/users/{user_id}",
            get(handlers::get_user::<S>
                .layer(from_fn_with_state(state.guard(VIEW_USER), require_role::<S>)))
            .patch(
                handlers::block_user::<S>
                    .layer(from_fn_with_state(state.guard(BLOCK_USER), require_role::<S>)),
            )
            .delete(
                handlers::delete_user::<S>
                    .layer(from_fn_with_state(state.guard(DELETE_USER), require_role::<S>)),
            ),
        )
        .route(
            "/users/{user_id}/profile",
            get(handlers::get_profile::<S>
                .layer(from_fn_with_state(state.guard(VIEW_PROFILE), require_role::<S>)))
            .patch(
                handlers::update_profile::<S>
                    .layer(from_fn_with_state(state.guard(EDIT_PROFILE), require_role::<S>)),
            ),
        )
        .with_state(state)
}
