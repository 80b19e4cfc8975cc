//! Auth Middleware
//!
//! Per-route role guard. Each protected handler gets its own
//! [`GuardState`] carrying the rule it enforces.

use axum::extract::{RawPathParams, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::application::guard::AccessGuard;
use crate::domain::policy::RoleRequirement;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthError;

/// Path parameter naming the account a route acts on
pub const TARGET_PARAM: &str = "user_id";

/// Middleware state
#[derive(Clone)]
pub struct GuardState<S>
where
    S: CredentialStore + Clone + Send + Sync + 'static,
{
    pub guard: AccessGuard<S>,
    pub requirement: RoleRequirement,
}

/// Middleware that requires a valid access token and a sufficient role.
///
/// On success the caller's `AuthContext` is available to the handler as an
/// `Extension`.
pub async fn require_role<S>(
    State(state): State<GuardState<S>>,
    params: RawPathParams,
    headers: HeaderMap,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    S: CredentialStore + Clone + Send + Sync + 'static,
{
    let target = params
        .iter()
        .find(|(key, _)| *key == TARGET_PARAM)
        .and_then(|(_, value)| value.parse::<UserId>().ok());

    let ctx = state
        .guard
        .guard(&headers, state.requirement, target.as_ref())
        .await?;

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}
