//! Auth Context
//!
//! Identity snapshot for one request. Built by the access guard from the
//! freshly loaded credential, never from token contents beyond the login.

use crate::domain::entity::credential::Credential;
use crate::domain::value_object::{user_id::UserId, user_role::Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: UserId,
    pub role: Role,
    pub login: String,
}

impl From<&Credential> for AuthContext {
    fn from(credential: &Credential) -> Self {
        Self {
            user_id: credential.id,
            role: credential.role,
            login: credential.login.clone(),
        }
    }
}
