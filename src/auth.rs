//! Mirror of the backend login state.
//!
//! The status is fetched on first use and cached until [`AuthMirror::refresh`]
//! is called (after login or logout). A failed check counts as logged out.

use crate::api::ApiClient;
use crate::constants::AUTH_STATUS_PATH;
use crate::error::ApiResult;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Logged-in user as reported by the backend
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub is_admin: bool,
    /// Remaining profile fields, kept opaque
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
}

/// Payload of `GET /auth/status`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthStatus {
    pub logged_in: bool,
    #[serde(default)]
    pub user: Option<User>,
}

impl AuthStatus {
    pub fn logged_out() -> Self {
        Self::default()
    }

    pub fn logged_in_as(user: User) -> Self {
        Self {
            logged_in: true,
            user: Some(user),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.logged_in && self.user.as_ref().is_some_and(|u| u.is_admin)
    }
}

/// Where the login state comes from
pub trait AuthStatusSource: Send + Sync {
    fn fetch_status(&self) -> ApiResult<AuthStatus>;
}

impl AuthStatusSource for ApiClient {
    fn fetch_status(&self) -> ApiResult<AuthStatus> {
        self.get_json(AUTH_STATUS_PATH)
    }
}

/// Cached login state
pub struct AuthMirror {
    source: Box<dyn AuthStatusSource>,
    status: RwLock<Option<AuthStatus>>,
}

impl std::fmt::Debug for AuthMirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthMirror")
            .field("status", &*self.status.read())
            .finish()
    }
}

impl AuthMirror {
    pub fn new(source: impl AuthStatusSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            status: RwLock::new(None),
        }
    }

    /// Current status, fetching it the first time
    pub fn status(&self) -> AuthStatus {
        if let Some(status) = self.status.read().as_ref() {
            return status.clone();
        }
        self.refresh()
    }

    /// Re-check the backend and replace the cached status
    pub fn refresh(&self) -> AuthStatus {
        let status = match self.source.fetch_status() {
            Ok(status) if status.logged_in => status,
            Ok(_) => AuthStatus::logged_out(),
            Err(e) => {
                tracing::warn!("Not authenticated: {}", e);
                AuthStatus::logged_out()
            }
        };
        tracing::info!(logged_in = status.logged_in, admin = status.is_admin(), "Auth status updated");
        *self.status.write() = Some(status.clone());
        status
    }

    /// Cached status without triggering a fetch
    pub fn cached(&self) -> Option<AuthStatus> {
        self.status.read().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.status().logged_in
    }

    /// Drop the cached status so the next read fetches again
    pub fn invalidate(&self) {
        *self.status.write() = None;
    }
}
