//! Process-wide authentication context
//!
//! The search and translation flows only ever treat identity as a boolean
//! gate plus a display string, so the gate is a narrow trait that tests
//! replace with a stub. `AuthContext` is the in-process session holder
//! behind it, initialized once at startup and alive for the process
//! lifetime.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::PoiMapError;

/// Minimum password length accepted at sign-in, mirroring the identity
/// provider's client-side rule
const MIN_PASSWORD_LEN: usize = 6;

/// The signed-in user as seen by the rest of the application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserIdentity {
    /// Email-like identifier used as the display string
    pub email: String,
}

/// Read-only view of the current authentication state
pub trait IdentityGate: Send + Sync {
    /// The currently signed-in user, if any
    fn current_user(&self) -> Option<UserIdentity>;
}

/// In-process authentication context holding the current session
#[derive(Default)]
pub struct AuthContext {
    current: RwLock<Option<UserIdentity>>,
}

impl AuthContext {
    /// Create a signed-out context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign in with an email and password
    pub fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity, PoiMapError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(PoiMapError::validation("a valid email address is required"));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(PoiMapError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let user = UserIdentity {
            email: email.to_string(),
        };
        *self.current.write().expect("auth lock poisoned") = Some(user.clone());
        info!("Signed in as {}", user.email);
        Ok(user)
    }

    /// Sign up is sign-in with the same local validation; account
    /// creation itself belongs to the external identity provider
    pub fn sign_up(&self, email: &str, password: &str) -> Result<UserIdentity, PoiMapError> {
        self.sign_in(email, password)
    }

    /// Sign out the current user, if any
    pub fn sign_out(&self) {
        let mut current = self.current.write().expect("auth lock poisoned");
        if let Some(user) = current.take() {
            info!("Signed out {}", user.email);
        }
    }
}

impl IdentityGate for AuthContext {
    fn current_user(&self) -> Option<UserIdentity> {
        self.current.read().expect("auth lock poisoned").clone()
    }
}
