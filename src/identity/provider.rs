//! Identity provider port and a fixed-identity adapter.

use super::UserId;
use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use tracing::warn;

/// Source of the currently signed-in user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the signed-in user, or `None` when nobody is signed in.
    async fn current_user(&self) -> Option<UserId>;
}

/// Identity provider holding a settable user.
///
/// Clones share the same session.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    user: Arc<RwLock<Option<UserId>>>,
}

impl StaticIdentityProvider {
    /// Creates a provider with nobody signed in.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Creates a provider with the given user signed in.
    #[must_use]
    pub fn signed_in(user: UserId) -> Self {
        Self {
            user: Arc::new(RwLock::new(Some(user))),
        }
    }

    /// Replaces the signed-in user.
    pub fn sign_in(&self, user: UserId) {
        *self.session() = Some(user);
    }

    /// Signs the current user out.
    pub fn sign_out(&self) {
        *self.session() = None;
    }

    fn session(&self) -> RwLockWriteGuard<'_, Option<UserId>> {
        self.user.write().unwrap_or_else(|poisoned| {
            warn!("identity session lock poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_user(&self) -> Option<UserId> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
