use crate::domain::entities::AuthUser;
use crate::domain::gateways::AuthGateway;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-memory login session.
pub struct SessionAuth {
    user: Mutex<Option<AuthUser>>,
}

impl SessionAuth {
    pub fn anonymous() -> Self {
        Self {
            user: Mutex::new(None),
        }
    }

    fn user_slot(&self) -> MutexGuard<'_, Option<AuthUser>> {
        self.user.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn login(&self, user: AuthUser) {
        tracing::info!("Logged in as {}", user.username);
        *self.user_slot() = Some(user);
    }

    pub fn logout(&self) {
        if let Some(user) = self.user_slot().take() {
            tracing::info!("Logged out {}", user.username);
        }
    }
}

impl Default for SessionAuth {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl AuthGateway for SessionAuth {
    fn is_logged_in(&self) -> bool {
        self.user_slot().is_some()
    }

    fn user(&self) -> Option<AuthUser> {
        self.user_slot().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserRight;

    #[test]
    fn test_login_logout() {
        let session = SessionAuth::anonymous();
        assert!(!session.is_logged_in());
        assert!(session.user().is_none());

        session.login(AuthUser::new("alice".to_string()).with_right(UserRight::SeeAllVideos));
        assert!(session.is_logged_in());
        assert!(session.user().unwrap().has_right(UserRight::SeeAllVideos));

        session.logout();
        assert!(!session.is_logged_in());
    }
}
