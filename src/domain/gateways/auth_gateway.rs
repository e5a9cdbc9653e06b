use crate::domain::entities::AuthUser;

pub trait AuthGateway: Send + Sync {
    fn is_logged_in(&self) -> bool;

    fn user(&self) -> Option<AuthUser>;
}
