//! Auth session

use crate::client::{ApiClient, AuthResponse};
use crate::domain::aggregates::UserProfile;
use crate::storage::{DurableStore, TOKEN_KEY, USER_KEY};
use crate::Result;
use std::sync::Arc;

/// Current credential token and user profile. Persisted to durable storage
/// on login/registration, rehydrated at session start, destroyed on logout.
pub struct AuthSession {
    api: Arc<ApiClient>,
    store: Arc<DurableStore>,
    token: Option<String>,
    user: Option<UserProfile>,
}

impl AuthSession {
    /// Rehydrates any persisted session from the durable store.
    pub fn new(api: Arc<ApiClient>, store: Arc<DurableStore>) -> Self {
        let token = store.get::<String>(TOKEN_KEY);
        let user = store.get::<UserProfile>(USER_KEY);
        Self {
            api,
            store,
            token,
            user,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// Gates admin views; unauthenticated and non-admin sessions both fail.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map_or(false, |u| u.role.is_admin())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserProfile> {
        let auth = self.api.login(email, password).await?;
        self.apply(auth)
    }

    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> Result<UserProfile> {
        let auth = self.api.register(name, email, password).await?;
        self.apply(auth)
    }

    fn apply(&mut self, auth: AuthResponse) -> Result<UserProfile> {
        self.store.set(TOKEN_KEY, &auth.token)?;
        self.store.set(USER_KEY, &auth.user)?;
        self.token = Some(auth.token);
        self.user = Some(auth.user.clone());
        Ok(auth.user)
    }

    /// Clears in-memory and durable state unconditionally. Storage faults
    /// are logged; the in-memory session is gone regardless.
    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.store.remove(key) {
                tracing::warn!(key, error = %err, "failed to remove stored session key");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::{NotificationPrefs, Role};
    use std::time::Duration;

    fn api() -> Arc<ApiClient> {
        Arc::new(ApiClient::new("http://localhost:5000", Duration::from_secs(1)).unwrap())
    }

    fn profile(role: Role) -> UserProfile {
        UserProfile {
            id: "u1".into(),
            name: "John Doe".into(),
            email: "john@example.com".into(),
            avatar: String::new(),
            role,
            notifications: NotificationPrefs::default(),
        }
    }

    #[test]
    fn test_rehydrates_persisted_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(DurableStore::open(Some(dir.path().to_path_buf())).unwrap());
        store.set(TOKEN_KEY, &"jwt-abc".to_string()).unwrap();
        store.set(USER_KEY, &profile(Role::Admin)).unwrap();

        let session = AuthSession::new(api(), store);
        assert!(session.is_authenticated());
        assert!(session.is_admin());
        assert_eq!(session.token(), Some("jwt-abc"));
    }

    #[test]
    fn test_logout_removes_both_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(DurableStore::open(Some(dir.path().to_path_buf())).unwrap());
        store.set(TOKEN_KEY, &"jwt-abc".to_string()).unwrap();
        store.set(USER_KEY, &profile(Role::User)).unwrap();

        let mut session = AuthSession::new(api(), store.clone());
        session.logout();
        assert!(!session.is_authenticated());
        assert!(!store.contains(TOKEN_KEY));
        assert!(!store.contains(USER_KEY));

        // A fresh session over the same directory starts unauthenticated.
        let reloaded = AuthSession::new(api(), store);
        assert!(!reloaded.is_authenticated());
    }

    #[test]
    fn test_plain_user_is_not_admin() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(DurableStore::open(Some(dir.path().to_path_buf())).unwrap());
        store.set(TOKEN_KEY, &"jwt-abc".to_string()).unwrap();
        store.set(USER_KEY, &profile(Role::User)).unwrap();
        assert!(!AuthSession::new(api(), store).is_admin());
    }
}
