use super::Backend;
use crate::error::{ApiError, ApiResult};
use crate::latency;
use crate::models::{User, UserProfile};
use crate::store::Stored;

/// Login, signup and logout against the users collection.
pub struct Auth<'a> {
    backend: &'a Backend,
}

impl<'a> Auth<'a> {
    pub(super) fn new(backend: &'a Backend) -> Self {
        Self { backend }
    }

    /// Signs in with an exact email and plaintext password match.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<UserProfile> {
        self.backend.pause(latency::AUTH).await;

        let users = self.backend.load::<User>().await?;
        let user = users
            .into_iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or_else(|| {
                tracing::info!("Login rejected for {}", email);
                ApiError::InvalidCredentials
            })?;

        let profile = user.record.profile();
        self.backend
            .session
            .begin(profile.clone())
            .map_err(ApiError::Session)?;

        tracing::info!("Logged in as {}", profile.email);
        Ok(profile)
    }

    /// Registers a new account and signs it in.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> ApiResult<UserProfile> {
        self.backend.pause(latency::AUTH).await;

        let created = self
            .backend
            .insert_if(|users: &[Stored<User>]| {
                if users.iter().any(|u| u.email == email) {
                    return None;
                }
                let next_id = users.iter().map(|u| u.record.id).max().unwrap_or(0) + 1;
                Some(User::new(next_id, name, email, password))
            })
            .await?
            .ok_or_else(|| {
                tracing::info!("Signup rejected, {} is taken", email);
                ApiError::EmailInUse
            })?;

        let profile = created.record.profile();
        self.backend
            .session
            .begin(profile.clone())
            .map_err(ApiError::Session)?;

        tracing::info!("Signed up {} as user {}", profile.email, profile.id);
        Ok(profile)
    }

    /// Ends the session. Always succeeds.
    pub async fn logout(&self) {
        self.backend.pause(latency::LOGOUT).await;

        if let Err(e) = self.backend.session.end() {
            tracing::warn!("Failed to clear session marker: {}", e);
        }
        tracing::info!("Logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.backend.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.backend.session.current_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::recorded;
    use crate::seed::{DEMO_EMAIL, DEMO_PASSWORD};
    use crate::store::Collection;

    #[tokio::test]
    async fn test_login_with_demo_user() {
        let (backend, _kv) = recorded().await;
        let auth = backend.auth();

        let user = auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

        assert_eq!(
            user,
            UserProfile {
                id: 1,
                email: "demo@genaifit.com".into(),
                name: "Demo User".into(),
            }
        );
        assert!(auth.is_authenticated());
        assert_eq!(auth.current_user(), Some(user));
    }

    #[tokio::test]
    async fn test_login_invalid_credentials() {
        let (backend, _kv) = recorded().await;
        let auth = backend.auth();

        let err = auth.login("wrong@x.com", "bad").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_wrong_password_for_known_email() {
        let (backend, _kv) = recorded().await;
        let auth = backend.auth();

        let result = auth.login(DEMO_EMAIL, "Password123").await;
        assert!(matches!(result, Err(ApiError::InvalidCredentials)));
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_existing_session() {
        let (backend, _kv) = recorded().await;
        let auth = backend.auth();

        auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        assert!(auth.login("wrong@x.com", "bad").await.is_err());

        assert!(auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_signup_creates_user_and_session() {
        let (backend, _kv) = recorded().await;
        let auth = backend.auth();

        let user = auth
            .signup("Ann Runner", "ann@example.com", "secret")
            .await
            .unwrap();

        assert_eq!(user.id, 2);
        assert_eq!(user.email, "ann@example.com");
        assert_eq!(user.name, "Ann Runner");
        assert!(auth.is_authenticated());

        let users = backend.store().get_collection(Collection::Users).await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["email"], "ann@example.com");

        // The new account can log in after logging out
        auth.logout().await;
        assert!(auth.login("ann@example.com", "secret").await.is_ok());
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let (backend, _kv) = recorded().await;
        let auth = backend.auth();

        let err = auth
            .signup("Someone", DEMO_EMAIL, "other")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Email already in use");
        assert!(!auth.is_authenticated());

        let users = backend.store().get_collection(Collection::Users).await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (backend, kv) = recorded().await;
        let auth = backend.auth();

        auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        auth.logout().await;

        assert!(!auth.is_authenticated());
        assert!(auth.current_user().is_none());
        assert!(kv.touched().contains(&"auth_token".to_string()));
    }

    #[tokio::test]
    async fn test_logout_when_anonymous_succeeds() {
        let (backend, _kv) = recorded().await;
        backend.auth().logout().await;
        assert!(!backend.auth().is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_auth_and_store_latency() {
        use crate::latency::TokioDelay;
        use crate::store::MemoryStore;
        use std::sync::Arc;

        let backend = Backend::new(Arc::new(MemoryStore::new()), Arc::new(TokioDelay));
        crate::seed::seed_demo_data(backend.store()).await.unwrap();

        let start = tokio::time::Instant::now();
        backend.auth().login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

        assert!(start.elapsed() >= latency::AUTH + latency::STORE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_signups_with_one_email() {
        use crate::latency::TokioDelay;
        use crate::store::MemoryStore;
        use std::sync::Arc;

        let backend = Backend::new(Arc::new(MemoryStore::new()), Arc::new(TokioDelay));
        crate::seed::seed_demo_data(backend.store()).await.unwrap();
        let auth = backend.auth();

        let (first, second) = futures::join!(
            auth.signup("Ann", "ann@example.com", "one"),
            auth.signup("Ann Again", "ann@example.com", "two"),
        );

        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(ApiError::EmailInUse))));

        let users = backend.store().get_collection(Collection::Users).await.unwrap();
        assert_eq!(users.len(), 2);
        let ids: Vec<_> = users.iter().map(|u| u["id"].as_u64().unwrap()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_login_fails_when_session_cannot_be_stored() {
        use crate::api::test_support::SessionlessStore;
        use crate::latency::NoDelay;
        use std::sync::Arc;

        let backend = Backend::new(Arc::new(SessionlessStore::default()), Arc::new(NoDelay));
        crate::seed::seed_demo_data(backend.store()).await.unwrap();

        let err = backend
            .auth()
            .login(DEMO_EMAIL, DEMO_PASSWORD)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Session(_)));
        assert_eq!(err.to_string(), "Failed to update session");
        assert!(!backend.auth().is_authenticated());
    }
}
