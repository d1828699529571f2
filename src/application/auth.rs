use std::sync::Arc;

use crate::domain::dashboard::DashboardStats;
use crate::domain::errors::DomainError;
use crate::domain::ports::{AdminApi, Credentials};
use crate::session::Session;

pub struct AuthService<A: ?Sized> {
    api: Arc<A>,
    session: Session,
}

impl<A: AdminApi + ?Sized> AuthService<A> {
    pub fn new(api: Arc<A>, session: Session) -> Self {
        Self { api, session }
    }

    /// Exchange credentials for a token and keep it for later requests.
    /// Any failure leaves the previous session untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), DomainError> {
        match self.api.login(credentials).await {
            Ok(token) => {
                self.session.set_token(token);
                log::info!("Operator {} logged in", credentials.username);
                Ok(())
            }
            Err(e) => {
                log::warn!("Login failed for {}: {}", credentials.username, e);
                Err(match e {
                    DomainError::Unauthorized | DomainError::NotFound(_) => {
                        DomainError::InvalidCredentials
                    }
                    other => other,
                })
            }
        }
    }

    pub fn logout(&self) {
        self.session.clear();
        log::info!("Operator logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub async fn dashboard(&self) -> Result<DashboardStats, DomainError> {
        self.api.dashboard_stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fake_api::FakeApi;

    fn creds(password: &str) -> Credentials {
        Credentials {
            username: "admin".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn login_stores_token_and_logout_clears_it() {
        let session = Session::new();
        let auth = AuthService::new(Arc::new(FakeApi::default()), session.clone());

        auth.login(&creds("secret")).await.expect("login failed");
        assert_eq!(session.token().as_deref(), Some("token-admin"));

        auth.logout();
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn bad_credentials_are_reported_and_keep_session() {
        let session = Session::with_token("old");
        let auth = AuthService::new(Arc::new(FakeApi::default()), session.clone());

        let err = auth.login(&creds("wrong")).await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidCredentials));
        assert_eq!(session.token().as_deref(), Some("old"));
    }
}
