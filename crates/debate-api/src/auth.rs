use std::sync::Arc;

use async_trait::async_trait;
use debate_client_core::{ClientError, Principal, SessionStore};
use serde::{Deserialize, Serialize};

use crate::transport::ApiTransport;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const ADMIN_LOGIN_PATH: &str = "/admin/auth/login";
pub const CURRENT_USER_PATH: &str = "/users/me";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub nickname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginRequest {
    pub admin_id: String,
    pub password: String,
}

/// Unwrapped login payload. The user site returns the identity under
/// `user`, the admin console under `admin`; both carry `token`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<Principal>,
    #[serde(default)]
    pub admin: Option<Principal>,
}

impl AuthPayload {
    #[must_use]
    pub fn into_principal(self) -> Option<Principal> {
        self.user.or(self.admin)
    }
}

/// Seam over the authentication endpoints so session flows can run
/// against a mock transport in tests.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ClientError>;
    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ClientError>;
    async fn admin_login(&self, request: &AdminLoginRequest) -> Result<AuthPayload, ClientError>;
    async fn current_user(&self) -> Result<Principal, ClientError>;
}

#[async_trait]
impl AuthTransport for ApiTransport {
    async fn login(&self, request: &LoginRequest) -> Result<AuthPayload, ClientError> {
        self.post_json(LOGIN_PATH, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ClientError> {
        self.post_json(REGISTER_PATH, request).await
    }

    async fn admin_login(&self, request: &AdminLoginRequest) -> Result<AuthPayload, ClientError> {
        self.post_json(ADMIN_LOGIN_PATH, request).await
    }

    async fn current_user(&self) -> Result<Principal, ClientError> {
        self.get_json(CURRENT_USER_PATH).await
    }
}

/// Drives the session store through the authentication endpoints.
pub struct AuthService<T: AuthTransport> {
    transport: T,
    session: Arc<SessionStore>,
}

impl<T: AuthTransport> AuthService<T> {
    #[must_use]
    pub fn new(transport: T, session: Arc<SessionStore>) -> Self {
        Self { transport, session }
    }

    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Principal, ClientError> {
        let request = LoginRequest {
            email: email.into(),
            password: password.into(),
        };
        let payload = self
            .transport
            .login(&request)
            .await
            .map_err(as_auth_error)?;
        self.establish(payload)
    }

    /// Registers and logs the new account in, matching the original
    /// auto-login-on-register behavior.
    pub async fn register(&self, request: RegisterRequest) -> Result<Principal, ClientError> {
        let payload = self
            .transport
            .register(&request)
            .await
            .map_err(as_auth_error)?;
        self.establish(payload)
    }

    pub async fn admin_login(
        &self,
        admin_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Principal, ClientError> {
        let request = AdminLoginRequest {
            admin_id: admin_id.into(),
            password: password.into(),
        };
        let payload = self
            .transport
            .admin_login(&request)
            .await
            .map_err(as_auth_error)?;
        self.establish(payload)
    }

    /// Re-validates the restored session against the server and updates
    /// the cached principal. A failure means the optimistic restore was
    /// wrong, so the session is cleared.
    pub async fn refresh_current_user(&self) -> Result<Principal, ClientError> {
        match self.transport.current_user().await {
            Ok(principal) => {
                self.session.update_principal(principal.clone())?;
                Ok(principal)
            }
            Err(error) => {
                self.session.logout();
                Err(error)
            }
        }
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    fn establish(&self, payload: AuthPayload) -> Result<Principal, ClientError> {
        let Some(token) = payload.token.clone().filter(|token| !token.is_empty()) else {
            return Err(ClientError::auth("login response carried no token"));
        };
        let Some(principal) = payload.into_principal() else {
            return Err(ClientError::auth("login response carried no profile"));
        };
        self.session.establish(token, principal.clone())?;
        Ok(principal)
    }
}

/// An envelope-level rejection during login or register is an auth
/// failure, not a protocol one.
fn as_auth_error(error: ClientError) -> ClientError {
    match error {
        ClientError::Protocol { message } => ClientError::Auth { message },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_client_core::{MemorySessionStore, SessionPhase, unwrap_payload};
    use serde_json::json;

    struct MockTransport {
        response: Result<AuthPayload, ClientError>,
    }

    #[async_trait]
    impl AuthTransport for MockTransport {
        async fn login(&self, _request: &LoginRequest) -> Result<AuthPayload, ClientError> {
            self.response.clone()
        }

        async fn register(&self, _request: &RegisterRequest) -> Result<AuthPayload, ClientError> {
            self.response.clone()
        }

        async fn admin_login(
            &self,
            _request: &AdminLoginRequest,
        ) -> Result<AuthPayload, ClientError> {
            self.response.clone()
        }

        async fn current_user(&self) -> Result<Principal, ClientError> {
            Err(ClientError::network("not wired in this mock"))
        }
    }

    fn session() -> Arc<SessionStore> {
        let store = Arc::new(SessionStore::new(Arc::new(MemorySessionStore::new())));
        store.restore();
        store
    }

    #[tokio::test]
    async fn admin_login_stores_token_and_principal() {
        // The exact wire body the admin console receives.
        let payload: AuthPayload = unwrap_payload(json!({
            "success": true,
            "message": "ok",
            "data": {"token": "T", "admin": {"id": 9, "name": "A"}}
        }))
        .expect("payload");

        let session = session();
        let service = AuthService::new(
            MockTransport {
                response: Ok(payload),
            },
            Arc::clone(&session),
        );

        let principal = service.admin_login("a1", "p1").await.expect("login");
        assert_eq!(principal.id, 9);
        assert_eq!(session.token().as_deref(), Some("T"));
        assert_eq!(session.principal().expect("principal").id, 9);
        assert_eq!(session.phase(), SessionPhase::Authenticated);
    }

    #[tokio::test]
    async fn login_without_token_is_an_auth_error() {
        let payload: AuthPayload = unwrap_payload(json!({
            "success": true,
            "message": "ok",
            "data": {"user": {"id": 3, "nickname": "amy"}}
        }))
        .expect("payload");

        let session = session();
        let service = AuthService::new(
            MockTransport {
                response: Ok(payload),
            },
            Arc::clone(&session),
        );

        let error = service.login("a@b.c", "pw").await.expect_err("no token");
        assert!(matches!(error, ClientError::Auth { .. }));
        assert!(session.token().is_none());
        assert!(session.principal().is_none());
    }

    #[tokio::test]
    async fn envelope_rejection_surfaces_as_auth_error_with_message() {
        let session = session();
        let service = AuthService::new(
            MockTransport {
                response: Err(ClientError::protocol("wrong password")),
            },
            Arc::clone(&session),
        );

        let error = service.login("a@b.c", "pw").await.expect_err("rejected");
        assert_eq!(
            error,
            ClientError::Auth {
                message: "wrong password".to_string()
            }
        );
        assert_eq!(error.display_message(), "wrong password");
    }

    #[tokio::test]
    async fn refresh_failure_clears_the_session() {
        let session = session();
        session
            .establish(
                "T".to_string(),
                serde_json::from_value(json!({"id": 1})).expect("principal"),
            )
            .expect("establish");

        let service = AuthService::new(
            MockTransport {
                response: Err(ClientError::network("unused")),
            },
            Arc::clone(&session),
        );

        let error = service.refresh_current_user().await.expect_err("refresh");
        assert!(matches!(error, ClientError::Network { .. }));
        assert!(session.token().is_none());
        assert_eq!(session.phase(), SessionPhase::Anonymous);
    }
}
