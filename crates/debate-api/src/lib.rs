//! REST client for the debate platform API: bearer-authenticated
//! transport, envelope-aware decoding, and typed services for the
//! user-site and admin-console endpoint surfaces.

pub mod auth;
pub mod config;
pub mod services;
pub mod transport;

use std::sync::Arc;

use debate_client_core::SessionStore;

pub use auth::{AdminLoginRequest, AuthService, AuthTransport, LoginRequest, RegisterRequest};
pub use config::{ApiClientConfig, ConfigError, DEFAULT_API_BASE_URL, ENV_API_BASE_URL};
pub use transport::ApiTransport;

use services::{
    AdminManagementService, CategoryService, CommentService, DashboardService, DebateService,
    ReportService, UploadService, UserService,
};

/// Entry point bundling one transport with every endpoint service.
#[derive(Debug, Clone)]
pub struct DebateClient {
    transport: ApiTransport,
}

impl DebateClient {
    #[must_use]
    pub fn new(config: &ApiClientConfig, session: Arc<SessionStore>) -> Self {
        Self {
            transport: ApiTransport::new(config, session),
        }
    }

    pub fn from_env(session: Arc<SessionStore>) -> Result<Self, ConfigError> {
        Ok(Self::new(&ApiClientConfig::from_env()?, session))
    }

    #[must_use]
    pub fn transport(&self) -> &ApiTransport {
        &self.transport
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        self.transport.session()
    }

    #[must_use]
    pub fn auth(&self) -> AuthService<ApiTransport> {
        AuthService::new(self.transport.clone(), Arc::clone(self.transport.session()))
    }

    #[must_use]
    pub fn users(&self) -> UserService {
        UserService::new(self.transport.clone())
    }

    #[must_use]
    pub fn categories(&self) -> CategoryService {
        CategoryService::new(self.transport.clone())
    }

    #[must_use]
    pub fn debates(&self) -> DebateService {
        DebateService::new(self.transport.clone())
    }

    #[must_use]
    pub fn comments(&self) -> CommentService {
        CommentService::new(self.transport.clone())
    }

    #[must_use]
    pub fn reports(&self) -> ReportService {
        ReportService::new(self.transport.clone())
    }

    #[must_use]
    pub fn admins(&self) -> AdminManagementService {
        AdminManagementService::new(self.transport.clone())
    }

    #[must_use]
    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.transport.clone())
    }

    #[must_use]
    pub fn uploads(&self) -> UploadService {
        UploadService::new(self.transport.clone())
    }
}
