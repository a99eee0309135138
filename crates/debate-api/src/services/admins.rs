use debate_client_core::{ClientError, PageResponse};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::transport::ApiTransport;

pub const ADMIN_ACCOUNTS_PATH: &str = "/admin/admins";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccount {
    pub id: i64,
    #[serde(default)]
    pub admin_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub admin_id: String,
    pub password: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Administrator account management (admin console settings page).
#[derive(Debug, Clone)]
pub struct AdminManagementService {
    transport: ApiTransport,
}

impl AdminManagementService {
    #[must_use]
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn admin_account_path(id: i64) -> String {
        format!("/admin/admins/{id}")
    }

    #[must_use]
    pub fn admin_account_password_path(id: i64) -> String {
        format!("/admin/admins/{id}/password")
    }

    pub async fn list(&self) -> Result<PageResponse<AdminAccount>, ClientError> {
        self.transport.get_json(ADMIN_ACCOUNTS_PATH).await
    }

    pub async fn detail(&self, id: i64) -> Result<AdminAccount, ClientError> {
        self.transport.get_json(&Self::admin_account_path(id)).await
    }

    pub async fn create(&self, request: &CreateAdminRequest) -> Result<AdminAccount, ClientError> {
        self.transport.post_json(ADMIN_ACCOUNTS_PATH, request).await
    }

    pub async fn update(
        &self,
        id: i64,
        name: Option<&str>,
        role: Option<&str>,
    ) -> Result<Value, ClientError> {
        let mut params = Vec::new();
        if let Some(name) = name {
            params.push(("name".to_string(), name.to_string()));
        }
        if let Some(role) = role {
            params.push(("role".to_string(), role.to_string()));
        }
        self.transport
            .put_query(&Self::admin_account_path(id), &params)
            .await
    }

    pub async fn update_password(&self, id: i64, password: &str) -> Result<Value, ClientError> {
        self.transport
            .put_query(
                &Self::admin_account_password_path(id),
                &[("password".to_string(), password.to_string())],
            )
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<Value, ClientError> {
        self.transport
            .delete_json(&Self::admin_account_path(id))
            .await
    }
}
