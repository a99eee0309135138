use debate_client_core::{ClientError, ListQuery, PageResponse, Principal};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::transport::ApiTransport;

pub const ADMIN_USERS_PATH: &str = "/admin/users";
pub const PROFILE_PATH: &str = "/users/me";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Member administration plus the signed-in user's own profile.
#[derive(Debug, Clone)]
pub struct UserService {
    transport: ApiTransport,
}

impl UserService {
    #[must_use]
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn admin_user_path(id: i64) -> String {
        format!("/admin/users/{id}")
    }

    #[must_use]
    pub fn admin_user_status_path(id: i64) -> String {
        format!("/admin/users/{id}/status")
    }

    #[must_use]
    pub fn public_profile_path(id: i64) -> String {
        format!("/users/{id}")
    }

    pub async fn list(
        &self,
        query: &ListQuery<UserSummary>,
    ) -> Result<PageResponse<UserSummary>, ClientError> {
        self.transport
            .get_json_query(ADMIN_USERS_PATH, &query.request_params())
            .await
    }

    pub async fn detail(&self, id: i64) -> Result<UserSummary, ClientError> {
        self.transport.get_json(&Self::admin_user_path(id)).await
    }

    pub async fn update_status(&self, id: i64, status: &str) -> Result<Value, ClientError> {
        self.transport
            .put_query(
                &Self::admin_user_status_path(id),
                &[("status".to_string(), status.to_string())],
            )
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<Value, ClientError> {
        self.transport.delete_json(&Self::admin_user_path(id)).await
    }

    pub async fn public_profile(&self, id: i64) -> Result<Principal, ClientError> {
        self.transport
            .get_json(&Self::public_profile_path(id))
            .await
    }

    /// Updates the signed-in user's own profile. Only provided fields are
    /// sent.
    pub async fn update_profile(
        &self,
        nickname: Option<&str>,
        bio: Option<&str>,
        profile_image: Option<&str>,
    ) -> Result<Principal, ClientError> {
        let mut params = Vec::new();
        if let Some(nickname) = nickname {
            params.push(("nickname".to_string(), nickname.to_string()));
        }
        if let Some(bio) = bio {
            params.push(("bio".to_string(), bio.to_string()));
        }
        if let Some(profile_image) = profile_image {
            params.push(("profileImage".to_string(), profile_image.to_string()));
        }
        self.transport.put_query(PROFILE_PATH, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_helpers_are_deterministic() {
        assert_eq!(UserService::admin_user_path(42), "/admin/users/42");
        assert_eq!(
            UserService::admin_user_status_path(42),
            "/admin/users/42/status"
        );
        assert_eq!(UserService::public_profile_path(7), "/users/7");
    }

    #[test]
    fn summary_decodes_with_passthrough_fields() {
        let summary: UserSummary = serde_json::from_value(json!({
            "id": 3,
            "email": "amy@example.com",
            "nickname": "amy",
            "status": "ACTIVE",
            "debateCount": 12
        }))
        .expect("summary");

        assert_eq!(summary.id, 3);
        assert_eq!(summary.status.as_deref(), Some("ACTIVE"));
        assert_eq!(summary.extra.get("debateCount"), Some(&json!(12)));
    }

    #[test]
    fn paged_user_list_decodes() {
        let page: PageResponse<UserSummary> = serde_json::from_value(json!({
            "content": [{"id": 1, "nickname": "a"}, {"id": 2, "nickname": "b"}],
            "totalPages": 3,
            "totalElements": 55
        }))
        .expect("page");

        match page {
            PageResponse::Paged {
                content,
                total_pages,
                total_elements,
            } => {
                assert_eq!(content.len(), 2);
                assert_eq!(total_pages, 3);
                assert_eq!(total_elements, 55);
            }
            PageResponse::Bare(_) => panic!("expected paged shape"),
        }
    }
}
