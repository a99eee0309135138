use debate_client_core::{ClientError, ListQuery, PageResponse};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::transport::ApiTransport;

pub const ADMIN_COMMENTS_PATH: &str = "/admin/comments";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub id: i64,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author_nickname: Option<String>,
    #[serde(default)]
    pub debate_id: Option<i64>,
    #[serde(default)]
    pub is_hidden: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct CommentService {
    transport: ApiTransport,
}

impl CommentService {
    #[must_use]
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn admin_comment_path(id: i64) -> String {
        format!("/admin/comments/{id}")
    }

    #[must_use]
    pub fn admin_comment_toggle_hidden_path(id: i64) -> String {
        format!("/admin/comments/{id}/toggle-hidden")
    }

    pub async fn list(
        &self,
        query: &ListQuery<CommentRecord>,
    ) -> Result<PageResponse<CommentRecord>, ClientError> {
        self.transport
            .get_json_query(ADMIN_COMMENTS_PATH, &query.request_params())
            .await
    }

    pub async fn detail(&self, id: i64) -> Result<CommentRecord, ClientError> {
        self.transport.get_json(&Self::admin_comment_path(id)).await
    }

    pub async fn toggle_hidden(&self, id: i64) -> Result<Value, ClientError> {
        self.transport
            .put_empty(&Self::admin_comment_toggle_hidden_path(id))
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<Value, ClientError> {
        self.transport
            .delete_json(&Self::admin_comment_path(id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_helpers_are_deterministic() {
        assert_eq!(CommentService::admin_comment_path(8), "/admin/comments/8");
        assert_eq!(
            CommentService::admin_comment_toggle_hidden_path(8),
            "/admin/comments/8/toggle-hidden"
        );
    }

    #[test]
    fn record_decodes_hidden_flag() {
        let comment: CommentRecord = serde_json::from_value(json!({
            "id": 8,
            "content": "strongly disagree",
            "authorNickname": "bo",
            "isHidden": true
        }))
        .expect("comment");

        assert_eq!(comment.is_hidden, Some(true));
        assert_eq!(comment.author_nickname.as_deref(), Some("bo"));
    }
}
