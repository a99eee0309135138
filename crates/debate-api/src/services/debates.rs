use debate_client_core::{ClientError, ListQuery, PageResponse};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::transport::ApiTransport;

pub const DEBATES_PATH: &str = "/debates";
pub const DEBATES_SEARCH_PATH: &str = "/debates/search";
// Singular resource segment, as the backend routes the admin side.
pub const ADMIN_DEBATES_PATH: &str = "/admin/debate";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateSummary {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_hidden: Option<bool>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Editable fields of a debate topic; absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebateUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DebateUpdate {
    fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(title) = &self.title {
            params.push(("title".to_string(), title.clone()));
        }
        if let Some(content) = &self.content {
            params.push(("content".to_string(), content.clone()));
        }
        if let Some(start_date) = &self.start_date {
            params.push(("startDate".to_string(), start_date.clone()));
        }
        if let Some(end_date) = &self.end_date {
            params.push(("endDate".to_string(), end_date.clone()));
        }
        params
    }
}

#[derive(Debug, Clone)]
pub struct DebateService {
    transport: ApiTransport,
}

impl DebateService {
    #[must_use]
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn debate_path(id: i64) -> String {
        format!("/debates/{id}")
    }

    #[must_use]
    pub fn category_debates_path(category_id: i64) -> String {
        format!("/categories/{category_id}/debates")
    }

    #[must_use]
    pub fn admin_debate_path(id: i64) -> String {
        format!("/admin/debate/{id}")
    }

    #[must_use]
    pub fn admin_debate_status_path(id: i64) -> String {
        format!("/admin/debate/{id}/status")
    }

    #[must_use]
    pub fn admin_debate_toggle_hidden_path(id: i64) -> String {
        format!("/admin/debate/{id}/toggle-hidden")
    }

    /// Public debate feed, newest first as the backend orders it.
    pub async fn list_all(
        &self,
        page: u64,
        size: u64,
    ) -> Result<PageResponse<DebateSummary>, ClientError> {
        self.transport
            .get_json_query(DEBATES_PATH, &paging_params(page, size))
            .await
    }

    pub async fn list_by_category(
        &self,
        category_id: i64,
        page: u64,
        size: u64,
    ) -> Result<PageResponse<DebateSummary>, ClientError> {
        self.transport
            .get_json_query(
                &Self::category_debates_path(category_id),
                &paging_params(page, size),
            )
            .await
    }

    pub async fn search(
        &self,
        keyword: &str,
        page: u64,
        size: u64,
    ) -> Result<PageResponse<DebateSummary>, ClientError> {
        self.transport
            .get_json_query(DEBATES_SEARCH_PATH, &search_params(keyword, page, size))
            .await
    }

    pub async fn public_detail(&self, id: i64) -> Result<DebateSummary, ClientError> {
        self.transport.get_json(&Self::debate_path(id)).await
    }

    pub async fn list(
        &self,
        query: &ListQuery<DebateSummary>,
    ) -> Result<PageResponse<DebateSummary>, ClientError> {
        self.transport
            .get_json_query(ADMIN_DEBATES_PATH, &query.request_params())
            .await
    }

    pub async fn detail(&self, id: i64) -> Result<DebateSummary, ClientError> {
        self.transport.get_json(&Self::admin_debate_path(id)).await
    }

    pub async fn update(&self, id: i64, update: &DebateUpdate) -> Result<Value, ClientError> {
        self.transport
            .put_query(&Self::admin_debate_path(id), &update.params())
            .await
    }

    pub async fn update_status(&self, id: i64, status: &str) -> Result<Value, ClientError> {
        self.transport
            .put_query(
                &Self::admin_debate_status_path(id),
                &[("status".to_string(), status.to_string())],
            )
            .await
    }

    pub async fn toggle_hidden(&self, id: i64) -> Result<Value, ClientError> {
        self.transport
            .put_empty(&Self::admin_debate_toggle_hidden_path(id))
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<Value, ClientError> {
        self.transport
            .delete_json(&Self::admin_debate_path(id))
            .await
    }
}

fn paging_params(page: u64, size: u64) -> Vec<(String, String)> {
    vec![
        ("page".to_string(), page.to_string()),
        ("size".to_string(), size.to_string()),
    ]
}

fn search_params(keyword: &str, page: u64, size: u64) -> Vec<(String, String)> {
    let mut params = vec![("keyword".to_string(), keyword.to_string())];
    params.extend(paging_params(page, size));
    params
}
