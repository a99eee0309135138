use debate_client_core::{ClientError, ListQuery, PageResponse};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::transport::ApiTransport;

pub const REPORTS_PATH: &str = "/reports";
pub const ADMIN_REPORTS_PATH: &str = "/admin/reports";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub id: i64,
    #[serde(default)]
    pub target_type: Option<String>,
    #[serde(default)]
    pub target_id: Option<i64>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reporter_nickname: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// End-user report submission body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub target_type: String,
    pub target_id: i64,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ReportService {
    transport: ApiTransport,
}

impl ReportService {
    #[must_use]
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn admin_report_path(id: i64) -> String {
        format!("/admin/reports/{id}")
    }

    #[must_use]
    pub fn admin_report_process_path(id: i64) -> String {
        format!("/admin/reports/{id}/process")
    }

    pub async fn submit(&self, report: &NewReport) -> Result<Value, ClientError> {
        self.transport.post_json(REPORTS_PATH, report).await
    }

    pub async fn list(
        &self,
        query: &ListQuery<ReportRecord>,
    ) -> Result<PageResponse<ReportRecord>, ClientError> {
        self.transport
            .get_json_query(ADMIN_REPORTS_PATH, &query.request_params())
            .await
    }

    pub async fn detail(&self, id: i64) -> Result<ReportRecord, ClientError> {
        self.transport.get_json(&Self::admin_report_path(id)).await
    }

    pub async fn process(&self, id: i64, status: &str) -> Result<Value, ClientError> {
        self.transport
            .put_query(
                &Self::admin_report_process_path(id),
                &[("status".to_string(), status.to_string())],
            )
            .await
    }
}
