use debate_client_core::ClientError;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::services::debates::DebateSummary;
use crate::services::reports::ReportRecord;
use crate::services::users::UserSummary;
use crate::transport::ApiTransport;

pub const DASHBOARD_STATS_PATH: &str = "/admin/dashboard/stats";
pub const DASHBOARD_RECENT_USERS_PATH: &str = "/admin/dashboard/recent-users";
pub const DASHBOARD_TOP_DEBATES_PATH: &str = "/admin/dashboard/top-debates";
pub const DASHBOARD_PENDING_REPORTS_PATH: &str = "/admin/dashboard/pending-reports";
pub const STATISTICS_USERS_PATH: &str = "/admin/statistics/users";
pub const STATISTICS_DEBATES_PATH: &str = "/admin/statistics/debates";
pub const STATISTICS_USERS_DAILY_PATH: &str = "/admin/statistics/users/daily";
pub const STATISTICS_DEBATES_DAILY_PATH: &str = "/admin/statistics/debates/daily";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: Option<u64>,
    #[serde(default)]
    pub total_debates: Option<u64>,
    #[serde(default)]
    pub total_comments: Option<u64>,
    #[serde(default)]
    pub pending_reports: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Admin console dashboard counters and statistics feeds. Chart series
/// stay untyped; rendering owns their shape.
#[derive(Debug, Clone)]
pub struct DashboardService {
    transport: ApiTransport,
}

impl DashboardService {
    #[must_use]
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn stats(&self) -> Result<DashboardStats, ClientError> {
        self.transport.get_json(DASHBOARD_STATS_PATH).await
    }

    pub async fn recent_users(&self, limit: u32) -> Result<Vec<UserSummary>, ClientError> {
        self.transport
            .get_json_query(DASHBOARD_RECENT_USERS_PATH, &limit_params(limit))
            .await
    }

    pub async fn top_debates(&self, limit: u32) -> Result<Vec<DebateSummary>, ClientError> {
        self.transport
            .get_json_query(DASHBOARD_TOP_DEBATES_PATH, &limit_params(limit))
            .await
    }

    pub async fn pending_reports(&self, limit: u32) -> Result<Vec<ReportRecord>, ClientError> {
        self.transport
            .get_json_query(DASHBOARD_PENDING_REPORTS_PATH, &limit_params(limit))
            .await
    }

    pub async fn user_statistics(&self) -> Result<Value, ClientError> {
        self.transport.get_json(STATISTICS_USERS_PATH).await
    }

    pub async fn debate_statistics(&self) -> Result<Value, ClientError> {
        self.transport.get_json(STATISTICS_DEBATES_PATH).await
    }

    pub async fn daily_user_statistics(&self, days: u32) -> Result<Value, ClientError> {
        self.transport
            .get_json_query(STATISTICS_USERS_DAILY_PATH, &days_params(days))
            .await
    }

    pub async fn daily_debate_statistics(&self, days: u32) -> Result<Value, ClientError> {
        self.transport
            .get_json_query(STATISTICS_DEBATES_DAILY_PATH, &days_params(days))
            .await
    }
}

fn limit_params(limit: u32) -> Vec<(String, String)> {
    vec![("limit".to_string(), limit.to_string())]
}

fn days_params(days: u32) -> Vec<(String, String)> {
    vec![("days".to_string(), days.to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stats_decode_with_partial_counters() {
        let stats: DashboardStats = serde_json::from_value(json!({
            "totalUsers": 120,
            "totalDebates": 34,
            "todayVisitors": 7
        }))
        .expect("stats");

        assert_eq!(stats.total_users, Some(120));
        assert_eq!(stats.pending_reports, None);
        assert_eq!(stats.extra.get("todayVisitors"), Some(&json!(7)));
    }

    #[test]
    fn query_params_are_deterministic() {
        assert_eq!(
            limit_params(5),
            vec![("limit".to_string(), "5".to_string())]
        );
        assert_eq!(days_params(30), vec![("days".to_string(), "30".to_string())]);
    }
}
