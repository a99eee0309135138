use debate_client_core::{ClientError, PageResponse};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::transport::ApiTransport;

pub const CATEGORIES_PATH: &str = "/categories";
pub const ADMIN_CATEGORIES_PATH: &str = "/admin/categories";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order_num: Option<i64>,
    #[serde(default)]
    pub debate_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct CategoryService {
    transport: ApiTransport,
}

impl CategoryService {
    #[must_use]
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn category_path(id: i64) -> String {
        format!("/categories/{id}")
    }

    #[must_use]
    pub fn admin_category_path(id: i64) -> String {
        format!("/admin/categories/{id}")
    }

    /// Public listing. The endpoint historically returned a bare array;
    /// the page shape is accepted too.
    pub async fn list(&self) -> Result<PageResponse<Category>, ClientError> {
        self.transport.get_json(CATEGORIES_PATH).await
    }

    pub async fn detail(&self, id: i64) -> Result<Category, ClientError> {
        self.transport.get_json(&Self::category_path(id)).await
    }

    pub async fn admin_list(&self) -> Result<PageResponse<Category>, ClientError> {
        self.transport.get_json(ADMIN_CATEGORIES_PATH).await
    }

    pub async fn admin_detail(&self, id: i64) -> Result<Category, ClientError> {
        self.transport
            .get_json(&Self::admin_category_path(id))
            .await
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        order_num: Option<i64>,
    ) -> Result<Category, ClientError> {
        self.transport
            .post_query(
                ADMIN_CATEGORIES_PATH,
                &category_params(name, description, order_num),
            )
            .await
    }

    pub async fn update(
        &self,
        id: i64,
        name: &str,
        description: Option<&str>,
        order_num: Option<i64>,
    ) -> Result<Category, ClientError> {
        self.transport
            .put_query(
                &Self::admin_category_path(id),
                &category_params(name, description, order_num),
            )
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<Value, ClientError> {
        self.transport
            .delete_json(&Self::admin_category_path(id))
            .await
    }
}

fn category_params(
    name: &str,
    description: Option<&str>,
    order_num: Option<i64>,
) -> Vec<(String, String)> {
    let mut params = vec![("name".to_string(), name.to_string())];
    if let Some(description) = description {
        params.push(("description".to_string(), description.to_string()));
    }
    if let Some(order_num) = order_num {
        params.push(("orderNum".to_string(), order_num.to_string()));
    }
    params
}
