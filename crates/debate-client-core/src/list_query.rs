use std::collections::BTreeMap;

use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Monotonic handle tying one fetch to the controller state that issued
/// it. Responses carrying a ticket older than the newest applied one are
/// discarded, so a slow early request can never overwrite newer results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Server page payload: either the paged shape
/// `{content, totalPages, totalElements}` or a bare array from the
/// legacy non-paginated endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PageResponse<T> {
    Paged {
        content: Vec<T>,
        #[serde(rename = "totalPages")]
        total_pages: u64,
        #[serde(rename = "totalElements")]
        total_elements: u64,
    },
    Bare(Vec<T>),
}

/// Filter, page, and result state for one paginated collection view.
#[derive(Debug, Clone)]
pub struct ListQuery<T> {
    keyword: String,
    filters: BTreeMap<String, String>,
    page: u64,
    page_size: u64,
    total_pages: u64,
    total_elements: u64,
    items: Vec<T>,
    issued: u64,
    applied: u64,
}

impl<T> Default for ListQuery<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListQuery<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    #[must_use]
    pub fn with_page_size(page_size: u64) -> Self {
        Self {
            keyword: String::new(),
            filters: BTreeMap::new(),
            page: 0,
            page_size: page_size.max(1),
            total_pages: 0,
            total_elements: 0,
            items: Vec::new(),
            issued: 0,
            applied: 0,
        }
    }

    /// Changing the keyword resets to the first page; the caller is
    /// expected to re-fetch.
    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
        self.page = 0;
    }

    /// Changing any filter resets to the first page.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.filters.insert(key.into(), value.into());
        self.page = 0;
    }

    pub fn clear_filter(&mut self, key: &str) {
        if self.filters.remove(key).is_some() {
            self.page = 0;
        }
    }

    /// Moves to page `n` only when the target exists. Out-of-range
    /// requests are ignored rather than clamped, mirroring a pagination
    /// control whose arrows are disabled at the edges.
    pub fn set_page(&mut self, n: u64) {
        if n < self.total_pages {
            self.page = n;
        }
    }

    /// Changing the window size restarts from the first page.
    pub fn set_page_size(&mut self, page_size: u64) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    /// Query parameters for the next fetch: keyword (when non-empty),
    /// filters in key order, then page and size. Empty filter values are
    /// skipped the way the original client skipped undefined params.
    #[must_use]
    pub fn request_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 3);
        if !self.keyword.is_empty() {
            params.push(("keyword".to_string(), self.keyword.clone()));
        }
        for (key, value) in &self.filters {
            if !value.is_empty() {
                params.push((key.clone(), value.clone()));
            }
        }
        params.push(("page".to_string(), self.page.to_string()));
        params.push(("size".to_string(), self.page_size.to_string()));
        params
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Applies a fetched page. Returns false and leaves all state
    /// untouched when the ticket is stale. A failed fetch simply never
    /// reaches this point, so the last good items stay displayed.
    pub fn apply_result(&mut self, ticket: FetchTicket, response: PageResponse<T>) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.applied = ticket.0;
        match response {
            PageResponse::Paged {
                content,
                total_pages,
                total_elements,
            } => {
                self.items = content;
                self.total_pages = total_pages;
                self.total_elements = total_elements;
            }
            PageResponse::Bare(items) => {
                self.total_elements = items.len() as u64;
                self.total_pages = 1;
                self.items = items;
            }
        }
        // Keep page < total_pages once a total is known, e.g. after a
        // delete empties the last page.
        if self.total_pages > 0 && self.page >= self.total_pages {
            self.page = self.total_pages - 1;
        }
        true
    }

    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    #[must_use]
    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    #[must_use]
    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn paged(ids: &[i64], total_pages: u64, total_elements: u64) -> PageResponse<Value> {
        PageResponse::Paged {
            content: ids.iter().map(|id| json!({"id": id})).collect(),
            total_pages,
            total_elements,
        }
    }

    #[test]
    fn filter_change_resets_page() {
        let mut query = ListQuery::<Value>::new();
        query.set_filter("status", "ACTIVE");
        let ticket = query.begin_fetch();
        query.apply_result(ticket, paged(&[1], 5, 93));

        query.set_page(2);
        assert_eq!(query.page(), 2);

        query.set_filter("status", "SUSPENDED");
        assert_eq!(query.page(), 0);
    }

    #[test]
    fn keyword_change_resets_page() {
        let mut query = ListQuery::<Value>::new();
        let ticket = query.begin_fetch();
        query.apply_result(ticket, paged(&[1], 4, 61));
        query.set_page(3);

        query.set_keyword("grass");
        assert_eq!(query.page(), 0);
    }

    #[test]
    fn set_page_ignores_out_of_range_targets() {
        let mut query = ListQuery::<Value>::new();
        query.set_page(2);
        assert_eq!(query.page(), 0, "nothing loaded yet");

        let ticket = query.begin_fetch();
        query.apply_result(ticket, paged(&[1], 3, 41));
        query.set_page(2);
        assert_eq!(query.page(), 2);
        query.set_page(3);
        assert_eq!(query.page(), 2, "past the last page");
    }

    #[test]
    fn bare_array_normalizes_to_single_page() {
        let mut query = ListQuery::<Value>::new();
        let ticket = query.begin_fetch();
        let response: PageResponse<Value> =
            serde_json::from_value(json!([{"id": 1}, {"id": 2}])).expect("bare array");
        assert!(query.apply_result(ticket, response));

        assert_eq!(query.total_pages(), 1);
        assert_eq!(query.total_elements(), 2);
        assert_eq!(query.items().len(), 2);
        assert_eq!(query.page(), 0);
    }

    #[test]
    fn paged_shape_copies_totals_through() {
        let mut query = ListQuery::<Value>::new();
        let ticket = query.begin_fetch();
        let response: PageResponse<Value> = serde_json::from_value(
            json!({"content": [{"id": 1}], "totalPages": 5, "totalElements": 93}),
        )
        .expect("paged");
        assert!(query.apply_result(ticket, response));

        assert_eq!(query.total_pages(), 5);
        assert_eq!(query.total_elements(), 93);
        assert_eq!(query.items().len(), 1);
    }

    #[test]
    fn failed_fetch_leaves_last_good_state() {
        let mut query = ListQuery::<Value>::new();
        let ticket = query.begin_fetch();
        query.apply_result(ticket, paged(&[1, 2], 2, 3));

        // The next fetch fails; apply_result is never called for it.
        let _failed = query.begin_fetch();

        assert_eq!(query.items().len(), 2);
        assert_eq!(query.total_pages(), 2);
        assert_eq!(query.page(), 0);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut query = ListQuery::<Value>::new();
        let slow = query.begin_fetch();
        let fast = query.begin_fetch();

        assert!(query.apply_result(fast, paged(&[10, 11], 1, 2)));
        assert!(!query.apply_result(slow, paged(&[99], 7, 70)));

        assert_eq!(query.total_pages(), 1);
        assert_eq!(
            query.items(),
            &[json!({"id": 10}), json!({"id": 11})]
        );
    }

    #[test]
    fn page_clamps_when_totals_shrink() {
        let mut query = ListQuery::<Value>::new();
        let ticket = query.begin_fetch();
        query.apply_result(ticket, paged(&[1], 5, 93));
        query.set_page(4);

        let ticket = query.begin_fetch();
        query.apply_result(ticket, paged(&[2], 2, 21));
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn request_params_follow_filters_and_paging() {
        let mut query = ListQuery::<Value>::with_page_size(10);
        query.set_keyword("climate");
        query.set_filter("status", "ACTIVE");
        query.set_filter("isHidden", String::new());

        assert_eq!(
            query.request_params(),
            vec![
                ("keyword".to_string(), "climate".to_string()),
                ("status".to_string(), "ACTIVE".to_string()),
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn page_size_floor_is_one() {
        let query = ListQuery::<Value>::with_page_size(0);
        assert_eq!(query.page_size(), 1);
    }
}
