//! List envelope, pagination and in-memory table querying (search, sort, paginate).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Minimum trimmed length of a search string before filtering kicks in.
pub const MIN_SEARCH_LEN: usize = 3;

/// The API answers list requests either with a raw array or with `{ "data": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Raw(Vec<T>),
    Wrapped {
        data: Vec<T>,
        #[serde(default)]
        total: Option<usize>,
    },
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Raw(items) => items,
            ListEnvelope::Wrapped { data, .. } => data,
        }
    }

    /// Server-side total when reported, otherwise the number of received items.
    pub fn total(&self) -> usize {
        match self {
            ListEnvelope::Raw(items) => items.len(),
            ListEnvelope::Wrapped { data, total } => total.unwrap_or(data.len()),
        }
    }

    /// Total only when the server reported one.
    pub fn reported_total(&self) -> Option<usize> {
        match self {
            ListEnvelope::Raw(_) => None,
            ListEnvelope::Wrapped { total, .. } => *total,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ListEnvelope::Raw(items) => items.len(),
            ListEnvelope::Wrapped { data, .. } => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whether another `skip`/`take` request is needed after receiving `received`
/// items, `collected` in total so far. A page larger than `take` means the
/// server ignores paging, so nothing more is requested.
pub fn has_more(collected: usize, received: usize, take: usize, reported_total: Option<usize>) -> bool {
    if received == 0 || received != take {
        return false;
    }
    reported_total.map_or(true, |total| collected < total)
}

impl<T> Default for ListEnvelope<T> {
    fn default() -> Self {
        ListEnvelope::Raw(Vec::new())
    }
}

/// `skip`/`take` pagination parameters understood by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub skip: usize,
    pub take: usize,
}

impl PageRequest {
    pub fn new(skip: usize, take: usize) -> Self {
        Self { skip, take }
    }

    /// Request for the given 0-based page.
    pub fn for_page(page: usize, page_size: usize) -> Self {
        Self {
            skip: page * page_size,
            take: page_size,
        }
    }

    pub fn to_query(&self) -> String {
        format!("skip={}&take={}", self.skip, self.take)
    }
}

/// Types that can be matched against a free-text search.
pub trait Searchable {
    /// `filter` is already known to be long enough; matching should be case-insensitive.
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Types that can be ordered by a named column.
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn cmp_str_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Total ordering for floats; NaN sorts after every number.
pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

pub fn is_active_filter(filter: &str) -> bool {
    filter.trim().chars().count() >= MIN_SEARCH_LEN
}

pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    if !is_active_filter(filter) {
        return items;
    }
    let filter = filter.trim();
    items
        .into_iter()
        .filter(|item| item.matches_filter(filter))
        .collect()
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    if field.is_empty() {
        return;
    }
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// One page of a client-side paginated list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    (total_count + page_size - 1) / page_size
}

/// Cuts one page out of `items`. Out-of-range pages are clamped to the last page.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_count = items.len();
    let total_pages = total_pages(total_count, page_size);
    let page = page.min(total_pages.saturating_sub(1));
    let items = items
        .into_iter()
        .skip(page * page_size)
        .take(page_size)
        .collect();

    Page {
        items,
        total_count,
        total_pages,
        page,
        page_size,
    }
}

/// Search/sort/page state of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableQuery {
    pub search: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort_field: String::new(),
            sort_ascending: true,
            page: 0,
            page_size: 100,
        }
    }
}

impl TableQuery {
    pub fn sorted_by(field: &str, ascending: bool) -> Self {
        Self {
            sort_field: field.to_string(),
            sort_ascending: ascending,
            ..Self::default()
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_field = field.to_string();
            self.sort_ascending = true;
        }
        self.page = 0;
    }

    pub fn set_search(&mut self, search: String) {
        if self.search != search {
            self.search = search;
            self.page = 0;
        }
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    pub fn apply<T: Searchable + Sortable>(&self, items: Vec<T>) -> Page<T> {
        let mut filtered = filter_list(items, &self.search);
        sort_list(&mut filtered, &self.sort_field, self.sort_ascending);
        paginate(filtered, self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Row {
        name: String,
        amount: f64,
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            contains_ci(&self.name, filter)
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "amount" => cmp_f64(self.amount, other.amount),
                _ => cmp_str_ci(&self.name, &other.name),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Linen Shirt".into(), amount: 40.0 },
            Row { name: "denim jacket".into(), amount: 120.0 },
            Row { name: "Denim Jeans".into(), amount: 80.0 },
            Row { name: "Wool Coat".into(), amount: 250.0 },
        ]
    }

    #[test]
    fn test_envelope_accepts_raw_array_and_wrapped_data() {
        let raw: ListEnvelope<Row> =
            serde_json::from_str(r#"[{"name":"a","amount":1.0}]"#).unwrap();
        assert_eq!(raw.total(), 1);
        assert_eq!(raw.into_items().len(), 1);

        let wrapped: ListEnvelope<Row> =
            serde_json::from_str(r#"{"data":[{"name":"a","amount":1.0}],"total":42}"#).unwrap();
        assert_eq!(wrapped.total(), 42);
        assert_eq!(wrapped.into_items()[0].name, "a");

        let no_total: ListEnvelope<Row> = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        assert_eq!(no_total.total(), 0);
    }

    #[test]
    fn test_has_more() {
        // full raw page: keep asking
        assert!(has_more(100, 100, 100, None));
        // short page ends the listing
        assert!(!has_more(130, 30, 100, None));
        // server total reached
        assert!(!has_more(200, 100, 100, Some(200)));
        assert!(has_more(100, 100, 100, Some(250)));
        assert!(!has_more(0, 0, 100, Some(10)));
    }

    #[test]
    fn test_oversized_page_stops_paging() {
        assert!(!has_more(250, 250, 100, None));
        assert!(!has_more(250, 250, 100, Some(500)));
    }

    #[test]
    fn test_page_request_query() {
        assert_eq!(PageRequest::for_page(2, 50).to_query(), "skip=100&take=50");
    }

    #[test]
    fn test_short_filter_is_ignored() {
        assert_eq!(filter_list(rows(), "de").len(), 4);
        assert_eq!(filter_list(rows(), "  den ").len(), 2);
    }

    #[test]
    fn test_sort_case_insensitive_and_descending() {
        let mut items = rows();
        sort_list(&mut items, "name", true);
        assert_eq!(items[0].name, "denim jacket");
        sort_list(&mut items, "amount", false);
        assert_eq!(items[0].amount, 250.0);
    }

    #[test]
    fn test_paginate_clamps_page() {
        let page = paginate(rows(), 10, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 1);

        let empty: Page<Row> = paginate(Vec::new(), 3, 0);
        assert_eq!(empty.total_pages, 0);
        assert_eq!(empty.page, 0);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_table_query_pipeline() {
        let mut query = TableQuery::sorted_by("amount", true).with_page_size(1);
        query.set_search("denim".into());
        let page = query.apply(rows());
        assert_eq!(page.total_count, 2);
        assert_eq!(page.items[0].name, "Denim Jeans");

        query.page = 1;
        query.toggle_sort("amount");
        assert!(!query.sort_ascending);
        assert_eq!(query.page, 0);
    }

    #[test]
    fn test_nan_sorts_last() {
        assert_eq!(cmp_f64(f64::NAN, 1.0), Ordering::Greater);
        assert_eq!(cmp_f64(1.0, 2.0), Ordering::Less);
    }
}
