//! REST client helpers.
//!
//! Every list request carries `skip`/`take`; the API answers with either a raw
//! array or `{ "data": [...] }`. Lists are read page by page until exhausted.

use contracts::shared::list::{has_more, ListEnvelope, PageRequest};
use gloo_net::http::{Request, RequestBuilder, Response};
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Port of the API when no base URL is configured
const DEFAULT_API_PORT: u16 = 3000;
/// Upper bound on pages read by one `fetch_list`
const MAX_PAGES: usize = 200;

static API_BASE: OnceCell<String> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },
    #[error("cannot parse response: {0}")]
    Parse(String),
    #[error("cannot serialize request: {0}")]
    Serialize(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ApiError::Serialize(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Fixes the API base once, from configuration. Empty keeps the location-derived default.
pub fn set_api_base(base: &str) {
    let base = base.trim().trim_end_matches('/');
    if !base.is_empty() && API_BASE.set(base.to_string()).is_err() {
        log::warn!("API base already set, ignoring {}", base);
    }
}

/// Base URL for API requests: configured value, else current host on port 3000.
pub fn api_base() -> String {
    if let Some(base) = API_BASE.get() {
        return base.clone();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, DEFAULT_API_PORT)
}

pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

/// Appends `skip`/`take` to a path that may already carry a query.
pub fn with_page(path: &str, page: &PageRequest) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, separator, page.to_query())
}

/// Path of one record, id percent-encoded.
pub fn item_path(endpoint: &str, id: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        urlencoding::encode(id)
    )
}

async fn send(request: RequestBuilder, url: &str) -> Result<Response, ApiError> {
    let response = request.send().await?;
    check_status(response, url)
}

fn check_status(response: Response, url: &str) -> Result<Response, ApiError> {
    if response.ok() {
        Ok(response)
    } else {
        Err(ApiError::Http {
            status: response.status(),
            url: url.to_string(),
        })
    }
}

pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response.text().await?;
    parse_json(&text)
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let url = api_url(path);
    let response = send(
        Request::get(&url).header("Accept", "application/json"),
        &url,
    )
    .await?;
    read_json(response).await
}

/// One `skip`/`take` page of a list resource.
pub async fn fetch_page<T: DeserializeOwned>(
    endpoint: &str,
    page: PageRequest,
) -> Result<ListEnvelope<T>, ApiError> {
    get_json(&with_page(endpoint, &page)).await
}

/// Whole list resource, read `take` records at a time.
pub async fn fetch_list<T: DeserializeOwned>(endpoint: &str, take: usize) -> Result<Vec<T>, ApiError> {
    let take = take.max(1);
    let mut items: Vec<T> = Vec::new();
    for _ in 0..MAX_PAGES {
        let envelope: ListEnvelope<T> = fetch_page(endpoint, PageRequest::new(items.len(), take)).await?;
        let received = envelope.len();
        let reported_total = envelope.reported_total();
        items.extend(envelope.into_items());
        if !has_more(items.len(), received, take, reported_total) {
            return Ok(items);
        }
    }
    log::warn!("{}: stopped after {} pages", endpoint, MAX_PAGES);
    Ok(items)
}

/// A list read that never fails: the items, or an empty list and what went wrong.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub failure: Option<String>,
}

impl<T> Listing<T> {
    /// Substitutes an empty list for a failed read and logs the failure.
    pub fn or_empty(endpoint: &str, result: Result<Vec<T>, ApiError>) -> Self {
        match result {
            Ok(items) => Self { items, failure: None },
            Err(e) => {
                log::warn!("GET {} failed, showing empty list: {}", endpoint, e);
                Self {
                    items: Vec::new(),
                    failure: Some(e.to_string()),
                }
            }
        }
    }
}

/// `fetch_list` that yields an empty list on failure, keeping the error text.
pub async fn fetch_listing<T: DeserializeOwned>(endpoint: &str, take: usize) -> Listing<T> {
    Listing::or_empty(endpoint, fetch_list(endpoint, take).await)
}

/// `fetch_listing` without the error text.
pub async fn fetch_list_or_empty<T: DeserializeOwned>(endpoint: &str, take: usize) -> Vec<T> {
    fetch_listing(endpoint, take).await.items
}

pub async fn fetch_one<T: DeserializeOwned>(endpoint: &str, id: &str) -> Result<T, ApiError> {
    get_json(&item_path(endpoint, id)).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(endpoint: &str, body: &B) -> Result<T, ApiError> {
    let url = api_url(endpoint);
    let request = Request::post(&url)
        .header("Accept", "application/json")
        .json(body)?;
    let response = check_status(request.send().await?, &url)?;
    read_json(response).await
}

pub async fn patch_json<B: Serialize, T: DeserializeOwned>(
    endpoint: &str,
    id: &str,
    body: &B,
) -> Result<T, ApiError> {
    let url = api_url(&item_path(endpoint, id));
    let request = Request::patch(&url)
        .header("Accept", "application/json")
        .json(body)?;
    let response = check_status(request.send().await?, &url)?;
    read_json(response).await
}

pub async fn delete(endpoint: &str, id: &str) -> Result<(), ApiError> {
    let url = api_url(&item_path(endpoint, id));
    send(Request::delete(&url), &url).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://api:3000/", "/customers"), "http://api:3000/customers");
        assert_eq!(join_url("http://api:3000", "orders"), "http://api:3000/orders");
    }

    #[test]
    fn test_with_page() {
        let page = PageRequest::new(200, 100);
        assert_eq!(with_page("/orders", &page), "/orders?skip=200&take=100");
        assert_eq!(
            with_page("/orders?status=pending", &page),
            "/orders?status=pending&skip=200&take=100"
        );
    }

    #[test]
    fn test_item_path_encodes_id() {
        assert_eq!(item_path("/suppliers", "42"), "/suppliers/42");
        assert_eq!(item_path("/suppliers/", "a b/c"), "/suppliers/a%20b%2Fc");
    }

    #[test]
    fn test_parse_error() {
        let r: Result<Vec<u32>, ApiError> = parse_json("{oops");
        assert!(matches!(r, Err(ApiError::Parse(_))));
        let ok: Vec<u32> = parse_json("[1,2]").unwrap();
        assert_eq!(ok, vec![1, 2]);
    }

    #[test]
    fn test_failed_read_falls_back_to_empty() {
        let failed: Listing<u32> = Listing::or_empty(
            "/orders",
            Err(ApiError::Http {
                status: 503,
                url: "http://api/orders".into(),
            }),
        );
        assert!(failed.items.is_empty());
        assert_eq!(failed.failure.as_deref(), Some("HTTP 503 from http://api/orders"));

        let ok = Listing::or_empty("/orders", Ok(vec![1u32, 2]));
        assert_eq!(ok.items, vec![1, 2]);
        assert_eq!(ok.failure, None);
    }

    #[test]
    fn test_error_messages() {
        let e = ApiError::Http {
            status: 404,
            url: "http://api/x".into(),
        };
        assert_eq!(e.to_string(), "HTTP 404 from http://api/x");
    }
}
