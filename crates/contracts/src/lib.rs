//! Shared contracts between the dashboard frontend and the REST API.
//!
//! - `domain` - resource DTOs as returned by the API, one module per resource
//! - `dashboards` - derived overviews computed client-side from those lists
//! - `shared` - list envelope, table querying and financial classification rules

pub mod dashboards;
pub mod domain;
pub mod shared;
