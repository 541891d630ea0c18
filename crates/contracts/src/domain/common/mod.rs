//! Common types and traits for all resources

pub mod id;
pub mod resource;

// Re-exports
pub use id::deserialize_id;
pub use resource::Resource;
