pub mod aggregate;
pub mod approval;
pub mod batch;
pub mod error;
pub mod record;
pub mod wip;

pub use error::WorkflowError;
