//! Purchase order form and payment dialog
//!
//! - model.rs: API calls
//! - view_model.rs: form state and commands
//! - view.rs: create/edit form
//! - payment.rs: record-payment dialog

mod model;
mod payment;
mod view;
mod view_model;

pub use model::delete_by_id;
pub use payment::PaymentForm;
pub use view::PurchaseOrderDetails;
pub use view_model::{PurchaseOrderDetailsViewModel, PO_STATUSES};
