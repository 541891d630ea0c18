//! Supplier create/edit form
//!
//! - model.rs: API calls
//! - view_model.rs: form state and commands
//! - view.rs: Leptos component

mod model;
mod view;
mod view_model;

pub use model::delete_by_id;
pub use view::SupplierDetails;
pub use view_model::SupplierDetailsViewModel;
