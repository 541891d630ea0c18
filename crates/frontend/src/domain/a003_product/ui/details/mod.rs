//! Product create/edit form (model / view_model / view)

mod model;
mod view;
mod view_model;

pub use model::delete_by_id;
pub use view::ProductDetails;
pub use view_model::ProductDetailsViewModel;
