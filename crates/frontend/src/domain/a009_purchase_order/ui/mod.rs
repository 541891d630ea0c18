pub mod details;
pub mod list;

pub use details::{PaymentForm, PurchaseOrderDetails};
pub use list::PurchaseOrderList;
