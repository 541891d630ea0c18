pub mod details;
pub mod list;

pub use details::ProductionOrderDetail;
pub use list::ProductionOrderList;
