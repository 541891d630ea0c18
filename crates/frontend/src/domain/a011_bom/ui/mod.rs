pub mod details;
pub mod list;

pub use details::BomDetail;
pub use list::BomList;
