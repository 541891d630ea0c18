pub mod details;
pub mod list;

pub use details::SizeChartDetail;
pub use list::SizeChartList;
