pub mod badge;
pub mod date_range_picker;
pub mod pagination_controls;
pub mod stat_card;
pub mod table;

pub use badge::Badge;
pub use pagination_controls::PaginationControls;
pub use stat_card::StatCard;
