pub mod number_format;
pub mod sortable_header_cell;
pub mod table_cell_money;

pub use number_format::{format_money, format_number_int, format_number_with_decimals, format_percent};
pub use sortable_header_cell::SortableHeaderCell;
pub use table_cell_money::TableCellMoney;
