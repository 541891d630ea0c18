pub mod d400_receivables;
pub mod d401_payables;
pub mod d402_inventory;
pub mod d403_sales;
pub mod d404_fulfillment;
pub mod d405_open_to_buy;
pub mod ledger;

pub use d400_receivables::ui::ReceivablesDashboard;
pub use d401_payables::ui::PayablesDashboard;
pub use d402_inventory::ui::InventoryDashboard;
pub use d403_sales::ui::SalesDashboard;
pub use d404_fulfillment::ui::FulfillmentDashboard;
pub use d405_open_to_buy::ui::OpenToBuyDashboard;
