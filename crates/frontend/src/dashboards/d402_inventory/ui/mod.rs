mod dashboard;

pub use dashboard::InventoryDashboard;
