mod dashboard;

pub use dashboard::ReceivablesDashboard;
