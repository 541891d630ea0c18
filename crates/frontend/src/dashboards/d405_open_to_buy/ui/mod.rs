mod dashboard;

pub use dashboard::OpenToBuyDashboard;
