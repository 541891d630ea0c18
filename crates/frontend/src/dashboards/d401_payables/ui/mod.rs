mod dashboard;

pub use dashboard::PayablesDashboard;
