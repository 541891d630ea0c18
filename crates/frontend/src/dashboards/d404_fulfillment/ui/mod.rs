mod dashboard;

pub use dashboard::FulfillmentDashboard;
