pub mod list;
pub mod profile;

pub use list::CustomerList;
pub use profile::CustomerProfile;
