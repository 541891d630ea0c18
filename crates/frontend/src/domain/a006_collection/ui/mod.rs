pub mod list;

pub use list::CollectionList;
