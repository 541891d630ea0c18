pub mod finance;
pub mod indicators;
pub mod list;
