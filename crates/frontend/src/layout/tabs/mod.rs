//! Tab management
//!
//! - `page`: TabPage wrapper of one tab's content
//! - `registry`: tab key → view
//! - `tab_labels`: tab titles

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_tab_label, tab_label_for_key};
