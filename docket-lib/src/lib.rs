//! Docket table engine
//!
//! The list views of a legal practice manager: rows are searched, sorted and
//! paged through a [`view::TableView`], edited cell by cell through an
//! [`edit::EditController`], and exported as delimited text or a printable
//! document.

pub mod config;
pub mod edit;
pub mod error;
pub mod export;
pub mod import;
pub mod model;
pub mod notify;
pub mod view;
