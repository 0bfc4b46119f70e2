#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Outbound mail dispatch over tenant-configured SMTP channels

pub mod domain;
pub mod infrastructure;
