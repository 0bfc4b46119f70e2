//! Database-backed collaborators

pub mod postgres;
