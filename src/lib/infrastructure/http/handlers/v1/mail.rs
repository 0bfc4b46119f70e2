//! Mail handlers

pub mod send_mail;
