//! Mail delivery channels

pub mod smtp;
