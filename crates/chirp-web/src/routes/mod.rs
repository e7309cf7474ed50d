//! Route handlers.

pub mod chat;
pub mod config;
