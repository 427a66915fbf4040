//! HTTP handlers for the health chat service.

pub mod chat;
pub mod health;
