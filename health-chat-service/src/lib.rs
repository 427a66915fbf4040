pub mod catalog;
pub mod config;
pub mod handlers;
pub mod models;
pub mod prompt;
pub mod services;
pub mod startup;
