pub mod clients;
pub mod config;
pub mod error;
pub mod file_store;
pub mod runtime;
pub mod ui;
