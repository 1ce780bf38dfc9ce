pub mod actions;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod session;
pub mod ui;
