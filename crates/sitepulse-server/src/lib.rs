pub mod app;
pub mod config;
pub mod error;
pub mod geo;
pub mod recorder;
pub mod routes;
pub mod state;
pub mod static_site;
