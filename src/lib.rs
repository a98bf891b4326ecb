pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod seeds;
pub mod state;
