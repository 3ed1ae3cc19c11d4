pub mod auth;
pub mod browse;
pub mod config;
pub mod jobs;
pub mod monitor;
pub mod setup;
