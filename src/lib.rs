pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod graphql;
pub mod manifest;
pub mod models;
pub mod registry;
pub mod report;
pub mod types;
