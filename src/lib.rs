pub mod annotations;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod error;
pub mod github;
pub mod manifest;
pub mod models;
pub mod output;
