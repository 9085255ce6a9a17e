//! MCP weather server whose weather tools are gated behind email/password sign-in.

pub mod config;
pub mod constants;
pub mod formatters;
pub mod identity;
pub mod logging;
pub mod models;
pub mod resources;
pub mod service;
pub mod session;
pub mod tools;
pub mod upstream;

pub use config::Config;
pub use service::WeatherServer;
