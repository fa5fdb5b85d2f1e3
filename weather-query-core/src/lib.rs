//! Core library for the `weather-query` CLI.
//!
//! This crate defines:
//! - Configuration of the remote endpoint
//! - The remote query client and its service abstraction
//! - The reply parser and the display-state renderer
//!
//! It is used by `weather-query-cli`, but can also be reused by other front ends.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod session;

pub use client::{QueryService, RemoteQueryClient, client_from_config};
pub use config::Config;
pub use error::{QueryError, TransportError};
pub use model::{Query, QueryResult, WeatherFields};
pub use parser::parse;
pub use render::{ConditionIcon, DisplayState, render};
pub use session::QuerySession;
