//! Terminal host for the canvas board.
//!
//! The terminal plays every role the board core leaves to its host: it
//! mounts a raster surface, turns mouse reports into pointer positions,
//! offers the team selector, and shows the repainted surface.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod ui;

pub use app::App;
pub use cli::Cli;
pub use config::{AppConfig, ConfigError, TerminalScale};
