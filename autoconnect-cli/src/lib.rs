//! # autoconnect-cli
//!
//! Terminal front end: argument parsing, config loading, the interactive chat session and the
//! one-shot crawl command.

pub mod cli;
pub mod session;

pub use session::{ChatSession, Flow};

pub use cli::{load_config, ChatCommand, Cli, Commands, EndpointArgs};
