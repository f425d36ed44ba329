//! Terminal front end for the posts client.
//!
//! Wires `posts-core` to the outside world: a ureq transport, a renderer that
//! writes to stdout, a JSON file for the saved base URL, and clap arguments
//! standing in for the form inputs.

pub mod app;
pub mod logging;
pub mod transport;
pub mod view;

pub use app::{default_config_path, execute, Args, Command, ConfigAction};
pub use transport::UreqTransport;
pub use view::TerminalRenderer;
