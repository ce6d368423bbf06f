//! Command handlers for CLI subcommands
//!
//! Each handler takes its parsed arguments, the loaded configuration and the
//! output writer, and returns once everything has been written.

mod completions;
mod config;
mod list;
mod metadata;
mod render;
mod request;
mod utils;
mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use list::handle_list;
pub use metadata::handle_metadata;
pub use render::handle_render;
pub use request::handle_request;
pub use validate::handle_validate;
