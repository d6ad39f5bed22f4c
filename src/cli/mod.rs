//! Console front end: argument parsing and the interactive menu.

pub mod args;
pub mod repl;

pub use args::WordtreeArgs;
pub use repl::{Command, Repl};
