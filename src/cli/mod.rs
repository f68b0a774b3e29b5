pub mod args;
pub mod models;
pub mod style;

pub use args::{Cli, Commands};
