//! Terminal front end for the sign-up wizard and the login commands.

pub mod args;
pub mod input;
pub mod render;
pub mod terminal;
pub mod wizard;

pub use args::{Cli, Command};
