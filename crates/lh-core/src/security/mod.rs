//! Handling of sensitive values.

pub mod secret;

pub use secret::SecretString;
