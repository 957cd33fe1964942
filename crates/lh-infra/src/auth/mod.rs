mod file_token_store;

pub use file_token_store::{FileTokenStore, DEFAULT_TOKEN_FILE};
