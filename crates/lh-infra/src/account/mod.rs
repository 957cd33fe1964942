mod http_account_service;

pub use http_account_service::{HttpAccountService, DEFAULT_REQUEST_TIMEOUT, REQUEST_ID_HEADER};
