pub mod auth;
pub mod signup;

#[cfg(test)]
pub(crate) mod test_support;
