pub mod http_client;
pub mod logging;

#[cfg(test)]
pub(crate) mod test_support;
