pub mod json_exchange;
pub mod observer;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_server;
