pub mod advisor_api;
#[cfg(test)]
pub mod testing;
pub mod transport;
