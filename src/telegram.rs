pub mod client;
pub mod error;
pub mod helpers;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
