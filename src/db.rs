pub use self::client::DbClient;
pub use self::error::StorageError;
pub use self::models::Toggle;

pub mod client;
pub mod error;
pub mod models;
pub mod schema;
#[cfg(test)]
pub mod test_helpers;
