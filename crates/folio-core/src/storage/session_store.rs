//! Session store trait.
//!
//! A small persistent key/value slot, durable across restarts, that holds
//! the current session identifier. Implementations live in folio-infra.

use folio_types::error::StoreError;

/// Trait for string key-value persistence.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait SessionStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Set a value for a key, overwriting any prior value.
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
