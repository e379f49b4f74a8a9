//! Settings backend trait.

use async_trait::async_trait;

use super::SettingsError;

/// Raw byte storage behind a [`SettingsProvider`](super::SettingsProvider).
///
/// Keys are namespaced by the provider (`visibility/<table>`,
/// `recently-viewed/<user>`); backends treat them as opaque.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    /// Inserts or replaces the value of a key.
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError>;

    /// Removes a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), SettingsError>;
}
