//! Credential injection for backend requests.
//!
//! Session establishment is an external collaborator's concern; this client
//! only attaches the opaque credential it is handed. The provider is an
//! explicitly injected dependency rather than ambient global state, so tests
//! and embedders control it directly.

use std::sync::RwLock;

/// Supplies the opaque credential attached to every backend request.
///
/// Implementations must be cheap to call; the client consults the provider on
/// each request so a refreshed credential takes effect immediately.
pub trait CredentialProvider: Send + Sync {
    /// The current credential, or `None` when no session is established.
    /// The returned string is used verbatim as the `Authorization` header
    /// value (and as the stream's auth query parameter).
    fn credential(&self) -> Option<String>;
}

/// A provider holding a credential that can be swapped at runtime.
#[derive(Debug, Default)]
pub struct StaticCredential {
    value: RwLock<Option<String>>,
}

impl StaticCredential {
    /// Creates a provider with the given credential.
    pub fn new(credential: impl Into<String>) -> Self {
        Self {
            value: RwLock::new(Some(credential.into())),
        }
    }

    /// Creates a provider with no credential.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Replaces the stored credential.
    pub fn set(&self, credential: impl Into<String>) {
        let mut slot = self.value.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(credential.into());
    }
}

impl CredentialProvider for StaticCredential {
    fn credential(&self) -> Option<String> {
        self.value
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_credential_returns_value() {
        let provider = StaticCredential::new("twa-init-data abc123");
        assert_eq!(provider.credential().as_deref(), Some("twa-init-data abc123"));
    }

    #[test]
    fn anonymous_provider_has_no_credential() {
        assert_eq!(StaticCredential::anonymous().credential(), None);
    }

    #[test]
    fn credential_can_be_replaced() {
        let provider = StaticCredential::anonymous();
        provider.set("fresh");
        assert_eq!(provider.credential().as_deref(), Some("fresh"));
    }
}
