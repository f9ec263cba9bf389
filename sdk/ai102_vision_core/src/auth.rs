use secrecy::{ExposeSecret, SecretString};

/// HTTP header carrying the Cognitive Services subscription key.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// A Cognitive Services subscription key.
///
/// The key is held in a [`SecretString`] and never shows up in `Debug` output.
#[derive(Clone)]
pub struct SubscriptionKey(SecretString);

impl SubscriptionKey {
    /// Wrap a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// Expose the raw key for use as a header value.
    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<SecretString> for SubscriptionKey {
    fn from(secret: SecretString) -> Self {
        Self(secret)
    }
}

impl std::fmt::Debug for SubscriptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SubscriptionKey(****)")
    }
}
