//! Mock-server helpers shared by the sibling crates' tests.

use crate::auth::SubscriptionKey;
use crate::client::{RetryPolicy, VisionClient};
use wiremock::MockServer;

/// Test subscription key (not a real key).
pub const TEST_SUBSCRIPTION_KEY: &str = "test-subscription-key";

/// Create a client pointed at a mock server, with retries disabled.
pub fn setup_mock_client(server: &MockServer) -> VisionClient {
    VisionClient::builder()
        .endpoint(server.uri())
        .credential(SubscriptionKey::new(TEST_SUBSCRIPTION_KEY))
        .retry_policy(RetryPolicy::none())
        .build()
        .expect("should build client")
}
