//! Mock GitHub API helpers
//!
//! Every test owns its own `mockito::ServerGuard`, so tests run in parallel
//! without sharing mocks.

use mockito::{Mock, ServerGuard};

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_LOGIN: &str = "sergio";

/// Mocks `GET /user`, the account lookup performed once per client.
pub async fn mock_user(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/user")
        .match_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"login":"{}","id":1}}"#, TEST_LOGIN))
        .create_async()
        .await
}
