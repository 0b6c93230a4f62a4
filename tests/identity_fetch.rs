//! Identity provider fetch tests.
//!
//! These use a local mock HTTP server; no real network requests are made.

use httptest::{matchers::*, responders::*, Expectation, Server};

use indexflow::error_handling::IdentityError;
use indexflow::identity::{HttpIdentityProvider, IdentityProvider};

fn provider_for(server: &Server) -> HttpIdentityProvider {
    HttpIdentityProvider::with_endpoint(server.url("/userinfo").to_string())
        .expect("client builds")
}

#[tokio::test]
async fn fetch_profile_parses_a_complete_userinfo_response() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/userinfo")).respond_with(
            json_encoded(serde_json::json!({
                "id": "108923",
                "email": "ada@example.com",
                "name": "Ada Lovelace",
                "picture": "https://example.com/a.png",
                "verified_email": true,
                "given_name": "Ada",
                "family_name": "Lovelace",
                "locale": "en"
            })),
        ),
    );

    let profile = provider_for(&server)
        .fetch_profile("token-123")
        .await
        .expect("profile");
    assert_eq!(profile.id, "108923");
    assert_eq!(profile.email, "ada@example.com");
    assert_eq!(profile.given_name, "Ada");
    assert!(profile.verified_email);
}

#[tokio::test]
async fn fetch_profile_maps_http_errors_to_identity_errors() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/userinfo"))
            .respond_with(status_code(401)),
    );

    let err = provider_for(&server)
        .fetch_profile("expired-token")
        .await
        .unwrap_err();
    assert!(matches!(err, IdentityError::Http(_)));
}

#[tokio::test]
async fn fetch_profile_rejects_a_profile_without_id_or_email() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/userinfo")).respond_with(
            json_encoded(serde_json::json!({
                "name": "No Identity"
            })),
        ),
    );

    let err = provider_for(&server)
        .fetch_profile("token-123")
        .await
        .unwrap_err();
    assert!(matches!(err, IdentityError::MalformedProfile));
}

#[tokio::test]
async fn fetch_profile_rejects_empty_identifiers() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/userinfo")).respond_with(
            json_encoded(serde_json::json!({
                "id": "",
                "email": ""
            })),
        ),
    );

    let err = provider_for(&server)
        .fetch_profile("token-123")
        .await
        .unwrap_err();
    assert!(matches!(err, IdentityError::MalformedProfile));
}
