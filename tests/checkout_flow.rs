//! Checkout flow tests.
//!
//! Upgrading delegates to the external checkout provider; the application
//! parses the redirect-return address (confirmation token or cancellation
//! flag) and scrubs it from the visible address afterward.

mod helpers;

use indexflow::app::AddressOutcome;
use indexflow::checkout::SimulatedCheckout;
use indexflow::error_handling::CheckoutError;
use indexflow::session::Plan;

use helpers::{memory_app, profile};

#[tokio::test]
async fn upgrade_requires_a_signed_in_user() {
    let mut app = memory_app();
    app.startup().await;

    let err = app
        .upgrade(&SimulatedCheckout::approving())
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::NotSignedIn));
    assert_eq!(app.session().plan(), Plan::Free);
    let message = app.view().error_message.clone().expect("message shown");
    assert!(message.contains("log in"));
}

#[tokio::test]
async fn successful_checkout_upgrades_and_scrubs_the_address() {
    let mut app = memory_app();
    app.startup().await;
    app.login(profile("ada@example.com")).await;
    assert_eq!(app.session().plan(), Plan::Free);

    let outcome = app
        .upgrade(&SimulatedCheckout::approving())
        .await
        .expect("checkout");
    assert_eq!(outcome, AddressOutcome::CheckoutCompleted);
    assert_eq!(app.session().plan(), Plan::Premium);

    // The confirmation token must not linger in the visible address
    assert_eq!(app.address(), "#/pricing");
    assert!(!app.address().contains("session_id"));
    assert!(!app.address().contains("checkout"));
}

#[tokio::test]
async fn cancelled_checkout_keeps_the_plan_and_scrubs_the_address() {
    let mut app = memory_app();
    app.startup().await;
    app.login(profile("ada@example.com")).await;

    let outcome = app
        .upgrade(&SimulatedCheckout::cancelling())
        .await
        .expect("checkout");
    assert_eq!(outcome, AddressOutcome::CheckoutCancelled);
    assert_eq!(app.session().plan(), Plan::Free);
    assert_eq!(app.address(), "#/pricing");
}

#[tokio::test]
async fn checkout_confirmation_without_a_session_is_ignored() {
    let mut app = memory_app();
    app.startup().await;

    // A stray success return while signed out cannot mint a Premium plan
    let outcome = app
        .on_address_changed("#/pricing?checkout=success&session_id=cs_forged")
        .await;
    assert_eq!(outcome, AddressOutcome::CheckoutCompleted);
    assert_eq!(app.session().plan(), Plan::Free);
    assert_eq!(app.address(), "#/pricing");
}

#[tokio::test]
async fn upgrade_clears_the_local_history_list() {
    let mut app = memory_app();
    app.startup().await;
    app.login(profile("ada@example.com")).await;
    app.submit("https://example.com").await.expect("submit");
    assert_eq!(app.history().len(), 1);

    app.upgrade(&SimulatedCheckout::approving())
        .await
        .expect("checkout");
    // Cloud history takes over for Premium; the local list starts empty
    assert!(app.history().is_empty());
}
