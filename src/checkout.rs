//! Checkout provider contract and simulated implementation.
//!
//! Payment is delegated to an external processor. The application starts a
//! checkout for a price identifier and a customer e-mail, then handles the
//! redirect-return address: a confirmation token on success, a cancellation
//! flag otherwise. Parsing and scrubbing of those addresses lives in
//! [`crate::router`].

use async_trait::async_trait;
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::error_handling::CheckoutError;

/// Where the payment processor sends the user after checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRedirect {
    /// Application address the user lands on, carrying the checkout
    /// outcome as query parameters.
    pub return_address: String,
}

/// Starts an external checkout flow.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Begins checkout for `price_id` on behalf of `customer_email` and
    /// resolves to the redirect-return address.
    async fn begin_checkout(
        &self,
        price_id: &str,
        customer_email: &str,
    ) -> Result<CheckoutRedirect, CheckoutError>;
}

/// A checkout provider that skips the real payment processor and resolves
/// straight to a success or cancel return address.
pub struct SimulatedCheckout {
    approve: bool,
}

impl SimulatedCheckout {
    /// A checkout that always completes successfully.
    pub fn approving() -> Self {
        Self { approve: true }
    }

    /// A checkout the customer always backs out of.
    pub fn cancelling() -> Self {
        Self { approve: false }
    }
}

#[async_trait]
impl CheckoutProvider for SimulatedCheckout {
    async fn begin_checkout(
        &self,
        price_id: &str,
        customer_email: &str,
    ) -> Result<CheckoutRedirect, CheckoutError> {
        if customer_email.is_empty() {
            return Err(CheckoutError::Rejected(
                "customer e-mail is required".to_string(),
            ));
        }
        log::info!("Starting simulated checkout for {price_id}");

        let return_address = if self.approve {
            let token: String = rand::rng()
                .sample_iter(&Alphanumeric)
                .take(24)
                .map(char::from)
                .collect();
            format!("#/pricing?checkout=success&session_id=cs_sim_{token}")
        } else {
            "#/pricing?checkout=cancelled".to_string()
        };
        Ok(CheckoutRedirect { return_address })
    }
}
