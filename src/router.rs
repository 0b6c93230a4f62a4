//! Address parsing and serialization.
//!
//! The application uses hash-path addresses: `#/`, `#/about`, `#/pricing`,
//! `#/faq`, and `#/analyze?url=<percent-encoded URL>`. [`Route::to_address`]
//! and [`Route::from_address`] form the two halves of the routing
//! invariant: the address is a pure function of the route, and parsing is a
//! left-inverse of serialization.
//!
//! Checkout returns ride the same addresses as extra query parameters
//! (`checkout=success&session_id=<token>` or `checkout=cancelled`) which the
//! controller handles and then scrubs from the visible address.

use url::form_urlencoded;

/// One displayable view of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Landing page.
    Home,
    /// About page.
    About,
    /// Pricing page.
    Pricing,
    /// FAQ page.
    Faq,
    /// The analyze view; `url` is absent for the empty input form.
    Analyze {
        /// URL being (or to be) analyzed.
        url: Option<String>,
    },
}

impl Route {
    /// Serializes the route to its canonical address.
    pub fn to_address(&self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::About => "#/about".to_string(),
            Route::Pricing => "#/pricing".to_string(),
            Route::Faq => "#/faq".to_string(),
            Route::Analyze { url: None } => "#/analyze".to_string(),
            Route::Analyze { url: Some(url) } => {
                let query: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("url", url)
                    .finish();
                format!("#/analyze?{query}")
            }
        }
    }

    /// Derives the route from an address string.
    ///
    /// Total: unknown paths map to [`Route::Home`], and a missing or empty
    /// `url` parameter on the analyze path maps to the empty-input analyze
    /// view, never an error.
    pub fn from_address(address: &str) -> Route {
        let path = address.strip_prefix('#').unwrap_or(address);
        if path.starts_with("/about") {
            Route::About
        } else if path.starts_with("/pricing") {
            Route::Pricing
        } else if path.starts_with("/faq") {
            Route::Faq
        } else if path.starts_with("/analyze") {
            Route::Analyze {
                url: query_param(path, "url").filter(|u| !u.is_empty()),
            }
        } else {
            Route::Home
        }
    }

    /// Whether this is the analyze view (with or without a URL).
    pub fn is_analyze(&self) -> bool {
        matches!(self, Route::Analyze { .. })
    }
}

/// Outcome of a completed checkout flow, carried back on the return
/// address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutReturn {
    /// The payment provider confirmed the purchase.
    Success {
        /// Confirmation token minted by the payment provider.
        session_token: String,
    },
    /// The user backed out of checkout.
    Cancelled,
}

impl CheckoutReturn {
    /// Extracts a checkout outcome from an address, if one is present.
    ///
    /// A `checkout=success` marker without its session token is treated as
    /// no checkout return at all.
    pub fn from_address(address: &str) -> Option<CheckoutReturn> {
        let path = address.strip_prefix('#').unwrap_or(address);
        match query_param(path, "checkout").as_deref() {
            Some("success") => query_param(path, "session_id")
                .filter(|t| !t.is_empty())
                .map(|session_token| CheckoutReturn::Success { session_token }),
            Some("cancelled") => Some(CheckoutReturn::Cancelled),
            _ => None,
        }
    }
}

/// Removes checkout bookkeeping parameters from an address, preserving
/// every other parameter.
pub fn scrub_checkout_params(address: &str) -> String {
    let (prefix, path) = match address.strip_prefix('#') {
        Some(rest) => ("#", rest),
        None => ("", address),
    };
    let Some((base, query)) = path.split_once('?') else {
        return address.to_string();
    };

    let kept: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .filter(|(k, _)| k != "checkout" && k != "session_id")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if kept.is_empty() {
        return format!("{prefix}{base}");
    }
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (k, v) in &kept {
        serializer.append_pair(k, v);
    }
    format!("{prefix}{base}?{}", serializer.finish())
}

fn query_param(path: &str, name: &str) -> Option<String> {
    let (_, query) = path.split_once('?')?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_routes_roundtrip() {
        for route in [Route::Home, Route::About, Route::Pricing, Route::Faq] {
            let address = route.to_address();
            assert_eq!(Route::from_address(&address), route);
        }
    }

    #[test]
    fn test_analyze_route_roundtrips_with_percent_encoding() {
        let route = Route::Analyze {
            url: Some("https://example.com/path?query=value&other=1".to_string()),
        };
        let address = route.to_address();
        assert!(address.starts_with("#/analyze?url="));
        assert!(!address.contains("value&other"), "query must be encoded");
        assert_eq!(Route::from_address(&address), route);
    }

    #[test]
    fn test_unknown_path_falls_back_to_home() {
        assert_eq!(Route::from_address("#/nowhere"), Route::Home);
        assert_eq!(Route::from_address(""), Route::Home);
        assert_eq!(Route::from_address("#/"), Route::Home);
    }

    #[test]
    fn test_analyze_without_url_is_empty_input_view() {
        assert_eq!(Route::from_address("#/analyze"), Route::Analyze { url: None });
        assert_eq!(
            Route::from_address("#/analyze?url="),
            Route::Analyze { url: None }
        );
        assert_eq!(
            Route::from_address("#/analyze?other=1"),
            Route::Analyze { url: None }
        );
    }

    #[test]
    fn test_address_accepted_without_hash_prefix() {
        assert_eq!(Route::from_address("/pricing"), Route::Pricing);
    }

    #[test]
    fn test_checkout_success_return() {
        let ret =
            CheckoutReturn::from_address("#/pricing?checkout=success&session_id=cs_123");
        assert_eq!(
            ret,
            Some(CheckoutReturn::Success {
                session_token: "cs_123".to_string()
            })
        );
    }

    #[test]
    fn test_checkout_cancelled_return() {
        let ret = CheckoutReturn::from_address("#/pricing?checkout=cancelled");
        assert_eq!(ret, Some(CheckoutReturn::Cancelled));
    }

    #[test]
    fn test_checkout_success_without_token_is_ignored() {
        assert_eq!(
            CheckoutReturn::from_address("#/pricing?checkout=success"),
            None
        );
    }

    #[test]
    fn test_plain_addresses_have_no_checkout_return() {
        assert_eq!(CheckoutReturn::from_address("#/pricing"), None);
        assert_eq!(
            CheckoutReturn::from_address("#/analyze?url=https%3A%2F%2Fexample.com"),
            None
        );
    }

    #[test]
    fn test_scrub_removes_only_checkout_params() {
        let scrubbed = scrub_checkout_params(
            "#/analyze?url=https%3A%2F%2Fexample.com&checkout=success&session_id=cs_1",
        );
        assert_eq!(scrubbed, "#/analyze?url=https%3A%2F%2Fexample.com");

        let scrubbed = scrub_checkout_params("#/pricing?checkout=cancelled");
        assert_eq!(scrubbed, "#/pricing");

        // Addresses without checkout params pass through untouched
        assert_eq!(scrub_checkout_params("#/pricing"), "#/pricing");
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_analyze_roundtrip_any_url(
            url in "https?://[a-z]{3,12}\\.[a-z]{2,5}(/[a-zA-Z0-9%&=?+ -]{0,40})?"
        ) {
            let route = Route::Analyze { url: Some(url) };
            prop_assert_eq!(Route::from_address(&route.to_address()), route);
        }

        #[test]
        fn test_from_address_never_panics(address in ".{0,200}") {
            let _ = Route::from_address(&address);
            let _ = CheckoutReturn::from_address(&address);
            let _ = scrub_checkout_params(&address);
        }
    }
}
