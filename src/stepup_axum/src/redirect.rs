//! The redirect-to-sudo helper.

use axum::response::Redirect;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use stepup_core::SudoPolicy;
use url::form_urlencoded;

/// Query-value encoding that leaves `/` (and the usual unreserved marks)
/// readable, since redirect targets are typically paths.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// The elevation view's URL with `next_url` merged into its query string,
/// overwriting any stale redirect-target parameter already present.
pub fn sudo_url_with_next(next_url: &str, policy: &SudoPolicy) -> String {
    let (path, query) = match policy.sudo_url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (policy.sudo_url.as_str(), None),
    };

    let mut pairs: Vec<(String, String)> = query
        .map(|query| form_urlencoded::parse(query.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    pairs.retain(|(name, _)| name != &policy.redirect_field_name);
    pairs.push((policy.redirect_field_name.clone(), next_url.to_string()));

    let query = pairs
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(name, QUERY_VALUE),
                utf8_percent_encode(value, QUERY_VALUE)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{path}?{query}")
}

/// Redirect an unprivileged request to the elevation view and back.
///
/// `next_url` becomes the post-elevation destination; the elevation view
/// re-validates it against the request host before use, so callers can pass
/// the original request URL through unchecked.
pub fn redirect_to_sudo(next_url: &str, policy: &SudoPolicy) -> Redirect {
    Redirect::to(&sudo_url_with_next(next_url, policy))
}

#[cfg(test)]
mod tests {
    use axum::{http::header, response::IntoResponse};

    use super::*;

    #[test]
    fn embeds_the_destination_in_the_query_string() {
        let policy = SudoPolicy::default();
        assert_eq!(
            sudo_url_with_next("/account/billing/", &policy),
            "/sudo?next=/account/billing/"
        );
    }

    #[test]
    fn percent_encodes_reserved_characters_but_not_slashes() {
        let policy = SudoPolicy::default();
        assert_eq!(
            sudo_url_with_next("/search?q=a b&lang=en", &policy),
            "/sudo?next=/search%3Fq%3Da%20b%26lang%3Den"
        );
    }

    #[test]
    fn overwrites_a_stale_target_and_keeps_other_parameters() {
        let policy = SudoPolicy {
            sudo_url: "/sudo?lang=en&next=/stale".to_string(),
            ..SudoPolicy::default()
        };
        assert_eq!(
            sudo_url_with_next("/fresh", &policy),
            "/sudo?lang=en&next=/fresh"
        );
    }

    #[test]
    fn respects_a_custom_redirect_field_name() {
        let policy = SudoPolicy {
            redirect_field_name: "goto".to_string(),
            ..SudoPolicy::default()
        };
        assert_eq!(sudo_url_with_next("/billing", &policy), "/sudo?goto=/billing");
    }

    #[test]
    fn produces_a_redirect_response_to_the_elevation_view() {
        let policy = SudoPolicy::default();
        let response = redirect_to_sudo("/account/billing/", &policy).into_response();

        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/sudo?next=/account/billing/"
        );
    }
}
