//! Cache key construction for proxied requests.

use std::collections::BTreeMap;

/// Builds a cache key from an endpoint name and its query parameters.
///
/// Parameters are sorted by name so that two requests differing only in
/// parameter order share one entry: `quote?amount=1&chainId=1&dst=..&src=..`.
pub fn cache_key<'a, I>(endpoint: &str, params: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let sorted: BTreeMap<&str, &str> = params.into_iter().collect();

    let mut key = String::from(endpoint);
    for (i, (name, value)) in sorted.iter().enumerate() {
        key.push(if i == 0 { '?' } else { '&' });
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }
    key
}
