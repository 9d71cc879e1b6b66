//! Query-string helpers shared by the query-parameter adapters.

use url::Url;

/// Replace the query string of `src` with `params`, dropping it entirely
/// when there are none.
pub(crate) fn with_query(src: &Url, params: Vec<(&'static str, String)>) -> String {
    let mut url = src.clone();
    if params.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(params);
    }
    url.to_string()
}

/// `url` without query string or fragment.
pub(crate) fn strip_query_and_hash(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_query(None);
    url.set_fragment(None);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_replaces_existing() {
        let src = Url::parse("https://a.imgix.net/x.jpg?w=1&foo=bar#frag").unwrap();
        let out = with_query(&src, vec![("w", "300".into()), ("q", "80".into())]);
        assert_eq!(out, "https://a.imgix.net/x.jpg?w=300&q=80#frag");
    }

    #[test]
    fn test_with_query_empty_drops_query() {
        let src = Url::parse("https://a.imgix.net/x.jpg?w=1").unwrap();
        assert_eq!(with_query(&src, vec![]), "https://a.imgix.net/x.jpg");
    }

    #[test]
    fn test_strip_query_and_hash() {
        let url = Url::parse("https://a.imgix.net/x.jpg?w=1#frag").unwrap();
        assert_eq!(strip_query_and_hash(&url).as_str(), "https://a.imgix.net/x.jpg");
    }
}
