//
//  reportal-client
//  endpoint.rs
//

//! Endpoint URL composition.
//!
//! Builds an absolute URL from the configured base origin, an API path
//! prefix, raw endpoint path segments, and optional query pairs. Callers
//! hand over segment values unescaped; percent-encoding of both path
//! segments and query pairs happens here and nowhere else.

use url::Url;

use crate::error::Error;

/// Ordered query pairs, values already in string form. Absent values never
/// make it into this collection; the encoders skip them.
pub(crate) type QueryPairs = Vec<(String, String)>;

/// Composes `base` + `api_path` + `endpoint` segments + query string.
///
/// Path composition guarantees exactly one `/` between segments regardless
/// of leading/trailing slashes on `api_path`. Each `endpoint` segment is
/// percent-encoded as a single path segment, so separator characters inside
/// workspace codes or report type codes cannot alter the path shape. An
/// empty pair set produces a URL without any query string.
pub(crate) fn build_endpoint_url(
    base: &Url,
    api_path: &str,
    endpoint: &[&str],
    query: Option<&QueryPairs>,
) -> Result<Url, Error> {
    let mut url = base.clone();
    // The base is an origin; any path it carries is replaced, not extended.
    url.set_path("");
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl(base.to_string()))?;
        segments.pop_if_empty();
        segments.extend(api_path.split('/').filter(|part| !part.is_empty()));
        segments.extend(endpoint);
    }
    if let Some(pairs) = query {
        if !pairs.is_empty() {
            let mut serializer = url.query_pairs_mut();
            for (key, value) in pairs {
                serializer.append_pair(key, value);
            }
        }
    }
    Ok(url)
}
