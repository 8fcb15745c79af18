//! Content negotiation headers.

use crate::params::Headers;

/// Media type announcing compatibility with the version 8 wire format.
pub const COMPATIBLE_MEDIA_TYPE: &str = "application/vnd.elasticsearch+json;compatible-with=8";

pub const ACCEPT: &str = "Accept";
pub const CONTENT_TYPE: &str = "Content-Type";

/// Fills in `Accept` and, for non-empty bodies, `Content-Type`.
///
/// Headers the caller already set are left untouched.
pub fn negotiate(headers: &mut Headers, body: &[u8]) {
    if !body.is_empty() {
        headers.set_if_absent(CONTENT_TYPE, COMPATIBLE_MEDIA_TYPE);
    }
    headers.set_if_absent(ACCEPT, COMPATIBLE_MEDIA_TYPE);
}
