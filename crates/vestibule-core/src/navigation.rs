//! Redirect-target construction.
//!
//! On successful login the form navigates to a fixed destination carrying
//! the derived username as a query parameter.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::validation::derive_username;

/// Characters escaped in the `user` query value.
///
/// Everything except ASCII alphanumerics and `-_.!~*'()` is percent-encoded,
/// i.e. component-style escaping.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Build the navigation target for a destination path and identity.
///
/// The username is derived from the identity at call time, so edits made
/// during the redirect delay are reflected.
pub fn redirect_target(destination: &str, identity: &str) -> String {
    let user = derive_username(identity);
    format!("{destination}?user={}", utf8_percent_encode(user, QUERY_VALUE))
}
