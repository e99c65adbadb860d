//! Share payload handed to the social-share collaborator.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// An exported image plus the page title, ready for deep-link building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    /// Image reference: a data URL or a hosted URL.
    pub image_url: String,
    pub title: String,
}

impl ShareRequest {
    pub fn new(image_url: impl Into<String>, title: impl Into<String>) -> Self {
        Self { image_url: image_url.into(), title: title.into() }
    }

    pub fn encoded_title(&self) -> String {
        encode_uri_component(&self.title)
    }

    pub fn encoded_url(&self) -> String {
        encode_uri_component(&self.image_url)
    }
}

/// Bytes escaped by JavaScript's `encodeURIComponent`: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode `s` the way `encodeURIComponent` does (UTF-8, uppercase
/// hex).
pub fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}
