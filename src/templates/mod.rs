pub mod components;
pub mod layouts;
pub mod pages;

pub use components::html_error_response;
pub use layouts::desktop::desktop_layout;

/// Percent-encode a query value; scope names and batch stamps carry Hangul
/// and spaces.
pub fn urlencode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
