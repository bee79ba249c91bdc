mod admin_tests;
mod dashboard_tests;

use astra::Body;
use http::Method;

/// Build a GET request for the router.
pub fn get(uri: &str) -> astra::Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a form POST request for the router.
pub fn post(uri: &str, form: &str) -> astra::Request {
    http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

/// Drain a response body to a string.
pub fn body_string(resp: astra::Response) -> String {
    use std::io::Read;

    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    body
}
