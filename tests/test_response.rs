use reqguard::http::response::{Response, ResponseBuilder, StatusCode};
use reqguard::http::writer::serialize_response;

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Continue.as_u16(), 100);
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::LengthRequired.as_u16(), 411);
    assert_eq!(StatusCode::PayloadTooLarge.as_u16(), 413);
    assert_eq!(StatusCode::ExpectationFailed.as_u16(), 417);
    assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    assert_eq!(StatusCode::VersionNotSupported.as_u16(), 505);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::LengthRequired.reason_phrase(), "Length Required");
    assert_eq!(StatusCode::PayloadTooLarge.reason_phrase(), "Payload Too Large");
    assert_eq!(
        StatusCode::VersionNotSupported.reason_phrase(),
        "HTTP Version Not Supported"
    );
}

#[test]
fn test_response_builder_auto_content_length() {
    let body = b"This is the body".to_vec();
    let response = ResponseBuilder::new(StatusCode::Ok).body(body.clone()).build();

    let content_length = response.headers.get("Content-Length").unwrap();
    assert_eq!(content_length, &body.len().to_string());
}

#[test]
fn test_response_builder_preserves_custom_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.headers.get("Content-Length").unwrap(), "999");
}

#[test]
fn test_response_for_status() {
    let response = Response::for_status(StatusCode::ExpectationFailed);

    assert_eq!(response.status, StatusCode::ExpectationFailed);
    assert_eq!(response.body, b"417 Expectation Failed\n".to_vec());
    assert_eq!(response.headers.get("Content-Type").unwrap(), "text/plain");
}

#[test]
fn test_response_close_sets_connection_header() {
    let response = Response::ok("bye").close();

    assert_eq!(response.headers.get("Connection").unwrap(), "close");
}

#[test]
fn test_serialize_response() {
    let response = ResponseBuilder::new(StatusCode::LengthRequired)
        .body(b"x".to_vec())
        .build();
    let bytes = serialize_response(&response);
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.starts_with("HTTP/1.1 411 Length Required\r\n"));
    assert!(text.contains("Content-Length: 1\r\n"));
    assert!(text.ends_with("\r\n\r\nx"));
}
