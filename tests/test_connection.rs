//! End-to-end tests of the connection loop over an in-memory stream.

use reqguard::config::Config;
use reqguard::http::connection::Connection;
use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};

/// Writes `input` as the client, half-closes, and collects everything the
/// server sends back.
async fn exchange(cfg: Config, input: &[u8]) -> String {
    let (mut client, server) = duplex(64 * 1024);

    let server_task = tokio::spawn(async move {
        let mut conn = Connection::new(server, &cfg);
        conn.run().await
    });

    client.write_all(input).await.unwrap();
    client.shutdown().await.unwrap();

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    let _ = server_task.await.unwrap();

    String::from_utf8(out).unwrap()
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[tokio::test]
async fn test_pipelined_requests_on_one_connection() {
    let input = b"GET /a/./b HTTP/1.1\r\nHost: example.com\r\n\r\n\
                  POST /upload HTTP/1.1\r\nHost: example.com\r\nContent-Length: 5\r\n\r\nhello\
                  GET /last HTTP/1.1\r\nHost: example.com\r\nConnection: close\r\n\r\n";

    let out = exchange(Config::default(), input).await;

    assert_eq!(count(&out, "HTTP/1.1 200 OK\r\n"), 3);
    assert!(out.contains("GET /a/b (0 body bytes)"));
    assert!(out.contains("POST /upload (5 body bytes)"));
    assert!(out.contains("GET /last (0 body bytes)"));
}

#[tokio::test]
async fn test_rejection_closes_connection() {
    let input = b"POST /upload HTTP/1.1\r\nHost: example.com\r\n\r\n\
                  GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

    let out = exchange(Config::default(), input).await;

    assert!(out.starts_with("HTTP/1.1 411 Length Required\r\n"));
    assert!(out.contains("Connection: close\r\n"));
    // the pipelined GET is never answered
    assert_eq!(count(&out, "HTTP/1.1 "), 1);
}

#[tokio::test]
async fn test_unknown_version_is_505() {
    let out = exchange(Config::default(), b"GET / HTTP/2.0\r\n\r\n").await;
    assert!(out.starts_with("HTTP/1.1 505 HTTP Version Not Supported\r\n"));
}

#[tokio::test]
async fn test_http10_closes_after_response() {
    let input = b"GET / HTTP/1.0\r\n\r\nGET /again HTTP/1.0\r\n\r\n";

    let out = exchange(Config::default(), input).await;

    assert_eq!(count(&out, "HTTP/1.1 200 OK\r\n"), 1);
    assert!(out.contains("Connection: close\r\n"));
}

#[tokio::test]
async fn test_expect_100_continue_gets_interim_response() {
    let input = b"POST /upload HTTP/1.1\r\nHost: example.com\r\nContent-Length: 3\r\n\
                  Expect: 100-continue\r\nConnection: close\r\n\r\nabc";

    let out = exchange(Config::default(), input).await;

    assert!(out.starts_with("HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 200 OK\r\n"));
    assert!(out.contains("POST /upload (3 body bytes)"));
}

#[tokio::test]
async fn test_body_over_limit_is_413() {
    let mut cfg = Config::default();
    cfg.limits.max_body_bytes = 4;
    let input = b"PUT /file HTTP/1.1\r\nHost: example.com\r\nContent-Length: 5\r\n\r\nhello";

    let out = exchange(cfg, input).await;

    assert!(out.starts_with("HTTP/1.1 413 Payload Too Large\r\n"));
}

#[tokio::test]
async fn test_unparsable_head_is_400() {
    let out = exchange(Config::default(), b"GET / HTTP/1.1\r\nno-colon\r\n\r\n").await;
    assert!(out.starts_with("HTTP/1.1 400 Bad Request\r\n"));
}

#[tokio::test]
async fn test_unknown_method_is_501() {
    let input = b"BREW /pot HTTP/1.1\r\nHost: example.com\r\nConnection: close\r\n\r\n";
    let out = exchange(Config::default(), input).await;
    assert!(out.starts_with("HTTP/1.1 501 Not Implemented\r\n"));
}

#[tokio::test]
async fn test_client_close_without_request() {
    let out = exchange(Config::default(), b"").await;
    assert!(out.is_empty());
}
