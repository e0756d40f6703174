//! HTTP transport tests
//!
//! Runs the real `reqwest` transport against a one-shot local server and
//! checks what goes over the wire.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use strawpoll::{ClientConfig, Error, NewPoll, PollClient, USER_AGENT};

/// Request as seen by the server
#[derive(Debug)]
struct CapturedRequest {
    request_line: String,
    /// Lower-cased `name: value` header lines
    headers: Vec<String>,
    body: String,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<String> {
        let prefix = format!("{}:", name.to_ascii_lowercase());
        self.headers
            .iter()
            .find(|h| h.starts_with(&prefix))
            .map(|h| h[prefix.len()..].trim().to_string())
    }
}

/// Serve exactly one request with `status` and `body`, then return it.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}/api/v2", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        let header_end = loop {
            let n = stream.read(&mut chunk).unwrap();
            assert!(n > 0, "connection closed before headers were complete");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap().to_string();
        let headers: Vec<String> = lines.map(|l| l.to_ascii_lowercase()).collect();

        let content_length = headers
            .iter()
            .find_map(|h| h.strip_prefix("content-length:"))
            .map(|v| v.trim().parse::<usize>().unwrap())
            .unwrap_or(0);

        let body_start = header_end + 4;
        while buf.len() < body_start + content_length {
            let n = stream.read(&mut chunk).unwrap();
            assert!(n > 0, "connection closed before body was complete");
            buf.extend_from_slice(&chunk[..n]);
        }
        let request_body =
            String::from_utf8_lossy(&buf[body_start..body_start + content_length]).to_string();

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        CapturedRequest {
            request_line,
            headers,
            body: request_body,
        }
    });

    (base_url, handle)
}

fn client_for(base_url: &str) -> PollClient {
    PollClient::new(ClientConfig::default().with_base_url(base_url).with_timeout(10)).unwrap()
}

#[test]
fn test_get_poll_over_http() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"id": 42, "title": "Tabs or spaces", "options": ["Tabs", "Spaces"], "votes": [1, 3], "dupcheck": "normal"}"#,
    );

    let poll = client_for(&base_url).get(42).unwrap();
    let request = server.join().unwrap();

    assert_eq!(request.request_line, "GET /api/v2/polls/42 HTTP/1.1");
    assert_eq!(request.header("user-agent"), Some(USER_AGENT.to_ascii_lowercase()));
    assert!(request.body.is_empty());

    assert_eq!(poll.id(), 42);
    assert_eq!(poll.total_votes(), 4);
    assert_eq!(poll.normalise_default().get("Spaces"), Some(&75.0));
}

#[test]
fn test_create_poll_over_http() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"id": 1001, "title": "Lunch?", "options": ["Pizza", "Tacos"], "multi": false, "dupcheck": "normal", "captcha": true}"#,
    );

    let request = NewPoll::new("Lunch?", ["Pizza", "Tacos"]).with_captcha(true);
    let poll = client_for(&base_url).create(&request).unwrap();
    let captured = server.join().unwrap();

    assert_eq!(captured.request_line, "POST /api/v2/polls HTTP/1.1");
    assert_eq!(captured.header("content-type"), Some("application/json".to_string()));
    assert!(captured.header("user-agent").is_some());

    let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(
        sent,
        serde_json::json!({
            "title": "Lunch?",
            "options": ["Pizza", "Tacos"],
            "multi": false,
            "dupcheck": "normal",
            "captcha": true
        })
    );

    assert_eq!(poll.id(), 1001);
    assert!(poll.captcha());
}

#[test]
fn test_bad_request_body_over_http() {
    let (base_url, server) = serve_once("400 Bad Request", "Bad Request\n");

    let err = client_for(&base_url)
        .create(&NewPoll::new("", Vec::<String>::new()))
        .unwrap_err();
    server.join().unwrap();

    match err {
        Error::BadRequest(api) => assert_eq!(api.to_string(), "Bad Request"),
        other => panic!("expected BadRequest, got {:?}", other),
    }
}

#[test]
fn test_service_error_over_http() {
    let (base_url, server) = serve_once("200 OK", r#"{"error": "Invalid Poll ID", "code": 40}"#);

    let err = client_for(&base_url).get(-5).unwrap_err();
    let captured = server.join().unwrap();

    assert_eq!(captured.request_line, "GET /api/v2/polls/-5 HTTP/1.1");
    assert_eq!(err.code(), Some(40));
}

#[test]
fn test_connection_failure_is_http_error() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = client_for(&format!("http://127.0.0.1:{}", port));
    assert!(matches!(client.get(1), Err(Error::Http(_))));
}
