#![allow(dead_code)]

use serde_json::Value;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// One request as seen by the stub completion endpoint.
#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    /// Header names are lower-cased.
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

pub struct StubCompletion {
    pub endpoint: String,
    pub requests: Receiver<CapturedRequest>,
}

/// Serve exactly one HTTP request on a loopback port, answering with `status` and
/// `body`, and hand the captured request back through `requests`.
pub fn spawn_stub(status: u16, body: &str) -> StubCompletion {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    let (tx, rx) = mpsc::channel();
    let body = body.to_string();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("request line");

        let mut headers = Vec::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("header line");
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((k, v)) = line.split_once(':') {
                let k = k.trim().to_ascii_lowercase();
                let v = v.trim().to_string();
                if k == "content-length" {
                    content_length = v.parse().expect("content-length");
                }
                headers.push((k, v));
            }
        }

        let mut raw = vec![0u8; content_length];
        reader.read_exact(&mut raw).expect("request body");
        let parsed = serde_json::from_slice(&raw).unwrap_or(Value::Null);
        let _ = tx.send(CapturedRequest {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: parsed,
        });

        let reason = if status == 200 { "OK" } else { "Error" };
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
    });

    StubCompletion {
        endpoint: format!("http://{addr}/v1/chat/completions"),
        requests: rx,
    }
}

/// A chat-completion response body whose first choice carries `content`.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
        ]
    })
    .to_string()
}
