//! Shared fixtures for connector integration tests

#![allow(dead_code)]

use polcmp_connector::{
    ConnectorConfig, Connector, HttpMethod, HttpRequest, HttpResponse, Transport,
    TransportFailure,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};

/// What the fake transport observed for one request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub api_key: Option<String>,
    pub body: Option<Value>,
}

/// Replays a fixed script of outcomes, one per request
///
/// Running off the end of the script answers with an empty page so a
/// misbehaving pagination loop fails an assertion instead of hanging.
pub struct FakeTransport {
    script: RefCell<VecDeque<Result<HttpResponse, TransportFailure>>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            script: RefCell::new(VecDeque::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.script
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body.to_string())));
        self
    }

    pub fn respond_raw(self, status: u16, body: &str) -> Self {
        self.script
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(self, failure: TransportFailure) -> Self {
        self.script.borrow_mut().push_back(Err(failure));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: &HttpRequest<'_>) -> Result<HttpResponse, TransportFailure> {
        self.requests.borrow_mut().push(RecordedRequest {
            method: request.method,
            url: request.url.clone(),
            api_key: request.header("api-secret-key").map(str::to_string),
            body: request
                .body
                .as_deref()
                .map(|b| serde_json::from_str(b).unwrap()),
        });
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, json!({}).to_string())))
    }
}

pub const BASE_URL: &str = "http://policy.test/api/";

pub fn test_config() -> ConnectorConfig {
    ConnectorConfig::for_endpoint("swp", "us-1", "test-key")
        .unwrap()
        .with_base_url(BASE_URL)
        .unwrap()
}

pub fn fake_connector(transport: FakeTransport) -> Connector<FakeTransport> {
    Connector::with_transport(test_config(), transport)
}

/// One page of search results under `key`
pub fn page(key: &str, items: Vec<Value>) -> Value {
    json!({ key: items })
}

/// A request as seen by the loopback server
#[derive(Debug, Clone)]
pub struct CapturedHttp {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedHttp {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Serve one canned HTTP response per entry on a loopback port
///
/// Each accepted connection gets the next `(status, body)` pair and is then
/// closed. The handle yields every request received.
pub fn serve(responses: Vec<(u16, String)>) -> (SocketAddr, JoinHandle<Vec<CapturedHttp>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let mut captured = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            captured.push(read_request(&mut stream));
            let reply = format!(
                "HTTP/1.1 {} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(reply.as_bytes()).unwrap();
            stream.flush().unwrap();
        }
        captured
    });
    (addr, handle)
}

fn read_request(stream: &mut std::net::TcpStream) -> CapturedHttp {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).unwrap();

    CapturedHttp {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: String::from_utf8(body).unwrap(),
    }
}
