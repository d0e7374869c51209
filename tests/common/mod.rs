//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A request seen by the mock management API.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct SeenRequest {
    pub path: String,
    pub authorization: Option<String>,
}

/// Handle to a running mock management API.
#[allow(dead_code)]
pub struct MockApi {
    pub addr: SocketAddr,
    pub requests: Arc<Mutex<Vec<SeenRequest>>>,
}

#[allow(dead_code)]
impl MockApi {
    /// Host entry pointing at this mock ("127.0.0.1:port").
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|r| r.path.clone()).collect()
    }
}

/// Start a programmable mock management API on an ephemeral port.
///
/// `f` maps a request path to (status, body, delay in ms).
pub async fn start_management_api<F>(f: F) -> MockApi
where
    F: Fn(&str) -> (u16, String, u64) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        let (path, authorization) = parse_request(&request);
                        seen.lock().unwrap().push(SeenRequest {
                            path: path.clone(),
                            authorization,
                        });

                        let (status, body, delay_ms) = f(&path);
                        if delay_ms > 0 {
                            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                        }
                        let status_text = match status {
                            200 => "200 OK",
                            401 => "401 Unauthorized",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockApi { addr, requests }
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn parse_request(request: &str) -> (String, Option<String>) {
    let mut lines = request.lines();
    let path = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let authorization = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("authorization"))
        .map(|(_, value)| value.trim().to_string());
    (path, authorization)
}

/// JSON body for a node listing.
#[allow(dead_code)]
pub fn nodes_json(names: &[&str]) -> String {
    let nodes: Vec<_> = names
        .iter()
        .map(|n| serde_json::json!({ "name": n, "running": true, "type": "disc" }))
        .collect();
    serde_json::to_string(&nodes).unwrap()
}

/// JSON body for a queue listing of (node, durable) pairs.
#[allow(dead_code)]
pub fn queues_json(queues: &[(&str, bool)]) -> String {
    let queues: Vec<_> = queues
        .iter()
        .enumerate()
        .map(|(i, (node, durable))| {
            serde_json::json!({ "name": format!("q{}", i), "node": node, "durable": durable, "messages": 0 })
        })
        .collect();
    serde_json::to_string(&queues).unwrap()
}
