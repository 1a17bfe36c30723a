//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of assets by path. Unknown paths get 404. Every request
//! line and its headers are recorded so tests can assert what was sent.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Asset {
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
}

impl Asset {
    pub fn new(content_type: Option<&'static str>, body: &[u8]) -> Self {
        Self {
            content_type,
            body: body.to_vec(),
        }
    }
}

/// A request as seen by the server: target (path + query) and raw header lines.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub target: String,
    pub headers: Vec<String>,
}

pub struct AssetServer {
    /// Base URL ending in `/`, e.g. "http://127.0.0.1:12345/".
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<SeenRequest>>>,
}

impl AssetServer {
    pub fn targets(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.target.clone())
            .collect()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(assets: Vec<(&'static str, Asset)>) -> AssetServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let assets: Arc<HashMap<&'static str, Asset>> = Arc::new(assets.into_iter().collect());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let assets = Arc::clone(&assets);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &assets, &seen));
        }
    });
    AssetServer {
        base_url: format!("http://127.0.0.1:{}/", port),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    assets: &HashMap<&'static str, Asset>,
    seen: &Mutex<Vec<SeenRequest>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };

    let mut lines = request.lines();
    let request_line = lines.next().unwrap_or("");
    let target = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
    let headers: Vec<String> = lines
        .take_while(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    seen.lock().unwrap().push(SeenRequest {
        target: target.clone(),
        headers,
    });

    let path = target.split('?').next().unwrap_or("/");
    match assets.get(path) {
        Some(asset) => {
            let content_type = asset
                .content_type
                .map(|ct| format!("Content-Type: {}\r\n", ct))
                .unwrap_or_default();
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
                asset.body.len(),
                content_type
            );
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(&asset.body);
        }
        None => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
        }
    }
}
