//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed bodies keyed by request target (path plus query) and records
//! every target it was asked for, so tests can assert which upstream calls a
//! build made. Unknown targets get a 404.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use modloader::LoaderSettings;

#[derive(Debug, Clone)]
pub struct Route {
    status: u16,
    body: Vec<u8>,
    /// Promise more bytes than `body` holds and then go quiet.
    stall: bool,
    /// Read the request and never answer.
    silent: bool,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            stall: false,
            silent: false,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            stall: false,
            silent: false,
        }
    }

    pub fn silent() -> Self {
        Self {
            status: 200,
            body: Vec::new(),
            stall: false,
            silent: true,
        }
    }

    pub fn stalled(prefix: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: prefix.into(),
            stall: true,
            silent: false,
        }
    }
}

pub struct TestServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    /// Starts a server in a background thread. It runs until the process exits.
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(target, route)| (target.to_string(), route))
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                thread::spawn(move || handle(stream, &routes, &log));
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            requests,
        }
    }

    pub fn url(&self, target: &str) -> String {
        format!("{}{}", self.base_url, target)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests whose target starts with `prefix`.
    pub fn hits(&self, prefix: &str) -> usize {
        self.requests()
            .iter()
            .filter(|target| target.starts_with(prefix))
            .count()
    }

    /// Settings with every endpoint pointed at this server.
    pub fn settings(&self) -> LoaderSettings {
        let mut settings = LoaderSettings::default();
        settings.endpoints.version_manifest = self.url("/mc/game/version_manifest_v2.json");
        settings.endpoints.fabric_meta = self.url("/fabric/v2");
        settings.endpoints.forge_maven = self.url("/forge");
        settings.endpoints.neoforge_maven = self.url("/neoforge/releases");
        settings.endpoints.optifine = self.base_url.clone();
        settings.connect_timeout_secs = 2;
        settings.request_timeout_secs = 5;
        settings.download_idle_timeout_secs = 5;
        settings
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();
    log.lock().unwrap().push(target.clone());

    let Some(route) = routes.get(&target) else {
        let _ = stream.write_all(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    };

    if route.silent {
        thread::sleep(Duration::from_secs(4));
        return;
    }

    let declared_len = if route.stall {
        route.body.len() + 1024
    } else {
        route.body.len()
    };
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        reason(route.status),
        declared_len
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&route.body);
    let _ = stream.flush();

    if route.stall {
        thread::sleep(Duration::from_secs(4));
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
