#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

pub fn rtg() -> Command {
    cargo_bin_cmd!("rtagger")
}

/// Create an isolated config dir wired to the given server and return it.
pub fn setup_config_dir(name: &str, server_url: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{}_rtagger", name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("rtagger.conf"),
        format!(
            "server_url: {}/\napi_token: test-token\nlookback_days: 7\n",
            server_url.trim_end_matches('/')
        ),
    )
    .unwrap();
    dir
}

/// Same, but without any config file (pre-login state).
pub fn setup_empty_config_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{}_rtagger", name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[derive(Clone)]
pub struct StubState {
    pub records: Arc<Mutex<Vec<serde_json::Value>>>,
    pub accept_puts: Arc<AtomicBool>,
    pub auth_ok: Arc<AtomicBool>,
}

/// Minimal TimeTagger server double: serves `GET/PUT records` and the
/// `GET settings` probe on a local port, keeping records in memory. It
/// deliberately ignores the `hidden` parameter so tests exercise the
/// client-side tombstone filtering.
pub struct StubServer {
    pub state: StubState,
    addr: SocketAddr,
}

impl StubServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let state = StubState {
            records: Arc::new(Mutex::new(Vec::new())),
            accept_puts: Arc::new(AtomicBool::new(true)),
            auth_ok: Arc::new(AtomicBool::new(true)),
        };

        let thread_state = state.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let st = thread_state.clone();
                thread::spawn(move || handle_connection(stream, st));
            }
        });

        Self { state, addr }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn push_record(&self, key: &str, t1: i64, t2: i64, ds: &str) {
        self.state.records.lock().unwrap().push(serde_json::json!({
            "key": key, "t1": t1, "t2": t2, "mt": t1, "ds": ds, "st": 1.0
        }));
    }

    pub fn record(&self, key: &str) -> Option<serde_json::Value> {
        self.state
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r["key"] == key)
            .cloned()
    }

    pub fn record_count(&self) -> usize {
        self.state.records.lock().unwrap().len()
    }

    pub fn reject_puts(&self) {
        self.state.accept_puts.store(false, Ordering::SeqCst);
    }

    pub fn reject_auth(&self) {
        self.state.auth_ok.store(false, Ordering::SeqCst);
    }
}

fn handle_connection(stream: TcpStream, state: StubState) {
    let mut reader = BufReader::new(match stream.try_clone() {
        Ok(s) => s,
        Err(_) => return,
    });

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() || request_line.trim().is_empty() {
        return;
    }

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).is_err() {
            return;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    if content_length > 0 && reader.read_exact(&mut body).is_err() {
        return;
    }

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("");
    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p, q),
        None => (target, ""),
    };

    let mut stream = stream;

    if !state.auth_ok.load(Ordering::SeqCst) {
        respond(&mut stream, 403, "{}");
        return;
    }

    match (method, path) {
        ("GET", "/timetagger/api/v2/settings") => respond(&mut stream, 200, "{}"),
        ("GET", "/timetagger/api/v2/records") => {
            let params = parse_query(query);
            let running_only = params.get("running").map(|v| v == "1").unwrap_or(false);

            let records = state.records.lock().unwrap();
            let selected: Vec<serde_json::Value> = records
                .iter()
                .filter(|r| !running_only || r["t1"] == r["t2"])
                .cloned()
                .collect();
            let body = serde_json::json!({ "records": selected }).to_string();
            respond(&mut stream, 200, &body);
        }
        ("PUT", "/timetagger/api/v2/records") => {
            let incoming: Vec<serde_json::Value> =
                serde_json::from_slice(&body).unwrap_or_default();
            let keys: Vec<String> = incoming
                .iter()
                .filter_map(|r| r["key"].as_str().map(String::from))
                .collect();

            let body = if state.accept_puts.load(Ordering::SeqCst) {
                let mut records = state.records.lock().unwrap();
                for rec in incoming {
                    let key = rec["key"].clone();
                    if let Some(existing) = records.iter_mut().find(|r| r["key"] == key) {
                        *existing = rec;
                    } else {
                        records.push(rec);
                    }
                }
                serde_json::json!({ "accepted": keys, "failed": [], "errors": {} }).to_string()
            } else {
                serde_json::json!({ "accepted": [], "failed": keys, "errors": {} }).to_string()
            };
            respond(&mut stream, 200, &body);
        }
        _ => respond(&mut stream, 404, "{}"),
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn respond(stream: &mut TcpStream, status: u16, body: &str) {
    let reason = match status {
        200 => "OK",
        403 => "Forbidden",
        _ => "Not Found",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}
