#![allow(dead_code)]

use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use reqwest::{Method, Request, Response, Url};
use rusty_batch::{Transport, TransportError};

pub fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

pub fn get(base: &str, path: &str) -> Request {
    let url = Url::parse(base).unwrap().join(path).unwrap();
    Request::new(Method::GET, url)
}

pub fn response(status: u16, path: &str) -> Response {
    Response::from(
        http::Response::builder()
            .status(status)
            .header("x-path", path)
            .body("")
            .unwrap(),
    )
}

pub fn path_of(response: &Response) -> String {
    response.headers()["x-path"].to_str().unwrap().to_string()
}

/// In-process transport driven by the request path:
/// `/ok/<delay ms>`, `/status/<code>`, `/refused`, `/timeout`.
#[derive(Default)]
pub struct ScriptedTransport {
    in_flight: AtomicUsize,
    pub peak: AtomicUsize,
    pub calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for ScriptedTransport {
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        let path = request.url().path().to_string();
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        let result = match segments.as_slice() {
            ["ok", delay] => {
                tokio::time::sleep(Duration::from_millis(delay.parse().unwrap())).await;
                Ok(response(200, &path))
            }
            ["status", code] => Err(TransportError::Status(response(code.parse().unwrap(), &path))),
            ["timeout"] => Err(TransportError::Timeout(Duration::from_secs(3))),
            _ => Err(TransportError::other(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Ordered record of handler invocations.
#[derive(Clone, Default)]
pub struct Events(Arc<Mutex<Vec<String>>>);

impl Events {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn sorted(&self) -> Vec<String> {
        let mut events = self.snapshot();
        events.sort();
        events
    }
}

/// Minimal HTTP/1.1 server answering `GET /status/<code>` with that status
/// and anything else with 200. Every response echoes the path in `x-path`.
pub fn spawn_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || {
                let _ = serve(stream);
            });
        }
    });
    addr
}

fn serve(stream: TcpStream) -> io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 || line == "\r\n" {
            break;
        }
    }

    let path = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
    let status = path
        .strip_prefix("/status/")
        .and_then(|code| code.parse::<u16>().ok())
        .unwrap_or(200);
    let body = format!("served {}", path);

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {} Status\r\nx-path: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        path,
        body.len(),
        body
    )?;
    stream.flush()
}

/// An address nothing is listening on.
pub fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}
