//! Minimal HTTP/1.1 server answering canned JSON:API responses.
//!
//! Routes match on method and path (query ignored); anything else gets a
//! JSON:API 404. Every request is recorded before its response is written.

use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self::bytes(status, "application/vnd.api+json", body.to_string().as_bytes())
    }

    pub fn bytes(status: u16, content_type: &str, body: &[u8]) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".into(), content_type.into())],
            body: body.to_vec(),
        }
    }

    pub fn redirect(location: &str) -> Self {
        Self {
            status: 303,
            headers: vec![("Location".into(), location.into())],
            body: Vec::new(),
        }
    }

    pub fn not_found() -> Self {
        Self::json(
            404,
            json!({ "errors": [{ "status": "404", "code": "not_found", "detail": "Object not found" }] }),
        )
    }
}

/// Single-object document
pub fn object(kind: &str, id: &str, attributes: Value) -> Value {
    json!({ "data": { "type": kind, "id": id, "attributes": attributes } })
}

#[derive(Debug, Clone)]
pub struct Received {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

/// Requests seen by a running [`MockApi`]
#[derive(Debug, Clone, Default)]
pub struct Requests(Arc<Mutex<Vec<Received>>>);

impl Requests {
    pub fn all(&self) -> Vec<Received> {
        self.0.lock().expect("request log").clone()
    }

    pub fn to(&self, method: &str, path: &str) -> Vec<Received> {
        self.all()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

pub struct MockApi {
    listener: TcpListener,
    base_url: String,
    routes: HashMap<(String, String), Reply>,
}

impl MockApi {
    pub async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock api");
        let address = listener.local_addr().expect("mock api address");

        Self {
            listener,
            base_url: format!("http://{}", address),
            routes: HashMap::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute url of `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn route(&mut self, method: &str, path: &str, reply: Reply) -> &mut Self {
        self.routes.insert((method.to_string(), path.to_string()), reply);
        self
    }

    /// Serve requests in the background until the runtime shuts down.
    pub fn start(self) -> Requests {
        let MockApi { listener, routes, .. } = self;
        let routes = Arc::new(routes);
        let requests = Requests::default();

        let log = requests.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(stream, routes.clone(), log.clone()));
            }
        });

        requests
    }
}

async fn serve(stream: TcpStream, routes: Arc<HashMap<(String, String), Reply>>, log: Requests) {
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).await.unwrap_or(0) == 0 {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0;
    let mut authorization = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            match name.to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.parse().unwrap_or(0),
                "authorization" => authorization = Some(value.to_string()),
                _ => {}
            }
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).await.expect("read request body");

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (target.clone(), None),
    };

    let reply = routes
        .get(&(method.clone(), path.clone()))
        .cloned()
        .unwrap_or_else(Reply::not_found);

    log.0.lock().expect("request log").push(Received {
        method,
        path,
        query,
        authorization,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        reply.status,
        reason(reply.status),
        reply.body.len()
    );
    for (name, value) in &reply.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    head.push_str("\r\n");

    let mut stream = reader.into_inner();
    let _ = stream.write_all(head.as_bytes()).await;
    let _ = stream.write_all(&reply.body).await;
    let _ = stream.shutdown().await;
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        303 => "See Other",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
