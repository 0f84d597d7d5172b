//! Thin HTTP serving layer for the paged users endpoint.
//!
//! One route, GET only, JSON bodies, one allowed CORS origin. Kept to a
//! minimal HTTP/1.1 responder over `tokio::net::TcpListener`: each connection
//! is one request, answered and closed. In production mode unmatched GET
//! paths fall through to the prebuilt static bundle with an index.html
//! catch-all.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::store::{DEFAULT_LIMIT, DEFAULT_PAGE, UserStore};

/// Maximum bytes read for a request head. Requests are GETs with short query
/// strings; anything larger is rejected.
const MAX_REQUEST_HEAD: usize = 8 * 1024;

/// Settled serving options.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Port to bind on (0 picks an ephemeral port).
    pub port: u16,
    /// Origin allowed to issue cross-origin GETs.
    pub client_origin: String,
    /// Static bundle directory served as a catch-all (production mode).
    pub static_dir: Option<PathBuf>,
}

/// The bound server, ready to accept connections.
pub struct Server {
    listener: TcpListener,
    store: Arc<UserStore>,
    options: Arc<ServerOptions>,
}

impl Server {
    /// Binds the listening socket.
    ///
    /// Binding is split from `run` so callers (and tests) can learn the
    /// ephemeral port before the accept loop starts.
    pub async fn bind(store: UserStore, options: ServerOptions) -> Result<Self> {
        let addr = SocketAddr::from(([0, 0, 0, 0], options.port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind port {}", options.port))?;
        Ok(Self {
            listener,
            store: Arc::new(store),
            options: Arc::new(options),
        })
    }

    /// The address actually bound (resolves port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("Failed to read local address")
    }

    /// Runs the accept loop, one task per connection.
    pub async fn run(self) -> Result<()> {
        let addr = self.local_addr()?;
        info!(port = addr.port(), users = self.store.len(), "server listening");

        loop {
            let (stream, peer) = self
                .listener
                .accept()
                .await
                .context("Failed to accept connection")?;
            let store = Arc::clone(&self.store);
            let options = Arc::clone(&self.options);
            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, &store, &options).await {
                    debug!(%peer, error = %e, "connection error");
                }
            });
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    store: &UserStore,
    options: &ServerOptions,
) -> Result<()> {
    let head = read_request_head(&mut stream).await?;
    let request = parse_request_line(&head)?;

    let response = route(&request, store, options).await;
    write_response(&mut stream, &response, &options.client_origin).await
}

/// Parsed request line: method plus target split into path and query.
struct Request<'a> {
    method: &'a str,
    path: &'a str,
    query: &'a str,
}

/// A response ready to serialize.
struct Response {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Response {
    fn json(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: "application/json",
            body,
        }
    }

    fn error(status: u16, message: &str) -> Self {
        let body = serde_json::json!({ "message": message });
        Self::json(status, body.to_string().into_bytes())
    }
}

async fn route(request: &Request<'_>, store: &UserStore, options: &ServerOptions) -> Response {
    if request.method != "GET" {
        return Response::error(405, "Method not allowed");
    }

    if request.path == "/api/v1/fetchUsers" {
        return fetch_users(request.query, store);
    }

    if let Some(dir) = &options.static_dir {
        return serve_static(dir, request.path).await;
    }

    Response::error(404, "Not found")
}

/// Handles `GET /api/v1/fetchUsers?page=<int>&limit=<int>`.
///
/// Malformed or non-positive page/limit values are silently defaulted, never
/// rejected.
fn fetch_users(query: &str, store: &UserStore) -> Response {
    let page = query_u32(query, "page").unwrap_or(DEFAULT_PAGE);
    let limit = query_u32(query, "limit").unwrap_or(DEFAULT_LIMIT);

    let users_page = store.page(page, limit);
    match serde_json::to_vec(&users_page) {
        Ok(body) => Response::json(200, body),
        Err(e) => {
            warn!(error = %e, "failed to serialize page");
            Response::error(500, "Failed to fetch users")
        }
    }
}

/// Extracts a positive integer query parameter, if one was sent and parses.
fn query_u32(query: &str, name: &str) -> Option<u32> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == name)
        .and_then(|(_, v)| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
}

/// Serves a file from the static bundle, falling back to index.html so the
/// bundle's client-side routes resolve.
async fn serve_static(dir: &Path, request_path: &str) -> Response {
    // Reject traversal; everything served must stay under the bundle dir.
    if request_path.contains("..") {
        return Response::error(404, "Not found");
    }

    let relative = request_path.trim_start_matches('/');
    let candidate = if relative.is_empty() {
        dir.join("index.html")
    } else {
        dir.join(relative)
    };

    let resolved = match tokio::fs::read(&candidate).await {
        Ok(body) => Some((content_type_for(&candidate), body)),
        Err(_) => match tokio::fs::read(dir.join("index.html")).await {
            Ok(body) => Some(("text/html", body)),
            Err(_) => None,
        },
    };

    match resolved {
        Some((content_type, body)) => Response {
            status: 200,
            content_type,
            body,
        },
        None => Response::error(404, "Not found"),
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Reads bytes until the end of the request head (blank line).
async fn read_request_head(stream: &mut TcpStream) -> Result<String> {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];

    loop {
        let n = stream.read(&mut chunk).await.context("read request")?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
        if buf.len() > MAX_REQUEST_HEAD {
            anyhow::bail!("request head too large");
        }
    }

    String::from_utf8(buf).context("request head is not valid UTF-8")
}

fn parse_request_line(head: &str) -> Result<Request<'_>> {
    let line = head.lines().next().context("empty request")?;
    let mut parts = line.split_whitespace();
    let method = parts.next().context("missing method")?;
    let target = parts.next().context("missing request target")?;

    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path, query),
        None => (target, ""),
    };

    Ok(Request {
        method,
        path,
        query,
    })
}

async fn write_response(stream: &mut TcpStream, response: &Response, origin: &str) -> Result<()> {
    let reason = match response.status {
        200 => "OK",
        404 => "Not Found",
        405 => "Method Not Allowed",
        _ => "Internal Server Error",
    };

    let head = format!(
        "HTTP/1.1 {} {}\r\n\
         Content-Type: {}\r\n\
         Content-Length: {}\r\n\
         Access-Control-Allow-Origin: {}\r\n\
         Access-Control-Allow-Methods: GET\r\n\
         Connection: close\r\n\
         \r\n",
        response.status,
        reason,
        response.content_type,
        response.body.len(),
        origin,
    );

    stream.write_all(head.as_bytes()).await.context("write response head")?;
    stream.write_all(&response.body).await.context("write response body")?;
    stream.flush().await.context("flush response")?;
    Ok(())
}
