//! Loopback socket for the voice intent.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"intent.utter", "params":{"utterance":"Tell Blablador to ..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! The server runs on its own tokio runtime; accepted commands leave through
//! the `CommandSink`, never by touching UI state.

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
use tokio::net::TcpListener;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info, warn};

use crate::intent_handler::handle_line;
use crate::services::voice_intent::{CommandSink, VoiceIntent};
use crate::types::errors::IntentError;
use crate::types::intent::{IntentRequest, IntentResponse};

/// Longest accepted request line, newline excluded.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Simple rate limiter: max requests per one-second window.
pub struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    pub fn new(max_per_second: u32) -> Self {
        Self {
            window_start: Instant::now(),
            request_count: 0,
            max_per_second,
        }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    pub fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

struct Shared {
    intent: VoiceIntent,
    sink: Arc<dyn CommandSink>,
    limiter: Mutex<RateLimiter>,
}

/// A running intent server and the runtime that drives it.
pub struct IntentServer {
    runtime: Runtime,
    local_addr: SocketAddr,
}

impl IntentServer {
    /// Binds `addr` and starts accepting connections in the background.
    pub fn start(
        addr: &str,
        intent: VoiceIntent,
        sink: Arc<dyn CommandSink>,
        max_per_second: u32,
    ) -> Result<Self, IntentError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("blablador-intent")
            .enable_all()
            .build()
            .map_err(|e| IntentError::Transport(e.to_string()))?;

        let listener = runtime
            .block_on(TcpListener::bind(addr))
            .map_err(|e| IntentError::Transport(format!("bind {}: {}", addr, e)))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| IntentError::Transport(e.to_string()))?;

        let shared = Arc::new(Shared {
            intent,
            sink,
            limiter: Mutex::new(RateLimiter::new(max_per_second)),
        });
        runtime.spawn(accept_loop(listener, shared));

        info!(%local_addr, "intent server listening");
        Ok(Self { runtime, local_addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn shutdown(self) {
        self.runtime.shutdown_background();
    }
}

async fn accept_loop(listener: TcpListener, shared: Arc<Shared>) {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                debug!(%peer, "intent connection");
                tokio::spawn(serve_connection(stream, shared.clone()));
            }
            Err(e) => warn!(error = %e, "intent accept failed"),
        }
    }
}

/// Outcome of reading one request line.
#[derive(Debug, PartialEq, Eq)]
enum LineRead {
    Line,
    /// The line exceeded `MAX_LINE_BYTES`; it was consumed and dropped.
    TooLong,
    Eof,
}

/// Reads one line into `buf` without ever buffering more than
/// `MAX_LINE_BYTES + 1` bytes. The rest of an oversized line is skipped.
async fn read_request_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<LineRead>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let limit = MAX_LINE_BYTES as u64 + 1;
    let n = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
    if n == 0 {
        return Ok(LineRead::Eof);
    }
    if buf.last() == Some(&b'\n') || buf.len() <= MAX_LINE_BYTES {
        return Ok(LineRead::Line);
    }

    loop {
        buf.clear();
        let n = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
        if n == 0 || buf.last() == Some(&b'\n') {
            break;
        }
    }
    buf.clear();
    Ok(LineRead::TooLong)
}

async fn serve_connection(stream: tokio::net::TcpStream, shared: Arc<Shared>) {
    let (read, mut write) = stream.into_split();
    let mut reader = AsyncBufReader::new(read);
    let mut buf = Vec::new();

    loop {
        let mut response = match read_request_line(&mut reader, &mut buf).await {
            Ok(LineRead::Eof) => break,
            Ok(LineRead::TooLong) => {
                warn!(max = MAX_LINE_BYTES, "intent request too long, dropped");
                serde_json::to_string(&IntentResponse::err(
                    serde_json::Value::Null,
                    "request too long",
                ))
                .unwrap_or_default()
            }
            Ok(LineRead::Line) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let allowed = shared
                    .limiter
                    .lock()
                    .map(|mut l| l.check())
                    .unwrap_or(false);

                if allowed {
                    handle_line(&shared.intent, shared.sink.as_ref(), line)
                } else {
                    let id = serde_json::from_str::<IntentRequest>(line)
                        .map(|r| r.id)
                        .unwrap_or(serde_json::Value::Null);
                    serde_json::to_string(&IntentResponse::err(id, "rate limit exceeded"))
                        .unwrap_or_default()
                }
            }
            Err(e) => {
                debug!(error = %e, "intent connection closed");
                break;
            }
        };
        response.push('\n');

        if let Err(e) = write.write_all(response.as_bytes()).await {
            debug!(error = %e, "intent client went away");
            break;
        }
    }
}

/// Blocking client: sends one request and waits for its response line.
pub fn send_request(
    addr: &str,
    request: &IntentRequest,
    timeout: Duration,
) -> Result<IntentResponse, IntentError> {
    let mut stream = TcpStream::connect(addr)
        .map_err(|e| IntentError::Transport(format!("connect {}: {}", addr, e)))?;
    stream
        .set_read_timeout(Some(timeout))
        .map_err(|e| IntentError::Transport(e.to_string()))?;

    let mut line = serde_json::to_string(request)
        .map_err(|e| IntentError::BadRequest(e.to_string()))?;
    line.push('\n');
    stream
        .write_all(line.as_bytes())
        .map_err(|e| IntentError::Transport(e.to_string()))?;

    let mut reader = BufReader::new(stream);
    let mut response = String::new();
    reader
        .read_line(&mut response)
        .map_err(|e| IntentError::Transport(e.to_string()))?;

    serde_json::from_str(response.trim())
        .map_err(|e| IntentError::Transport(format!("bad response: {}", e)))
}
