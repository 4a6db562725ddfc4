use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::Instant;

use crate::error::{FitRoomError, Result};
use crate::gemini::{GenerateTransport, TransportResponse};

/// Replays canned replies in order and records every call.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<TransportResponse>>>,
    calls: Mutex<Vec<(Instant, Value)>>,
    configured: bool,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<TransportResponse>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
            configured: true,
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new(Vec::new())
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(at, _)| *at).collect()
    }

    pub fn payloads(&self) -> Vec<Value> {
        self.calls.lock().unwrap().iter().map(|(_, body)| body.clone()).collect()
    }
}

#[async_trait]
impl GenerateTransport for ScriptedTransport {
    async fn send(&self, payload: &Value) -> Result<TransportResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now(), payload.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FitRoomError::Config("script exhausted".into())))
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn ok(body: Value) -> Result<TransportResponse> {
    Ok(TransportResponse::new(200, body))
}

pub fn status(status: u16, body: Value) -> Result<TransportResponse> {
    Ok(TransportResponse::new(status, body))
}

pub fn rate_limited() -> Result<TransportResponse> {
    status(
        429,
        json!({ "error": { "code": 429, "message": "Resource has been exhausted" } }),
    )
}

pub fn image_body(data: &str) -> Value {
    json!({
        "candidates": [{
            "content": {
                "parts": [{ "inlineData": { "mimeType": "image/png", "data": data } }]
            },
            "finishReason": "STOP"
        }]
    })
}

/// One raw HTTP reply served by [`CannedServer`].
#[derive(Debug, Clone)]
pub struct CannedReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl CannedReply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, content_type: &'static str, body: &str) -> Self {
        Self {
            status,
            content_type,
            body: body.to_string(),
        }
    }
}

/// A loopback HTTP/1.1 server answering each connection with the next reply;
/// the last reply repeats once the list runs out.
pub struct CannedServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl CannedServer {
    pub async fn start(replies: Vec<CannedReply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let index = counter.fetch_add(1, Ordering::SeqCst);
                let reply = match replies.get(index).or_else(|| replies.last()) {
                    Some(reply) => reply.clone(),
                    None => return,
                };
                if read_request(&mut stream).await.is_ok() {
                    let _ = write_reply(&mut stream, &reply).await;
                }
            }
        });

        Self { base_url, hits }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    Ok(())
}

async fn write_reply(stream: &mut TcpStream, reply: &CannedReply) -> std::io::Result<()> {
    let head = format!(
        "HTTP/1.1 {} Canned\r\ncontent-type: {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
        reply.status,
        reply.content_type,
        reply.body.len()
    );
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(reply.body.as_bytes()).await?;
    stream.shutdown().await
}
