use crate::sse::server_sent_event::{ServerSentEvent, drain_blocks};
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::Sender;
use tokio::time::timeout;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub retry_ms: u64,
    pub retry_max_delay: Duration,
    pub max_retries: usize,
    pub stale_connection_timeout: Duration,
}

/// Streams events from `config.url` into `tx`, reconnecting with backoff until the retries run out.
#[instrument(skip_all, fields(url = %config.url))]
pub async fn listen<T>(tx: Sender<ServerSentEvent<T>>, client: &Client, config: &Config) -> Result<(), SseError>
where
    T: DeserializeOwned + Debug + Send + 'static,
{
    // Delays of retry_ms, 2 * retry_ms, 4 * retry_ms, ...
    let strategy = ExponentialBackoff::from_millis(2)
        .factor((config.retry_ms / 2).max(1))
        .max_delay(config.retry_max_delay)
        .map(jitter)
        .take(config.max_retries);

    info!("Connecting to SSE stream {}...", config.url);
    RetryIf::start(
        strategy,
        || connect_sse_stream::<T>(tx.clone(), client, config),
        |error: &SseError| {
            let retryable = error.is_retryable();
            if retryable {
                warn!("⚠️ SSE error: {}. Retrying...", error);
            }
            retryable
        },
    )
    .await
}

async fn connect_sse_stream<T>(tx: Sender<ServerSentEvent<T>>, client: &Client, config: &Config) -> Result<(), SseError>
where
    T: DeserializeOwned + Debug + 'static,
{
    let response = client
        .get(&config.url)
        .query(&config.query)
        .header("Accept", "text/event-stream")
        .send()
        .await?;

    match response.status() {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(SseError::Forbidden(response.status())),
        status if !status.is_success() => return Err(SseError::Status(status)),
        status => info!(status = %status, "Connecting to SSE stream {}... OK", config.url),
    }

    let mut stream = response.bytes_stream();
    let mut buffer: Vec<u8> = Vec::new();
    loop {
        let chunk = timeout(config.stale_connection_timeout, stream.next()).await;
        match chunk {
            Ok(Some(Ok(bytes))) => {
                buffer.extend_from_slice(&bytes);
                for block in drain_blocks(&mut buffer) {
                    match ServerSentEvent::<T>::from_str(&block) {
                        Ok(event) => {
                            debug!(event = block.as_str(), "🔸 Received event: {:?}", event);
                            tx.send(event).await.map_err(|_| SseError::Forward)?;
                        }
                        Err(e) => warn!(event = block.as_str(), "⚠️ Skipping malformed event: {}", e),
                    }
                }
            }
            Ok(Some(Err(e))) => {
                error!("❌ SSE stream error: {}", e);
                return Err(SseError::Request(e));
            }
            Ok(None) => {
                warn!("🔴 SSE stream ended");
                return Err(SseError::Closed);
            }
            Err(_) => {
                warn!("⏳ No data for {} seconds. Reconnecting...", config.stale_connection_timeout.as_secs());
                return Err(SseError::Timeout(config.stale_connection_timeout));
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum SseError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("access to the event stream was refused ({0})")]
    Forbidden(StatusCode),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("event stream closed")]
    Closed,
    #[error("no data for {} seconds", .0.as_secs())]
    Timeout(Duration),
    #[error("event receiver dropped")]
    Forward,
}

impl SseError {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, SseError::Forbidden(_) | SseError::Forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use test_log::test;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    #[derive(Deserialize, PartialEq, Debug)]
    struct Ping {
        n: u32,
    }

    fn config(url: String) -> Config {
        Config {
            url,
            query: vec![],
            retry_ms: 1,
            retry_max_delay: Duration::from_millis(5),
            max_retries: 0,
            stale_connection_timeout: Duration::from_secs(5),
        }
    }

    #[test(tokio::test)]
    async fn forwards_events_until_the_stream_closes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body("data: {\"n\": 1}\n\n: ping\n\ndata: {\"n\": 2}\n\n")
            .create_async()
            .await;

        let (tx, mut rx) = mpsc::channel::<ServerSentEvent<Ping>>(8);
        let result = listen(tx, &Client::new(), &config(format!("{}/", server.url()))).await;

        mock.assert();
        assert!(matches!(result, Err(SseError::Closed)));
        assert_eq!(rx.recv().await.and_then(|e| e.data), Some(Ping { n: 1 }));
        assert_eq!(rx.recv().await.and_then(|e| e.data), None);
        assert_eq!(rx.recv().await.and_then(|e| e.data), Some(Ping { n: 2 }));
    }

    #[test(tokio::test)]
    async fn keeps_events_whose_crlf_terminator_spans_two_chunks() -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}/", listener.local_addr()?);
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await?;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n")
                .await?;
            for chunk in [&b"data: {\"n\": 1}\r\n\r"[..], b"\n", b"data: {\"n\": 2}\r\n\r\n"] {
                socket.write_all(chunk).await?;
                socket.flush().await?;
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            socket.shutdown().await
        });

        let (tx, mut rx) = mpsc::channel::<ServerSentEvent<Ping>>(8);
        let result = listen(tx, &Client::new(), &config(url)).await;
        server.await??;

        assert!(matches!(result, Err(SseError::Closed)));
        assert_eq!(rx.recv().await.and_then(|e| e.data), Some(Ping { n: 1 }));
        assert_eq!(rx.recv().await.and_then(|e| e.data), Some(Ping { n: 2 }));
        Ok(())
    }

    #[test(tokio::test)]
    async fn reconnects_up_to_max_retries() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", "/").with_status(503).expect(3).create_async().await;

        let (tx, _rx) = mpsc::channel::<ServerSentEvent<Ping>>(8);
        let mut config = config(format!("{}/", server.url()));
        config.max_retries = 2;
        let result = listen(tx, &Client::new(), &config).await;

        mock.assert();
        assert!(matches!(result, Err(SseError::Status(StatusCode::SERVICE_UNAVAILABLE))));
    }

    #[test(tokio::test)]
    async fn does_not_retry_when_access_is_refused() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", "/").with_status(403).expect(1).create_async().await;

        let (tx, _rx) = mpsc::channel::<ServerSentEvent<Ping>>(8);
        let mut config = config(format!("{}/", server.url()));
        config.max_retries = 5;
        let result = listen(tx, &Client::new(), &config).await;

        mock.assert();
        assert!(matches!(result, Err(SseError::Forbidden(StatusCode::FORBIDDEN))));
    }
}
