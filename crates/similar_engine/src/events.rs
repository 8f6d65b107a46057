use futures_util::StreamExt;
use page_logging::{page_debug, page_info};
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::sse::SseDecoder;
use crate::types::map_reqwest_error;
use crate::{ClientSettings, EngineEvent, FailureKind, StreamError};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// One server-push connection.
#[async_trait::async_trait]
pub trait PushStream: Send + Sync {
    /// Delivers every payload to `sink` until `cancel` fires (`Ok`) or the
    /// connection fails or ends (`Err`).
    async fn run(
        &self,
        url: Url,
        sink: &dyn EventSink,
        cancel: CancellationToken,
    ) -> Result<(), StreamError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPushStream {
    settings: ClientSettings,
}

impl ReqwestPushStream {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, StreamError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .build()
            .map_err(|err| StreamError::new(FailureKind::Network, err.to_string()))
    }

    async fn pump(&self, url: Url, sink: &dyn EventSink) -> Result<(), StreamError> {
        let client = self.build_client()?;
        let response = client
            .get(url)
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|err| stream_error(map_reqwest_error(&err), err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let mut decoder = SseDecoder::new();
        let mut delivered = 0usize;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| stream_error(map_reqwest_error(&err), err))?;
            for payload in decoder.push(&chunk) {
                delivered += 1;
                sink.emit(EngineEvent::StreamPayload(payload));
            }
        }

        page_debug!("Push stream ended after {} events", delivered);
        Err(StreamError::new(
            FailureKind::Disconnected,
            "server closed the event stream",
        ))
    }
}

#[async_trait::async_trait]
impl PushStream for ReqwestPushStream {
    async fn run(
        &self,
        url: Url,
        sink: &dyn EventSink,
        cancel: CancellationToken,
    ) -> Result<(), StreamError> {
        page_info!("Opening push stream {}", url);
        tokio::select! {
            _ = cancel.cancelled() => {
                page_debug!("Push stream closed by client");
                Ok(())
            }
            result = self.pump(url, sink) => result,
        }
    }
}

fn stream_error(kind: FailureKind, err: reqwest::Error) -> StreamError {
    StreamError::new(kind, err.to_string())
}
