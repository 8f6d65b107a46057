use std::sync::{mpsc, Arc};
use std::thread;

use page_logging::{page_debug, page_warn};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::events::{ChannelEventSink, EventSink, PushStream, ReqwestPushStream};
use crate::submit::{ReqwestSubmitter, Submitter};
use crate::{ClientSettings, EngineEvent, RatingSubmission, ReactionSubmission};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    OpenStream { url: Url },
    CloseStream,
    SubmitRating(RatingSubmission),
    SubmitReaction(ReactionSubmission),
}

/// Runs network IO on a background tokio runtime and reports back over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        Self::with_parts(
            Arc::new(ReqwestPushStream::new(settings.clone())),
            Arc::new(ReqwestSubmitter::new(settings)),
        )
    }

    pub fn with_parts(
        stream: Arc<dyn PushStream>,
        submitter: Arc<dyn Submitter>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        thread::spawn(move || {
            let mut active_stream: Option<CancellationToken> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::OpenStream { url } => {
                        if let Some(previous) = active_stream.take() {
                            page_warn!("Replacing an open push stream");
                            previous.cancel();
                        }
                        let cancel = CancellationToken::new();
                        active_stream = Some(cancel.clone());
                        let stream = stream.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let sink = ChannelEventSink::new(event_tx);
                            if let Err(err) = stream.run(url, &sink, cancel).await {
                                sink.emit(EngineEvent::StreamFailed(err));
                            }
                        });
                    }
                    EngineCommand::CloseStream => {
                        if let Some(cancel) = active_stream.take() {
                            page_debug!("Closing push stream");
                            cancel.cancel();
                        }
                    }
                    EngineCommand::SubmitRating(submission) => {
                        let submitter = submitter.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = submitter.submit_rating(&submission).await;
                            let _ = event_tx.send(EngineEvent::RatingSubmitted { submission, result });
                        });
                    }
                    EngineCommand::SubmitReaction(submission) => {
                        let submitter = submitter.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = submitter.submit_reaction(&submission).await;
                            let _ = event_tx.send(EngineEvent::ReactionSubmitted { submission, result });
                        });
                    }
                }
            }
            if let Some(cancel) = active_stream {
                cancel.cancel();
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn open_stream(&self, url: Url) {
        let _ = self.cmd_tx.send(EngineCommand::OpenStream { url });
    }

    pub fn close_stream(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CloseStream);
    }

    pub fn submit_rating(&self, submission: RatingSubmission) {
        let _ = self.cmd_tx.send(EngineCommand::SubmitRating(submission));
    }

    pub fn submit_reaction(&self, submission: ReactionSubmission) {
        let _ = self.cmd_tx.send(EngineCommand::SubmitReaction(submission));
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}
