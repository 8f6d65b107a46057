use page_logging::{page_debug, page_info, page_warn};

use crate::view_model::{StatusClass, StatusViewModel};
use crate::{parse_stream_message, StreamMessage};

const TEXT_SEARCHING: &str = "searching";
const TEXT_DONE: &str = "done";
const TEXT_ERROR: &str = "error";
const TEXT_PARSE_FAILURE: &str = "connection error";
const TEXT_CONNECTION_LOST: &str = "lost connection to server";
const UNKNOWN_ERROR: &str = "unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Open,
    Closed,
}

/// What a single payload did to the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PayloadOutcome {
    /// A progress message; the connection stays open.
    Progressed,
    /// A terminal message closed the connection. Carries the result markup
    /// for a `done` message.
    Closed { result_html: Option<String> },
    /// The payload did not parse; the connection stays open.
    ParseFailed,
    /// The connection was already closed.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct StreamController {
    connection: ConnectionState,
    status: StatusViewModel,
}

impl StreamController {
    pub(crate) fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub(crate) fn status(&self) -> &StatusViewModel {
        &self.status
    }

    pub(crate) fn on_payload(&mut self, raw: &str) -> PayloadOutcome {
        if self.connection == ConnectionState::Closed {
            page_debug!("Dropping stream payload after close ({} bytes)", raw.len());
            return PayloadOutcome::Ignored;
        }

        let message = match parse_stream_message(raw) {
            Ok(message) => message,
            Err(err) => {
                page_warn!("Stream payload rejected: {}", err);
                self.status.text = TEXT_PARSE_FAILURE.to_string();
                self.status.css_class = StatusClass::Error;
                return PayloadOutcome::ParseFailed;
            }
        };

        match message {
            StreamMessage::Progress { percent } => {
                self.status.text = TEXT_SEARCHING.to_string();
                self.status.css_class = StatusClass::Loading;
                self.status.progress_text = format!("Progress: {percent}%");
                PayloadOutcome::Progressed
            }
            StreamMessage::Done { html } => {
                page_info!("Similarity search finished ({} bytes of markup)", html.len());
                self.connection = ConnectionState::Closed;
                self.status.text = TEXT_DONE.to_string();
                self.status.css_class = StatusClass::None;
                self.status.progress_text.clear();
                self.status.result_html = html.clone();
                PayloadOutcome::Closed {
                    result_html: Some(html),
                }
            }
            StreamMessage::Error { message } => {
                let message = message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
                page_warn!("Similarity search failed on the server: {}", message);
                self.connection = ConnectionState::Closed;
                self.status.text = TEXT_ERROR.to_string();
                self.status.css_class = StatusClass::Error;
                self.status.progress_text.clear();
                self.status.result_html =
                    format!("<p class=\"error\">request failed: {message}</p>");
                PayloadOutcome::Closed { result_html: None }
            }
        }
    }

    /// Returns true when this call closed the connection. A failure reported
    /// after the connection closed changes nothing.
    pub(crate) fn on_transport_error(&mut self) -> bool {
        if self.connection == ConnectionState::Closed {
            page_debug!("Transport failure after close ignored");
            return false;
        }
        page_warn!("Push connection failed; closing");
        self.connection = ConnectionState::Closed;
        self.status.text = TEXT_CONNECTION_LOST.to_string();
        self.status.css_class = StatusClass::Error;
        self.status.progress_text.clear();
        true
    }
}
