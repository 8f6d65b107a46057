use serde::Deserialize;
use thiserror::Error;

/// One message of the similarity progress stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamMessage {
    Progress { percent: u8 },
    Done { html: String },
    Error { message: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("malformed stream payload: {0}")]
    Malformed(String),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WireMessage {
    Progress { progress: u64 },
    Done { html: String },
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

/// Parses one push payload. Percent values above 100 are clamped.
pub fn parse_stream_message(raw: &str) -> Result<StreamMessage, ProtocolError> {
    let wire: WireMessage =
        serde_json::from_str(raw).map_err(|err| ProtocolError::Malformed(err.to_string()))?;
    Ok(match wire {
        WireMessage::Progress { progress } => StreamMessage::Progress {
            percent: progress.min(100) as u8,
        },
        WireMessage::Done { html } => StreamMessage::Done { html },
        WireMessage::Error { message } => StreamMessage::Error { message },
    })
}
