//! Similar-page engine: push-stream client, feedback submission and markup scanning.
mod engine;
mod events;
mod markup;
mod settings;
mod sse;
mod submit;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use events::{ChannelEventSink, EventSink, PushStream, ReqwestPushStream};
pub use markup::{extract_rating_rows, extract_reaction_rows, RatingRowMarkup, ReactionRowMarkup};
pub use settings::{ClientSettings, SearchQuery};
pub use sse::SseDecoder;
pub use submit::{ReqwestSubmitter, Submitter};
pub use types::{
    EngineEvent, FailureKind, RatingSubmission, ReactionSubmission, StreamError, SubmitError,
};
