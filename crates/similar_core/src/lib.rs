//! Similar-page core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod protocol;
mod rating;
mod reaction;
mod stars;
mod state;
mod stream;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Msg, RatingAction, SubmissionOutcome};
pub use protocol::{parse_stream_message, ProtocolError, StreamMessage};
pub use rating::{RatingRowSnapshot, RowKey, NOT_RELEVANT_LABEL, RESET_LABEL};
pub use reaction::ReactionRowSnapshot;
pub use stars::{active_star_count, render_stars, star_label, STAR_COUNT};
pub use state::{AppState, PageVariant};
pub use stream::ConnectionState;
pub use update::update;
pub use view_model::{
    ButtonStyle, PageView, PageViewModel, RatingRowView, ReactionButtonView, ReactionRowView,
    StatusClass, StatusViewModel,
};
