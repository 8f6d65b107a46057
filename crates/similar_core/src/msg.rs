use crate::{RatingRowSnapshot, ReactionRowSnapshot, RowKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingAction {
    /// Click on star `n` (1-based).
    Star(u8),
    Reset,
    NotRelevant,
}

/// Result of one feedback request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted,
    /// The server answered with a non-success status.
    Rejected { status: u16 },
    /// The request never completed.
    Failed { detail: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Raw text of one push event.
    StreamPayload(String),
    /// The push connection itself broke.
    StreamTransportError,
    /// Rows found in the markup of the rating page.
    RatingRowsLoaded(Vec<RatingRowSnapshot>),
    /// Rows found in the markup of the reaction page.
    ReactionRowsLoaded(Vec<ReactionRowSnapshot>),
    /// User clicked a rating control of a row.
    RatingClicked { key: RowKey, action: RatingAction },
    /// Rating request completed.
    RatingSubmitted {
        key: RowKey,
        label: f64,
        outcome: SubmissionOutcome,
    },
    /// User clicked a like/dislike button of a row.
    ReactionClicked { candidate: String, code: i32 },
    /// Reaction request completed.
    ReactionSubmitted {
        candidate: String,
        label: i32,
        outcome: SubmissionOutcome,
    },
}
