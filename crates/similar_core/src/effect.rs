use crate::RowKey;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Close the push connection. Emitted once, on the transition to closed.
    CloseStream,
    /// Extract the rows present in freshly delivered result markup.
    IndexRows { html: String },
    SubmitRating { key: RowKey, label: f64 },
    SubmitReaction {
        source: String,
        candidate: String,
        label: i32,
    },
    /// Blocking user-facing notice.
    Alert { message: String },
}
