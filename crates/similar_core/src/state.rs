use crate::rating::RatingBoard;
use crate::reaction::ReactionBoard;
use crate::stream::{PayloadOutcome, StreamController};
use crate::view_model::{PageView, PageViewModel};
use crate::{ConnectionState, RatingRowSnapshot, ReactionRowSnapshot, RowKey};

/// Which feedback controls the page carries. A page is one or the other for
/// its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageVariant {
    Ratings,
    Reactions { source: String },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Page {
    Ratings(RatingBoard),
    Reactions(ReactionBoard),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    stream: StreamController,
    page: Page,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PageVariant::Ratings)
    }
}

impl AppState {
    pub fn new(variant: PageVariant) -> Self {
        let page = match variant {
            PageVariant::Ratings => Page::Ratings(RatingBoard::default()),
            PageVariant::Reactions { source } => Page::Reactions(ReactionBoard::new(source)),
        };
        Self {
            stream: StreamController::default(),
            page,
            dirty: false,
        }
    }

    pub fn view(&self) -> PageViewModel {
        let page = match &self.page {
            Page::Ratings(board) => {
                let (rows, removed) = board.view();
                PageView::Ratings { rows, removed }
            }
            Page::Reactions(board) => PageView::Reactions {
                source: board.source().to_string(),
                rows: board.view(),
            },
        };
        PageViewModel {
            status: self.stream.status().clone(),
            connection: self.stream.connection(),
            page,
            dirty: self.dirty,
        }
    }

    pub fn connection(&self) -> ConnectionState {
        self.stream.connection()
    }

    /// Returns whether the view changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn apply_payload(&mut self, raw: &str) -> PayloadOutcome {
        self.stream.on_payload(raw)
    }

    pub(crate) fn apply_transport_error(&mut self) -> bool {
        self.stream.on_transport_error()
    }

    pub(crate) fn ratings(&self) -> Option<&RatingBoard> {
        match &self.page {
            Page::Ratings(board) => Some(board),
            Page::Reactions(_) => None,
        }
    }

    pub(crate) fn ratings_mut(&mut self) -> Option<&mut RatingBoard> {
        match &mut self.page {
            Page::Ratings(board) => Some(board),
            Page::Reactions(_) => None,
        }
    }

    pub(crate) fn reactions(&self) -> Option<&ReactionBoard> {
        match &self.page {
            Page::Reactions(board) => Some(board),
            Page::Ratings(_) => None,
        }
    }

    pub(crate) fn reactions_mut(&mut self) -> Option<&mut ReactionBoard> {
        match &mut self.page {
            Page::Reactions(board) => Some(board),
            Page::Ratings(_) => None,
        }
    }

    pub(crate) fn merge_rating_rows(&mut self, rows: Vec<RatingRowSnapshot>) -> Option<usize> {
        self.ratings_mut().map(|board| board.merge(rows))
    }

    pub(crate) fn merge_reaction_rows(&mut self, rows: Vec<ReactionRowSnapshot>) -> Option<usize> {
        self.reactions_mut().map(|board| board.merge(rows))
    }

    /// Looks up an indexed rating row by candidate file name.
    pub fn rating_key(&self, candidate: &str) -> Option<RowKey> {
        self.ratings()?.key_for(candidate).cloned()
    }

    pub(crate) fn has_rating_row(&self, key: &RowKey) -> bool {
        self.ratings().is_some_and(|board| board.contains(key))
    }
}
