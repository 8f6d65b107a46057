use crate::{ConnectionState, RowKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusClass {
    #[default]
    None,
    Loading,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusViewModel {
    pub text: String,
    pub css_class: StatusClass,
    pub progress_text: String,
    pub result_html: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingRowView {
    pub key: RowKey,
    pub current: f64,
    /// Active flag per star, index 0 is the star with value 1.
    pub stars: Vec<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Normal,
    Emphasized,
    Dimmed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionButtonView {
    pub code: i32,
    pub enabled: bool,
    pub style: ButtonStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionRowView {
    pub candidate: String,
    pub buttons: Vec<ReactionButtonView>,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Ratings {
        rows: Vec<RatingRowView>,
        removed: Vec<RowKey>,
    },
    Reactions {
        source: String,
        rows: Vec<ReactionRowView>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageViewModel {
    pub status: StatusViewModel,
    pub connection: ConnectionState,
    pub page: PageView,
    pub dirty: bool,
}

impl PageViewModel {
    pub fn rating_row(&self, key: &RowKey) -> Option<&RatingRowView> {
        match &self.page {
            PageView::Ratings { rows, .. } => rows.iter().find(|row| &row.key == key),
            PageView::Reactions { .. } => None,
        }
    }

    pub fn reaction_row(&self, candidate: &str) -> Option<&ReactionRowView> {
        match &self.page {
            PageView::Reactions { rows, .. } => rows.iter().find(|row| row.candidate == candidate),
            PageView::Ratings { .. } => None,
        }
    }
}
