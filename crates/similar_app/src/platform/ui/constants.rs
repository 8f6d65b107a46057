pub const ELEMENT_STATUS: &str = "status";
pub const ELEMENT_PROGRESS: &str = "progress";
pub const ELEMENT_RESULT: &str = "result";

pub const CLASS_NONE: &str = "";
pub const CLASS_LOADING: &str = "loading";
pub const CLASS_ERROR: &str = "error";

pub const OPACITY_NORMAL: f32 = 1.0;
pub const OPACITY_DIMMED: f32 = 0.4;

/// Action codes carried by the like/dislike buttons.
pub const LIKE_LABEL: i32 = 1;
pub const DISLIKE_LABEL: i32 = 0;
