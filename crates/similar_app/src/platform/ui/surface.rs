use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use similar_core::{RowKey, STAR_COUNT};

use super::constants::*;
use super::render::DomCommand;

#[derive(Debug, Clone, PartialEq)]
struct StarRow {
    current: f64,
    stars: [bool; STAR_COUNT as usize],
}

#[derive(Debug, Clone, PartialEq)]
struct ButtonState {
    disabled: bool,
    opacity: f32,
    bold: bool,
}

/// Terminal stand-in for the page: applies projected commands and prints a
/// compact rendition whenever it changes.
#[derive(Debug, Default)]
pub struct TextSurface {
    status: String,
    status_class: &'static str,
    progress: String,
    result_html: String,
    rows: BTreeMap<RowKey, StarRow>,
    removed: BTreeSet<RowKey>,
    buttons: BTreeMap<(String, i32), ButtonState>,
    last_frame: String,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, cmds: Vec<DomCommand>) {
        for cmd in cmds {
            match cmd {
                DomCommand::SetText { element, text } if element == ELEMENT_STATUS => {
                    self.status = text
                }
                DomCommand::SetText { element, text } if element == ELEMENT_PROGRESS => {
                    self.progress = text
                }
                DomCommand::SetClass { element, class } if element == ELEMENT_STATUS => {
                    self.status_class = class
                }
                DomCommand::SetInnerHtml { element, html } if element == ELEMENT_RESULT => {
                    self.result_html = html
                }
                DomCommand::SetText { .. }
                | DomCommand::SetClass { .. }
                | DomCommand::SetInnerHtml { .. } => {}
                DomCommand::SetRowRating { key, current } => {
                    if !self.removed.contains(&key) {
                        self.row_mut(key).current = current;
                    }
                }
                DomCommand::SetStarActive { key, value, active } => {
                    let index = usize::from(value).wrapping_sub(1);
                    if self.removed.contains(&key) || index >= STAR_COUNT as usize {
                        continue;
                    }
                    self.row_mut(key).stars[index] = active;
                }
                DomCommand::RemoveRow { key } => {
                    self.rows.remove(&key);
                    self.removed.insert(key);
                }
                DomCommand::SetButton {
                    candidate,
                    code,
                    disabled,
                    opacity,
                    bold,
                } => {
                    self.buttons.insert(
                        (candidate, code),
                        ButtonState {
                            disabled,
                            opacity,
                            bold,
                        },
                    );
                }
            }
        }
    }

    /// Prints the page if it changed since the last draw.
    pub fn draw(&mut self) {
        let frame = self.frame();
        if frame == self.last_frame {
            return;
        }
        let mut out = io::stdout().lock();
        let _ = out.write_all(frame.as_bytes());
        let _ = out.flush();
        self.last_frame = frame;
    }

    /// Blocking notice; the terminal equivalent of a modal alert.
    pub fn alert(&self, message: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "!! {message}");
        let _ = out.flush();
    }

    fn row_mut(&mut self, key: RowKey) -> &mut StarRow {
        self.rows.entry(key).or_insert(StarRow {
            current: 0.0,
            stars: [false; STAR_COUNT as usize],
        })
    }

    fn frame(&self) -> String {
        let mut frame = String::new();
        let class = if self.status_class.is_empty() {
            String::new()
        } else {
            format!("[{}] ", self.status_class)
        };
        frame.push_str(&format!("{class}{}", self.status));
        if !self.progress.is_empty() {
            frame.push_str(&format!("  {}", self.progress));
        }
        frame.push('\n');
        if !self.result_html.is_empty() {
            frame.push_str(&format!("  result: {} bytes of markup\n", self.result_html.len()));
        }
        for (key, row) in &self.rows {
            let stars: String = row
                .stars
                .iter()
                .map(|active| if *active { '*' } else { '.' })
                .collect();
            frame.push_str(&format!("  {} [{}] {:.1}\n", key.candidate, stars, row.current));
        }
        let mut grouped: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for ((candidate, code), button) in &self.buttons {
            let label = button_label(*code);
            let marker = match (button.bold, button.disabled) {
                (true, _) => format!("<{label}>"),
                (false, true) => format!("({label}, {:.1})", button.opacity),
                (false, false) => label,
            };
            grouped.entry(candidate.as_str()).or_default().push(marker);
        }
        for (candidate, markers) in grouped {
            frame.push_str(&format!("  {candidate}: {}\n", markers.join(" ")));
        }
        frame
    }
}

fn button_label(code: i32) -> String {
    match code {
        LIKE_LABEL => "like".to_string(),
        DISLIKE_LABEL => "dislike".to_string(),
        other => format!("#{other}"),
    }
}
