use similar_core::{
    ButtonStyle, PageView, PageViewModel, RatingRowView, ReactionRowView, RowKey, StatusClass,
};

use super::constants::*;

/// One mutation of the page, in the vocabulary of the page's markup contract.
#[derive(Debug, Clone, PartialEq)]
pub enum DomCommand {
    SetText {
        element: &'static str,
        text: String,
    },
    SetClass {
        element: &'static str,
        class: &'static str,
    },
    SetInnerHtml {
        element: &'static str,
        html: String,
    },
    /// `data-current` of a row's `.star-rating` container.
    SetRowRating { key: RowKey, current: f64 },
    /// Toggle `active` on the `.star` with the given `data-value`.
    SetStarActive { key: RowKey, value: u8, active: bool },
    RemoveRow { key: RowKey },
    SetButton {
        candidate: String,
        code: i32,
        disabled: bool,
        opacity: f32,
        bold: bool,
    },
}

/// Projects the whole view model onto the page. Star widgets are emitted
/// after the result markup so stored ratings win over freshly injected HTML.
pub fn render(view: &PageViewModel) -> Vec<DomCommand> {
    let mut cmds = vec![
        DomCommand::SetText {
            element: ELEMENT_STATUS,
            text: view.status.text.clone(),
        },
        DomCommand::SetClass {
            element: ELEMENT_STATUS,
            class: status_class(view.status.css_class),
        },
        DomCommand::SetText {
            element: ELEMENT_PROGRESS,
            text: view.status.progress_text.clone(),
        },
        DomCommand::SetInnerHtml {
            element: ELEMENT_RESULT,
            html: view.status.result_html.clone(),
        },
    ];

    match &view.page {
        PageView::Ratings { rows, removed } => {
            for row in rows {
                push_rating_row(&mut cmds, row);
            }
            cmds.extend(
                removed
                    .iter()
                    .map(|key| DomCommand::RemoveRow { key: key.clone() }),
            );
        }
        PageView::Reactions { rows, .. } => {
            for row in rows {
                push_reaction_row(&mut cmds, row);
            }
        }
    }

    cmds
}

fn status_class(class: StatusClass) -> &'static str {
    match class {
        StatusClass::None => CLASS_NONE,
        StatusClass::Loading => CLASS_LOADING,
        StatusClass::Error => CLASS_ERROR,
    }
}

fn push_rating_row(cmds: &mut Vec<DomCommand>, row: &RatingRowView) {
    cmds.push(DomCommand::SetRowRating {
        key: row.key.clone(),
        current: row.current,
    });
    for (index, active) in row.stars.iter().enumerate() {
        cmds.push(DomCommand::SetStarActive {
            key: row.key.clone(),
            value: index as u8 + 1,
            active: *active,
        });
    }
}

fn push_reaction_row(cmds: &mut Vec<DomCommand>, row: &ReactionRowView) {
    for button in &row.buttons {
        let (opacity, bold) = match button.style {
            ButtonStyle::Normal => (OPACITY_NORMAL, false),
            ButtonStyle::Emphasized => (OPACITY_NORMAL, true),
            ButtonStyle::Dimmed => (OPACITY_DIMMED, false),
        };
        cmds.push(DomCommand::SetButton {
            candidate: row.candidate.clone(),
            code: button.code,
            disabled: !button.enabled,
            opacity,
            bold,
        });
    }
}

#[cfg(test)]
mod tests {
    use similar_core::{
        update, AppState, Msg, PageVariant, RatingAction, RatingRowSnapshot, ReactionRowSnapshot,
        SubmissionOutcome,
    };

    use super::*;

    fn key() -> RowKey {
        RowKey::new("src.fb2", "a.fb2")
    }

    fn stars_of(cmds: &[DomCommand]) -> Vec<(u8, bool)> {
        cmds.iter()
            .filter_map(|cmd| match cmd {
                DomCommand::SetStarActive { value, active, .. } => Some((*value, *active)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn progress_projects_status_and_progress_text() {
        let (state, _) = update(
            AppState::default(),
            Msg::StreamPayload(r#"{"type":"progress","progress":40}"#.to_string()),
        );
        let cmds = render(&state.view());
        assert_eq!(
            &cmds[..4],
            &[
                DomCommand::SetText {
                    element: ELEMENT_STATUS,
                    text: "searching".to_string()
                },
                DomCommand::SetClass {
                    element: ELEMENT_STATUS,
                    class: CLASS_LOADING
                },
                DomCommand::SetText {
                    element: ELEMENT_PROGRESS,
                    text: "Progress: 40%".to_string()
                },
                DomCommand::SetInnerHtml {
                    element: ELEMENT_RESULT,
                    html: String::new()
                },
            ]
        );
    }

    #[test]
    fn acknowledged_rating_lights_stars_and_sets_data_current() {
        let (state, _) = update(
            AppState::default(),
            Msg::RatingRowsLoaded(vec![RatingRowSnapshot {
                key: key(),
                current: 0.0,
            }]),
        );
        let (state, _) = update(
            state,
            Msg::RatingClicked {
                key: key(),
                action: RatingAction::Star(4),
            },
        );
        let (state, _) = update(
            state,
            Msg::RatingSubmitted {
                key: key(),
                label: 0.8,
                outcome: SubmissionOutcome::Accepted,
            },
        );

        let cmds = render(&state.view());
        assert!(cmds.contains(&DomCommand::SetRowRating {
            key: key(),
            current: 0.8
        }));
        assert_eq!(
            stars_of(&cmds),
            vec![(1, true), (2, true), (3, true), (4, true), (5, false)]
        );
    }

    #[test]
    fn removed_rows_are_projected_as_removals() {
        let (state, _) = update(
            AppState::default(),
            Msg::RatingRowsLoaded(vec![RatingRowSnapshot {
                key: key(),
                current: 0.2,
            }]),
        );
        let (state, _) = update(
            state,
            Msg::RatingSubmitted {
                key: key(),
                label: -1.0,
                outcome: SubmissionOutcome::Accepted,
            },
        );
        let cmds = render(&state.view());
        assert!(cmds.contains(&DomCommand::RemoveRow { key: key() }));
        assert!(stars_of(&cmds).is_empty());
    }

    #[test]
    fn locked_reaction_row_dims_other_buttons() {
        let state = AppState::new(PageVariant::Reactions {
            source: "src.fb2".to_string(),
        });
        let (state, _) = update(
            state,
            Msg::ReactionRowsLoaded(vec![ReactionRowSnapshot {
                candidate: "a.fb2".to_string(),
                codes: vec![LIKE_LABEL, DISLIKE_LABEL],
            }]),
        );
        let (state, _) = update(
            state,
            Msg::ReactionSubmitted {
                candidate: "a.fb2".to_string(),
                label: LIKE_LABEL,
                outcome: SubmissionOutcome::Accepted,
            },
        );

        let buttons: Vec<_> = render(&state.view())
            .into_iter()
            .filter(|cmd| matches!(cmd, DomCommand::SetButton { .. }))
            .collect();
        assert_eq!(
            buttons,
            vec![
                DomCommand::SetButton {
                    candidate: "a.fb2".to_string(),
                    code: LIKE_LABEL,
                    disabled: false,
                    opacity: OPACITY_NORMAL,
                    bold: true,
                },
                DomCommand::SetButton {
                    candidate: "a.fb2".to_string(),
                    code: DISLIKE_LABEL,
                    disabled: true,
                    opacity: OPACITY_DIMMED,
                    bold: false,
                },
            ]
        );
    }
}
