use page_logging::{page_debug, page_info, page_trace, page_warn};

use crate::stream::PayloadOutcome;
use crate::{
    star_label, AppState, Effect, Msg, RatingAction, RowKey, SubmissionOutcome,
    NOT_RELEVANT_LABEL, RESET_LABEL, STAR_COUNT,
};

const ALERT_SUBMISSION_FAILED: &str = "submission failed";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::StreamPayload(raw) => match state.apply_payload(&raw) {
            PayloadOutcome::Progressed => {
                resync_rows(&mut state);
                Vec::new()
            }
            PayloadOutcome::Closed { result_html } => {
                resync_rows(&mut state);
                let mut effects = vec![Effect::CloseStream];
                if let Some(html) = result_html {
                    effects.push(Effect::IndexRows { html });
                }
                effects
            }
            PayloadOutcome::ParseFailed => {
                state.mark_dirty();
                Vec::new()
            }
            PayloadOutcome::Ignored => Vec::new(),
        },
        Msg::StreamTransportError => {
            if state.apply_transport_error() {
                state.mark_dirty();
                vec![Effect::CloseStream]
            } else {
                Vec::new()
            }
        }
        Msg::RatingRowsLoaded(rows) => match state.merge_rating_rows(rows) {
            Some(added) => {
                page_debug!("Indexed {} new rating rows", added);
                state.mark_dirty();
                Vec::new()
            }
            None => {
                page_warn!("Rating rows delivered to a reaction page; ignoring");
                Vec::new()
            }
        },
        Msg::ReactionRowsLoaded(rows) => match state.merge_reaction_rows(rows) {
            Some(added) => {
                page_debug!("Indexed {} new reaction rows", added);
                state.mark_dirty();
                Vec::new()
            }
            None => {
                page_warn!("Reaction rows delivered to a rating page; ignoring");
                Vec::new()
            }
        },
        Msg::RatingClicked { key, action } => rating_clicked(&state, key, action),
        Msg::RatingSubmitted {
            key,
            label,
            outcome,
        } => match outcome {
            SubmissionOutcome::Accepted => {
                let applied = state
                    .ratings_mut()
                    .is_some_and(|board| board.acknowledge(&key, label));
                if applied {
                    page_info!(
                        "Rating {} for {} -> {} acknowledged",
                        label,
                        key.source,
                        key.candidate
                    );
                    state.mark_dirty();
                } else {
                    page_debug!("Acknowledged rating for unknown row {}", key.candidate);
                }
                Vec::new()
            }
            failure => failure_alert(&key.candidate, failure).into_iter().collect(),
        },
        Msg::ReactionClicked { candidate, code } => match state.reactions() {
            Some(board) if board.accepts(&candidate, code) => vec![Effect::SubmitReaction {
                source: board.source().to_string(),
                candidate,
                label: code,
            }],
            Some(_) => {
                page_debug!("Ignoring reaction {} on locked or unknown row {}", code, candidate);
                Vec::new()
            }
            None => {
                page_warn!("Reaction click on a rating page; ignoring");
                Vec::new()
            }
        },
        Msg::ReactionSubmitted {
            candidate,
            label,
            outcome,
        } => match outcome {
            SubmissionOutcome::Accepted => {
                let locked = state
                    .reactions_mut()
                    .is_some_and(|board| board.lock(&candidate, label));
                if locked {
                    page_info!("Reaction {} for {} acknowledged", label, candidate);
                    state.mark_dirty();
                }
                Vec::new()
            }
            failure => failure_alert(&candidate, failure).into_iter().collect(),
        },
    };

    (state, effects)
}

fn rating_clicked(state: &AppState, key: RowKey, action: RatingAction) -> Vec<Effect> {
    if state.ratings().is_none() {
        page_warn!("Rating click on a reaction page; ignoring");
        return Vec::new();
    }
    if !state.has_rating_row(&key) {
        page_debug!("Ignoring rating click on unknown row {}", key.candidate);
        return Vec::new();
    }
    let label = match action {
        RatingAction::Star(n) if (1..=STAR_COUNT).contains(&n) => star_label(n),
        RatingAction::Star(n) => {
            page_warn!("Ignoring click on star {} outside 1..={}", n, STAR_COUNT);
            return Vec::new();
        }
        RatingAction::Reset => RESET_LABEL,
        RatingAction::NotRelevant => NOT_RELEVANT_LABEL,
    };
    vec![Effect::SubmitRating { key, label }]
}

/// Every stored star widget is re-derived from stored state on the next render.
fn resync_rows(state: &mut AppState) {
    page_trace!("Resynchronizing rating rows after stream message");
    state.mark_dirty();
}

fn failure_alert(candidate: &str, outcome: SubmissionOutcome) -> Option<Effect> {
    let message = match outcome {
        SubmissionOutcome::Rejected { status } => {
            page_warn!("Feedback for {} rejected with status {}", candidate, status);
            ALERT_SUBMISSION_FAILED.to_string()
        }
        SubmissionOutcome::Failed { detail } => {
            page_warn!("Feedback for {} failed: {}", candidate, detail);
            format!("network error: {detail}")
        }
        SubmissionOutcome::Accepted => return None,
    };
    Some(Effect::Alert { message })
}
