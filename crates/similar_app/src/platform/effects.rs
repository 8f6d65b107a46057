use page_logging::{page_debug, page_info, page_warn};
use similar_core::{
    Effect, Msg, RatingRowSnapshot, ReactionRowSnapshot, RowKey, SubmissionOutcome,
};
use similar_engine::{
    extract_rating_rows, extract_reaction_rows, EngineEvent, EngineHandle, FailureKind,
    RatingSubmission, ReactionSubmission, SubmitError,
};

use super::ui::surface::TextSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Ratings,
    Reactions,
}

/// Executes effects against the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    rows: RowKind,
    in_flight: usize,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, rows: RowKind) -> Self {
        Self {
            engine,
            rows,
            in_flight: 0,
        }
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    /// Number of feedback requests still waiting for an answer.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Runs effects in order. Returns messages produced synchronously.
    pub fn run(&mut self, effects: Vec<Effect>, surface: &TextSurface) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::CloseStream => {
                    self.engine.close_stream();
                }
                Effect::IndexRows { html } => {
                    follow_ups.push(index_rows(self.rows, &html));
                }
                Effect::SubmitRating { key, label } => {
                    page_info!(
                        "SubmitRating source={} candidate={} label={}",
                        key.source,
                        key.candidate,
                        label
                    );
                    self.in_flight += 1;
                    self.engine.submit_rating(RatingSubmission {
                        source_file_name: key.source,
                        candidate_file_name: key.candidate,
                        label,
                    });
                }
                Effect::SubmitReaction {
                    source,
                    candidate,
                    label,
                } => {
                    page_info!(
                        "SubmitReaction source={} candidate={} label={}",
                        source,
                        candidate,
                        label
                    );
                    self.in_flight += 1;
                    self.engine.submit_reaction(ReactionSubmission {
                        source_file_name: source,
                        candidate_file_name: candidate,
                        label,
                    });
                }
                Effect::Alert { message } => surface.alert(&message),
            }
        }
        follow_ups
    }

    pub fn translate(&mut self, event: EngineEvent) -> Msg {
        match event {
            EngineEvent::StreamPayload(payload) => Msg::StreamPayload(payload),
            EngineEvent::StreamFailed(err) => {
                page_warn!("Push stream failed: {}", err);
                Msg::StreamTransportError
            }
            EngineEvent::RatingSubmitted { submission, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Msg::RatingSubmitted {
                    key: RowKey::new(submission.source_file_name, submission.candidate_file_name),
                    label: submission.label,
                    outcome: outcome(result),
                }
            }
            EngineEvent::ReactionSubmitted { submission, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Msg::ReactionSubmitted {
                    candidate: submission.candidate_file_name,
                    label: submission.label,
                    outcome: outcome(result),
                }
            }
        }
    }
}

fn index_rows(kind: RowKind, html: &str) -> Msg {
    match kind {
        RowKind::Ratings => {
            let rows: Vec<RatingRowSnapshot> = extract_rating_rows(html)
                .into_iter()
                .map(|row| RatingRowSnapshot {
                    key: RowKey::new(row.source, row.candidate),
                    current: row.current,
                })
                .collect();
            page_debug!("Found {} rating rows in result markup", rows.len());
            Msg::RatingRowsLoaded(rows)
        }
        RowKind::Reactions => {
            let rows: Vec<ReactionRowSnapshot> = extract_reaction_rows(html)
                .into_iter()
                .map(|row| ReactionRowSnapshot {
                    candidate: row.candidate,
                    codes: row.codes,
                })
                .collect();
            page_debug!("Found {} reaction rows in result markup", rows.len());
            Msg::ReactionRowsLoaded(rows)
        }
    }
}

fn outcome(result: Result<(), SubmitError>) -> SubmissionOutcome {
    match result {
        Ok(()) => SubmissionOutcome::Accepted,
        Err(SubmitError {
            kind: FailureKind::HttpStatus(status),
            ..
        }) => SubmissionOutcome::Rejected { status },
        Err(err) => SubmissionOutcome::Failed {
            detail: err.message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_maps_to_rejection() {
        let err = SubmitError {
            kind: FailureKind::HttpStatus(502),
            message: "502 Bad Gateway".to_string(),
        };
        assert_eq!(outcome(Err(err)), SubmissionOutcome::Rejected { status: 502 });
    }

    #[test]
    fn transport_errors_carry_their_detail() {
        let err = SubmitError {
            kind: FailureKind::Network,
            message: "connection refused".to_string(),
        };
        assert_eq!(
            outcome(Err(err)),
            SubmissionOutcome::Failed {
                detail: "connection refused".to_string()
            }
        );
        assert_eq!(outcome(Ok(())), SubmissionOutcome::Accepted);
    }

    #[test]
    fn rows_are_indexed_for_the_page_kind() {
        let html = r#"<table><tr data-source="s" data-candidate="c">
            <td><div class="star-rating" data-current="0.4"></div>
                <button class="feedback-btn" data-label="1"></button></td></tr></table>"#;
        assert_eq!(
            index_rows(RowKind::Ratings, html),
            Msg::RatingRowsLoaded(vec![RatingRowSnapshot {
                key: RowKey::new("s", "c"),
                current: 0.4,
            }])
        );
        assert_eq!(
            index_rows(RowKind::Reactions, html),
            Msg::ReactionRowsLoaded(vec![ReactionRowSnapshot {
                candidate: "c".to_string(),
                codes: vec![1],
            }])
        );
    }
}
