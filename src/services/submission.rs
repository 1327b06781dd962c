//! submission.rs
//!
//! Явная машина состояний формы "предложить лучшее место".
//!
//! Вместо набора флагов (loading / error / form open / submitting) форма
//! всегда находится ровно в одном состоянии:
//!
//! `Idle → FormOpen → Validating → Submitting → Refreshing → Idle`,
//! а при ошибке `Submitting → FormOpen` с сохранённым черновиком.
//! Автоматических повторов нет: пользователь отправляет форму заново сам.

use serde::Serialize;
use std::mem;
use tracing::{info, warn};

use crate::{
    api_client::SubmissionReceipt,
    config::SuggestionConfig,
    error::ClientError,
    validation::{canonical_seat, check_notes, check_seat, remaining, ValidationError},
};

/// Текст, который пользователь набирает в форме, и ошибки по полям.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestionDraft {
    pub seat: String,
    pub notes: String,
    pub seat_error: Option<ValidationError>,
    pub notes_error: Option<ValidationError>,
    pub seat_remaining: i64,
    pub notes_remaining: i64,
}

impl SuggestionDraft {
    fn new(limits: &SuggestionConfig) -> Self {
        Self {
            seat_remaining: limits.seat_max_length as i64,
            notes_remaining: limits.notes_max_length as i64,
            ..Self::default()
        }
    }

    fn set_seat(&mut self, seat: &str, limits: &SuggestionConfig) {
        self.seat = seat.to_string();
        self.seat_remaining = remaining(seat, limits.seat_max_length);
        self.seat_error = check_seat(seat, limits, false).err();
    }

    fn set_notes(&mut self, notes: &str, limits: &SuggestionConfig) {
        self.notes = notes.to_string();
        self.notes_remaining = remaining(notes, limits.notes_max_length);
        self.notes_error = check_notes(notes, limits).err();
    }

    pub fn has_errors(&self) -> bool {
        self.seat_error.is_some() || self.notes_error.is_some()
    }
}

/// Состояния формы.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    /// **Idle**: форма закрыта. `notice` хранит ответ API после успешной отправки.
    Idle { notice: Option<String> },
    /// **FormOpen**: поля редактируются, `failure` показывает последнюю ошибку отправки.
    FormOpen {
        draft: SuggestionDraft,
        failure: Option<String>,
    },
    /// **Validating**: проверка перед отправкой, в сеть ничего не ушло.
    Validating { draft: SuggestionDraft },
    /// **Submitting**: запрос в полёте, повторная отправка запрещена.
    Submitting { draft: SuggestionDraft },
    /// **Refreshing**: API принял рекомендацию, идёт перезагрузка кинотеатра.
    Refreshing { notice: String },
}

impl Default for SubmissionState {
    fn default() -> Self {
        SubmissionState::Idle { notice: None }
    }
}

/// What the state machine hands to the client once validation passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    /// Canonical uppercase seat code.
    pub seat: String,
    /// `None` when the notes field was left blank.
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SubmitBlocked {
    /// The form is not open, or a request is already in flight.
    NotEditing,
    Invalid { errors: Vec<ValidationError> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Blocked(SubmitBlocked),
    Rejected { message: String },
    Accepted { message: String },
}

#[derive(Debug, Clone)]
pub struct SuggestionForm {
    state: SubmissionState,
    limits: SuggestionConfig,
}

impl SuggestionForm {
    pub fn new(limits: SuggestionConfig) -> Self {
        Self {
            state: SubmissionState::default(),
            limits,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn limits(&self) -> &SuggestionConfig {
        &self.limits
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SubmissionState::FormOpen { .. })
    }

    pub fn draft(&self) -> Option<&SuggestionDraft> {
        match &self.state {
            SubmissionState::FormOpen { draft, .. }
            | SubmissionState::Validating { draft }
            | SubmissionState::Submitting { draft } => Some(draft),
            _ => None,
        }
    }

    /// Opens an empty form. Ignored while a submission is in progress.
    pub fn open(&mut self) -> bool {
        match self.state {
            SubmissionState::Idle { .. } => {
                self.state = SubmissionState::FormOpen {
                    draft: SuggestionDraft::new(&self.limits),
                    failure: None,
                };
                true
            }
            _ => false,
        }
    }

    /// Hides the form and drops the draft.
    pub fn close(&mut self) -> bool {
        match self.state {
            SubmissionState::FormOpen { .. } => {
                self.state = SubmissionState::Idle { notice: None };
                true
            }
            _ => false,
        }
    }

    /// "Suggest a Best Seat" / "Hide Suggestion Form" button.
    pub fn toggle(&mut self) -> bool {
        if self.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    pub fn edit_seat(&mut self, seat: &str) -> bool {
        let limits = self.limits;
        match &mut self.state {
            SubmissionState::FormOpen { draft, .. } => {
                draft.set_seat(seat, &limits);
                true
            }
            _ => false,
        }
    }

    pub fn edit_notes(&mut self, notes: &str) -> bool {
        let limits = self.limits;
        match &mut self.state {
            SubmissionState::FormOpen { draft, .. } => {
                draft.set_notes(notes, &limits);
                true
            }
            _ => false,
        }
    }

    /// FormOpen → Validating → Submitting. On invalid input the form stays
    /// open with field errors set and nothing is sent.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitBlocked> {
        match mem::take(&mut self.state) {
            SubmissionState::FormOpen { draft, .. } => {
                self.state = SubmissionState::Validating { draft };
                self.validate_pending()
            }
            other => {
                self.state = other;
                Err(SubmitBlocked::NotEditing)
            }
        }
    }

    fn validate_pending(&mut self) -> Result<PendingSubmission, SubmitBlocked> {
        let SubmissionState::Validating { mut draft } = mem::take(&mut self.state) else {
            return Err(SubmitBlocked::NotEditing);
        };

        draft.seat_error = check_seat(&draft.seat, &self.limits, true).err();
        draft.notes_error = check_notes(&draft.notes, &self.limits).err();

        if draft.has_errors() {
            let errors = draft
                .seat_error
                .iter()
                .chain(draft.notes_error.iter())
                .cloned()
                .collect();
            self.state = SubmissionState::FormOpen {
                draft,
                failure: None,
            };
            return Err(SubmitBlocked::Invalid { errors });
        }

        let notes = draft.notes.trim();
        let pending = PendingSubmission {
            seat: canonical_seat(&draft.seat),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        };
        self.state = SubmissionState::Submitting { draft };
        Ok(pending)
    }

    /// Submitting → Refreshing on success, back to FormOpen with the draft
    /// intact on failure.
    pub fn finish_submit(&mut self, result: Result<SubmissionReceipt, ClientError>) -> SubmitOutcome {
        if !matches!(self.state, SubmissionState::Submitting { .. }) {
            warn!("Submission result arrived outside of Submitting state, ignoring");
            return SubmitOutcome::Blocked(SubmitBlocked::NotEditing);
        }
        let SubmissionState::Submitting { draft } = mem::take(&mut self.state) else {
            return SubmitOutcome::Blocked(SubmitBlocked::NotEditing);
        };

        match result {
            Ok(receipt) => {
                info!("Suggestion accepted: {}", receipt.message);
                self.state = SubmissionState::Refreshing {
                    notice: receipt.message.clone(),
                };
                SubmitOutcome::Accepted {
                    message: receipt.message,
                }
            }
            Err(e) => {
                let message = e.user_message();
                warn!("Suggestion not accepted: {}", e);
                self.state = SubmissionState::FormOpen {
                    draft,
                    failure: Some(message.clone()),
                };
                SubmitOutcome::Rejected { message }
            }
        }
    }

    /// Refreshing → Idle, keeping the success notice on screen.
    pub fn finish_refresh(&mut self) {
        if let SubmissionState::Refreshing { notice } = &mut self.state {
            let notice = mem::take(notice);
            self.state = SubmissionState::Idle {
                notice: Some(notice),
            };
        }
    }
}
