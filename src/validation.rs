//! Client-side checks for best-seat suggestions.
//!
//! These gates are advisory. The backend has the final word and its rejection
//! text is shown to the user as-is.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::config::SuggestionConfig;

/// One row letter followed by the seat number, e.g. `F10`.
static SEAT_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][0-9]+$").expect("seat code pattern is valid"));

/// Matched as plain substrings, so a term inside a longer word also trips it.
pub const NOTES_DENYLIST: &[&str] = &[
    "fuck", "shit", "bitch", "asshole", "bastard", "cunt", "dick", "slut", "whore",
];

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Please enter a suggested seat.")]
    SeatRequired,
    #[error("Seat must be a row letter followed by a number, e.g. F10.")]
    SeatFormat,
    #[error("Seat must be at most {max} characters.")]
    SeatTooLong { max: usize },
    #[error("Notes contain inappropriate language.")]
    NotesInappropriate,
    #[error("Notes must be at most {max} characters.")]
    NotesTooLong { max: usize },
}

pub fn validate_seat_code(input: &str) -> bool {
    SEAT_CODE.is_match(input)
}

pub fn validate_notes(input: &str) -> bool {
    if input.is_empty() {
        return true;
    }
    let lowered = input.to_lowercase();
    !NOTES_DENYLIST.iter().any(|term| lowered.contains(term))
}

/// Form the seat is stored and sent in.
pub fn canonical_seat(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Characters left before `max`; negative once the value is too long.
pub fn remaining(value: &str, max: usize) -> i64 {
    max as i64 - value.chars().count() as i64
}

/// Seat check used by the form. An empty seat is only an error when `required`.
pub fn check_seat(
    input: &str,
    limits: &SuggestionConfig,
    required: bool,
) -> Result<(), ValidationError> {
    let seat = canonical_seat(input);
    if seat.is_empty() {
        return if required {
            Err(ValidationError::SeatRequired)
        } else {
            Ok(())
        };
    }
    if remaining(&seat, limits.seat_max_length) < 0 {
        return Err(ValidationError::SeatTooLong {
            max: limits.seat_max_length,
        });
    }
    if !validate_seat_code(&seat) {
        return Err(ValidationError::SeatFormat);
    }
    Ok(())
}

pub fn check_notes(input: &str, limits: &SuggestionConfig) -> Result<(), ValidationError> {
    if remaining(input, limits.notes_max_length) < 0 {
        return Err(ValidationError::NotesTooLong {
            max: limits.notes_max_length,
        });
    }
    if !validate_notes(input) {
        return Err(ValidationError::NotesInappropriate);
    }
    Ok(())
}
