use std::fmt;
use thiserror::Error;

/// Remote calls the client makes, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListCities,
    ListTheaters,
    TheatersByCity,
    TheaterDetail,
    BestSeat,
    SubmitSuggestion,
}

impl Operation {
    /// Generic text shown to the user when the call fails in transit.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::ListCities => "Failed to load cities",
            Operation::ListTheaters => "Failed to load all theaters",
            Operation::TheatersByCity => "Failed to fetch theaters",
            Operation::TheaterDetail => "Failed to fetch theater details",
            Operation::BestSeat => "Failed to fetch best seat",
            Operation::SubmitSuggestion => "Failed to submit suggestion.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListCities => "list cities",
            Operation::ListTheaters => "list theaters",
            Operation::TheatersByCity => "theaters by city",
            Operation::TheaterDetail => "theater detail",
            Operation::BestSeat => "best seat",
            Operation::SubmitSuggestion => "submit suggestion",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Connection, timeout or undecodable body.
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx without a detail the user could act on.
    #[error("{operation} request returned HTTP {status}")]
    UnexpectedStatus {
        operation: Operation,
        status: reqwest::StatusCode,
    },

    /// The backend refused a well-formed suggestion and said why.
    #[error("{detail}")]
    Submission { detail: String },
}

impl ClientError {
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Build(_)
                | ClientError::Transport { .. }
                | ClientError::UnexpectedStatus { .. }
        )
    }

    /// Text for the view. Backend rejections are passed through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Submission { detail } => detail.clone(),
            ClientError::Transport { operation, .. }
            | ClientError::UnexpectedStatus { operation, .. } => {
                operation.failure_message().to_string()
            }
            ClientError::Build(_) => "HTTP client is unavailable".to_string(),
        }
    }
}
