// src/checker/status.rs
// =============================================================================
// The outcome of checking one URL.
//
// There are exactly three kinds of result:
// - Valid            the server answered 200
// - ErrorCode(n)     the server answered, but with some other code
// - Invalid(reason)  the request never completed (timeout, DNS, refused, ...)
//
// A status has two shapes:
// - Text, as it appears in the "Status" column of the output spreadsheet:
//   "Valid", "Error 404", "Invalid (timed out)"
// - Serde, as it is stored in checkpoint files and printed by --json
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Terminal result of probing a URL. Never changes once assigned to a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Reachability confirmed (HTTP 200)
    Valid,
    /// Server responded with a non-200 code
    ErrorCode(u16),
    /// Request could not complete; holds a short diagnostic
    Invalid(String),
}

impl Status {
    pub fn is_valid(&self) -> bool {
        matches!(self, Status::Valid)
    }
}

// Text form used in the output table.
// This must stay parseable by FromStr below, because a previously exported
// table can be fed back in and its Status column is then honoured.
impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Valid => write!(f, "Valid"),
            Status::ErrorCode(code) => write!(f, "Error {}", code),
            Status::Invalid(reason) => write!(f, "Invalid ({})", reason),
        }
    }
}

/// Returned when a Status cell holds text we don't recognise
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised status text: {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();

        if text == "Valid" {
            return Ok(Status::Valid);
        }

        if let Some(code) = text.strip_prefix("Error ") {
            return code
                .trim()
                .parse::<u16>()
                .map(Status::ErrorCode)
                .map_err(|_| ParseStatusError(s.to_string()));
        }

        // "Invalid (reason)" - the reason itself may contain parentheses,
        // so only the outermost pair is stripped
        if let Some(rest) = text.strip_prefix("Invalid (") {
            if let Some(reason) = rest.strip_suffix(')') {
                return Ok(Status::Invalid(reason.to_string()));
            }
        }

        Err(ParseStatusError(s.to_string()))
    }
}
