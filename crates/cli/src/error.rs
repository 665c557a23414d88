//! CLI error classification.
//!
//! Every failure is sorted into one of the categories below, and each
//! category has its own exit code. Clap exits with 2 on bad arguments before
//! `run` is reached.
//!
//! | code | kind            | cause                                              |
//! |------|-----------------|----------------------------------------------------|
//! | 10   | `invalid_input` | bad dimensions, parameters, target range, samples  |
//! | 11   | `io`            | base heightmap unreadable, output PNG unwritable   |
//! | 12   | `params`        | `--params` is not valid JSON                       |
//! | 13   | `output`        | result could not be encoded as JSON                |
//! | 14   | `range`         | generated field is flat or its extent overflows    |

use terrain_fbm_core::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// A precondition on the recipe or base heightmap failed.
    #[error("invalid input: {0}")]
    InvalidInput(FieldError),

    /// The synthesized field cannot be rescaled into the target range.
    #[error("cannot normalize: {0}")]
    Range(FieldError),

    #[error("{0}")]
    Io(String),

    #[error("invalid --params JSON: {0}")]
    Params(#[source] serde_json::Error),

    #[error("cannot encode output: {0}")]
    Output(#[source] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidInput(_) => 10,
            CliError::Io(_) => 11,
            CliError::Params(_) => 12,
            CliError::Output(_) => 13,
            CliError::Range(_) => 14,
        }
    }

    /// Stable name of the category, reported in `--json` error output.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::InvalidInput(_) => "invalid_input",
            CliError::Io(_) => "io",
            CliError::Params(_) => "params",
            CliError::Output(_) => "output",
            CliError::Range(_) => "range",
        }
    }
}

impl From<FieldError> for CliError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Io(msg) => CliError::Io(msg),
            e if e.is_invalid_input() => CliError::InvalidInput(e),
            e => CliError::Range(e),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e)
    }
}
