//! JSON command boundary.
//!
//! One request document in, one response document out. Success is the
//! `DoseCalculation`; failure is an `ErrorBody` (`{"error": {code, message}}`).

use std::io::Read;
use std::process::ExitCode;

use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{self, CalculatorConfig};
use crate::dispense::{calculate_for_display, try_calculate, DoseCalculation, DoseRequest};
use crate::error::{DoseError, ErrorBody};

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Malformed request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not read request: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Dose(#[from] DoseError),
}

impl CommandError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Json(_) => "BAD_REQUEST",
            Self::Io(_) => "IO",
            Self::Dose(e) => e.code(),
        }
    }
}

/// A calculate command as sent by the form.
#[derive(Debug, Deserialize)]
pub struct CalculateCommand {
    pub request: DoseRequest,
    #[serde(default)]
    pub config: CalculatorConfig,
    /// Report input problems as errors instead of showing 0.
    #[serde(default)]
    pub strict: bool,
}

/// Run one command.
pub fn execute(command: &CalculateCommand) -> Result<DoseCalculation, CommandError> {
    if command.strict {
        let quantities = try_calculate(&command.request)?;
        return Ok(DoseCalculation::from_quantities(
            &quantities,
            command.request.per_volume.unit,
            &command.config,
        ));
    }
    Ok(calculate_for_display(&command.request, &command.config))
}

/// Parse, execute and serialize.
pub fn handle_request(input: &str) -> Result<String, CommandError> {
    let command: CalculateCommand = serde_json::from_str(input)?;
    let calculation = execute(&command)?;
    Ok(serde_json::to_string(&calculation)?)
}

/// Like `handle_request`, but failures are rendered as an error body.
/// The flag is true on success.
pub fn respond(input: &str) -> (String, bool) {
    match handle_request(input) {
        Ok(body) => (body, true),
        Err(e) => {
            tracing::warn!(code = e.code(), error = %e, "Command failed");
            (render_error(&e), false)
        }
    }
}

fn render_error(err: &CommandError) -> String {
    let body = ErrorBody::new(err.code(), err.to_string());
    serde_json::to_string(&body).unwrap_or_else(|_| {
        format!(r#"{{"error":{{"code":"{}","message":"unserializable error"}}}}"#, err.code())
    })
}

/// Binary entry point: read one command from stdin, write the response to stdout.
/// Logs go to stderr.
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let mut input = String::new();
    let (body, ok) = match std::io::stdin().read_to_string(&mut input) {
        Ok(_) => respond(&input),
        Err(e) => {
            let err = CommandError::from(e);
            tracing::error!(error = %err, "Failed to read stdin");
            (render_error(&err), false)
        }
    };

    println!("{body}");
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
