use std::process::ExitStatus;
use std::time::Duration;

use ocreport_types::TimestampError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("`{command}` timed out after {}s", .timeout.as_secs())]
    Timeout { command: String, timeout: Duration },

    #[error("failed to parse client output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("resource is missing field `{0}`")]
    MissingField(&'static str),

    #[error(transparent)]
    Timestamp(#[from] TimestampError),
}
