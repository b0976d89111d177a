use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Command `{command}` wrote to stderr: {stderr}")]
    UnexpectedStderr { command: String, stderr: String },

    #[error("Command `{command}` exited with code {code:?}, expected 0")]
    NonZeroExit { command: String, code: Option<i32> },

    #[error("Expected: {expected}, but got: {actual}")]
    Mismatch { expected: String, actual: String },

    #[error("Environment variable {key} is not set")]
    EnvMissing { key: String },

    #[error("Invalid repository name length {length}: must be between {min} and {max}")]
    InvalidNameLength { length: usize, min: usize, max: usize },

    #[error("Repo creation failed: {body}")]
    RepoCreateFailed { status: u16, body: String },

    #[error("Repo deletion failed: {body}")]
    RepoDeleteFailed { status: u16, body: String },

    #[error("Unexpected clone URL {actual}, expected {expected}")]
    UnexpectedCloneUrl { expected: String, actual: String },

    #[error("Unexpected HTTP status {status} from {url}: {body}")]
    UnexpectedStatus { url: String, status: u16, body: String },

    #[error("Cancelled by user")]
    Cancelled,
}
