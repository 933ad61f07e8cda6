#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum ProcessError {
    Payload(#[from] super::PayloadError),
}

pub type ProcessResult = Result<(), ProcessError>;
