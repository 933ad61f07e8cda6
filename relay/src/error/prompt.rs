use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error(transparent)]
    Respond(#[from] super::RespondError),
    #[error(transparent)]
    Payload(#[from] super::PayloadError),
    #[error("the prompt was canceled before it was answered")]
    Canceled,
}

#[derive(Error, Debug)]
pub enum WaitError {
    #[error(transparent)]
    StandbyCanceled(#[from] twilight_standby::future::Canceled),
    #[error(transparent)]
    Decode(#[from] super::PayloadError),
    #[error("the waiter resolved with an event that is not an interaction")]
    UnexpectedEvent,
}
