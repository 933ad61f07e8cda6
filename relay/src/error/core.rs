use thiserror::Error;
use twilight_model::application::interaction::InteractionType;

#[derive(Error, Debug)]
#[error(transparent)]
pub enum HttpError {
    TwilightHttp(#[from] twilight_http::Error),
    DeserializeBody(#[from] twilight_http::response::DeserializeBodyError),
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
#[error(transparent)]
pub enum RespondError {
    AlreadyResponded(#[from] super::AlreadyResponded),
    IncorrectFormat(#[from] super::IncorrectFormat),
    Http(#[from] HttpError),
    Builder(#[from] super::BuildError),
}

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("interaction payload is missing `{}`", .0)]
    Missing(&'static str),
    #[error("unsupported interaction type: {:?}", .0)]
    Unsupported(InteractionType),
}
