use thiserror::Error;

#[derive(Error, Debug)]
#[error(transparent)]
pub enum StartError {
    TwilightHttp(#[from] twilight_http::Error),
    DeserializeBody(#[from] twilight_http::response::DeserializeBodyError),
    StartRecommended(#[from] twilight_gateway::error::StartRecommendedError),
    WaitUntilShutdown(#[from] WaitUntilShutdownError),
}

#[derive(Error, Debug)]
#[error("error waiting for a shutdown signal: {}", .0)]
pub struct WaitForSignalError(#[from] std::io::Error);

#[derive(Error, Debug)]
#[error(transparent)]
pub enum WaitUntilShutdownError {
    WaitForSignal(#[from] WaitForSignalError),
}
