pub mod core;
pub mod gateway;
pub mod prompt;
pub mod runner;

use std::sync::Arc;

use thiserror::Error;

pub use self::{
    core::{HttpError, PayloadError, RespondError},
    prompt::PromptError,
};

#[derive(Error, Debug)]
#[error("building a response failed: {}", .0)]
pub struct BuildError(#[from] derive_builder::UninitializedFieldError);

#[derive(Error, Debug, PartialEq, Eq)]
#[error("already responded: this interaction has already been responded to")]
pub struct AlreadyResponded;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IncorrectFormat {
    #[error("you can't use both `embed` and `embeds`")]
    EmbedAndEmbeds,
    #[error("do not provide more than {} embeds, got {}", .max, .got)]
    TooManyEmbeds { max: usize, got: usize },
    #[error("you can't use both `file` and `files`")]
    FileAndFiles,
    #[error("you can't delete a hidden message")]
    HiddenDeleteAfter,
    #[error("the top level of the components list must be made of action rows")]
    NonActionRowComponent,
    #[error("`hidden` and `edit_origin` are mutually exclusive")]
    HiddenEditOrigin,
    #[error("`edit_origin` and `ignore` are mutually exclusive")]
    EditOriginIgnore,
    #[error("already responded: the origin message can no longer be edited")]
    AlreadyResponded,
    #[error("slash commands have no origin message")]
    OriginUnavailable,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable `{}`", .0)]
    Missing(&'static str),
    #[error("invalid user id `{}` in `OWNER_IDS`", .0)]
    InvalidOwnerId(Box<str>),
    #[error("unknown mention kind `{}` in `ALLOWED_MENTIONS`", .0)]
    InvalidAllowedMention(Box<str>),
}

#[derive(Error, Debug)]
#[error("installing the default crypto provider failed")]
pub struct InstallDefaultCryptoProvider(pub Arc<rustls::crypto::CryptoProvider>);

#[derive(Error, Debug)]
#[error("error running the bot starter: {}", .0)]
pub enum Run {
    ColorEyre(#[from] color_eyre::Report),
    Dotenvy(#[from] dotenvy::Error),
    Config(#[from] ConfigError),
    InstallDefaultCryptoProvider(#[from] InstallDefaultCryptoProvider),
    StartError(#[from] runner::StartError),
}
