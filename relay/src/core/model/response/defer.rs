use std::pin::Pin;

use derive_builder::Builder;
use twilight_model::http::interaction::InteractionResponseType;

use crate::{
    context::{Ctx, State},
    core::{
        http::{InitialResponse, MessageBody},
        model::HttpAware,
    },
    error::{AlreadyResponded, BuildError, IncorrectFormat, RespondError},
};

#[derive(Builder)]
#[builder(
    name = "DeferBuilder",
    setter(into, strip_option),
    pattern = "owned",
    build_fn(error = "BuildError")
)]
pub struct Defer<'a> {
    #[builder(private)]
    inner: &'a mut Ctx,
    /// Whether the eventual response is only visible to the invoking user.
    #[builder(default)]
    hidden: Option<bool>,
    /// Acknowledge with a deferred update of the message carrying the component.
    #[builder(default)]
    edit_origin: Option<bool>,
    /// Acknowledge without any intent to respond further.
    #[builder(default)]
    ignore: Option<bool>,
}

impl Defer<'_> {
    async fn acknowledge(self) -> Result<(), RespondError> {
        let ctx = self.inner;
        let hidden = self.hidden.unwrap_or(false);
        let edit_origin = self.edit_origin.unwrap_or(false);
        let ignore = self.ignore.unwrap_or(false);

        if ctx.responded() {
            return Err(AlreadyResponded.into());
        }
        if (edit_origin || ignore) && !ctx.kind().has_origin() {
            return Err(IncorrectFormat::OriginUnavailable.into());
        }
        if edit_origin && ignore {
            return Err(IncorrectFormat::EditOriginIgnore.into());
        }
        if hidden && edit_origin {
            return Err(IncorrectFormat::HiddenEditOrigin.into());
        }

        let response = if edit_origin || ignore {
            InitialResponse {
                kind: InteractionResponseType::DeferredUpdateMessage,
                data: None,
            }
        } else {
            InitialResponse {
                kind: InteractionResponseType::DeferredChannelMessageWithSource,
                data: hidden.then(MessageBody::ephemeral),
            }
        };
        ctx.http()
            .post_initial_response(ctx.interaction_id(), ctx.interaction_token(), &response)
            .await?;

        ctx.set_state(if ignore {
            State::Responded
        } else {
            State::Deferred {
                hidden,
                edit_origin,
            }
        });
        Ok(())
    }
}

impl Ctx {
    /// Acknowledges the interaction now and responds later.
    pub fn defer(&mut self) -> DeferBuilder<'_> {
        DeferBuilder::default().inner(self)
    }
}

impl<'a> IntoFuture for DeferBuilder<'a> {
    type Output = Result<(), RespondError>;

    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            match self.build() {
                Err(e) => Err(e.into()),
                Ok(defer) => defer.acknowledge().await,
            }
        })
    }
}
