use std::pin::Pin;

use derive_builder::Builder;
use twilight_model::{
    channel::message::Component,
    http::{attachment::Attachment, interaction::InteractionResponseType},
};

use super::{check_action_rows, merge_embeds, merge_files};
use crate::{
    context::{Ctx, State},
    core::{
        http::{InitialResponse, MessageBody, MessageTarget},
        model::{BotStateAware, HttpAware},
    },
    error::{BuildError, IncorrectFormat, RespondError},
    model::{AllowedMentions, Embed},
};

/// An edit of the message that carried the component or menu; fields left unset are left untouched.
#[derive(Builder)]
#[builder(
    name = "EditOriginBuilder",
    setter(into, strip_option),
    pattern = "owned",
    build_fn(error = "BuildError")
)]
pub struct EditOrigin<'a> {
    #[builder(private)]
    inner: &'a mut Ctx,
    #[builder(default)]
    content: Option<String>,
    #[builder(default)]
    embed: Option<Embed>,
    /// An empty list removes every embed.
    #[builder(default)]
    embeds: Option<Vec<Embed>>,
    #[builder(default)]
    file: Option<Attachment>,
    #[builder(default)]
    files: Option<Vec<Attachment>>,
    #[builder(default)]
    allowed_mentions: Option<AllowedMentions>,
    /// An empty list removes every component.
    #[builder(default)]
    components: Option<Vec<Component>>,
}

impl EditOrigin<'_> {
    async fn dispatch(self) -> Result<(), RespondError> {
        let ctx = self.inner;
        if !ctx.kind().has_origin() {
            return Err(IncorrectFormat::OriginUnavailable.into());
        }
        let embeds = merge_embeds(self.embed, self.embeds)?;
        let files = merge_files(self.file, self.files)?;
        check_action_rows(self.components.as_deref())?;

        let body = MessageBody {
            content: self.content,
            embeds,
            allowed_mentions: Some(AllowedMentions::resolve(
                ctx.bot().allowed_mentions(),
                self.allowed_mentions.as_ref(),
            )),
            components: self.components,
            ..MessageBody::default()
        };
        let http = ctx.http().clone();
        let token = ctx.interaction_token_owned();

        match ctx.state() {
            State::Responded => return Err(IncorrectFormat::AlreadyResponded.into()),
            State::Fresh if files.is_empty() => {
                let response = InitialResponse {
                    kind: InteractionResponseType::UpdateMessage,
                    data: Some(body),
                };
                http.post_initial_response(ctx.interaction_id(), &token, &response)
                    .await?;
            }
            State::Fresh => {
                ctx.defer().edit_origin(true).await?;
                http.edit(&token, MessageTarget::Original, &body, files)
                    .await?;
            }
            State::Deferred { edit_origin, .. } => {
                if !edit_origin {
                    tracing::warn!(
                        "the response was not deferred as an origin edit, so `edit_origin` will edit the deferred response"
                    );
                }
                http.edit(&token, MessageTarget::Original, &body, files)
                    .await?;
            }
        }
        ctx.set_state(State::Responded);
        Ok(())
    }
}

impl Ctx {
    /// Edits the message the interaction came from; not available to slash commands.
    pub fn edit_origin(&mut self) -> EditOriginBuilder<'_> {
        EditOriginBuilder::default().inner(self)
    }
}

impl<'a> IntoFuture for EditOriginBuilder<'a> {
    type Output = Result<(), RespondError>;

    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            match self.build() {
                Err(e) => Err(e.into()),
                Ok(edit) => edit.dispatch().await,
            }
        })
    }
}
