use std::{pin::Pin, time::Duration};

use derive_builder::Builder;
use twilight_model::{
    channel::message::{Component, MessageFlags},
    http::{attachment::Attachment, interaction::InteractionResponseType},
};

use super::{SentMessage, check_action_rows, merge_embeds, merge_files};
use crate::{
    context::{Ctx, State},
    core::{
        http::{InitialResponse, MessageBody, MessageTarget},
        model::{BotStateAware, HttpAware},
    },
    error::{BuildError, IncorrectFormat, RespondError},
    model::{AllowedMentions, Embed},
};

#[derive(Builder)]
#[builder(
    name = "SendBuilder",
    setter(into, strip_option),
    pattern = "owned",
    build_fn(error = "BuildError")
)]
pub struct Outgoing<'a> {
    #[builder(private)]
    inner: &'a mut Ctx,
    #[builder(default)]
    content: Option<String>,
    /// A single embed; conflicts with `embeds`.
    #[builder(default)]
    embed: Option<Embed>,
    /// Up to 10 embeds; conflicts with `embed`.
    #[builder(default)]
    embeds: Option<Vec<Embed>>,
    #[builder(default)]
    tts: Option<bool>,
    /// A single attachment; conflicts with `files`.
    #[builder(default)]
    file: Option<Attachment>,
    /// Attachments; conflicts with `file`.
    #[builder(default)]
    files: Option<Vec<Attachment>>,
    /// Merged over the bot-wide default, field by field.
    #[builder(default)]
    allowed_mentions: Option<AllowedMentions>,
    /// Only the invoking user sees the message.
    #[builder(default)]
    hidden: Option<bool>,
    /// Deletes the message after the delay; visible messages only.
    #[builder(default)]
    delete_after: Option<Duration>,
    /// Action rows.
    #[builder(default)]
    components: Option<Vec<Component>>,
}

impl Outgoing<'_> {
    async fn dispatch(self) -> Result<SentMessage, RespondError> {
        let hidden = self.hidden.unwrap_or(false);
        let embeds = merge_embeds(self.embed, self.embeds)?;
        let files = merge_files(self.file, self.files)?;
        if hidden && self.delete_after.is_some() {
            return Err(IncorrectFormat::HiddenDeleteAfter.into());
        }
        check_action_rows(self.components.as_deref())?;

        let ctx = self.inner;
        let body = MessageBody {
            content: Some(self.content.unwrap_or_default()),
            tts: Some(self.tts.unwrap_or(false)),
            embeds: Some(embeds.unwrap_or_default()),
            allowed_mentions: Some(AllowedMentions::resolve(
                ctx.bot().allowed_mentions(),
                self.allowed_mentions.as_ref(),
            )),
            components: Some(self.components.unwrap_or_default()),
            flags: hidden.then_some(MessageFlags::EPHEMERAL),
        };
        let http = ctx.http().clone();
        let token = ctx.interaction_token_owned();
        let initial = ctx.state() != State::Responded;

        let (target, model) = match ctx.state() {
            State::Responded => {
                let message = http.post_followup(&token, &body, files).await?;
                (MessageTarget::Followup(message.id), Some(message))
            }
            State::Fresh if files.is_empty() => {
                let response = InitialResponse {
                    kind: InteractionResponseType::ChannelMessageWithSource,
                    data: Some(body),
                };
                http.post_initial_response(ctx.interaction_id(), &token, &response)
                    .await?;
                (MessageTarget::Original, None)
            }
            State::Fresh => {
                ctx.defer().hidden(hidden).await?;
                let message = http
                    .edit(&token, MessageTarget::Original, &body, files)
                    .await?;
                (MessageTarget::Original, Some(message))
            }
            State::Deferred {
                hidden: deferred_hidden,
                edit_origin,
            } => {
                if deferred_hidden != hidden {
                    tracing::warn!(
                        deferred_hidden,
                        hidden,
                        "the response was deferred with a different visibility, which is the one that will show"
                    );
                }
                if edit_origin {
                    tracing::warn!(
                        "the response was deferred as an origin edit, so `send` will edit the origin message"
                    );
                }
                let message = http
                    .edit(&token, MessageTarget::Original, &body, files)
                    .await?;
                (MessageTarget::Original, Some(message))
            }
        };
        ctx.set_state(State::Responded);

        let sent = SentMessage::new(http, token, target, model);
        if initial && !hidden {
            ctx.remember_message(&sent);
        }
        if let Some(delay) = self.delete_after {
            sent.clone().delete_after(delay);
        }
        Ok(sent)
    }
}

impl Ctx {
    /// Sends a message: the initial response while nothing was sent yet, a followup afterwards.
    pub fn send(&mut self) -> SendBuilder<'_> {
        SendBuilder::default().inner(self)
    }

    #[inline]
    pub fn reply(&mut self) -> SendBuilder<'_> {
        self.send()
    }
}

impl<'a> IntoFuture for SendBuilder<'a> {
    type Output = Result<SentMessage, RespondError>;

    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            match self.build() {
                Err(e) => Err(e.into()),
                Ok(outgoing) => outgoing.dispatch().await,
            }
        })
    }
}
