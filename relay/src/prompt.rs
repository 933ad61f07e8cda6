use std::{pin::Pin, time::Duration};

use derive_builder::Builder;
use rand::{Rng, distr::Alphanumeric};
use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;
use twilight_mention::Mention;
use twilight_model::{
    channel::message::{
        Component, EmojiReactionType,
        component::{ActionRow, Button, ButtonStyle},
    },
    id::{Id, marker::UserMarker},
};

use crate::{
    context::Ctx,
    core::{
        http::MessageBody,
        konst::{colours, emoji, misc, text},
        model::{BotStateAware, OwnedBotStateAware, WaiterAware, response::SentMessage},
        standby::ComponentFilter,
    },
    error::{BuildError, PromptError, RespondError},
    model::{Embed, EmbedFooter},
};

/// A yes/no button prompt answered by the invoking user or a bot owner.
#[derive(Builder)]
#[builder(
    name = "PromptBuilder",
    setter(into, strip_option),
    pattern = "owned",
    build_fn(error = "BuildError")
)]
pub struct Prompt<'a> {
    #[builder(private)]
    inner: &'a mut Ctx,
    #[builder(private)]
    message: String,
    /// Who may answer besides the bot owners. Defaults to the invoking user.
    #[builder(default)]
    author_id: Option<Id<UserMarker>>,
    #[builder(default)]
    color: Option<u32>,
    /// Replace a visible prompt with a short-lived result once it is settled.
    #[builder(default)]
    delete_after: Option<bool>,
    #[builder(default)]
    embed: Option<Embed>,
    #[builder(default)]
    hidden: Option<bool>,
    /// Hand the prompt message back to the caller. Ignored for hidden prompts.
    #[builder(default)]
    return_message: Option<bool>,
    #[builder(default)]
    timeout: Option<Duration>,
    #[builder(default)]
    cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct Confirmation {
    /// `None` when nobody answered in time or the wait failed.
    pub answer: Option<bool>,
    pub message: Option<SentMessage>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    Confirmed,
    Denied,
    Expired,
    Canceled,
}

impl Outcome {
    const fn title(self) -> &'static str {
        match self {
            Self::Confirmed => text::CONFIRMED,
            Self::Denied => text::DENIED,
            Self::Expired => text::EXPIRED,
            Self::Canceled => text::CANCELED,
        }
    }

    const fn colour(self) -> u32 {
        match self {
            Self::Confirmed => colours::GREEN,
            Self::Denied => colours::RED,
            Self::Expired | Self::Canceled => colours::GREYPLE,
        }
    }

    const fn answer(self) -> Option<bool> {
        match self {
            Self::Confirmed => Some(true),
            Self::Denied => Some(false),
            Self::Expired | Self::Canceled => None,
        }
    }
}

fn generate_custom_id() -> String {
    let suffix = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(misc::PROMPT_CUSTOM_ID_SUFFIX_LEN)
        .map(char::from)
        .collect::<String>();
    format!("{}{suffix}", misc::PROMPT_CUSTOM_ID_PREFIX)
}

fn button(custom_id: &str, emoji: &str, style: ButtonStyle) -> Component {
    Component::Button(Button {
        custom_id: Some(custom_id.to_owned()),
        disabled: false,
        emoji: Some(EmojiReactionType::Unicode {
            name: emoji.to_owned(),
        }),
        label: None,
        style,
        url: None,
        sku_id: None,
    })
}

fn disable_all(components: &mut [Component]) {
    for component in components {
        match component {
            Component::ActionRow(row) => disable_all(&mut row.components),
            Component::Button(button) => button.disabled = true,
            Component::SelectMenu(menu) => menu.disabled = true,
            _ => {}
        }
    }
}

fn timestamped(embed: Embed) -> Embed {
    embed.footer(EmbedFooter::new(relay_ext::footer_time(
        OffsetDateTime::now_utc(),
    )))
}

fn result_embed(success: bool, description: impl Into<String>) -> Embed {
    let (title, colour) = if success {
        (text::SUCCESS_TITLE, colours::GREEN)
    } else {
        (text::ERROR_TITLE, colours::RED)
    };
    timestamped(Embed::new().title(title).color(colour).description(description))
}

async fn cancel_wait(token: Option<&CancellationToken>) {
    match token {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}

/// What is left to settle the prompt once the wait is over.
struct Cleanup {
    prompt: SentMessage,
    embed: Embed,
    components: Vec<Component>,
    hidden: bool,
    delete_after: bool,
}

impl Cleanup {
    /// Reports a broken wait to the prompting user, naming an owner if there is one.
    async fn fail(self, ctx: &mut Ctx) -> Result<Outcome, RespondError> {
        let mut description = String::from(text::WAIT_FAILED);
        if let Some(owner) = ctx.bot().owners().first() {
            description.push_str(&format!(" If this persists, contact {}.", owner.mention()));
        }
        ctx.send()
            .embed(result_embed(false, description))
            .hidden(true)
            .await?;
        self.settle(ctx, Outcome::Canceled, false).await?;
        Ok(Outcome::Canceled)
    }

    /// `responder` is the button context when someone answered, otherwise the prompting context.
    async fn settle(
        self,
        responder: &mut Ctx,
        outcome: Outcome,
        answered: bool,
    ) -> Result<(), RespondError> {
        tracing::debug!(?outcome, answered, "settling prompt");
        let result = result_embed(outcome == Outcome::Confirmed, outcome.title());

        if !self.hidden && self.delete_after {
            self.prompt.delete().await?;
            responder
                .send()
                .embed(result)
                .delete_after(misc::RESULT_NOTICE_LIFETIME)
                .await?;
            return Ok(());
        }

        let embed = self.embed.title(outcome.title()).color(outcome.colour());
        let mut components = self.components;
        disable_all(&mut components);
        if answered {
            responder
                .edit_origin()
                .embed(embed)
                .components(components)
                .await?;
        } else {
            let body = MessageBody {
                embeds: Some(vec![embed]),
                components: Some(components),
                ..MessageBody::default()
            };
            self.prompt.edit(&body).await?;
        }

        if self.hidden {
            responder.send().embed(result).hidden(true).await?;
        }
        Ok(())
    }
}

impl Prompt<'_> {
    async fn run(self) -> Result<Confirmation, PromptError> {
        let Self {
            inner: ctx,
            message,
            author_id,
            color,
            delete_after,
            embed,
            hidden,
            return_message,
            timeout,
            cancel,
        } = self;
        let hidden = hidden.unwrap_or(true);
        let delete_after = delete_after.unwrap_or(true);
        let author_id = author_id.unwrap_or_else(|| ctx.author_id());

        let embed = timestamped(
            embed
                .unwrap_or_else(|| Embed::new().title(text::PROMPT_TITLE))
                .color(color.unwrap_or(colours::ORANGE))
                .description(message),
        );
        let (yes_id, no_id) = (generate_custom_id(), generate_custom_id());
        let components = vec![Component::ActionRow(ActionRow {
            components: vec![
                button(&yes_id, emoji::YES, ButtonStyle::Success),
                button(&no_id, emoji::NO, ButtonStyle::Danger),
            ],
        })];

        let prompt = ctx
            .send()
            .embed(embed.clone())
            .components(components.clone())
            .hidden(hidden)
            .await?;

        let users = ctx
            .bot()
            .owners()
            .iter()
            .copied()
            .chain(std::iter::once(author_id));
        let filter = ComponentFilter::new([yes_id.clone(), no_id], users);
        let wait = tokio::time::timeout(
            timeout.unwrap_or(misc::PROMPT_TIMEOUT),
            ctx.waiter().wait_for_component(filter),
        );
        let waited = tokio::select! {
            () = cancel_wait(cancel.as_ref()) => None,
            waited = wait => Some(waited),
        };

        let cleanup = Cleanup {
            prompt: prompt.clone(),
            embed,
            components,
            hidden,
            delete_after,
        };
        let outcome = match waited {
            Some(Ok(Ok(payload))) => match Ctx::new(ctx.bot_owned(), payload) {
                Ok(mut answer) => {
                    let outcome = if answer.component().is_some_and(|c| c.custom_id == yes_id) {
                        Outcome::Confirmed
                    } else {
                        Outcome::Denied
                    };
                    cleanup.settle(&mut answer, outcome, true).await?;
                    outcome
                }
                Err(e) => {
                    tracing::error!(?e, "decoding a prompt answer failed");
                    cleanup.fail(ctx).await?
                }
            },
            Some(Err(_)) => {
                tracing::debug!("prompt timed out");
                ctx.send()
                    .embed(result_embed(false, text::TOOK_TOO_LONG))
                    .hidden(true)
                    .await?;
                cleanup.settle(ctx, Outcome::Expired, false).await?;
                Outcome::Expired
            }
            Some(Ok(Err(e))) => {
                tracing::error!(?e, "waiting for a prompt answer failed");
                cleanup.fail(ctx).await?
            }
            None => {
                if let Err(e) = cleanup.settle(ctx, Outcome::Canceled, false).await {
                    tracing::warn!(?e, "cleaning up a canceled prompt failed");
                }
                return Err(PromptError::Canceled);
            }
        };

        let message = (return_message.unwrap_or(false) && !hidden).then_some(prompt);
        Ok(Confirmation {
            answer: outcome.answer(),
            message,
        })
    }
}

impl Ctx {
    /// Asks a yes/no question with two buttons and waits for the answer.
    pub fn prompt(&mut self, message: impl Into<String>) -> PromptBuilder<'_> {
        PromptBuilder::default().inner(self).message(message)
    }
}

impl<'a> IntoFuture for PromptBuilder<'a> {
    type Output = Result<Confirmation, PromptError>;

    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            match self.build() {
                Err(e) => Err(RespondError::from(e).into()),
                Ok(prompt) => prompt.run().await,
            }
        })
    }
}
