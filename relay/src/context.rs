mod component;
mod menu;
mod slash;

use std::sync::Arc;

use time::OffsetDateTime;
use twilight_cache_inmemory::{InMemoryCache, model::CachedGuild};
use twilight_model::{
    application::{command::CommandType, interaction::InteractionType},
    channel::Channel,
    id::{
        Id,
        marker::{ApplicationMarker, ChannelMarker, GuildMarker, InteractionMarker, UserMarker},
    },
};

pub use self::{
    component::Component,
    menu::{Menu, TargetAuthor},
    slash::Slash,
};
use crate::{
    core::{
        http::Dispatch,
        model::{
            BotState, BotStateAware, CacheAware, HttpAware, OwnedBotState, OwnedBotStateAware,
            WaiterAware, response::SentMessage,
        },
        standby::ComponentWaiter,
    },
    error::PayloadError,
    model::{InteractionPayload, Member, User},
};

/// What kind of interaction a context answers; decides which response types are legal.
#[derive(Clone, Debug)]
pub enum Kind {
    Slash(Slash),
    Component(Component),
    Menu(Menu),
}

impl Kind {
    /// Whether the interaction was triggered from a message that `edit_origin` can target.
    #[must_use]
    pub const fn has_origin(&self) -> bool {
        !matches!(self, Self::Slash(_))
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Slash(_) => "slash",
            Self::Component(_) => "component",
            Self::Menu(_) => "menu",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Fresh,
    Deferred { hidden: bool, edit_origin: bool },
    Responded,
}

impl State {
    #[must_use]
    pub const fn deferred(self) -> bool {
        matches!(self, Self::Deferred { .. })
    }

    /// Whether any initial response, deferred or final, has been sent.
    #[must_use]
    pub const fn responded(self) -> bool {
        !matches!(self, Self::Fresh)
    }
}

pub struct Ctx {
    inner: Box<InteractionPayload>,
    bot: OwnedBotState,
    kind: Kind,
    author: User,
    channel_id: Id<ChannelMarker>,
    token: Arc<str>,
    state: State,
    message: Option<SentMessage>,
}

impl Ctx {
    pub fn new(bot: OwnedBotState, payload: InteractionPayload) -> Result<Self, PayloadError> {
        let kind = match payload.kind {
            InteractionType::ApplicationCommand => {
                let data = payload.command_data().ok_or(PayloadError::Missing("data"))?;
                match data.kind {
                    CommandType::User | CommandType::Message => {
                        Kind::Menu(Menu::from_data(data, payload.guild_id.is_some()))
                    }
                    _ => Kind::Slash(Slash::from_data(data)),
                }
            }
            InteractionType::MessageComponent => Kind::Component(Component::from_payload(&payload)?),
            other => return Err(PayloadError::Unsupported(other)),
        };

        let author = payload
            .member
            .as_ref()
            .and_then(|member| member.user.clone())
            .or_else(|| payload.user.clone())
            .ok_or(PayloadError::Missing("user"))?;
        let channel_id = payload
            .channel_id
            .or_else(|| payload.channel.as_ref().map(|channel| channel.id))
            .ok_or(PayloadError::Missing("channel_id"))?;
        let token = Arc::from(payload.token.as_str());

        tracing::trace!(kind = kind.name(), id = %payload.id, "decoded interaction");
        Ok(Self {
            inner: Box::new(payload),
            bot,
            kind,
            author,
            channel_id,
            token,
            state: State::Fresh,
            message: None,
        })
    }

    pub const fn kind(&self) -> &Kind {
        &self.kind
    }

    pub const fn slash(&self) -> Option<&Slash> {
        match &self.kind {
            Kind::Slash(slash) => Some(slash),
            _ => None,
        }
    }

    pub const fn component(&self) -> Option<&Component> {
        match &self.kind {
            Kind::Component(component) => Some(component),
            _ => None,
        }
    }

    pub const fn menu(&self) -> Option<&Menu> {
        match &self.kind {
            Kind::Menu(menu) => Some(menu),
            _ => None,
        }
    }

    /// The raw payload this context was built from.
    pub fn data(&self) -> &InteractionPayload {
        &self.inner
    }

    pub fn interaction_id(&self) -> Id<InteractionMarker> {
        self.inner.id
    }

    pub fn interaction_token(&self) -> &str {
        &self.token
    }

    pub(crate) fn interaction_token_owned(&self) -> Arc<str> {
        self.token.clone()
    }

    pub fn application_id(&self) -> Id<ApplicationMarker> {
        self.inner.application_id
    }

    pub fn guild_id(&self) -> Option<Id<GuildMarker>> {
        self.inner.guild_id
    }

    pub const fn channel_id(&self) -> Id<ChannelMarker> {
        self.channel_id
    }

    pub const fn author(&self) -> &User {
        &self.author
    }

    pub const fn author_id(&self) -> Id<UserMarker> {
        self.author.id
    }

    pub fn member(&self) -> Option<&Member> {
        self.inner.member.as_ref()
    }

    /// Select menu values, if any were sent.
    pub fn values(&self) -> Option<&[String]> {
        self.inner
            .component_data()
            .and_then(|data| data.values.as_deref())
    }

    pub fn created_at(&self) -> OffsetDateTime {
        OffsetDateTime::UNIX_EPOCH + relay_ext::snowflake_unix(self.inner.id.get())
    }

    pub const fn state(&self) -> State {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: State) {
        tracing::trace!(from = ?self.state, to = ?state, "response state changed");
        self.state = state;
    }

    pub const fn deferred(&self) -> bool {
        self.state.deferred()
    }

    pub const fn responded(&self) -> bool {
        self.state.responded()
    }

    /// The first visible initial response sent through this context.
    pub const fn message(&self) -> Option<&SentMessage> {
        self.message.as_ref()
    }

    pub(crate) fn remember_message(&mut self, message: &SentMessage) {
        if self.message.is_none() {
            self.message = Some(message.clone());
        }
    }

    pub fn guild(&self) -> Option<CachedGuild> {
        let guild = self.cache().guild(self.guild_id()?)?;
        Some(guild.value().clone())
    }

    pub fn channel(&self) -> Option<Channel> {
        let channel = self.cache().channel(self.channel_id)?;
        Some(channel.value().clone())
    }
}

impl BotStateAware for Ctx {
    fn bot(&self) -> &BotState {
        &self.bot
    }
}

impl OwnedBotStateAware for Ctx {
    fn bot_owned(&self) -> OwnedBotState {
        self.bot.clone()
    }
}

impl HttpAware for Ctx {
    fn http(&self) -> &Arc<dyn Dispatch> {
        self.bot.http()
    }
}

impl CacheAware for Ctx {
    fn cache(&self) -> &InMemoryCache {
        self.bot.cache()
    }
}

impl WaiterAware for Ctx {
    fn waiter(&self) -> &dyn ComponentWaiter {
        self.bot.waiter()
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    use std::sync::Arc;

    use serde_json::{Value, json};
    use twilight_cache_inmemory::InMemoryCache;

    use super::Ctx;
    use crate::core::{
        http::fake::RecordingDispatch,
        model::BotState,
        standby::fake::{Answer, ScriptedWaiter},
    };

    pub fn bot(http: Arc<RecordingDispatch>, answer: Answer) -> Arc<BotState> {
        Arc::new(
            BotState::new(
                http,
                Arc::new(InMemoryCache::new()),
                Arc::new(ScriptedWaiter(answer)),
            )
            .with_owners([twilight_model::id::Id::new(99)]),
        )
    }

    pub fn user(id: u64) -> Value {
        json!({ "id": id.to_string(), "username": format!("user{id}"), "discriminator": "0" })
    }

    pub fn message(id: u64, flags: u64, components: &Value) -> Value {
        json!({
            "id": id.to_string(),
            "channel_id": "200",
            "author": user(1),
            "content": "",
            "timestamp": "2021-08-18T13:05:09+00:00",
            "type": 20,
            "flags": flags,
            "components": components
        })
    }

    pub fn slash() -> Value {
        json!({
            "id": "175928847299117063",
            "application_id": "1",
            "type": 2,
            "token": "slash-token",
            "guild_id": "300",
            "channel_id": "200",
            "member": { "user": user(7), "roles": [], "deaf": false, "mute": false },
            "data": { "id": "50", "name": "ping", "type": 1 }
        })
    }

    pub fn button(custom_id: &str) -> Value {
        let components = json!([{
            "type": 1,
            "components": [
                { "type": 2, "style": 1, "custom_id": custom_id, "label": "Go" },
                { "type": 2, "style": 4, "custom_id": "other", "label": "Stop" }
            ]
        }]);
        json!({
            "id": "901",
            "application_id": "1",
            "type": 3,
            "token": "component-token",
            "channel": { "id": "201", "type": 0 },
            "user": user(8),
            "message": message(1500, 0, &components),
            "data": { "custom_id": custom_id, "component_type": 2 }
        })
    }

    pub fn ctx(payload: Value, http: Arc<RecordingDispatch>) -> Ctx {
        let payload = serde_json::from_value(payload).unwrap_or_else(|e| panic!("payload: {e}"));
        Ctx::new(bot(http, Answer::Never), payload).unwrap_or_else(|e| panic!("context: {e}"))
    }
}
