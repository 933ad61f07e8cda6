pub mod response;

use std::sync::Arc;

use twilight_cache_inmemory::InMemoryCache;
use twilight_model::id::{Id, marker::UserMarker};

use super::{http::Dispatch, standby::ComponentWaiter};
use crate::model::AllowedMentions;

pub type OwnedBotState = Arc<BotState>;

pub trait HttpAware {
    fn http(&self) -> &Arc<dyn Dispatch>;
}

pub trait CacheAware {
    fn cache(&self) -> &InMemoryCache;
}

pub trait WaiterAware {
    fn waiter(&self) -> &dyn ComponentWaiter;
}

pub trait BotStateAware {
    fn bot(&self) -> &BotState;
}

pub trait OwnedBotStateAware: BotStateAware {
    fn bot_owned(&self) -> OwnedBotState;
}

/// Everything an interaction context shares with every other one.
pub struct BotState {
    http: Arc<dyn Dispatch>,
    cache: Arc<InMemoryCache>,
    waiter: Arc<dyn ComponentWaiter>,
    allowed_mentions: Option<AllowedMentions>,
    owners: Box<[Id<UserMarker>]>,
}

impl BotState {
    pub fn new(
        http: Arc<dyn Dispatch>,
        cache: Arc<InMemoryCache>,
        waiter: Arc<dyn ComponentWaiter>,
    ) -> Self {
        Self {
            http,
            cache,
            waiter,
            allowed_mentions: None,
            owners: Box::new([]),
        }
    }

    #[must_use]
    pub fn with_allowed_mentions(mut self, allowed_mentions: AllowedMentions) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }

    #[must_use]
    pub fn with_owners(mut self, owners: impl Into<Box<[Id<UserMarker>]>>) -> Self {
        self.owners = owners.into();
        self
    }

    pub const fn allowed_mentions(&self) -> Option<&AllowedMentions> {
        self.allowed_mentions.as_ref()
    }

    pub const fn owners(&self) -> &[Id<UserMarker>] {
        &self.owners
    }
}

impl HttpAware for BotState {
    fn http(&self) -> &Arc<dyn Dispatch> {
        &self.http
    }
}

impl CacheAware for BotState {
    fn cache(&self) -> &InMemoryCache {
        &self.cache
    }
}

impl WaiterAware for BotState {
    fn waiter(&self) -> &dyn ComponentWaiter {
        &*self.waiter
    }
}
