use futures::future::BoxFuture;
use twilight_gateway::Event;
use twilight_model::{
    application::interaction::InteractionData,
    id::{Id, marker::UserMarker},
};
use twilight_standby::Standby;

use crate::{error::prompt::WaitError, model::InteractionPayload};

/// Accepts a component interaction if its custom id is one of `custom_ids` and it was made by one of `user_ids`.
#[derive(Clone, Debug)]
pub struct ComponentFilter {
    custom_ids: Box<[String]>,
    user_ids: Box<[Id<UserMarker>]>,
}

impl ComponentFilter {
    pub fn new(
        custom_ids: impl IntoIterator<Item = String>,
        user_ids: impl IntoIterator<Item = Id<UserMarker>>,
    ) -> Self {
        Self {
            custom_ids: custom_ids.into_iter().collect(),
            user_ids: user_ids.into_iter().collect(),
        }
    }

    #[must_use]
    pub const fn custom_ids(&self) -> &[String] {
        &self.custom_ids
    }

    #[must_use]
    pub const fn user_ids(&self) -> &[Id<UserMarker>] {
        &self.user_ids
    }

    #[must_use]
    pub fn matches(&self, custom_id: &str, user_id: Option<Id<UserMarker>>) -> bool {
        self.custom_ids.iter().any(|id| id == custom_id)
            && user_id.is_some_and(|user_id| self.user_ids.contains(&user_id))
    }
}

pub trait ComponentWaiter: Send + Sync {
    /// Resolves with the first component interaction accepted by `filter`.
    fn wait_for_component(
        &self,
        filter: ComponentFilter,
    ) -> BoxFuture<'static, Result<InteractionPayload, WaitError>>;
}

impl ComponentWaiter for Standby {
    fn wait_for_component(
        &self,
        filter: ComponentFilter,
    ) -> BoxFuture<'static, Result<InteractionPayload, WaitError>> {
        let fut = self.wait_for_event(move |event: &Event| {
            let Event::InteractionCreate(interaction) = event else {
                return false;
            };
            let Some(InteractionData::MessageComponent(data)) = &interaction.data else {
                return false;
            };
            filter.matches(&data.custom_id, interaction.author_id())
        });

        Box::pin(async move {
            let Event::InteractionCreate(interaction) = fut.await? else {
                return Err(WaitError::UnexpectedEvent);
            };
            Ok(InteractionPayload::try_from(&interaction.0)?)
        })
    }
}

#[cfg(test)]
pub mod fake {
    use futures::future::BoxFuture;
    use serde_json::{Value, json};

    use super::{ComponentFilter, ComponentWaiter};
    use crate::{error::prompt::WaitError, model::InteractionPayload};

    #[derive(Clone, Copy, Debug)]
    pub enum Answer {
        Yes,
        No,
        Never,
        Fail,
        /// Clicks "yes" with a payload that names no user.
        Unreadable,
    }

    pub struct ScriptedWaiter(pub Answer);

    impl ComponentWaiter for ScriptedWaiter {
        fn wait_for_component(
            &self,
            filter: ComponentFilter,
        ) -> BoxFuture<'static, Result<InteractionPayload, WaitError>> {
            let index = match self.0 {
                Answer::Yes | Answer::Unreadable => 0,
                Answer::No => 1,
                Answer::Never => return Box::pin(std::future::pending::<Result<InteractionPayload, WaitError>>()),
                Answer::Fail => {
                    return Box::pin(async { Err::<InteractionPayload, _>(WaitError::UnexpectedEvent) });
                }
            };
            let custom_id = filter.custom_ids()[index].clone();
            let user_id = filter.user_ids()[0];
            let mut payload = json!({
                "id": "900",
                "application_id": "1",
                "type": 3,
                "token": "button-token",
                "channel_id": "200",
                "guild_id": "300",
                "member": {
                    "user": { "id": user_id.to_string(), "username": "amy", "discriminator": "0" },
                    "roles": [],
                    "deaf": false,
                    "mute": false
                },
                "data": { "custom_id": custom_id, "component_type": 2 },
                "message": {
                    "id": "1001",
                    "channel_id": "200",
                    "author": { "id": "1", "username": "relay", "discriminator": "0" },
                    "timestamp": "2021-08-18T13:05:09+00:00",
                    "type": 20,
                    "flags": 64
                }
            });
            if matches!(self.0, Answer::Unreadable) {
                payload["member"] = Value::Null;
            }
            let payload = serde_json::from_value::<InteractionPayload>(payload);
            Box::pin(async move { payload.map_err(|e| WaitError::Decode(e.into())) })
        }
    }
}

#[cfg(test)]
mod test {
    use twilight_model::id::Id;

    use super::ComponentFilter;

    #[test]
    fn filter_needs_both_id_and_user() {
        let filter = ComponentFilter::new([String::from("yes"), String::from("no")], [Id::new(7)]);
        assert!(filter.matches("yes", Some(Id::new(7))));
        assert!(!filter.matches("maybe", Some(Id::new(7))));
        assert!(!filter.matches("no", Some(Id::new(8))));
        assert!(!filter.matches("no", None));
    }
}
