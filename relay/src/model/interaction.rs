use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use twilight_model::{
    application::{
        command::{CommandOptionType, CommandType},
        interaction::{Interaction, InteractionType},
    },
    id::{
        Id,
        marker::{
            ApplicationMarker, ChannelMarker, CommandMarker, GenericMarker, GuildMarker,
            InteractionMarker, MessageMarker, UserMarker,
        },
    },
};

use super::{Member, Message, User};
use crate::error::PayloadError;

/// The raw `INTERACTION_CREATE` body, decoded field by field.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct InteractionPayload {
    pub id: Id<InteractionMarker>,
    pub application_id: Id<ApplicationMarker>,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Id<ChannelMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<PartialChannel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_permissions: Option<String>,
}

impl InteractionPayload {
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn command_data(&self) -> Option<&CommandData> {
        match &self.data {
            Some(InteractionData::Command(data)) => Some(data.as_ref()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn component_data(&self) -> Option<&ComponentData> {
        match &self.data {
            Some(InteractionData::Component(data)) => Some(data),
            _ => None,
        }
    }
}

impl TryFrom<&Interaction> for InteractionPayload {
    type Error = PayloadError;

    fn try_from(value: &Interaction) -> Result<Self, Self::Error> {
        Ok(serde_json::from_value(serde_json::to_value(value)?)?)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PartialChannel {
    pub id: Id<ChannelMarker>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum InteractionData {
    Command(Box<CommandData>),
    Component(ComponentData),
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CommandData {
    pub id: Id<CommandMarker>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CommandType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Resolved>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<Id<GenericMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CommandOptionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focused: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Resolved {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub users: HashMap<Id<UserMarker>, User>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub members: HashMap<Id<UserMarker>, Member>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub messages: HashMap<Id<MessageMarker>, Message>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ComponentData {
    pub custom_id: String,
    pub component_type: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use serde_json::{Value, json};
    use twilight_model::application::{
        command::CommandType,
        interaction::{Interaction, InteractionType},
    };

    use super::InteractionPayload;
    use crate::{
        context::{Ctx, TargetAuthor, fixture},
        core::standby::fake::Answer,
    };

    const TIMESTAMP: &str = "2021-08-18T13:05:09.000000+00:00";

    fn user(id: u64) -> Value {
        json!({
            "id": id.to_string(),
            "username": format!("user{id}"),
            "global_name": null,
            "discriminator": "0",
            "avatar": null,
            "public_flags": 0
        })
    }

    fn member(id: u64) -> Value {
        json!({
            "user": user(id),
            "nick": null,
            "avatar": null,
            "roles": ["5"],
            "joined_at": TIMESTAMP,
            "premium_since": null,
            "deaf": false,
            "mute": false,
            "flags": 0,
            "pending": false,
            "permissions": "2147483647",
            "communication_disabled_until": null
        })
    }

    fn message(id: u64) -> Value {
        json!({
            "id": id.to_string(),
            "channel_id": "200",
            "author": user(1),
            "content": "Proceed?",
            "timestamp": TIMESTAMP,
            "edited_timestamp": null,
            "tts": false,
            "mention_everyone": false,
            "mentions": [],
            "mention_roles": [],
            "attachments": [],
            "embeds": [],
            "pinned": false,
            "type": 0,
            "flags": 0,
            "components": [{
                "type": 1,
                "components": [{ "type": 2, "style": 1, "custom_id": "play", "label": "Play" }]
            }]
        })
    }

    fn gateway(kind: u8, data: Value) -> Interaction {
        let mut value = json!({
            "id": "900",
            "application_id": "1",
            "type": kind,
            "token": "gateway-token",
            "version": 1,
            "guild_id": "300",
            "channel_id": "200",
            "channel": { "id": "200", "type": 0 },
            "member": member(7),
            "locale": "en-US",
            "guild_locale": "en-US",
            "app_permissions": "2147483647",
            "authorizing_integration_owners": {},
            "entitlements": [],
            "data": data
        });
        if kind == 3 {
            value["message"] = message(1500);
        }
        serde_json::from_value(value).unwrap_or_else(|e| panic!("gateway interaction: {e}"))
    }

    fn ctx(interaction: &Interaction) -> Ctx {
        let payload = InteractionPayload::try_from(interaction).unwrap_or_else(|e| panic!("{e}"));
        Ctx::new(fixture::bot(Arc::default(), Answer::Never), payload)
            .unwrap_or_else(|e| panic!("context: {e}"))
    }

    #[test]
    fn slash_command_from_the_gateway() {
        let interaction = gateway(
            2,
            json!({
                "id": "50",
                "name": "confirm",
                "type": 1,
                "options": [{ "name": "question", "type": 3, "value": "Proceed?" }]
            }),
        );
        let ctx = ctx(&interaction);

        assert_eq!(ctx.data().kind, InteractionType::ApplicationCommand);
        assert_eq!(ctx.kind().name(), "slash");
        assert_eq!(ctx.author_id().get(), 7);
        assert_eq!(ctx.guild_id().map(|id| id.get()), Some(300));
        assert_eq!(ctx.channel_id().get(), 200);
        assert!(ctx.member().is_some_and(|m| m.joined_at.is_some() && m.roles.len() == 1));
        assert_eq!(
            ctx.slash().and_then(|slash| slash.option("question")),
            Some(&json!("Proceed?"))
        );
    }

    #[test]
    fn component_from_the_gateway() {
        let interaction = gateway(3, json!({ "custom_id": "play", "component_type": 2 }));
        let ctx = ctx(&interaction);

        assert_eq!(ctx.kind().name(), "component");
        let component = ctx.component().unwrap_or_else(|| panic!("component context"));
        assert_eq!(component.custom_id, "play");
        assert_eq!(component.origin_message_id.get(), 1500);
        assert!(component.component.is_some());
        assert!(
            component
                .origin_message
                .as_ref()
                .is_some_and(|m| m.content == "Proceed?" && m.author.id.get() == 1)
        );
        assert!(component.selected_options.is_none());
    }

    #[test]
    fn message_menu_from_the_gateway() {
        let interaction = gateway(
            2,
            json!({
                "id": "61",
                "name": "Quote",
                "type": 3,
                "target_id": "1600",
                "resolved": { "messages": { "1600": message(1600) } }
            }),
        );
        let ctx = ctx(&interaction);

        assert_eq!(ctx.kind().name(), "menu");
        let menu = ctx.menu().unwrap_or_else(|| panic!("menu context"));
        assert_eq!(menu.context_type, CommandType::Message);
        assert_eq!(menu.target_message.as_ref().map(|m| m.id.get()), Some(1600));
        assert!(matches!(&menu.target_author, Some(TargetAuthor::User(user)) if user.id.get() == 1));
    }

    #[test]
    fn user_menu_from_the_gateway() {
        let mut resolved_member = member(77);
        if let Some(fields) = resolved_member.as_object_mut() {
            fields.remove("user");
        }
        let interaction = gateway(
            2,
            json!({
                "id": "60",
                "name": "Inspect",
                "type": 2,
                "target_id": "77",
                "resolved": {
                    "users": { "77": user(77) },
                    "members": { "77": resolved_member }
                }
            }),
        );
        let ctx = ctx(&interaction);

        let menu = ctx.menu().unwrap_or_else(|| panic!("menu context"));
        assert_eq!(menu.context_type, CommandType::User);
        assert!(matches!(
            &menu.target_author,
            Some(TargetAuthor::Member(member)) if member.user.as_ref().is_some_and(|u| u.id.get() == 77)
        ));
    }
}
