use twilight_model::{
    application::command::CommandType,
    id::{
        Id,
        marker::{GenericMarker, MessageMarker, UserMarker},
    },
};

use crate::model::{CommandData, Member, Message, User};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetAuthor {
    User(User),
    /// A guild member, with `user` filled in from the resolved users or the message author.
    Member(Box<Member>),
}

impl TargetAuthor {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::User(user) => Some(user),
            Self::Member(member) => member.user.as_ref(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Menu {
    pub name: String,
    pub context_type: CommandType,
    pub target_id: Option<Id<GenericMarker>>,
    pub target_message: Option<Message>,
    pub target_author: Option<TargetAuthor>,
}

impl Menu {
    pub(super) fn from_data(data: &CommandData, in_guild: bool) -> Self {
        let resolved = data.resolved.as_ref();

        let target_message = data.target_id.zip(resolved).and_then(|(id, resolved)| {
            resolved
                .messages
                .get(&id.cast::<MessageMarker>())
                .cloned()
        });

        let target_author = match data.kind {
            CommandType::Message => target_message
                .as_ref()
                .map(|message| message_author(message, in_guild)),
            _ => data.target_id.zip(resolved).and_then(|(id, resolved)| {
                let id = id.cast::<UserMarker>();
                let user = resolved.users.get(&id)?.clone();
                if !in_guild {
                    return Some(TargetAuthor::User(user));
                }
                let mut member = resolved.members.get(&id)?.clone();
                member.user = Some(user);
                Some(TargetAuthor::Member(Box::new(member)))
            }),
        };

        Self {
            name: data.name.clone(),
            context_type: data.kind,
            target_id: data.target_id,
            target_message,
            target_author,
        }
    }
}

/// The author of a menu's target message, as a member when the message carries one.
fn message_author(message: &Message, in_guild: bool) -> TargetAuthor {
    match &message.member {
        Some(member) if in_guild => {
            let mut member = member.clone();
            member.user = Some(message.author.clone());
            TargetAuthor::Member(Box::new(member))
        }
        _ => TargetAuthor::User(message.author.clone()),
    }
}
