use serde::Serialize;
use twilight_model::{
    channel::message::{AllowedMentions as TwilightMentions, MentionType},
    id::{
        Id,
        marker::{RoleMarker, UserMarker},
    },
};

/// Which users or roles a message may ping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MentionTargets<I> {
    All,
    Only(Vec<I>),
}

impl<I> MentionTargets<I> {
    #[must_use]
    pub const fn none() -> Self {
        Self::Only(Vec::new())
    }
}

/// Mention settings; an unset field allows that kind of mention and yields to the other side of a merge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowedMentions {
    pub everyone: Option<bool>,
    pub users: Option<MentionTargets<Id<UserMarker>>>,
    pub roles: Option<MentionTargets<Id<RoleMarker>>>,
    pub replied_user: Option<bool>,
}

impl AllowedMentions {
    #[must_use]
    pub fn none() -> Self {
        Self {
            everyone: Some(false),
            users: Some(MentionTargets::none()),
            roles: Some(MentionTargets::none()),
            replied_user: Some(false),
        }
    }

    /// Combines `self` with `overrides`, where every field set on `overrides` wins.
    #[must_use]
    pub fn merge(&self, overrides: &Self) -> Self {
        Self {
            everyone: overrides.everyone.or(self.everyone),
            users: overrides.users.clone().or_else(|| self.users.clone()),
            roles: overrides.roles.clone().or_else(|| self.roles.clone()),
            replied_user: overrides.replied_user.or(self.replied_user),
        }
    }

    /// Resolves the bot default and a per-call setting into the object sent to Discord.
    #[must_use]
    pub fn resolve(default: Option<&Self>, call: Option<&Self>) -> MentionsPayload {
        match (default, call) {
            (Some(default), Some(call)) => MentionsPayload::from(&default.merge(call)),
            (Some(only), None) | (None, Some(only)) => MentionsPayload::from(only),
            (None, None) => MentionsPayload::default(),
        }
    }
}

/// The wire form of [`AllowedMentions`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MentionsPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<Id<UserMarker>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Id<RoleMarker>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replied_user: Option<bool>,
}

impl MentionsPayload {
    /// `None` when nothing was configured, so Discord applies its own defaults.
    #[must_use]
    pub fn to_twilight(&self) -> Option<TwilightMentions> {
        if *self == Self::default() {
            return None;
        }

        let parse = self
            .parse
            .iter()
            .flatten()
            .filter_map(|kind| match *kind {
                "everyone" => Some(MentionType::Everyone),
                "users" => Some(MentionType::Users),
                "roles" => Some(MentionType::Roles),
                _ => None,
            })
            .collect();

        Some(TwilightMentions {
            parse,
            replied_user: self.replied_user.unwrap_or(false),
            roles: self.roles.clone().unwrap_or_default(),
            users: self.users.clone().unwrap_or_default(),
        })
    }
}

impl From<&AllowedMentions> for MentionsPayload {
    fn from(value: &AllowedMentions) -> Self {
        let mut parse = Vec::new();
        if value.everyone.unwrap_or(true) {
            parse.push("everyone");
        }

        let users = match &value.users {
            None | Some(MentionTargets::All) => {
                parse.push("users");
                None
            }
            Some(MentionTargets::Only(ids)) => (!ids.is_empty()).then(|| ids.clone()),
        };
        let roles = match &value.roles {
            None | Some(MentionTargets::All) => {
                parse.push("roles");
                None
            }
            Some(MentionTargets::Only(ids)) => (!ids.is_empty()).then(|| ids.clone()),
        };

        Self {
            parse: Some(parse),
            users,
            roles,
            replied_user: value.replied_user.unwrap_or(true).then_some(true),
        }
    }
}
