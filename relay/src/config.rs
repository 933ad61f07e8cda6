use twilight_model::id::{Id, marker::UserMarker};

use crate::{
    error::ConfigError,
    model::{AllowedMentions, MentionTargets},
};

const BOT_TOKEN: &str = "BOT_TOKEN";
const OWNER_IDS: &str = "OWNER_IDS";
const ALLOWED_MENTIONS: &str = "ALLOWED_MENTIONS";

#[derive(Clone)]
pub struct Config {
    pub token: String,
    /// Users allowed to answer any prompt.
    pub owners: Box<[Id<UserMarker>]>,
    /// The bot-wide mention default every send is merged with.
    pub allowed_mentions: Option<AllowedMentions>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("owners", &self.owners)
            .field("allowed_mentions", &self.allowed_mentions)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// # Errors
    /// when `BOT_TOKEN` is unset, `OWNER_IDS` holds something that is not a user id,
    /// or `ALLOWED_MENTIONS` names an unknown mention kind.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup(BOT_TOKEN)
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing(BOT_TOKEN))?;
        let owners = lookup(OWNER_IDS)
            .as_deref()
            .map(parse_owner_ids)
            .transpose()?
            .unwrap_or_default();
        let allowed_mentions = lookup(ALLOWED_MENTIONS)
            .as_deref()
            .map(parse_allowed_mentions)
            .transpose()?;

        Ok(Self {
            token,
            owners,
            allowed_mentions,
        })
    }
}

fn parse_owner_ids(raw: &str) -> Result<Box<[Id<UserMarker>]>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse()
                .ok()
                .and_then(Id::new_checked)
                .ok_or_else(|| ConfigError::InvalidOwnerId(id.into()))
        })
        .collect()
}

/// Listed kinds may ping and everything else may not; `none` or an empty list denies all.
fn parse_allowed_mentions(raw: &str) -> Result<AllowedMentions, ConfigError> {
    let mut mentions = AllowedMentions::none();
    for kind in raw.split(',').map(str::trim).filter(|kind| !kind.is_empty()) {
        match &*kind.to_ascii_lowercase() {
            "none" => {}
            "everyone" => mentions.everyone = Some(true),
            "users" => mentions.users = Some(MentionTargets::All),
            "roles" => mentions.roles = Some(MentionTargets::All),
            "replied_user" => mentions.replied_user = Some(true),
            _ => return Err(ConfigError::InvalidAllowedMention(kind.into())),
        }
    }
    Ok(mentions)
}
