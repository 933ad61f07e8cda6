use serde::{Deserialize, Serialize};
use twilight_model::id::{
    Id,
    marker::{GuildMarker, StickerMarker, StickerPackMarker},
};

use super::User;

/// The partial sticker attached to messages.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StickerItem {
    pub id: Id<StickerMarker>,
    pub name: String,
    pub format_type: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Sticker {
    pub id: Id<StickerMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_id: Option<Id<StickerPackMarker>>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    #[serde(rename = "type")]
    pub kind: u8,
    pub format_type: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Id<GuildMarker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_value: Option<u64>,
}
