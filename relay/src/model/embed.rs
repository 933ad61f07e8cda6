use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use twilight_model::{
    channel::message::embed as twilight,
    util::Timestamp,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Embed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<EmbedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<EmbedProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn footer(mut self, footer: EmbedFooter) -> Self {
        self.footer = Some(footer);
        self
    }

    #[must_use]
    pub fn field(mut self, field: EmbedField) -> Self {
        self.fields.push(field);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_icon_url: Option<String>,
}

impl EmbedFooter {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon_url: None,
            proxy_icon_url: None,
        }
    }
}

/// Shared by `image`, `thumbnail` and `video`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmbedImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmbedProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmbedAuthor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_icon_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
}

impl EmbedField {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: None,
        }
    }

    #[must_use]
    pub const fn inline(mut self) -> Self {
        self.inline = Some(true);
        self
    }
}

impl From<&Embed> for twilight::Embed {
    /// Images and authors without their required `url` or `name` are dropped.
    fn from(value: &Embed) -> Self {
        Self {
            author: value.author.as_ref().and_then(|author| {
                Some(twilight::EmbedAuthor {
                    icon_url: author.icon_url.clone(),
                    name: author.name.clone()?,
                    proxy_icon_url: author.proxy_icon_url.clone(),
                    url: author.url.clone(),
                })
            }),
            color: value.color,
            description: value.description.clone(),
            fields: value
                .fields
                .iter()
                .map(|field| twilight::EmbedField {
                    inline: field.inline.unwrap_or(false),
                    name: field.name.clone(),
                    value: field.value.clone(),
                })
                .collect(),
            footer: value.footer.as_ref().map(|footer| twilight::EmbedFooter {
                icon_url: footer.icon_url.clone(),
                proxy_icon_url: footer.proxy_icon_url.clone(),
                text: footer.text.clone(),
            }),
            image: value.image.as_ref().and_then(|image| {
                Some(twilight::EmbedImage {
                    height: image.height,
                    proxy_url: image.proxy_url.clone(),
                    url: image.url.clone()?,
                    width: image.width,
                })
            }),
            kind: value.kind.clone().unwrap_or_else(|| String::from("rich")),
            provider: value.provider.as_ref().map(|provider| twilight::EmbedProvider {
                name: provider.name.clone(),
                url: provider.url.clone(),
            }),
            thumbnail: value.thumbnail.as_ref().and_then(|thumbnail| {
                Some(twilight::EmbedThumbnail {
                    height: thumbnail.height,
                    proxy_url: thumbnail.proxy_url.clone(),
                    url: thumbnail.url.clone()?,
                    width: thumbnail.width,
                })
            }),
            timestamp: value.timestamp.and_then(to_timestamp),
            title: value.title.clone(),
            url: value.url.clone(),
            video: value.video.as_ref().map(|video| twilight::EmbedVideo {
                height: video.height,
                proxy_url: video.proxy_url.clone(),
                url: video.url.clone(),
                width: video.width,
            }),
        }
    }
}

fn to_timestamp(value: OffsetDateTime) -> Option<Timestamp> {
    let micros = i64::try_from(value.unix_timestamp_nanos() / 1000).ok()?;
    Timestamp::from_micros(micros).ok()
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use twilight_model::channel::message::embed as twilight;

    use super::{Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedImage};

    #[test]
    fn twilight_form_of_a_prompt_embed() {
        let embed = Embed::new()
            .title("Sure?")
            .description("Clear the queue")
            .color(0x99_AAB5)
            .footer(EmbedFooter::new("relay"))
            .field(EmbedField::new("a", "b").inline())
            .field(EmbedField::new("c", "d"));
        let converted = twilight::Embed::from(&embed);

        assert_eq!(converted.kind, "rich");
        assert_eq!(converted.title.as_deref(), Some("Sure?"));
        assert_eq!(converted.description.as_deref(), Some("Clear the queue"));
        assert_eq!(converted.color, Some(0x99_AAB5));
        assert_eq!(converted.footer.map(|f| f.text), Some(String::from("relay")));
        assert_eq!(
            converted
                .fields
                .iter()
                .map(|f| (f.name.as_str(), f.inline))
                .collect::<Vec<_>>(),
            [("a", true), ("c", false)]
        );
    }

    #[test]
    fn timestamp_survives_conversion() {
        let embed = Embed {
            timestamp: Some(datetime!(2021-08-18 13:05:09 UTC)),
            ..Embed::default()
        };
        let converted = twilight::Embed::from(&embed);
        assert_eq!(converted.timestamp.map(|t| t.as_secs()), Some(1_629_291_909));
    }

    #[test]
    fn incomplete_images_and_authors_are_dropped() {
        let embed = Embed {
            image: Some(EmbedImage::default()),
            thumbnail: Some(EmbedImage {
                url: Some(String::from("https://example.com/t.png")),
                ..EmbedImage::default()
            }),
            author: Some(EmbedAuthor {
                url: Some(String::from("https://example.com")),
                ..EmbedAuthor::default()
            }),
            ..Embed::default()
        };
        let converted = twilight::Embed::from(&embed);

        assert!(converted.image.is_none());
        assert!(converted.author.is_none());
        assert_eq!(
            converted.thumbnail.map(|t| t.url),
            Some(String::from("https://example.com/t.png"))
        );
    }
}
