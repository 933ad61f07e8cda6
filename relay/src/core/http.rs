use std::{
    fmt::{self, Display},
    sync::Arc,
};

use futures::future::BoxFuture;
use serde::Serialize;
use twilight_http::Response;
use twilight_model::{
    channel::{
        Message as TwilightMessage,
        message::{Component, MessageFlags},
    },
    http::{
        attachment::Attachment,
        interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    },
    id::{
        Id,
        marker::{ApplicationMarker, InteractionMarker, MessageMarker},
    },
};

use crate::{
    error::HttpError,
    model::{Embed, MentionsPayload, Message},
};

pub type HttpResult<T> = Result<T, HttpError>;

/// A message reachable through an interaction token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageTarget {
    Original,
    Followup(Id<MessageMarker>),
}

impl Display for MessageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => f.write_str("@original"),
            Self::Followup(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct InitialResponse {
    #[serde(rename = "type")]
    pub kind: InteractionResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MessageBody>,
}

impl InitialResponse {
    fn to_twilight(&self) -> InteractionResponse {
        InteractionResponse {
            kind: self.kind,
            data: self.data.as_ref().map(MessageBody::to_response_data),
        }
    }
}

/// The message fields of a create or edit request; unset fields are omitted from the request.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MessageBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<MentionsPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
}

impl MessageBody {
    #[must_use]
    pub fn ephemeral() -> Self {
        Self {
            flags: Some(MessageFlags::EPHEMERAL),
            ..Self::default()
        }
    }

    /// The same fields in twilight's form. Mentions left to Discord's defaults become `None`.
    #[must_use]
    pub fn to_response_data(&self) -> InteractionResponseData {
        InteractionResponseData {
            allowed_mentions: self
                .allowed_mentions
                .as_ref()
                .and_then(MentionsPayload::to_twilight),
            components: self.components.clone(),
            content: self.content.clone(),
            embeds: self
                .embeds
                .as_ref()
                .map(|embeds| embeds.iter().map(Into::into).collect()),
            flags: self.flags,
            tts: self.tts,
            ..InteractionResponseData::default()
        }
    }
}

/// The interaction and webhook routes a context needs to answer an interaction.
pub trait Dispatch: Send + Sync {
    fn post_initial_response<'a>(
        &'a self,
        interaction_id: Id<InteractionMarker>,
        token: &'a str,
        response: &'a InitialResponse,
    ) -> BoxFuture<'a, HttpResult<()>>;

    fn edit<'a>(
        &'a self,
        token: &'a str,
        target: MessageTarget,
        body: &'a MessageBody,
        files: Vec<Attachment>,
    ) -> BoxFuture<'a, HttpResult<Message>>;

    fn post_followup<'a>(
        &'a self,
        token: &'a str,
        body: &'a MessageBody,
        files: Vec<Attachment>,
    ) -> BoxFuture<'a, HttpResult<Message>>;

    fn delete<'a>(&'a self, token: &'a str, target: MessageTarget) -> BoxFuture<'a, HttpResult<()>>;

    fn fetch<'a>(&'a self, token: &'a str, target: MessageTarget)
    -> BoxFuture<'a, HttpResult<Message>>;
}

/// Answers interactions through twilight's interaction client.
pub struct Client {
    inner: Arc<twilight_http::Client>,
    application_id: Id<ApplicationMarker>,
}

impl Client {
    #[must_use]
    pub const fn new(
        inner: Arc<twilight_http::Client>,
        application_id: Id<ApplicationMarker>,
    ) -> Self {
        Self {
            inner,
            application_id,
        }
    }

    fn interaction(&self) -> twilight_http::client::InteractionClient<'_> {
        self.inner.interaction(self.application_id)
    }
}

/// Re-reads a returned message as relay's own model.
async fn decode(response: Response<TwilightMessage>) -> HttpResult<Message> {
    Ok(serde_json::from_slice(&response.bytes().await?)?)
}

/// Applies the set fields of an edit; the rest of the message is left untouched.
macro_rules! edit_fields {
    ($request:expr, $data:expr, $files:expr) => {{
        let mut request = $request;
        if let Some(content) = &$data.content {
            request = request.content(Some(content.as_str()));
        }
        if let Some(embeds) = &$data.embeds {
            request = request.embeds(Some(embeds.as_slice()));
        }
        if let Some(components) = &$data.components {
            request = request.components(Some(components.as_slice()));
        }
        if let Some(allowed_mentions) = &$data.allowed_mentions {
            request = request.allowed_mentions(Some(allowed_mentions));
        }
        if !$files.is_empty() {
            request = request.attachments($files);
        }
        request
    }};
}

impl Dispatch for Client {
    fn post_initial_response<'a>(
        &'a self,
        interaction_id: Id<InteractionMarker>,
        token: &'a str,
        response: &'a InitialResponse,
    ) -> BoxFuture<'a, HttpResult<()>> {
        Box::pin(async move {
            tracing::trace!(kind = ?response.kind, "posting initial response");
            let response = response.to_twilight();
            self.interaction()
                .create_response(interaction_id, token, &response)
                .await?;
            Ok(())
        })
    }

    fn edit<'a>(
        &'a self,
        token: &'a str,
        target: MessageTarget,
        body: &'a MessageBody,
        files: Vec<Attachment>,
    ) -> BoxFuture<'a, HttpResult<Message>> {
        Box::pin(async move {
            tracing::trace!(to = %target, files = files.len(), "editing message");
            let data = body.to_response_data();
            let client = self.interaction();
            let response = match target {
                MessageTarget::Original => {
                    edit_fields!(client.update_response(token), data, &files).await?
                }
                MessageTarget::Followup(message_id) => {
                    edit_fields!(client.update_followup(token, message_id), data, &files).await?
                }
            };
            decode(response).await
        })
    }

    fn post_followup<'a>(
        &'a self,
        token: &'a str,
        body: &'a MessageBody,
        files: Vec<Attachment>,
    ) -> BoxFuture<'a, HttpResult<Message>> {
        Box::pin(async move {
            tracing::trace!(files = files.len(), "posting followup");
            let data = body.to_response_data();
            let client = self.interaction();
            let mut request = client.create_followup(token).attachments(&files);
            if let Some(allowed_mentions) = &data.allowed_mentions {
                request = request.allowed_mentions(Some(allowed_mentions));
            }
            if let Some(content) = &data.content {
                request = request.content(content);
            }
            if let Some(embeds) = &data.embeds {
                request = request.embeds(embeds);
            }
            if let Some(components) = &data.components {
                request = request.components(components);
            }
            if let Some(flags) = data.flags {
                request = request.flags(flags);
            }
            if let Some(tts) = data.tts {
                request = request.tts(tts);
            }
            decode(request.await?).await
        })
    }

    fn delete<'a>(&'a self, token: &'a str, target: MessageTarget) -> BoxFuture<'a, HttpResult<()>> {
        Box::pin(async move {
            tracing::trace!(to = %target, "deleting message");
            let client = self.interaction();
            match target {
                MessageTarget::Original => client.delete_response(token).await?,
                MessageTarget::Followup(message_id) => {
                    client.delete_followup(token, message_id).await?
                }
            };
            Ok(())
        })
    }

    fn fetch<'a>(
        &'a self,
        token: &'a str,
        target: MessageTarget,
    ) -> BoxFuture<'a, HttpResult<Message>> {
        Box::pin(async move {
            let client = self.interaction();
            let response = match target {
                MessageTarget::Original => client.response(token).await?,
                MessageTarget::Followup(message_id) => client.followup(token, message_id).await?,
            };
            decode(response).await
        })
    }
}


#[cfg(test)]
mod test {
    use std::sync::Arc;

    use serde_json::{Value, json};
    use twilight_http::request::{Method, TryIntoRequest};
    use twilight_model::{
        channel::message::{AllowedMentions as TwilightMentions, MessageFlags},
        http::{attachment::Attachment, interaction::InteractionResponseType},
        id::Id,
    };

    use super::{Client, InitialResponse, MessageBody, MessageTarget};
    use crate::model::{AllowedMentions, Embed, MentionsPayload};

    fn client() -> Client {
        Client::new(Arc::new(twilight_http::Client::new(String::new())), Id::new(1))
    }

    fn json_body(request: &twilight_http::request::Request) -> Value {
        request
            .body()
            .and_then(|body| serde_json::from_slice(body).ok())
            .unwrap_or_default()
    }

    #[test]
    fn ephemeral_flag_serialises_as_64() {
        let response = InitialResponse {
            kind: InteractionResponseType::DeferredChannelMessageWithSource,
            data: Some(MessageBody::ephemeral()),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap_or_default(),
            json!({ "type": 5, "data": { "flags": 64 } })
        );
    }

    #[test]
    fn unset_fields_are_omitted() {
        let body = MessageBody {
            content: Some(String::from("hi")),
            allowed_mentions: Some(MentionsPayload::default()),
            components: Some(Vec::new()),
            ..MessageBody::default()
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap_or_default(),
            json!({ "content": "hi", "allowed_mentions": {}, "components": [] })
        );
    }

    #[test]
    fn target_display() {
        assert_eq!(MessageTarget::Original.to_string(), "@original");
        assert_eq!(MessageTarget::Followup(Id::new(42)).to_string(), "42");
    }

    #[test]
    fn response_data_carries_every_set_field() {
        let body = MessageBody {
            content: Some(String::from("hi")),
            tts: Some(false),
            embeds: Some(vec![Embed::new().title("Sure?").color(0x2E_CC71)]),
            allowed_mentions: Some(MentionsPayload::from(&AllowedMentions::none())),
            components: Some(Vec::new()),
            flags: Some(MessageFlags::EPHEMERAL),
        };
        let data = body.to_response_data();

        assert_eq!(data.content.as_deref(), Some("hi"));
        assert_eq!(data.tts, Some(false));
        assert_eq!(data.flags, Some(MessageFlags::EPHEMERAL));
        assert_eq!(data.components, Some(Vec::new()));
        assert_eq!(data.allowed_mentions, Some(TwilightMentions::default()));
        let embeds = data.embeds.unwrap_or_default();
        assert_eq!(embeds.len(), 1);
        assert_eq!(embeds[0].kind, "rich");
        assert_eq!(embeds[0].title.as_deref(), Some("Sure?"));
        assert_eq!(embeds[0].color, Some(0x2E_CC71));
    }

    #[test]
    fn unconfigured_mentions_are_left_to_discord() {
        let body = MessageBody {
            allowed_mentions: Some(MentionsPayload::default()),
            ..MessageBody::default()
        };
        assert!(body.to_response_data().allowed_mentions.is_none());
    }

    #[test]
    fn initial_response_keeps_its_kind() {
        let response = InitialResponse {
            kind: InteractionResponseType::DeferredUpdateMessage,
            data: None,
        }
        .to_twilight();
        assert_eq!(response.kind, InteractionResponseType::DeferredUpdateMessage);
        assert!(response.data.is_none());
    }

    #[test]
    fn edits_send_only_the_set_fields() {
        let client = client();
        let interaction = client.interaction();
        let data = MessageBody {
            content: Some(String::from("edited")),
            ..MessageBody::default()
        }
        .to_response_data();
        let files = Vec::<Attachment>::new();

        let request = edit_fields!(interaction.update_response("token"), data, &files)
            .try_into_request()
            .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(request.method(), Method::Patch);
        assert!(request.form().is_none());
        assert_eq!(json_body(&request), json!({ "content": "edited" }));
    }

    #[test]
    fn edits_can_clear_embeds_and_components() {
        let client = client();
        let interaction = client.interaction();
        let data = MessageBody {
            embeds: Some(Vec::new()),
            components: Some(Vec::new()),
            ..MessageBody::default()
        }
        .to_response_data();
        let files = Vec::<Attachment>::new();

        let request = edit_fields!(interaction.update_followup("token", Id::new(5)), data, &files)
            .try_into_request()
            .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(
            json_body(&request),
            json!({ "embeds": [], "components": [] })
        );
    }

    #[test]
    fn files_switch_an_edit_to_a_form() {
        let client = client();
        let interaction = client.interaction();
        let data = MessageBody::default().to_response_data();
        let files = vec![
            Attachment::from_bytes(String::from("a.txt"), b"a".to_vec(), 0),
            Attachment::from_bytes(String::from("b.txt"), b"b".to_vec(), 1),
        ];

        let request = edit_fields!(interaction.update_response("token"), data, &files)
            .try_into_request()
            .unwrap_or_else(|e| panic!("{e}"));

        assert!(request.form().is_some());
        assert!(request.body().is_none());
    }
}
