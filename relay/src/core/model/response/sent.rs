use std::{fmt, sync::Arc, time::Duration};

use twilight_model::id::{Id, marker::MessageMarker};

use crate::{
    core::{
        http::{Dispatch, HttpResult, MessageBody, MessageTarget},
        traced,
    },
    model::Message,
};

/// A message sent through an interaction token, which keeps the token around to manage it afterwards.
#[derive(Clone)]
pub struct SentMessage {
    http: Arc<dyn Dispatch>,
    token: Arc<str>,
    target: MessageTarget,
    model: Option<Message>,
}

impl fmt::Debug for SentMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentMessage")
            .field("target", &self.target)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl SentMessage {
    pub(in crate::core) fn new(
        http: Arc<dyn Dispatch>,
        token: Arc<str>,
        target: MessageTarget,
        model: Option<Message>,
    ) -> Self {
        Self {
            http,
            token,
            target,
            model,
        }
    }

    pub const fn target(&self) -> MessageTarget {
        self.target
    }

    /// The message as returned by Discord; absent for initial responses, which return no body.
    pub const fn model(&self) -> Option<&Message> {
        self.model.as_ref()
    }

    pub fn id(&self) -> Option<Id<MessageMarker>> {
        match self.target {
            MessageTarget::Followup(id) => Some(id),
            MessageTarget::Original => self.model.as_ref().map(|message| message.id),
        }
    }

    pub async fn retrieve(&self) -> HttpResult<Message> {
        self.http.fetch(&self.token, self.target).await
    }

    pub async fn edit(&self, body: &MessageBody) -> HttpResult<Message> {
        self.http
            .edit(&self.token, self.target, body, Vec::new())
            .await
    }

    pub async fn delete(&self) -> HttpResult<()> {
        self.http.delete(&self.token, self.target).await
    }

    pub(in crate::core) fn delete_after(self, delay: Duration) {
        traced::tokio_spawn("delete_after", async move {
            tokio::time::sleep(delay).await;
            tracing::debug!(of = %self.target, "deleting message after {delay:?}");
            self.delete().await
        });
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        context::fixture,
        core::http::{
            MessageBody, MessageTarget,
            fake::{RecordingDispatch, Request, message_id},
        },
    };

    #[tokio::test]
    async fn handle_manages_the_followup_it_names() {
        let http = Arc::new(RecordingDispatch::default());
        let mut ctx = fixture::ctx(fixture::slash(), http.clone());

        assert!(ctx.send().content("first").await.is_ok());
        let Ok(followup) = ctx.send().content("second").await else {
            panic!("followup should succeed");
        };
        let target = MessageTarget::Followup(message_id(1));
        assert_eq!(followup.id(), Some(message_id(1)));

        assert!(followup.retrieve().await.is_ok());
        assert!(followup.edit(&MessageBody::default()).await.is_ok());
        assert!(followup.delete().await.is_ok());

        assert_eq!(
            http.requests()[2..],
            [
                Request::Fetch { target },
                Request::Edit {
                    target,
                    body: serde_json::json!({}),
                    files: 0
                },
                Request::Delete { target },
            ]
        );
    }

    #[tokio::test]
    async fn initial_response_handle_targets_original() {
        let http = Arc::new(RecordingDispatch::default());
        let mut ctx = fixture::ctx(fixture::slash(), http.clone());

        assert!(ctx.send().content("hi").await.is_ok());
        let Some(message) = ctx.message() else {
            panic!("the visible initial response should be remembered");
        };
        assert_eq!(message.target(), MessageTarget::Original);
        assert!(message.id().is_none());
        assert!(message.delete().await.is_ok());
        assert_eq!(
            http.requests().last(),
            Some(&Request::Delete {
                target: MessageTarget::Original
            })
        );
    }
}
