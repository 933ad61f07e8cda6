use twilight_model::{
    channel::message::Component as MessageComponent,
    id::{Id, marker::MessageMarker},
};

use crate::{
    core::konst::discord::COMPONENT_TYPE_TEXT_SELECT_MENU,
    error::PayloadError,
    model::{InteractionPayload, Message},
};

#[derive(Clone, Debug)]
pub struct Component {
    pub custom_id: String,
    pub component_type: u8,
    pub origin_message_id: Id<MessageMarker>,
    /// The message carrying the component, unless it is ephemeral.
    pub origin_message: Option<Message>,
    /// The component in the origin message whose custom id matched.
    pub component: Option<MessageComponent>,
    /// Chosen values of a text select menu; `None` for other component types.
    pub selected_options: Option<Vec<String>>,
}

impl Component {
    pub(super) fn from_payload(payload: &InteractionPayload) -> Result<Self, PayloadError> {
        let data = payload
            .component_data()
            .ok_or(PayloadError::Missing("data"))?;
        let message = payload
            .message
            .as_ref()
            .ok_or(PayloadError::Missing("message"))?;

        let origin_message = (!message.ephemeral()).then(|| message.clone());
        let component = origin_message
            .as_ref()
            .and_then(|message| find(&message.components, &data.custom_id));
        let selected_options = (data.component_type == COMPONENT_TYPE_TEXT_SELECT_MENU)
            .then(|| data.values.clone().unwrap_or_default());

        Ok(Self {
            custom_id: data.custom_id.clone(),
            component_type: data.component_type,
            origin_message_id: message.id,
            origin_message,
            component,
            selected_options,
        })
    }
}

fn find(rows: &[MessageComponent], custom_id: &str) -> Option<MessageComponent> {
    rows.iter()
        .filter_map(|row| match row {
            MessageComponent::ActionRow(row) => Some(&row.components),
            _ => None,
        })
        .flatten()
        .find(|component| match component {
            MessageComponent::Button(button) => button.custom_id.as_deref() == Some(custom_id),
            MessageComponent::SelectMenu(menu) => menu.custom_id == custom_id,
            _ => false,
        })
        .cloned()
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use serde_json::json;
    use twilight_model::channel::message::Component as MessageComponent;

    use crate::context::fixture;

    #[test]
    fn finds_the_pressed_button() {
        let ctx = fixture::ctx(fixture::button("go"), Arc::default());
        let component = ctx.component().unwrap_or_else(|| panic!("component context"));

        assert_eq!(component.custom_id, "go");
        assert_eq!(component.component_type, 2);
        assert_eq!(component.origin_message_id.get(), 1500);
        assert!(component.origin_message.is_some());
        assert!(component.selected_options.is_none());
        assert!(matches!(
            &component.component,
            Some(MessageComponent::Button(button)) if button.label.as_deref() == Some("Go")
        ));
    }

    #[test]
    fn ephemeral_origin_is_hidden() {
        let mut payload = fixture::button("go");
        payload["message"]["flags"] = json!(64);
        let ctx = fixture::ctx(payload, Arc::default());
        let component = ctx.component().unwrap_or_else(|| panic!("component context"));

        assert!(component.origin_message.is_none());
        assert!(component.component.is_none());
        assert_eq!(component.origin_message_id.get(), 1500);
    }

    #[test]
    fn select_menu_values() {
        let mut payload = fixture::button("pick");
        payload["data"] = json!({
            "custom_id": "pick",
            "component_type": 3,
            "values": ["a", "b"]
        });
        let ctx = fixture::ctx(payload, Arc::default());
        let component = ctx.component().unwrap_or_else(|| panic!("component context"));

        assert_eq!(
            component.selected_options.as_deref(),
            Some(&[String::from("a"), String::from("b")][..])
        );
        assert_eq!(ctx.values().map(<[String]>::len), Some(2));
    }

    #[test]
    fn select_menu_without_values_is_empty() {
        let mut payload = fixture::button("pick");
        payload["data"] = json!({ "custom_id": "pick", "component_type": 3 });
        let ctx = fixture::ctx(payload, Arc::default());

        assert_eq!(
            ctx.component().and_then(|c| c.selected_options.clone()),
            Some(Vec::new())
        );
    }
}
