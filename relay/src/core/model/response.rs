mod defer;
mod edit_origin;
mod send;
mod sent;

use twilight_model::{channel::message::Component, http::attachment::Attachment};

pub use self::{
    defer::{Defer, DeferBuilder},
    edit_origin::{EditOrigin, EditOriginBuilder},
    send::{Outgoing, SendBuilder},
    sent::SentMessage,
};
use crate::{core::konst::discord::MAX_EMBEDS, error::IncorrectFormat, model::Embed};

fn merge_embeds(
    embed: Option<Embed>,
    embeds: Option<Vec<Embed>>,
) -> Result<Option<Vec<Embed>>, IncorrectFormat> {
    match (embed, embeds) {
        (Some(_), Some(_)) => Err(IncorrectFormat::EmbedAndEmbeds),
        (Some(embed), None) => Ok(Some(vec![embed])),
        (None, Some(embeds)) if embeds.len() > MAX_EMBEDS => Err(IncorrectFormat::TooManyEmbeds {
            max: MAX_EMBEDS,
            got: embeds.len(),
        }),
        (None, embeds) => Ok(embeds),
    }
}

fn merge_files(
    file: Option<Attachment>,
    files: Option<Vec<Attachment>>,
) -> Result<Vec<Attachment>, IncorrectFormat> {
    match (file, files) {
        (Some(_), Some(_)) => Err(IncorrectFormat::FileAndFiles),
        (Some(file), None) => Ok(vec![file]),
        (None, files) => Ok(files.unwrap_or_default()),
    }
}

fn check_action_rows(components: Option<&[Component]>) -> Result<(), IncorrectFormat> {
    if components
        .unwrap_or_default()
        .iter()
        .all(|component| matches!(component, Component::ActionRow(_)))
    {
        return Ok(());
    }
    Err(IncorrectFormat::NonActionRowComponent)
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use twilight_model::{
        channel::message::{
            Component,
            component::{ActionRow, Button, ButtonStyle},
        },
        http::attachment::Attachment,
    };

    use super::{check_action_rows, merge_embeds, merge_files};
    use crate::{error::IncorrectFormat, model::Embed};

    fn button() -> Component {
        Component::Button(Button {
            custom_id: Some(String::from("b")),
            disabled: false,
            emoji: None,
            label: Some(String::from("B")),
            style: ButtonStyle::Primary,
            url: None,
            sku_id: None,
        })
    }

    #[rstest]
    #[case(0, Ok(Some(0)))]
    #[case(10, Ok(Some(10)))]
    #[case(11, Err(IncorrectFormat::TooManyEmbeds { max: 10, got: 11 }))]
    fn embed_count(#[case] count: usize, #[case] expected: Result<Option<usize>, IncorrectFormat>) {
        let merged = merge_embeds(None, Some(vec![Embed::new(); count]));
        assert_eq!(merged.map(|embeds| embeds.map(|e| e.len())), expected);
    }

    #[test]
    fn embed_and_embeds() {
        assert_eq!(
            merge_embeds(Some(Embed::new()), Some(Vec::new())),
            Err(IncorrectFormat::EmbedAndEmbeds)
        );
        assert_eq!(merge_embeds(None, None), Ok(None));
    }

    #[test]
    fn file_and_files() {
        let file = || Attachment::from_bytes(String::from("a"), Vec::new(), 0);
        assert!(matches!(
            merge_files(Some(file()), Some(vec![file()])),
            Err(IncorrectFormat::FileAndFiles)
        ));
        assert!(merge_files(Some(file()), None).is_ok_and(|files| files.len() == 1));
        assert!(merge_files(None, None).is_ok_and(|files| files.is_empty()));
    }

    #[test]
    fn top_level_components_must_be_rows() {
        let row = Component::ActionRow(ActionRow {
            components: vec![button()],
        });
        assert_eq!(check_action_rows(None), Ok(()));
        assert_eq!(check_action_rows(Some(&[row])), Ok(()));
        assert_eq!(
            check_action_rows(Some(&[button()])),
            Err(IncorrectFormat::NonActionRowComponent)
        );
    }
}
