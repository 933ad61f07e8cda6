mod embed;
mod interaction;
mod mention;
mod message;
mod sticker;
mod user;

pub use self::{
    embed::{Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedImage, EmbedProvider},
    interaction::{
        CommandData, CommandOption, ComponentData, InteractionData, InteractionPayload,
        PartialChannel, Resolved,
    },
    mention::{AllowedMentions, MentionTargets, MentionsPayload},
    message::{
        Application, Attachment, ChannelMention, Emoji, Message, MessageActivity,
        MessageInteraction, MessageReference, MessageType, Nonce, Reaction,
    },
    sticker::{Sticker, StickerItem},
    user::{Member, User},
};
