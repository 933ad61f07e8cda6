use std::collections::HashMap;

use serde_json::Value;
use twilight_model::{
    application::command::CommandOptionType,
    id::{Id, marker::CommandMarker},
};

use crate::model::{CommandData, CommandOption};

#[derive(Clone, Debug)]
pub struct Slash {
    pub name: String,
    pub command_id: Id<CommandMarker>,
    pub subcommand_group: Option<String>,
    pub subcommand_name: Option<String>,
    /// Leaf options by name, after descending into the invoked subcommand.
    pub options: HashMap<String, Value>,
}

impl Slash {
    pub(super) fn from_data(data: &CommandData) -> Self {
        let (subcommand_group, options) = descend(&data.options, CommandOptionType::SubCommandGroup);
        let (subcommand_name, options) = descend(options, CommandOptionType::SubCommand);

        let options = options
            .iter()
            .filter_map(|option| Some((option.name.clone(), option.value.clone()?)))
            .collect();

        Self {
            name: data.name.clone(),
            command_id: data.id,
            subcommand_group,
            subcommand_name,
            options,
        }
    }

    #[must_use]
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }
}

fn descend(options: &[CommandOption], kind: CommandOptionType) -> (Option<String>, &[CommandOption]) {
    match options {
        [nested] if nested.kind == kind => (Some(nested.name.clone()), &nested.options),
        _ => (None, options),
    }
}
