pub mod client;
pub mod config;
mod context;
mod core;
pub mod error;
pub mod gateway;
pub mod model;
pub mod prompt;
mod runner;

pub use self::{
    context::{Component, Ctx, Kind, Menu, Slash, State, TargetAuthor},
    core::{
        http::{Client as HttpClient, Dispatch, MessageBody, MessageTarget},
        konst,
        model::{
            BotState, BotStateAware, CacheAware, HttpAware, OwnedBotState, OwnedBotStateAware,
            WaiterAware,
            response::{
                Defer, DeferBuilder, EditOrigin, EditOriginBuilder, Outgoing, SendBuilder,
                SentMessage,
            },
        },
        standby::{ComponentFilter, ComponentWaiter},
    },
    gateway::Handler,
    prompt::{Confirmation, PromptBuilder},
};
