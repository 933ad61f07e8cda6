use std::sync::Arc;

use twilight_model::{
    application::interaction::InteractionType, gateway::payload::incoming::InteractionCreate,
};

use crate::{
    context::Ctx,
    core::{konst::misc::PROMPT_CUSTOM_ID_PREFIX, model::OwnedBotState},
    error::gateway::ProcessResult,
    model::InteractionPayload,
};

/// Runs once per incoming command, menu or component interaction, each on its own task.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, ctx: Ctx) -> impl Future<Output = ()> + Send;
}

/// Answers to a pending prompt are consumed by the prompt's waiter instead.
fn is_prompt_answer(payload: &InteractionPayload) -> bool {
    payload
        .component_data()
        .is_some_and(|data| data.custom_id.starts_with(PROMPT_CUSTOM_ID_PREFIX))
}

#[tracing::instrument(skip_all, name = "interaction", fields(id = %event.id))]
pub async fn process<H: Handler>(
    bot: OwnedBotState,
    event: Box<InteractionCreate>,
    handler: Arc<H>,
) -> ProcessResult {
    match event.kind {
        InteractionType::ApplicationCommand | InteractionType::MessageComponent => {}
        kind => {
            tracing::trace!(?kind, "ignoring interaction");
            return Ok(());
        }
    }

    let payload = InteractionPayload::try_from(&event.0)?;
    dispatch(bot, payload, handler.as_ref()).await
}

async fn dispatch<H: Handler>(
    bot: OwnedBotState,
    payload: InteractionPayload,
    handler: &H,
) -> ProcessResult {
    if is_prompt_answer(&payload) {
        tracing::trace!("left to the waiting prompt");
        return Ok(());
    }

    let ctx = Ctx::new(bot, payload)?;
    tracing::debug!(kind = ctx.kind().name(), author = %ctx.author_id(), "dispatching");
    handler.handle(ctx).await;
    Ok(())
}
