use relay::{Ctx, Handler, error::PromptError};

/// `/confirm` asks before doing anything; every other command gets a greeting.
struct Demo;

impl Handler for Demo {
    async fn handle(&self, mut ctx: Ctx) {
        if let Err(e) = respond(&mut ctx).await {
            tracing::error!(?e, kind = ctx.kind().name(), "handling interaction failed");
        }
    }
}

async fn respond(ctx: &mut Ctx) -> Result<(), PromptError> {
    if ctx.component().is_some() {
        ctx.defer().ignore(true).await?;
        return Ok(());
    }

    if ctx.slash().is_some_and(|slash| slash.name == "confirm") {
        let confirmation = ctx.prompt("Are you sure?").await?;
        let reply = match confirmation.answer {
            Some(true) => "Done.",
            Some(false) => "Left as it was.",
            None => return Ok(()),
        };
        ctx.send().content(reply).hidden(true).await?;
        return Ok(());
    }

    let greeting = format!("Hello, {}!", ctx.author().display_name());
    ctx.send().content(greeting).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), relay::error::Run> {
    relay::client::run(Demo).await
}
