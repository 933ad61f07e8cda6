use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::task::JoinHandle;
use twilight_cache_inmemory::{InMemoryCache, ResourceType};
use twilight_gateway::{
    CloseFrame, Config as ShardConfig, ConfigBuilder, Event, EventTypeFlags, Intents,
    MessageSender, Shard, StreamExt, error::StartRecommendedError,
};
use twilight_http::{Client, client::ClientBuilder};
use twilight_standby::Standby;

use crate::{
    config::Config,
    core::{
        http::Client as ResponseClient,
        model::{BotState, CacheAware, OwnedBotState},
        traced,
    },
    error::runner::{StartError, WaitForSignalError, WaitUntilShutdownError},
    gateway::{self, Handler},
};

const INTENTS: Intents = Intents::GUILDS;

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

fn build_http_client(config: &Config) -> Client {
    ClientBuilder::default().token(config.token.clone()).build()
}

fn build_cache() -> InMemoryCache {
    InMemoryCache::builder()
        .resource_types(
            ResourceType::GUILD
                | ResourceType::CHANNEL
                | ResourceType::USER
                | ResourceType::MEMBER
                | ResourceType::ROLE,
        )
        .build()
}

#[tracing::instrument(skip_all, name = "runner")]
pub async fn start<H: Handler>(config: Config, handler: H) -> Result<(), StartError> {
    tracing::debug!("began starting the bot");

    let http = Arc::new(build_http_client(&config));
    let application_id = http.current_user_application().await?.model().await?.id;
    tracing::debug!(%application_id, "fetched application");

    let client = Arc::new(ResponseClient::new(http.clone(), application_id));
    let standby = Arc::new(Standby::new());
    let mut bot = BotState::new(client, Arc::new(build_cache()), standby.clone())
        .with_owners(config.owners.clone());
    if let Some(allowed_mentions) = config.allowed_mentions.clone() {
        bot = bot.with_allowed_mentions(allowed_mentions);
    }
    let bot = Arc::new(bot);
    let handler = Arc::new(handler);

    let shards = build_shards(&http, &config).await?;
    let mut senders = Vec::with_capacity(shards.len());
    let mut tasks = Vec::with_capacity(shards.len());
    for shard in shards {
        senders.push(shard.sender());
        tasks.push(tokio::spawn(handle_gateway_events(
            shard,
            bot.clone(),
            standby.clone(),
            handler.clone(),
        )));
    }

    tracing::info!(shards = senders.len(), "started");
    Ok(wait_until_shutdown(senders, tasks).await?)
}

async fn build_shards(
    client: &Client,
    config: &Config,
) -> Result<impl ExactSizeIterator<Item = Shard> + use<>, StartRecommendedError> {
    let shard_config: ShardConfig = ConfigBuilder::new(config.token.clone(), INTENTS).build();
    twilight_gateway::create_recommended(client, shard_config, |_, builder| builder.build()).await
}

#[tracing::instrument(skip_all, name = "gateway", fields(shard = %shard.id()))]
async fn handle_gateway_events<H: Handler>(
    mut shard: Shard,
    bot: OwnedBotState,
    standby: Arc<Standby>,
    handler: Arc<H>,
) {
    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(Event::GatewayClose(_)) if SHUTDOWN.load(Ordering::Relaxed) => break,
            Ok(event) => event,
            Err(source) => {
                tracing::warn!(?source, "error receiving event");

                continue;
            }
        };

        tracing::trace!(kind = ?event.kind(), "received event");
        bot.cache().update(&event);
        standby.process(&event);

        if let Event::InteractionCreate(interaction) = event {
            traced::tokio_spawn(
                "interaction",
                gateway::process(bot.clone(), interaction, handler.clone()),
            );
        }
    }
}

#[tracing::instrument]
async fn wait_for_signal() -> Result<(), WaitForSignalError> {
    #[cfg(target_family = "unix")]
    {
        use tokio::signal::unix::{self, SignalKind};

        let mut sigint = unix::signal(SignalKind::interrupt())?;
        let mut sigterm = unix::signal(SignalKind::terminate())?;

        tokio::select! {
            _ = sigint.recv() => tracing::debug!("received SIGINT"),
            _ = sigterm.recv() => tracing::debug!("received SIGTERM"),
        }
    }

    #[cfg(not(target_family = "unix"))]
    {
        use tokio::signal;

        signal::ctrl_c().await?;
    }

    Ok(())
}

#[tracing::instrument(skip_all, name = "shutdown")]
async fn wait_until_shutdown(
    senders: Vec<MessageSender>,
    tasks: Vec<JoinHandle<()>>,
) -> Result<(), WaitUntilShutdownError> {
    wait_for_signal().await?;
    SHUTDOWN.store(true, Ordering::Relaxed);
    tracing::info!("gracefully shutting down...");

    tracing::debug!("sending close frames to all shards...");
    for sender in senders {
        let _ = sender.close(CloseFrame::NORMAL);
    }

    tracing::debug!("waiting for all shard gateway event handlers...");
    for jh in tasks {
        let _ = jh.await;
    }

    tracing::info!("shut down gracefully");
    Ok(())
}
