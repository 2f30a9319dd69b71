use std::sync::Arc;

use anyhow::Context;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kitchen_client::KitchenClient;
use kitchen_core::{DashboardSession, Notification, PortionEstimate, StockLevel, Tab};
use kitchen_live_feed::{
    FeedEvent, FeedHandle, FeedOptions, FeedView, LiveFeed, Notice, NoticeBus, NoticeSink,
};

use crate::config::{Config, LogFormat};

const NOTICE_BUS_CAPACITY: usize = 64;

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub fn build_client(config: &Config) -> anyhow::Result<KitchenClient> {
    let client = KitchenClient::with_timeout(&config.origin, config.request_timeout)
        .with_context(|| format!("Failed to build client for {}", config.origin))?;
    Ok(match &config.token {
        Some(token) => client.with_token(token.clone()),
        None => client,
    })
}

/// Live tabs the role may open, in display order.
pub fn live_tabs(session: &DashboardSession) -> Vec<Tab> {
    session
        .visible_tabs()
        .iter()
        .copied()
        .filter(Tab::is_live)
        .collect()
}

/// Run every feed the role can see until Ctrl-C.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let client = build_client(&config)?;
    let session = DashboardSession::new(config.role);
    let options = FeedOptions::default().with_reconnect_delay(config.reconnect_delay);

    let bus = NoticeBus::new(NOTICE_BUS_CAPACITY);
    let sink: Arc<dyn NoticeSink> = Arc::new(bus.clone());
    let notice_logger = spawn_notice_logger(bus.subscribe());

    let tabs = live_tabs(&session);
    tracing::info!(
        role = %session.role(),
        origin = %config.origin,
        feeds = ?tabs.iter().map(Tab::id).collect::<Vec<_>>(),
        "Starting kitchen monitor"
    );

    let mut notifications = None;
    let mut portions = None;
    let mut watchers = Vec::new();
    for tab in tabs {
        match tab {
            Tab::Notifications => {
                let handle = LiveFeed::<Notification>::new(client.clone())
                    .with_options(options)
                    .with_notice_sink(sink.clone())
                    .spawn()
                    .context("Failed to start notifications feed")?;
                watchers.push(spawn_view_logger(
                    tab,
                    handle.subscribe(),
                    summarize_notifications,
                ));
                notifications = Some(handle);
            }
            Tab::PortionEstimation => {
                let handle = LiveFeed::<PortionEstimate>::new(client.clone())
                    .with_options(options)
                    .with_notice_sink(sink.clone())
                    .spawn()
                    .context("Failed to start portion estimates feed")?;
                watchers.push(spawn_view_logger(tab, handle.subscribe(), summarize_portions));
                portions = Some(handle);
            }
            _ => {}
        }
    }

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    tracing::info!("Shutting down feeds");

    shutdown(notifications).await;
    shutdown(portions).await;
    for watcher in watchers {
        let _ = watcher.await;
    }
    notice_logger.abort();
    Ok(())
}

async fn shutdown<E: FeedEvent>(handle: Option<FeedHandle<E>>) {
    if let Some(handle) = handle {
        handle.shutdown().await;
    }
}

fn spawn_notice_logger(mut notices: broadcast::Receiver<Notice>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match notices.recv().await {
                Ok(notice) if notice.is_destructive() => {
                    tracing::warn!(title = %notice.title, "{}", notice.description)
                }
                Ok(notice) => tracing::info!(title = %notice.title, "{}", notice.description),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Notice logger fell behind")
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

/// Log connection changes and a one-line summary of every update until the
/// feed stops.
fn spawn_view_logger<E: FeedEvent>(
    tab: Tab,
    mut view: watch::Receiver<FeedView<E>>,
    summarize: fn(&[E]) -> String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut connection = view.borrow_and_update().connection();
        let mut loaded = false;
        while view.changed().await.is_ok() {
            let (state, is_loaded, summary) = {
                let current = view.borrow_and_update();
                (
                    current.connection(),
                    current.is_loaded(),
                    summarize(current.items()),
                )
            };
            if state != connection {
                tracing::info!(feed = tab.id(), from = %connection, to = %state, "Connection state changed");
                connection = state;
            }
            if is_loaded && !loaded {
                tracing::info!(feed = tab.id(), "Snapshot loaded: {}", summary);
                loaded = true;
            } else {
                tracing::debug!(feed = tab.id(), "{}", summary);
            }
        }
    })
}

fn summarize_notifications(items: &[Notification]) -> String {
    let unread = items.iter().filter(|n| !n.read).count();
    let errors = items.iter().filter(|n| n.is_error()).count();
    format!("{} notifications, {} unread, {} errors", items.len(), unread, errors)
}

fn summarize_portions(items: &[PortionEstimate]) -> String {
    let low: Vec<&str> = items
        .iter()
        .filter(|p| p.stock_level() == StockLevel::Low)
        .map(|p| p.meal_name.as_str())
        .collect();
    if low.is_empty() {
        format!("{} meals, none low", items.len())
    } else {
        format!("{} meals, low: {}", items.len(), low.join(", "))
    }
}
