//! Gateway: the main event loop connecting channels to the conversation router.
//!
//! Events from every channel are merged into one queue. Each conversation
//! is handled by at most one task at a time; events that arrive while it is
//! busy are buffered and processed in arrival order. Different conversations
//! run concurrently. On shutdown, in-flight work drains before channels stop.

mod actions;
mod routing;


pub use actions::render;
pub use routing::Router;

use crewbot_core::{
    message::{InboundEvent, Locale},
    traits::Channel,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// The central gateway that routes events between channels and the router.
pub struct Gateway {
    channels: HashMap<String, Arc<dyn Channel>>,
    router: Router,
    /// Conversations with a task in flight (`channel:conversation` → waiting events).
    active_conversations: Mutex<HashMap<String, Vec<InboundEvent>>>,
}

impl Gateway {
    pub fn new(channels: HashMap<String, Arc<dyn Channel>>, router: Router) -> Self {
        Self {
            channels,
            router,
            active_conversations: Mutex::new(HashMap::new()),
        }
    }

    /// Run the main event loop until Ctrl+C.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        self.run_until(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received shutdown signal"),
                Err(e) => {
                    error!("failed to listen for shutdown signal: {e}");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await
    }

    /// Run the main event loop until `shutdown` resolves or every channel closes.
    pub async fn run_until(
        self: Arc<Self>,
        shutdown: impl Future<Output = ()>,
    ) -> anyhow::Result<()> {
        info!(
            "crewbot gateway running | channels: {}",
            self.channels.keys().cloned().collect::<Vec<_>>().join(", "),
        );

        let (tx, mut rx) = mpsc::channel::<(String, InboundEvent)>(256);

        for (name, channel) in &self.channels {
            let mut channel_rx = channel
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
            let tx = tx.clone();
            let channel_name = name.clone();

            tokio::spawn(async move {
                while let Some(event) = channel_rx.recv().await {
                    if tx.send((channel_name.clone(), event)).await.is_err() {
                        info!("gateway receiver dropped, stopping {channel_name} forwarder");
                        break;
                    }
                }
            });

            info!("Channel started: {name}");
        }

        drop(tx);

        let mut in_flight = JoinSet::new();
        tokio::pin!(shutdown);

        // Main event loop with graceful shutdown.
        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Some((channel, event)) => self.dispatch(&mut in_flight, channel, event).await,
                    None => {
                        info!("All channels closed");
                        break;
                    }
                },
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        error!("event task failed: {e}");
                    }
                }
                _ = &mut shutdown => break,
            }
        }

        self.shutdown(in_flight).await;
        Ok(())
    }

    /// Buffer the event if its conversation is busy, otherwise start a task for it.
    async fn dispatch(
        self: &Arc<Self>,
        in_flight: &mut JoinSet<()>,
        channel: String,
        event: InboundEvent,
    ) {
        let key = event
            .conversation_id()
            .map(|id| format!("{channel}:{id}"));

        if let Some(key) = &key {
            let mut active = self.active_conversations.lock().await;
            if let Some(buffer) = active.get_mut(key) {
                buffer.push(event);
                debug!("buffered event for {key} (task in progress)");
                return;
            }
            // Mark conversation as active (empty buffer).
            active.insert(key.clone(), Vec::new());
        }

        let gw = Arc::clone(self);
        in_flight.spawn(async move {
            gw.process(&channel, key, event).await;
        });
    }

    /// Handle an event, then drain whatever its conversation buffered meanwhile.
    async fn process(&self, channel: &str, key: Option<String>, event: InboundEvent) {
        self.handle_event(channel, event).await;

        let Some(key) = key else {
            return;
        };

        loop {
            let next = {
                let mut active = self.active_conversations.lock().await;
                match active.get_mut(&key) {
                    Some(buffer) if !buffer.is_empty() => Some(buffer.remove(0)),
                    _ => {
                        // Nothing left: the conversation is idle again.
                        active.remove(&key);
                        None
                    }
                }
            };

            match next {
                Some(buffered) => {
                    debug!("processing buffered event for {key}");
                    self.handle_event(channel, buffered).await;
                }
                None => break,
            }
        }
    }

    /// Route one event and deliver the reply.
    ///
    /// Session state is already updated when the reply goes out, so a failed
    /// send is logged and not rolled back.
    async fn handle_event(&self, channel_name: &str, event: InboundEvent) {
        let Some(routed) = self.router.route(&event).await else {
            return;
        };

        let Some(channel) = self.channels.get(channel_name) else {
            warn!("no channel named {channel_name}, dropping reply");
            return;
        };

        if let Some(callback_id) = &routed.callback_id {
            if let Err(e) = channel.answer_callback(callback_id).await {
                warn!("failed to acknowledge callback {callback_id}: {e}");
            }
        }

        let locale = self
            .router
            .sessions()
            .get_locale(&routed.conversation_id)
            .await
            .unwrap_or(Locale::DEFAULT);
        let reply = render(&routed, locale);

        if let Err(e) = channel.send(reply).await {
            error!(
                "failed to send reply to {} via {channel_name}: {e}",
                routed.conversation_id
            );
        }
    }

    /// Graceful shutdown: let in-flight events finish, then stop channels.
    async fn shutdown(&self, mut in_flight: JoinSet<()>) {
        info!("Shutting down...");

        if !in_flight.is_empty() {
            info!("waiting for {} in-flight event task(s)", in_flight.len());
        }
        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                error!("event task failed: {e}");
            }
        }

        for (name, channel) in &self.channels {
            if let Err(e) = channel.stop().await {
                warn!("failed to stop channel {name}: {e}");
            }
        }

        info!("Shutdown complete.");
    }
}
