//! WebSocket Leaderboard Server
//!
//! Async WebSocket server for score submission and leaderboard queries.
//! One shared [`ScoreStore`] behind an `RwLock`; one task per connection.

use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, RwLock};
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, info, instrument, warn};

use crate::leaderboard::store::{ScoreStore, ScoreSubmission};
use crate::network::protocol::{ClientMessage, ErrorCode, LeaderboardEntry, ServerMessage};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub bind_addr: SocketAddr,
    /// Server version string.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".parse().expect("static address parses"),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Leaderboard server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to address.
    #[error("failed to bind: {0}")]
    BindFailed(#[from] std::io::Error),

    /// WebSocket error.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

/// The leaderboard service.
pub struct LeaderboardServer {
    /// Server configuration.
    config: ServerConfig,
    /// Shared score store.
    store: Arc<RwLock<ScoreStore>>,
    /// Shutdown signal.
    shutdown_tx: broadcast::Sender<()>,
}

impl LeaderboardServer {
    /// Create a new server with an empty store.
    pub fn new(config: ServerConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            config,
            store: Arc::new(RwLock::new(ScoreStore::new())),
            shutdown_tx,
        }
    }

    /// Handle to the shared store (for embedding in other drivers).
    pub fn store(&self) -> Arc<RwLock<ScoreStore>> {
        self.store.clone()
    }

    /// Signal the accept loop to stop.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Run the accept loop until shutdown.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        info!(
            "Leaderboard server v{} listening on {}",
            self.config.version, self.config.bind_addr
        );

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            let store = self.store.clone();
                            tokio::spawn(async move {
                                if let Err(e) = handle_connection(stream, addr, store).await {
                                    debug!("Connection {} closed with error: {}", addr, e);
                                }
                            });
                        }
                        Err(e) => warn!("Accept failed: {}", e),
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("Leaderboard server shutting down");
                    return Ok(());
                }
            }
        }
    }
}

/// Serve one client connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    store: Arc<RwLock<ScoreStore>>,
) -> Result<(), ServerError> {
    let ws = accept_async(stream).await?;
    debug!("Client connected: {}", addr);

    let (mut sink, mut source) = ws.split();

    while let Some(message) = source.next().await {
        let response = match message? {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(msg) => handle_message(&store, msg).await,
                Err(e) => ServerMessage::Error {
                    code: ErrorCode::MalformedMessage,
                    message: e.to_string(),
                },
            },
            Message::Close(_) => break,
            // Binary/ping/pong frames are handled by tungstenite itself
            _ => continue,
        };

        let json = serde_json::to_string(&response)
            .expect("protocol messages always serialize");
        sink.send(Message::Text(json)).await?;
    }

    debug!("Client disconnected: {}", addr);
    Ok(())
}

/// Apply one client message to the store and build the response.
async fn handle_message(store: &RwLock<ScoreStore>, msg: ClientMessage) -> ServerMessage {
    match msg {
        ClientMessage::SubmitScore {
            player_name,
            score,
            time_completed,
        } => {
            let submission = ScoreSubmission {
                player_name,
                score,
                time_completed,
            };
            match store.write().await.submit(submission, Utc::now()) {
                Ok(entry) => {
                    info!(
                        "Score accepted: {} -> {} (completed: {:?})",
                        entry.player_name, entry.score, entry.time_completed
                    );
                    ServerMessage::ScoreAccepted {
                        entry: LeaderboardEntry::from(&entry),
                    }
                }
                Err(e) => ServerMessage::Error {
                    code: ErrorCode::InvalidSubmission,
                    message: e.to_string(),
                },
            }
        }

        ClientMessage::Leaderboard { period } => {
            let entries = store
                .read()
                .await
                .top(period, Utc::now())
                .iter()
                .map(LeaderboardEntry::from)
                .collect();
            ServerMessage::Leaderboard { period, entries }
        }

        ClientMessage::Ping { timestamp } => ServerMessage::Pong { timestamp },
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::store::Period;

    fn empty_store() -> Arc<RwLock<ScoreStore>> {
        Arc::new(RwLock::new(ScoreStore::new()))
    }

    #[tokio::test]
    async fn test_submit_then_query() {
        let store = empty_store();

        let response = handle_message(
            &store,
            ClientMessage::SubmitScore {
                player_name: "anna".into(),
                score: 42,
                time_completed: Some(90),
            },
        )
        .await;
        match response {
            ServerMessage::ScoreAccepted { entry } => {
                assert_eq!(entry.player_name, "anna");
                assert_eq!(entry.score, 42);
                assert_eq!(entry.time_completed, Some(90));
            }
            other => panic!("unexpected response: {other:?}"),
        }

        let response = handle_message(
            &store,
            ClientMessage::Leaderboard {
                period: Period::AllTime,
            },
        )
        .await;
        match response {
            ServerMessage::Leaderboard { period, entries } => {
                assert_eq!(period, Period::AllTime);
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].player_name, "anna");
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_submission_is_rejected() {
        let store = empty_store();

        let response = handle_message(
            &store,
            ClientMessage::SubmitScore {
                player_name: "  ".into(),
                score: 5,
                time_completed: None,
            },
        )
        .await;
        assert!(matches!(
            response,
            ServerMessage::Error {
                code: ErrorCode::InvalidSubmission,
                ..
            }
        ));

        // Nothing was stored
        assert!(store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_ping_pong() {
        let store = empty_store();
        let response = handle_message(&store, ClientMessage::Ping { timestamp: 777 }).await;
        assert!(matches!(
            response,
            ServerMessage::Pong { timestamp: 777 }
        ));
    }
}
