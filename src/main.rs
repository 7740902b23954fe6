//! Fruitgrid Game Server
//!
//! Default mode runs a headless demo game: the hint finder plays the board
//! as a bot, and the final score lands in an in-memory leaderboard.
//! `fruitgrid-server serve` runs the WebSocket leaderboard service.

use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use fruitgrid::{
    game::events::GameEvent,
    leaderboard::store::{Period, ScoreStore, ScoreSubmission},
    network::server::{LeaderboardServer, ServerConfig},
    GamePhase, Session, GAME_DURATION_SECS, VERSION,
};

/// Demo frame duration (60 Hz).
const FRAME: Duration = Duration::from_micros(16_667);

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Fruitgrid Server v{}", VERSION);

    if std::env::args().nth(1).as_deref() == Some("serve") {
        serve()
    } else {
        demo_game()
    }
}

/// Run the WebSocket leaderboard service.
fn serve() -> anyhow::Result<()> {
    let mut config = ServerConfig::default();
    if let Ok(addr) = std::env::var("FRUITGRID_ADDR") {
        config.bind_addr = addr
            .parse()
            .with_context(|| format!("invalid FRUITGRID_ADDR: {addr}"))?;
    }

    let server = LeaderboardServer::new(config);
    let runtime = tokio::runtime::Runtime::new().context("failed to build tokio runtime")?;
    runtime.block_on(server.run())?;
    Ok(())
}

/// Play one full game headlessly, driven by the hint finder.
fn demo_game() -> anyhow::Result<()> {
    info!("=== Starting Demo Game ===");

    let mut session = Session::new();
    session.start_game();
    info!(
        "Game {} started: {} tokens, {:.0}s on the clock",
        session.game_id(),
        session.tokens().len(),
        GAME_DURATION_SECS
    );

    while session.phase() == GamePhase::Playing {
        let groups = session.hints();
        let Some(group) = groups.first() else {
            // No drag-reachable combination left; let the clock run out
            info!(
                "No combinations left at {:.1}s remaining, waiting for time",
                session.time_remaining()
            );
            while session.phase() == GamePhase::Playing {
                session.tick(Duration::from_secs(1));
            }
            break;
        };

        // Drag a rectangle spanning the group's token centers
        let positions: Vec<_> = group
            .members
            .iter()
            .filter_map(|id| session.tokens().get(id))
            .map(|t| t.position)
            .collect();
        let min_x = positions.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let min_y = positions.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_x = positions.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        let max_y = positions.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

        session.start_selection(min_x, min_y);
        session.update_selection(max_x, max_y);
        session.end_selection();

        // Simulate a second of "thinking" per move at 60 Hz
        for _ in 0..60 {
            session.tick(FRAME);
        }

        for event in session.take_events() {
            match event {
                GameEvent::TokensRemoved { ids, new_score, .. } => {
                    info!("Removed {} tokens, score {}", ids.len(), new_score);
                }
                GameEvent::BoardCleared { completion_seconds } => {
                    info!("Board cleared in {}s!", completion_seconds);
                }
                GameEvent::TimeExpired { final_score, perfect } => {
                    info!("Time expired: score {}, perfect: {}", final_score, perfect);
                }
                _ => {}
            }
        }
    }

    info!("=== Game Results ===");
    info!("Final score: {}", session.score());
    match session.completion_time_seconds() {
        Some(secs) => info!("Perfect clear in {}s", secs),
        None => info!(
            "Ran out of time with {} tokens remaining",
            session.tokens().len()
        ),
    }

    // Submit to an in-memory leaderboard, the way a client would
    let mut store = ScoreStore::new();
    let entry = store.submit(
        ScoreSubmission {
            player_name: "demo-bot".into(),
            score: session.score(),
            time_completed: session.completion_time_seconds(),
        },
        Utc::now(),
    )?;
    info!("Submitted score entry {}", entry.id);

    for (i, entry) in store.top(Period::AllTime, Utc::now()).iter().enumerate() {
        info!(
            "#{}: {} - {} points{}",
            i + 1,
            entry.player_name,
            entry.score,
            entry
                .time_completed
                .map(|t| format!(" (cleared in {t}s)"))
                .unwrap_or_default()
        );
    }

    Ok(())
}
