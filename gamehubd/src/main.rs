//! GameHub Daemon - game console service
//!
//! This daemon runs continuously, managing:
//! - The scheduler loop (sample buttons, advance the active game)
//! - A virtual button panel standing in for GPIO
//! - The control surface server for remote clients
//!
//! Config location:
//! - Linux: ~/.config/gamehub/config.json
//! - Windows: %APPDATA%\gamehub\config.json
//! - MacOS: ~/Library/Application Support/gamehub/config.json

use gamehub::protocol::{decode_request, encode_response, Request, Response};
use gamehub::{GameEngine, Prng, Scheduler};
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod board;
mod config;
mod error;
mod paths;

use board::{ButtonPanel, VirtualBoard};
use config::DaemonConfig;
use paths::AppPaths;

// ═══════════════════════════════════════════════════════════════════════════
// Scheduler Task
// ═══════════════════════════════════════════════════════════════════════════

/// A request waiting for the scheduler, with the channel its answer goes to.
struct Envelope {
    request: Request,
    reply: oneshot::Sender<Response>,
}

/// Own the engine and drive it. One iteration per tick; at most one queued
/// request is serviced per iteration.
async fn run_scheduler(
    mut scheduler: Scheduler<VirtualBoard>,
    mut requests: mpsc::Receiver<Envelope>,
    tick: Duration,
    shutdown: CancellationToken,
) {
    let mut ticker = time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let (request, reply) = match requests.try_recv() {
            Ok(Envelope { request, reply }) => (Some(request), Some(reply)),
            Err(_) => (None, None),
        };
        let response = scheduler.step(Instant::now(), request);
        if let (Some(response), Some(reply)) = (response, reply) {
            // Client may already be gone.
            let _ = reply.send(response);
        }
    }

    let frames = scheduler.iterations();
    scheduler.shutdown();
    info!("Scheduler stopped after {} iterations; board cleared", frames);
}

// ═══════════════════════════════════════════════════════════════════════════
// Client Handler
// ═══════════════════════════════════════════════════════════════════════════

async fn dispatch(requests: &mpsc::Sender<Envelope>, request: Request) -> Response {
    let (reply, answer) = oneshot::channel();
    if requests.send(Envelope { request, reply }).await.is_err() {
        return Response::error("Scheduler is not running");
    }
    answer
        .await
        .unwrap_or_else(|_| Response::error("Scheduler dropped the request"))
}

async fn handle_client(
    stream: TcpStream,
    requests: mpsc::Sender<Envelope>,
    panel: ButtonPanel,
) -> Result<(), Box<dyn std::error::Error>> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match decode_request(&line) {
            Err(e) => Response::error(format!("Invalid request: {}", e)),
            // Buttons are hardware inputs: they go to the panel, and the
            // scheduler picks them up on its next sample.
            Ok(Request::PressButton { button, pressed }) => match panel.set(button, pressed) {
                Ok(()) => Response::success(format!(
                    "Button {} {}",
                    button,
                    if pressed { "pressed" } else { "released" }
                )),
                Err(e) => {
                    warn!("Button input rejected: {}", e);
                    Response::error(e.to_string())
                }
            },
            Ok(request) => dispatch(&requests, request).await,
        };

        writer
            .write_all(encode_response(&response)?.as_bytes())
            .await?;
        writer.write_all(b"\n").await?;
    }

    Ok(())
}

async fn serve(
    listener: TcpListener,
    requests: mpsc::Sender<Envelope>,
    panel: ButtonPanel,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    loop {
        let (stream, addr) = tokio::select! {
            _ = shutdown.cancelled() => return Ok(()),
            accepted = listener.accept() => accepted?,
        };
        info!("Client connected: {}", addr);
        let requests = requests.clone();
        let panel = panel.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_client(stream, requests, panel).await {
                error!("Client handler error: {}", e);
            }
            info!("Client disconnected: {}", addr);
        });
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Main
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let paths = AppPaths::new()?;
    let config = DaemonConfig::load(&paths.config_file())?;
    info!("Config directory: {:?}", paths.config_dir());

    let panel = ButtonPanel::new();
    let rng = config.seed.map(Prng::new).unwrap_or_else(Prng::from_entropy);
    let board = VirtualBoard::new(panel.clone());
    let mut engine = GameEngine::with_timing(board, rng, config.timing.clone())?;
    if config.intro {
        engine.play_intro(Instant::now());
    }

    let shutdown = CancellationToken::new();
    let (requests, queue) = mpsc::channel(64);

    // Stop on Ctrl-C so the board is left dark.
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl-C: shutting down");
                shutdown.cancel();
            }
        });
    }

    let scheduler = tokio::spawn(run_scheduler(
        Scheduler::new(engine),
        queue,
        Duration::from_millis(config.tick_ms),
        shutdown.clone(),
    ));

    let listener = TcpListener::bind(&config.bind).await?;
    info!("GameHub daemon listening on {}", config.bind);
    serve(listener, requests, panel, shutdown).await?;

    scheduler.await?;
    Ok(())
}
