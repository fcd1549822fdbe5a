//! Control surface: turns protocol requests into engine calls.
//!
//! Every request is validated by the engine before it mutates anything, so a
//! rejected command leaves the console exactly as it was.

use std::time::Instant;

use tracing::warn;

use crate::engine::GameEngine;
use crate::error::CommandError;
use crate::hardware::HardwarePort;
use crate::prng::RandomSource;
use crate::protocol::{catalog, Request, Response, StatusSnapshot};

fn rejected(err: CommandError) -> Response {
    warn!("Command rejected: {}", err);
    Response::error(err.to_string())
}

pub fn handle_request<P: HardwarePort, R: RandomSource>(
    engine: &mut GameEngine<P, R>,
    now: Instant,
    request: Request,
) -> Response {
    match request {
        Request::GetStatus => Response::Status(StatusSnapshot::from(&engine.status())),
        Request::SetLed { led, state } => match engine.set_led(led, state) {
            Ok(on) => Response::success(format!("LED {} {}", led, if on { "on" } else { "off" })),
            Err(e) => rejected(e),
        },
        Request::StartGame { game } => match engine.start_id(game, now) {
            Ok(variant) => Response::success(format!("Started {}", variant)),
            Err(e) => rejected(e),
        },
        Request::StopGame => {
            engine.stop();
            Response::success("Stopped")
        }
        Request::ListGames => Response::Games { games: catalog() },
        Request::PressButton { .. } => rejected(CommandError::Unsupported("remote button input")),
    }
}
