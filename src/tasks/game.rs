// ColorQuest: Game Loop
//
// The only task. Each iteration is one tick of the session (button, sensor,
// classification, display), then a sleep for the rest of the tick interval.
// Actuator calls may block the tick; there is nothing else to starve.

use std::thread;
use std::time::{Duration, Instant};

use crate::board::{Board, RandomSource};
use crate::config::*;
use crate::session::Session;

pub fn game_loop<B: Board, R: RandomSource>(mut board: B, mut session: Session<R>) -> ! {
    log::info!("Game loop started");

    let interval = Duration::from_millis(TICK_INTERVAL_MS);

    loop {
        let tick_start = Instant::now();

        session.tick(&mut board);

        // Sleep for the remainder of the tick to keep a steady poll rate.
        let elapsed = tick_start.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
    }
}
