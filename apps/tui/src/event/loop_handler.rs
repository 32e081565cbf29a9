use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::app::{handle_input, App};
use crate::terminal::Tui;
use crate::ui;

// Spinner frame rate; results arriving between ticks are picked up on the next one
const TICK_RATE: Duration = Duration::from_millis(100);

/// Run the interactive event loop.
///
/// Must be driven from inside a `LocalSet` so fetch cycles spawned by the
/// app make progress while the loop waits for input.
pub async fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = interval(TICK_RATE);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    app.sync();

    while app.running {
        terminal
            .draw(|f| ui::ui(app, f))
            .map_err(|e| color_eyre::eyre::eyre!("Terminal draw error: {e}"))?;

        tokio::select! {
            _ = ticker.tick() => app.on_tick(),
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                }
                Some(Ok(Event::Resize(width, height))) => {
                    debug!(width, height, "terminal resized");
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => warn!("failed to read terminal event: {e}"),
                None => {
                    debug!("terminal event stream closed");
                    app.running = false;
                }
            },
        }
    }

    Ok(())
}
