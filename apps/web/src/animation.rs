#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SpinnerMode {
    Running,
    Paused,
}

pub const SPINNER_FRAMES: [&str; 8] = ["⣷", "⣯", "⣟", "⡿", "⢿", "⣻", "⣽", "⣾"];

const SPINNER_FRAMES_PER_SECOND: f64 = 10.0;
const SPINNER_MAX_FRAME_DELTA: f64 = 0.25;
#[allow(clippy::cast_precision_loss)]
const SPINNER_CYCLE: f64 = SPINNER_FRAMES.len() as f64;

/// Advances the spinner clock by the time since the last animation frame.
///
/// Returns the new counter and the tick to pass in next time. Long gaps
/// (a backgrounded tab) are clamped so the spinner does not jump.
pub fn advance_spinner(
    counter: f64,
    last_tick: Option<f64>,
    now_seconds: f64,
    mode: SpinnerMode,
) -> (f64, Option<f64>) {
    let delta = last_tick
        .map(|last| (now_seconds - last).clamp(0.0, SPINNER_MAX_FRAME_DELTA))
        .unwrap_or(0.0);

    let next_counter = match mode {
        SpinnerMode::Running => {
            (counter + delta * SPINNER_FRAMES_PER_SECOND).rem_euclid(SPINNER_CYCLE)
        }
        SpinnerMode::Paused => counter.rem_euclid(SPINNER_CYCLE),
    };

    (next_counter, Some(now_seconds))
}

pub fn spinner_frame(counter: f64) -> &'static str {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = counter.rem_euclid(SPINNER_CYCLE).floor() as usize;
    SPINNER_FRAMES[index % SPINNER_FRAMES.len()]
}
