use crate::config::Settings;
use crate::input::{collect_input_nonblocking, map_event_to_action};
use crate::model::Mode;
use crate::render::{draw_board, draw_panel, panel_x, Terminal};
use crate::sim::Simulation;
use crossterm::style::Color;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub(crate) struct App {
    settings: Settings,
    sim: Simulation,
    term: Terminal,
    last_step: Instant,
}

impl App {
    fn init(sim: Simulation, settings: Settings) -> anyhow::Result<Self> {
        let term = Terminal::begin()?;
        Ok(Self {
            settings,
            sim,
            term,
            last_step: Instant::now(),
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap.clamp(10, 240);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);

        while self.sim.is_running() {
            let frame_start = Instant::now();
            self.term.resize_if_needed()?;

            // input
            for ev in collect_input_nonblocking(frame_dt)? {
                if let Some(action) = map_event_to_action(&ev) {
                    self.sim.apply(action);
                    if !self.sim.is_running() {
                        break;
                    }
                }
            }
            if !self.sim.is_running() {
                break;
            }

            // one generation per elapsed tick
            let interval = self.sim.interval().as_duration();
            let playing = self.sim.mode() == Mode::Playing;
            if should_step(self.sim.mode(), self.last_step.elapsed(), interval) {
                self.sim.step();
                self.last_step = Instant::now();
            }

            self.render_frame()?;

            let tick_left = playing.then(|| tick_delay(interval, self.last_step.elapsed()));
            let wait = frame_wait(frame_dt, frame_start.elapsed(), tick_left);
            spin_sleep(wait, Instant::now());
        }

        info!(generation = self.sim.generation(), "shutting down");
        // lets a board drawn by hand be recovered from the log as a preset file
        debug!(board = %self.sim.grid().to_preset(), "final board");
        Ok(())
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        self.term.cur.clear(Color::Black);
        draw_board(&mut self.term.cur, &self.sim, &self.settings);
        let x = panel_x(self.sim.grid());
        draw_panel(&mut self.term.cur, &self.sim, x);
        self.term.present(true)?;
        Ok(())
    }
}

pub(crate) fn run(sim: Simulation, settings: Settings) -> anyhow::Result<()> {
    let mut app = App::init(sim, settings)?;
    let result = app.run();
    // restore the terminal before any loop error surfaces
    let restored = app.term.end();
    result.and(restored)
}

/* -----------------------------
   Frame and tick pacing
------------------------------ */

/// At most one generation per frame, and only once a full interval has passed.
pub(crate) fn should_step(mode: Mode, since_last_step: Duration, interval: Duration) -> bool {
    mode == Mode::Playing && since_last_step >= interval
}

/// Time still owed before the next generation: `max(0, interval - elapsed)`.
pub(crate) fn tick_delay(interval: Duration, since_last_step: Duration) -> Duration {
    interval.saturating_sub(since_last_step)
}

/// Sleeps to the frame cap, waking early for a pending tick.
pub(crate) fn frame_wait(
    frame_dt: Duration,
    frame_elapsed: Duration,
    tick_left: Option<Duration>,
) -> Duration {
    let frame_left = frame_dt.saturating_sub(frame_elapsed);
    match tick_left {
        Some(t) => frame_left.min(t),
        None => frame_left,
    }
}

fn spin_sleep(target: Duration, now: Instant) {
    let end = now + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
