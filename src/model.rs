use std::time::Duration;

pub(crate) const DELAY_MIN: u64 = 10;
pub(crate) const DELAY_MAX: u64 = 1000;
pub(crate) const DELAY_STEP: u64 = 10;

pub(crate) const SPEED_MIN: u32 = 1;
pub(crate) const SPEED_MAX: u32 = ((DELAY_MAX - DELAY_MIN) / DELAY_STEP + 1) as u32;
pub(crate) const SPEED_DEFAULT: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Editing,
    Playing,
}

impl Mode {
    pub(crate) fn toggled(self) -> Self {
        match self {
            Mode::Editing => Mode::Playing,
            Mode::Playing => Mode::Editing,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Mode::Editing => "EDITING",
            Mode::Playing => "PLAYING",
        }
    }
}

/// Edit position; always inside `[0, rows) x [0, cols)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub(crate) row: usize,
    pub(crate) col: usize,
}

impl Cursor {
    /// Moves by the given delta, clamping at the grid edges.
    pub(crate) fn move_by(&mut self, d_row: i32, d_col: i32, rows: usize, cols: usize) {
        self.row = clamp_axis(self.row, d_row, rows);
        self.col = clamp_axis(self.col, d_col, cols);
    }
}

fn clamp_axis(pos: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = pos as i64 + delta as i64;
    next.clamp(0, len as i64 - 1) as usize
}

/// Milliseconds between generations while playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TickInterval(u64);

impl Default for TickInterval {
    fn default() -> Self {
        Self::from_speed_level(SPEED_DEFAULT)
    }
}

impl TickInterval {
    pub(crate) fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(DELAY_MIN, DELAY_MAX))
    }

    /// Level 1 is the slowest (`DELAY_MAX`), level 100 the fastest.
    pub(crate) fn from_speed_level(level: u32) -> Self {
        let level = level.clamp(SPEED_MIN, SPEED_MAX) as u64;
        Self::from_millis(DELAY_MAX - (level - 1) * DELAY_STEP)
    }

    pub(crate) fn millis(self) -> u64 {
        self.0
    }

    pub(crate) fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    pub(crate) fn speed_level(self) -> u32 {
        ((DELAY_MAX - self.0) / DELAY_STEP + 1) as u32
    }

    pub(crate) fn faster(self) -> Self {
        Self::from_millis(self.0.saturating_sub(DELAY_STEP))
    }

    pub(crate) fn slower(self) -> Self {
        Self::from_millis(self.0 + DELAY_STEP)
    }
}
