use crate::grid::Grid;
use crate::model::{Cursor, Mode, TickInterval};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    TogglePlay,
    ToggleCell,
    Clear,
    SpeedUp,
    SlowDown,
    Move(i32, i32),
    SingleStep,
    Quit,
}

/// Owns the live grid, its scratch buffer, and the edit/play state.
pub(crate) struct Simulation {
    grid: Grid,
    scratch: Grid,
    cursor: Cursor,
    mode: Mode,
    interval: TickInterval,
    generation: u64,
    running: bool,
}

impl Simulation {
    pub(crate) fn new(grid: Grid, interval: TickInterval) -> Self {
        let scratch = Grid::new(grid.rows(), grid.cols());
        Self {
            grid,
            scratch,
            cursor: Cursor::default(),
            mode: Mode::Editing,
            interval,
            generation: 0,
            running: true,
        }
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub(crate) fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn interval(&self) -> TickInterval {
        self.interval
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn apply(&mut self, action: Action) {
        match action {
            Action::TogglePlay => {
                self.mode = self.mode.toggled();
                info!(mode = self.mode.label(), generation = self.generation, "mode changed");
            }
            Action::ToggleCell => {
                let Cursor { row, col } = self.cursor;
                self.grid.toggle(row, col);
            }
            Action::Clear => {
                self.grid.clear();
                self.generation = 0;
                info!("grid cleared");
            }
            Action::SpeedUp => {
                self.interval = self.interval.faster();
                debug!(speed = self.interval.speed_level(), "speed changed");
            }
            Action::SlowDown => {
                self.interval = self.interval.slower();
                debug!(speed = self.interval.speed_level(), "speed changed");
            }
            Action::Move(d_row, d_col) => {
                let (rows, cols) = (self.grid.rows(), self.grid.cols());
                self.cursor.move_by(d_row, d_col, rows, cols);
            }
            Action::SingleStep => {
                if self.mode == Mode::Editing {
                    self.step();
                }
            }
            Action::Quit => self.running = false,
        }
    }

    /// Advances one generation through the scratch buffer.
    pub(crate) fn step(&mut self) {
        self.grid.step_into(&mut self.scratch);
        std::mem::swap(&mut self.grid, &mut self.scratch);
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{COLS, ROWS};
    use crate::model::{DELAY_MAX, DELAY_MIN};

    fn sim() -> Simulation {
        Simulation::new(Grid::default(), TickInterval::default())
    }

    #[test]
    fn starts_editing_and_running() {
        let s = sim();
        assert_eq!(s.mode(), Mode::Editing);
        assert!(s.is_running());
        assert_eq!(s.generation(), 0);
        assert_eq!(s.cursor(), Cursor::default());
    }

    #[test]
    fn play_pause_round_trip() {
        let mut s = sim();
        s.apply(Action::TogglePlay);
        assert_eq!(s.mode(), Mode::Playing);
        s.apply(Action::TogglePlay);
        assert_eq!(s.mode(), Mode::Editing);
    }

    #[test]
    fn toggle_cell_follows_cursor() {
        let mut s = sim();
        s.apply(Action::Move(2, 3));
        s.apply(Action::ToggleCell);
        assert!(s.grid().is_alive(2, 3));
        s.apply(Action::ToggleCell);
        assert_eq!(s.grid().population(), 0);
    }

    #[test]
    fn cursor_never_leaves_grid() {
        let mut s = sim();
        s.apply(Action::Move(0, -1));
        s.apply(Action::Move(-1, 0));
        s.apply(Action::ToggleCell);
        assert!(s.grid().is_alive(0, 0));

        for _ in 0..(ROWS + COLS) {
            s.apply(Action::Move(1, 1));
        }
        assert_eq!(s.cursor(), Cursor { row: ROWS - 1, col: COLS - 1 });
        s.apply(Action::ToggleCell);
        assert!(s.grid().is_alive(ROWS as isize - 1, COLS as isize - 1));
    }

    #[test]
    fn clear_keeps_mode() {
        let mut s = sim();
        s.apply(Action::ToggleCell);
        s.apply(Action::TogglePlay);
        s.step();
        s.apply(Action::Clear);
        assert_eq!(s.grid().population(), 0);
        assert_eq!(s.mode(), Mode::Playing);
        assert_eq!(s.generation(), 0);
    }

    #[test]
    fn speed_saturates_both_ends() {
        let mut s = sim();
        for _ in 0..200 {
            s.apply(Action::SpeedUp);
        }
        assert_eq!(s.interval().millis(), DELAY_MIN);
        s.apply(Action::SpeedUp);
        assert_eq!(s.interval().millis(), DELAY_MIN);

        for _ in 0..200 {
            s.apply(Action::SlowDown);
        }
        assert_eq!(s.interval().millis(), DELAY_MAX);
        s.apply(Action::SlowDown);
        assert_eq!(s.interval().millis(), DELAY_MAX);
    }

    #[test]
    fn step_advances_generation_via_scratch() {
        let mut grid = Grid::default();
        for c in 4..7 {
            grid.set(5, c, true);
        }
        let mut s = Simulation::new(grid.clone(), TickInterval::default());
        s.step();
        assert_eq!(s.generation(), 1);
        assert_eq!(s.grid(), &grid.step());
        s.step();
        assert_eq!(s.grid(), &grid);
        assert_eq!(s.generation(), 2);
    }

    #[test]
    fn single_step_only_while_editing() {
        let mut grid = Grid::default();
        grid.set(1, 1, true);
        let mut s = Simulation::new(grid, TickInterval::default());
        s.apply(Action::TogglePlay);
        s.apply(Action::SingleStep);
        assert_eq!(s.generation(), 0);
        s.apply(Action::TogglePlay);
        s.apply(Action::SingleStep);
        assert_eq!(s.generation(), 1);
        assert_eq!(s.grid().population(), 0);
    }

    #[test]
    fn quit_stops_running() {
        let mut s = sim();
        s.apply(Action::Quit);
        assert!(!s.is_running());
    }
}
