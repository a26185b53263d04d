use crate::config::Settings;
use crate::grid::Grid;
use crate::sim::Simulation;
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};

/// Terminal columns per grid cell.
pub(crate) const CELL_W: u16 = 2;

const HELP_LINES: [&str; 13] = [
    "p -> Play/Pause",
    "c -> Toggle cell",
    "C -> Clear Matrix",
    "i -> Increase speed",
    "d -> Decrease speed",
    "s -> Single step",
    "",
    "h -> Left",
    "j -> Down",
    "k -> Up",
    "l -> Right",
    "",
    "q -> Quit",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }

    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }

    pub(crate) fn clear(&mut self, bg: Color) {
        self.cells.fill(Cell {
            bg,
            ..Cell::default()
        });
    }
}

pub(crate) struct Terminal {
    pub(crate) out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    pub(crate) prev: CellBuffer,
    pub(crate) cur: CellBuffer,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        queue!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    /// Writes cells that differ from the last presented frame.
    pub(crate) fn present(&mut self, diff_only: bool) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if diff_only && c == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;

                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }

                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color, bg: Color) {
    for (i, ch) in s.chars().enumerate() {
        let xx = x.saturating_add(i as u16);
        if xx >= buf.w || y >= buf.h {
            break;
        }
        buf.set(xx, y, Cell { ch, fg, bg });
    }
}

/* -----------------------------
   Board and side panel
------------------------------ */

/// Each grid cell takes `CELL_W` columns: a blank, then the glyph.
pub(crate) fn draw_board(buf: &mut CellBuffer, sim: &Simulation, settings: &Settings) {
    let grid = sim.grid();
    let cursor = sim.cursor();
    let live_fg = if settings.enable_color {
        Color::Green
    } else {
        Color::White
    };
    let dead_fg = if settings.enable_color {
        Color::DarkGrey
    } else {
        Color::White
    };

    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            let alive = grid.is_alive(r as isize, c as isize);
            let (ch, fg) = if alive {
                (settings.live_glyph, live_fg)
            } else {
                (settings.dead_glyph, dead_fg)
            };
            // reverse video marks the cursor
            let (fg, bg) = if cursor.row == r && cursor.col == c {
                (Color::Black, if alive { live_fg } else { Color::White })
            } else {
                (fg, Color::Black)
            };
            let (Ok(y), Ok(x)) = (u16::try_from(r), u16::try_from(c * CELL_W as usize)) else {
                continue;
            };
            buf.set(x, y, Cell { ch: ' ', fg, bg });
            buf.set(x.saturating_add(1), y, Cell { ch, fg, bg });
        }
    }
}

pub(crate) fn draw_panel(buf: &mut CellBuffer, sim: &Simulation, x: u16) {
    let fg = Color::White;
    let bg = Color::Black;

    for (i, line) in HELP_LINES.iter().enumerate() {
        draw_text(buf, x, i as u16, line, fg, bg);
    }

    let mut y = HELP_LINES.len() as u16 + 1;
    let cursor = sim.cursor();
    let status = [
        format!("SPEED: {}", sim.interval().speed_level()),
        format!("MODE: {}", sim.mode().label()),
        format!("GEN: {}", sim.generation()),
        format!("ALIVE: {}", sim.grid().population()),
        format!("CURSOR: {},{}", cursor.row, cursor.col),
    ];
    for line in &status {
        draw_text(buf, x, y, line, fg, bg);
        y += 1;
    }
}

pub(crate) fn panel_x(grid: &Grid) -> u16 {
    u16::try_from(grid.cols() * CELL_W as usize + 1).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, COLS, ROWS};
    use crate::model::TickInterval;
    use crate::sim::Action;

    fn cell_at(buf: &CellBuffer, x: u16, y: u16) -> Option<Cell> {
        (x < buf.w && y < buf.h).then(|| buf.cells[buf.idx(x, y)])
    }

    fn row_text(buf: &CellBuffer, y: u16, x0: u16, len: u16) -> String {
        (x0..x0 + len)
            .filter_map(|x| cell_at(buf, x, y))
            .map(|c| c.ch)
            .collect()
    }

    #[test]
    fn board_uses_settings_glyphs() {
        let mut grid = Grid::default();
        grid.set(0, 1, true);
        let mut sim = Simulation::new(grid, TickInterval::default());
        sim.apply(Action::Move(1, 0));
        let settings = Settings::default();
        let mut buf = CellBuffer::new(200, 60);
        draw_board(&mut buf, &sim, &settings);

        assert_eq!(row_text(&buf, 0, 0, 6), " . X .");
        let cursor_cell = cell_at(&buf, 1, 1).unwrap();
        assert_eq!(cursor_cell.ch, '.');
        assert_eq!(cursor_cell.bg, Color::White);
    }

    #[test]
    fn board_is_clipped_to_small_buffers() {
        let sim = Simulation::new(Grid::default(), TickInterval::default());
        let mut buf = CellBuffer::new(10, 5);
        draw_board(&mut buf, &sim, &Settings::default());
        assert_eq!(row_text(&buf, 4, 0, 10), " . . . . .");
    }

    #[test]
    fn panel_shows_speed_and_generation() {
        let mut sim = Simulation::new(Grid::default(), TickInterval::from_speed_level(42));
        sim.step();
        let x = panel_x(sim.grid());
        assert_eq!(x, (COLS as u16) * CELL_W + 1);
        let mut buf = CellBuffer::new(x + 30, ROWS as u16);
        draw_panel(&mut buf, &sim, x);

        assert_eq!(row_text(&buf, 0, x, 15), "p -> Play/Pause");
        let y = HELP_LINES.len() as u16 + 1;
        assert_eq!(row_text(&buf, y, x, 9), "SPEED: 42");
        assert_eq!(row_text(&buf, y + 1, x, 13), "MODE: EDITING");
        assert_eq!(row_text(&buf, y + 2, x, 6), "GEN: 1");
    }

    #[test]
    fn draw_text_stops_at_edge() {
        let mut buf = CellBuffer::new(4, 1);
        draw_text(&mut buf, 2, 0, "abcdef", Color::White, Color::Black);
        assert_eq!(row_text(&buf, 0, 0, 4), "  ab");
        draw_text(&mut buf, 0, 3, "zz", Color::White, Color::Black);
    }
}
