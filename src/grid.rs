pub(crate) const ROWS: usize = 50;
pub(crate) const COLS: usize = 70;

/// One generation of cells, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(ROWS, COLS)
    }
}

impl Grid {
    pub(crate) fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    fn idx(&self, row: isize, col: isize) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (r, c) = (row as usize, col as usize);
        if r >= self.rows || c >= self.cols {
            return None;
        }
        Some(r * self.cols + c)
    }

    pub(crate) fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Out-of-bounds coordinates read as dead.
    pub(crate) fn is_alive(&self, row: isize, col: isize) -> bool {
        self.idx(row, col).map(|i| self.cells[i]).unwrap_or(false)
    }

    /// Returns false when the coordinate is outside the grid; nothing is written.
    pub(crate) fn set(&mut self, row: usize, col: usize, alive: bool) -> bool {
        if !self.contains(row, col) {
            return false;
        }
        let i = row * self.cols + col;
        self.cells[i] = alive;
        true
    }

    pub(crate) fn toggle(&mut self, row: usize, col: usize) {
        if self.contains(row, col) {
            let i = row * self.cols + col;
            self.cells[i] = !self.cells[i];
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub(crate) fn population(&self) -> usize {
        self.live_cells().count()
    }

    pub(crate) fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(move |(i, _)| (i / cols, i % cols))
    }

    pub(crate) fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let (row, col) = (row as isize, col as isize);
        let mut n = 0;
        for dr in -1..=1 {
            for dc in -1..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if self.is_alive(row + dr, col + dc) {
                    n += 1;
                }
            }
        }
        n
    }

    /// Writes the next generation (B3/S23) into `next`, reading only from `self`.
    pub(crate) fn step_into(&self, next: &mut Grid) {
        if next.rows != self.rows || next.cols != self.cols {
            *next = Grid::new(self.rows, self.cols);
        }
        for r in 0..self.rows {
            for c in 0..self.cols {
                let i = r * self.cols + c;
                next.cells[i] = matches!(
                    (self.cells[i], self.live_neighbors(r, c)),
                    (true, 2) | (true, 3) | (false, 3)
                );
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn step(&self) -> Grid {
        let mut next = Grid::new(self.rows, self.cols);
        self.step_into(&mut next);
        next
    }

    /// Serialises to the preset text format: one line of `0`/`1` per row.
    pub(crate) fn to_preset(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in self.cells.chunks(self.cols.max(1)) {
            out.extend(row.iter().map(|&alive| if alive { '1' } else { '0' }));
            out.push('\n');
        }
        out
    }
}
