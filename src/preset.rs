use crate::grid::Grid;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum PresetError {
    #[error("could not read preset {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preset cell ({row}, {col}) lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Top-left corner the preset is written from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Origin {
    pub(crate) x: usize,
    pub(crate) y: usize,
}

/// Applies preset bytes onto `grid`. `1` is alive, `0` is dead, `\n` starts the
/// next row; every other byte is skipped. Any write outside the grid rejects
/// the preset and leaves `grid` untouched.
pub(crate) fn apply(grid: &mut Grid, data: &[u8], origin: Origin) -> Result<(), PresetError> {
    let mut staged = grid.clone();
    let (mut line, mut col) = (0usize, 0usize);

    for &b in data {
        let alive = match b {
            b'1' => true,
            b'0' => false,
            b'\n' => {
                line += 1;
                col = 0;
                continue;
            }
            _ => continue,
        };
        // saturating keeps huge origins past the grid instead of wrapping to 0
        let (r, c) = (origin.y.saturating_add(line), origin.x.saturating_add(col));
        if !staged.set(r, c, alive) {
            return Err(PresetError::OutOfBounds {
                row: r,
                col: c,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        col += 1;
    }

    *grid = staged;
    Ok(())
}

pub(crate) fn parse(data: impl AsRef<[u8]>, origin: Origin) -> Result<Grid, PresetError> {
    let mut grid = Grid::default();
    apply(&mut grid, data.as_ref(), origin)?;
    Ok(grid)
}

pub(crate) fn load(path: &Path, origin: Origin) -> Result<Grid, PresetError> {
    let data = fs::read(path).map_err(|source| PresetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(data, origin)
}
