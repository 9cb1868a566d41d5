use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::EngineError;
use crate::Tile;

/// A row or column of a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineRef {
    Row(usize),
    Col(usize),
}

/// Square grid of tile values stored row-major. `0` is an empty cell.
///
/// Coordinates are `(row, col)` with `0 <= row, col < tiles()`. Going out of
/// range panics.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    tiles: usize,
    cells: Vec<Tile>,
}

/// Wire shape of a [`Grid`] before the cell count is checked.
#[derive(Deserialize)]
struct RawGrid {
    tiles: usize,
    cells: Vec<Tile>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = EngineError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let expected = raw.tiles.checked_mul(raw.tiles);
        if expected != Some(raw.cells.len()) {
            return Err(EngineError::CellCount { tiles: raw.tiles, found: raw.cells.len() });
        }
        Ok(Grid { tiles: raw.tiles, cells: raw.cells })
    }
}

impl Grid {
    /// A zero-filled `tiles` x `tiles` grid.
    pub fn new(tiles: usize) -> Self {
        Grid { tiles, cells: vec![0; tiles * tiles] }
    }

    /// Build a grid from rows. Panics if the rows are not square.
    ///
    /// ```
    /// use grid_2048::grid::Grid;
    /// let g = Grid::from_rows(&[[2, 0], [0, 4]]);
    /// assert_eq!(g.tiles(), 2);
    /// assert_eq!(g.get(1, 1), 4);
    /// ```
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Self {
        let tiles = rows.len();
        let mut cells = Vec::with_capacity(tiles * tiles);
        for row in rows {
            let row = row.as_ref();
            assert_eq!(row.len(), tiles, "grid rows must have {tiles} tiles");
            cells.extend_from_slice(row);
        }
        Grid { tiles, cells }
    }

    /// Grid dimension N.
    #[inline]
    pub fn tiles(&self) -> usize { self.tiles }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.tiles && col < self.tiles,
            "tile ({row}, {col}) out of range for a {n}x{n} grid",
            n = self.tiles
        );
        row * self.tiles + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile { self.cells[self.index(row, col)] }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, val: Tile) {
        let idx = self.index(row, col);
        self.cells[idx] = val;
    }

    /// Zero every cell.
    pub fn clear(&mut self) { self.cells.fill(0); }

    /// Coordinates of `line`'s cells in natural order.
    fn coords(&self, line: LineRef) -> impl Iterator<Item = (usize, usize)> {
        let n = self.tiles;
        (0..n).map(move |k| match line {
            LineRef::Row(r) => (r, k),
            LineRef::Col(c) => (k, c),
        })
    }

    /// Copy a row or column out, optionally in reversed order.
    ///
    /// ```
    /// use grid_2048::grid::{Grid, LineRef};
    /// let g = Grid::from_rows(&[[2, 4], [8, 16]]);
    /// assert_eq!(g.line(LineRef::Row(0), false), vec![2, 4]);
    /// assert_eq!(g.line(LineRef::Col(1), true), vec![16, 4]);
    /// ```
    pub fn line(&self, line: LineRef, reversed: bool) -> Vec<Tile> {
        let mut vals: Vec<Tile> = self.coords(line).map(|(r, c)| self.get(r, c)).collect();
        if reversed {
            vals.reverse();
        }
        vals
    }

    /// Write `vals` back into a row or column. `reversed` must match the
    /// flag used when the line was read.
    pub fn set_line(&mut self, line: LineRef, vals: &[Tile], reversed: bool) {
        assert_eq!(vals.len(), self.tiles, "line must have {} tiles", self.tiles);
        let n = self.tiles;
        let coords: Vec<_> = self.coords(line).collect();
        for (k, (r, c)) in coords.into_iter().enumerate() {
            let src = if reversed { n - 1 - k } else { k };
            self.set(r, c, vals[src]);
        }
    }

    /// All rows then all columns.
    pub fn lines(&self) -> impl Iterator<Item = LineRef> {
        let n = self.tiles;
        (0..n).map(LineRef::Row).chain((0..n).map(LineRef::Col))
    }

    /// Count the number of zero tiles.
    pub fn count_empty(&self) -> usize { self.cells.iter().filter(|&&v| v == 0).count() }

    /// Row-major coordinates of every empty cell.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let n = self.tiles;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == 0)
            .map(|(idx, _)| (idx / n, idx % n))
            .collect()
    }

    /// True if any cell holds exactly `val`.
    pub fn contains(&self, val: Tile) -> bool { self.cells.contains(&val) }

    /// Return the highest tile value present (0 for an empty grid).
    pub fn highest_tile(&self) -> Tile { self.cells.iter().copied().max().unwrap_or(0) }

    /// Sum of all tile values.
    pub fn total(&self) -> u64 { self.cells.iter().map(|&v| u64::from(v)).sum() }

    /// Iterate over `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        let n = self.tiles;
        self.cells.iter().enumerate().map(move |(idx, &v)| (idx / n, idx % n, v))
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.cells.chunks(self.tiles.max(1))).finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.tiles * 8);
        writeln!(f)?;
        for (r, row) in self.cells.chunks(self.tiles.max(1)).enumerate() {
            if r > 0 {
                writeln!(f, "{rule}")?;
            }
            let cols: Vec<String> = row.iter().map(format_val).collect();
            writeln!(f, "{}", cols.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: &Tile) -> String {
    match val {
        0 => String::from("       "),
        x => format!("{x:^7}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_rows(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]])
    }

    #[test]
    fn it_get_set_clear() {
        let mut g = Grid::new(4);
        assert_eq!(g.count_empty(), 16);
        g.set(2, 3, 8);
        assert_eq!(g.get(2, 3), 8);
        assert_eq!(g.count_empty(), 15);
        g.clear();
        assert_eq!(g, Grid::new(4));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn get_out_of_range_panics() {
        Grid::new(4).get(4, 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn set_out_of_range_panics() {
        Grid::new(3).set(0, 3, 2);
    }

    #[test]
    fn it_read_lines() {
        let g = sample();
        assert_eq!(g.line(LineRef::Row(1), false), vec![4, 5, 6]);
        assert_eq!(g.line(LineRef::Row(1), true), vec![6, 5, 4]);
        assert_eq!(g.line(LineRef::Col(2), false), vec![3, 6, 9]);
        assert_eq!(g.line(LineRef::Col(2), true), vec![9, 6, 3]);
    }

    #[test]
    fn it_write_lines() {
        let mut g = sample();
        g.set_line(LineRef::Row(0), &[10, 20, 30], false);
        assert_eq!(g.line(LineRef::Row(0), false), vec![10, 20, 30]);
        g.set_line(LineRef::Col(0), &[10, 40, 70], true);
        assert_eq!(g.line(LineRef::Col(0), false), vec![70, 40, 10]);
    }

    #[test]
    fn reversed_read_then_write_is_identity() {
        let mut g = sample();
        for line in g.lines().collect::<Vec<_>>() {
            let vals = g.line(line, true);
            g.set_line(line, &vals, true);
        }
        assert_eq!(g, sample());
    }

    #[test]
    #[should_panic(expected = "line must have")]
    fn set_line_wrong_length_panics() {
        Grid::new(4).set_line(LineRef::Row(0), &[2, 2], false);
    }

    #[test]
    fn it_empty_cells() {
        let g = Grid::from_rows(&[[2, 0], [0, 4]]);
        assert_eq!(g.empty_cells(), vec![(0, 1), (1, 0)]);
        assert_eq!(g.count_empty(), 2);
        assert!(g.contains(4));
        assert!(!g.contains(8));
        assert_eq!(g.highest_tile(), 4);
        assert_eq!(g.total(), 6);
    }

    #[test]
    fn deserialize_rejects_wrong_cell_count() {
        let err = serde_json::from_str::<Grid>(r#"{"tiles":4,"cells":[2,2]}"#).unwrap_err();
        assert!(err.to_string().contains("grid with 4 tiles per side has 2 cells"), "{err}");

        let g: Grid = serde_json::from_str(r#"{"tiles":2,"cells":[2,0,0,4]}"#).unwrap();
        assert_eq!(g, Grid::from_rows(&[[2, 0], [0, 4]]));
    }

    #[test]
    fn it_display() {
        let g = Grid::from_rows(&[[2, 0], [0, 2048]]);
        let s = g.to_string();
        assert!(s.contains("2048"));
        assert_eq!(s.lines().filter(|l| l.contains('|')).count(), 2);
    }
}
