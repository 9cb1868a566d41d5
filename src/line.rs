//! Slide/merge on a single line.
//!
//! Every function here treats the slice as oriented so that tiles travel
//! toward the highest index ("right"). Callers that want the opposite
//! direction reverse the line before and after, see [`crate::grid::Grid::line`].

use crate::{Score, Tile};

/// Result of sliding one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineOutcome {
    /// True if any value in the line moved or merged.
    pub changed: bool,
    /// Sum of the tiles produced by merges in this line.
    pub gained: Score,
}

impl LineOutcome {
    /// Fold another line's outcome into this one.
    #[inline]
    pub fn absorb(&mut self, other: LineOutcome) {
        self.changed |= other.changed;
        self.gained += other.gained;
    }
}

/// Slide non-zero tiles toward the high end, keeping their order.
///
/// Returns true if anything moved.
///
/// ```
/// use grid_2048::line::compact;
/// let mut line = [2, 0, 4, 0];
/// assert!(compact(&mut line));
/// assert_eq!(line, [0, 0, 2, 4]);
/// assert!(!compact(&mut line));
/// ```
pub fn compact(line: &mut [Tile]) -> bool {
    let mut changed = false;
    let mut write = line.len();
    for read in (0..line.len()).rev() {
        let val = line[read];
        if val == 0 {
            continue;
        }
        write -= 1;
        if write != read {
            // slots in (read, write] are already empty
            line[write] = val;
            line[read] = 0;
            changed = true;
        }
    }
    changed
}

/// One merge pass from the high end down.
///
/// A freshly doubled tile never merges again in the same pass, so
/// `[2, 2, 2, 2]` becomes `[0, 4, 0, 4]` and not a single 8.
///
/// Panics if a merge would overflow [`Tile`].
pub fn merge_pass(line: &mut [Tile]) -> LineOutcome {
    let mut out = LineOutcome::default();
    let mut idx = line.len();
    while idx > 1 {
        idx -= 1;
        let val = line[idx];
        if val != 0 && val == line[idx - 1] {
            let merged = val
                .checked_mul(2)
                .unwrap_or_else(|| panic!("merging two {val} tiles overflows the tile type"));
            line[idx] = merged;
            line[idx - 1] = 0;
            out.changed = true;
            out.gained += Score::from(merged);
            // skip the tile we just consumed
            idx -= 1;
        }
    }
    out
}

/// Compact, merge, compact.
///
/// ```
/// use grid_2048::line::slide;
/// let mut line = [2, 0, 2, 4];
/// let out = slide(&mut line);
/// assert_eq!(line, [0, 0, 4, 4]);
/// assert!(out.changed);
/// assert_eq!(out.gained, 4);
/// ```
pub fn slide(line: &mut [Tile]) -> LineOutcome {
    let mut out = LineOutcome { changed: compact(line), gained: 0 };
    out.absorb(merge_pass(line));
    out.changed |= compact(line);
    out
}

/// Would [`slide`] change this line? Works on a scratch copy.
pub fn can_slide(line: &[Tile]) -> bool {
    let mut scratch = line.to_vec();
    slide(&mut scratch).changed
}
