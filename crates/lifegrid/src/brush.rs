//! # Pointer Strokes
//!
//! Pointer events arrive far apart during a fast drag. Each new position is
//! joined to the previous one with a Bresenham line, so the painted path has
//! no gaps.

use lifegrid_core::GridStore;

/// Whether a stroke brings cells to life or kills them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeIntent {
    /// Left button: set cells alive.
    Add,
    /// Right button: set cells dead.
    Remove,
}

impl StrokeIntent {
    /// Cell state this intent writes.
    #[inline]
    #[must_use]
    pub const fn alive(self) -> bool {
        matches!(self, Self::Add)
    }
}

/// Cells on the straight line between two points, both endpoints included.
///
/// Consecutive cells are 8-connected. The error term is kept in `i128`, so
/// any pair of `isize` endpoints is valid.
#[derive(Clone, Debug)]
pub struct Line {
    current: (isize, isize),
    end: (isize, isize),
    step_row: isize,
    step_col: isize,
    d_row: i128,
    d_col: i128,
    error: i128,
    done: bool,
}

#[inline]
fn wide(value: isize) -> i128 {
    value as i128
}

/// Rasterizes the line from `from` to `to` as `(row, col)` pairs.
#[must_use]
pub fn line(from: (isize, isize), to: (isize, isize)) -> Line {
    let d_row = -(wide(to.0) - wide(from.0)).abs();
    let d_col = (wide(to.1) - wide(from.1)).abs();
    Line {
        current: from,
        end: to,
        step_row: if from.0 < to.0 { 1 } else { -1 },
        step_col: if from.1 < to.1 { 1 } else { -1 },
        d_row,
        d_col,
        error: d_col + d_row,
        done: false,
    }
}

impl Iterator for Line {
    type Item = (isize, isize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let point = self.current;
        if point == self.end {
            self.done = true;
            return Some(point);
        }

        let doubled = 2 * self.error;
        if doubled >= self.d_row {
            self.error += self.d_row;
            self.current.1 += self.step_col;
        }
        if doubled <= self.d_col {
            self.error += self.d_col;
            self.current.0 += self.step_row;
        }
        Some(point)
    }
}

type Segment = ((i128, i128), (i128, i128));

/// Splits `segment` by bisection and keeps the pieces that can touch the
/// `rows` x `cols` box, each at most `limit` cells long, in path order.
fn visible_pieces(
    segment: Segment,
    rows: (i128, i128),
    cols: (i128, i128),
    limit: i128,
    out: &mut Vec<Segment>,
) {
    let ((r0, c0), (r1, c1)) = segment;
    if r0.max(r1) < rows.0 || r0.min(r1) > rows.1 || c0.max(c1) < cols.0 || c0.min(c1) > cols.1 {
        return;
    }
    if (r1 - r0).abs().max((c1 - c0).abs()) <= limit {
        out.push(segment);
        return;
    }
    let mid = ((r0 + r1).div_euclid(2), (c0 + c1).div_euclid(2));
    visible_pieces(((r0, c0), mid), rows, cols, limit, out);
    visible_pieces((mid, (r1, c1)), rows, cols, limit, out);
}

/// An in-progress drag over the grid.
#[derive(Debug)]
pub struct Stroke<'a> {
    store: &'a GridStore,
    last: (isize, isize),
    intent: StrokeIntent,
}

impl<'a> Stroke<'a> {
    /// Starts a stroke and paints the cell under the pointer.
    #[must_use]
    pub fn begin(store: &'a GridStore, origin: (isize, isize), intent: StrokeIntent) -> Self {
        store.set_cell(origin.0, origin.1, intent.alive());
        Self {
            store,
            last: origin,
            intent,
        }
    }

    /// Paints every grid cell on the path from the last position to `point`.
    ///
    /// Stretches of the path far outside the grid are skipped without being
    /// walked. Returns the number of grid cells written, the previous position
    /// excluded.
    pub fn extend_to(&mut self, point: (isize, isize)) -> usize {
        let (height, width) = self.store.dimensions();
        let (height, width) = (
            i128::try_from(height).unwrap_or(i128::MAX),
            i128::try_from(width).unwrap_or(i128::MAX),
        );
        let mut pieces = Vec::new();
        visible_pieces(
            (
                (wide(self.last.0), wide(self.last.1)),
                (wide(point.0), wide(point.1)),
            ),
            (-1, height),
            (-1, width),
            2 * (height + width + 2),
            &mut pieces,
        );

        let alive = self.intent.alive();
        let mut previous = self.last;
        let mut painted = 0;
        for (from, to) in pieces {
            // Pieces lie between two isize endpoints, so they always fit.
            let (Some(from), Some(to)) = (narrow(from), narrow(to)) else {
                continue;
            };
            for (row, col) in line(from, to) {
                if (row, col) == previous {
                    continue;
                }
                previous = (row, col);
                if wide(row) >= 0 && wide(row) < height && wide(col) >= 0 && wide(col) < width {
                    self.store.set_cell(row, col, alive);
                    painted += 1;
                }
            }
        }
        self.last = point;
        painted
    }

    /// Last painted position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> (isize, isize) {
        self.last
    }

    /// What this stroke writes.
    #[inline]
    #[must_use]
    pub const fn intent(&self) -> StrokeIntent {
        self.intent
    }
}

fn narrow((row, col): (i128, i128)) -> Option<(isize, isize)> {
    Some((isize::try_from(row).ok()?, isize::try_from(col).ok()?))
}
