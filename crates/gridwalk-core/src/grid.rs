//! The [`Grid`]: a row-major matrix of [`Cell`]s plus the start/end handles.

use std::ops::{Index, IndexMut};

use crate::cell::{Cell, CellState, Side};
use crate::geom::{Point, Range};

/// Which cell model a grid is built from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Adjacency is blocked only by barrier cells.
    #[default]
    Plain,
    /// Cells carry wall segments; two cells are adjacent only once the wall
    /// between them has been carved.
    Walled,
}

/// A rectangular matrix of cells.
///
/// Cells are addressed by [`Point`] (`x` = column, `y` = row) and stored in
/// row-major order. Predecessor links between cells are plain `Point`
/// handles into this storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: i32,
    cols: i32,
    kind: CellKind,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    /// Create a plain `rows × cols` grid of empty cells.
    pub fn new(rows: i32, cols: i32, cell_size: i32) -> Self {
        Self::with_kind(rows, cols, cell_size, CellKind::Plain)
    }

    /// Create a `rows × cols` grid using the given cell model.
    ///
    /// Negative dimensions are clamped to zero.
    pub fn with_kind(rows: i32, cols: i32, cell_size: i32, kind: CellKind) -> Self {
        let rows = rows.max(0);
        let cols = cols.max(0);
        let cells = Range::cells(rows, cols)
            .iter()
            .map(|p| match kind {
                CellKind::Plain => Cell::new(p, cell_size),
                CellKind::Walled => Cell::walled(p, cell_size),
            })
            .collect();
        Self {
            cells,
            rows,
            cols,
            kind,
            start: None,
            end: None,
        }
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// The range of valid cell coordinates.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::cells(self.rows, self.cols)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of `p`, or `None` if out of range.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y * self.cols + p.x) as usize)
    }

    /// The point stored at flat index `idx`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let cols = self.cols.max(1) as usize;
        Point::new((idx % cols) as i32, (idx / cols) as i32)
    }

    pub fn get(&self, p: Point) -> Option<&Cell> {
        let i = self.idx(p)?;
        Some(&self.cells[i])
    }

    pub fn get_mut(&mut self, p: Point) -> Option<&mut Cell> {
        let i = self.idx(p)?;
        Some(&mut self.cells[i])
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state() == state).count()
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// True iff exactly one Start and one End are set.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Mark `p` as the start cell.
    ///
    /// Rejected (returns `false`) if a start already exists, if `p` is the
    /// end cell, or if `p` is out of range. A barrier at `p` is replaced.
    pub fn set_start(&mut self, p: Point) -> bool {
        if self.start.is_some() || self.end == Some(p) {
            return false;
        }
        let Some(cell) = self.get_mut(p) else {
            return false;
        };
        cell.make_start();
        self.start = Some(p);
        true
    }

    /// Mark `p` as the end cell. Same rules as [`set_start`](Self::set_start).
    pub fn set_end(&mut self, p: Point) -> bool {
        if self.end.is_some() || self.start == Some(p) {
            return false;
        }
        let Some(cell) = self.get_mut(p) else {
            return false;
        };
        cell.make_end();
        self.end = Some(p);
        true
    }

    /// Flip `p` between Barrier and Empty. Start and End are left alone.
    ///
    /// Returns whether the cell changed.
    pub fn toggle_barrier(&mut self, p: Point) -> bool {
        let Some(cell) = self.get_mut(p) else {
            return false;
        };
        match cell.state() {
            CellState::Start | CellState::End => false,
            CellState::Barrier => {
                cell.clear_barrier();
                true
            }
            _ => {
                cell.make_barrier();
                true
            }
        }
    }

    /// Apply a user click at `p`: the first click places the start, the
    /// second the end, and every later click a barrier.
    ///
    /// Clicks on the start or end cell are ignored.
    pub fn click(&mut self, p: Point) -> bool {
        if self.start == Some(p) || self.end == Some(p) {
            return false;
        }
        if self.start.is_none() {
            return self.set_start(p);
        }
        if self.end.is_none() {
            return self.set_end(p);
        }
        match self.get_mut(p) {
            Some(cell) if !cell.is_barrier() => {
                cell.make_barrier();
                true
            }
            _ => false,
        }
    }

    /// Restore every cell to its construction-time values and forget the
    /// start and end. Dimensions are unchanged.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
        self.start = None;
        self.end = None;
    }

    /// Clear search results (scores, predecessors, Frontier/Visited/Path
    /// marks) while keeping the start, end, barriers and walls.
    pub fn clear_search(&mut self) {
        for cell in &mut self.cells {
            cell.clear_search();
        }
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Recompute every cell's neighbour list from scratch.
    ///
    /// A neighbour is a cardinally adjacent, non-barrier cell; on a walled
    /// grid the wall segment between the two must also be carved. Order is
    /// up, right, down, left.
    pub fn refresh_neighbors(&mut self) {
        for i in 0..self.cells.len() {
            let p = self.point(i);
            let neighbors: Vec<Point> = p
                .neighbors_4()
                .into_iter()
                .filter(|&n| self.passable(p, n))
                .collect();
            self.cells[i].neighbors = neighbors;
        }
    }

    /// Whether a step from `from` to the adjacent cell `to` is open.
    fn passable(&self, from: Point, to: Point) -> bool {
        let Some(target) = self.get(to) else {
            return false;
        };
        if target.is_barrier() {
            return false;
        }
        match self.kind {
            CellKind::Plain => true,
            CellKind::Walled => match Side::between(from, to) {
                Some(side) => {
                    !self[from].walls().has(side) && !target.walls().has(side.opposite())
                }
                None => false,
            },
        }
    }

    /// Knock down the wall pair between adjacent cells `a` and `b` and link
    /// them as path neighbours.
    ///
    /// Returns `false` (and changes nothing) if the cells are not adjacent
    /// or either is out of range.
    pub fn carve_between(&mut self, a: Point, b: Point) -> bool {
        let Some(side) = Side::between(a, b) else {
            return false;
        };
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        let cell = &mut self[a];
        cell.knock_down(side);
        if !cell.neighbors.contains(&b) {
            cell.neighbors.push(b);
        }
        let other = &mut self[b];
        other.knock_down(side.opposite());
        if !other.neighbors.contains(&a) {
            other.neighbors.push(a);
        }
        true
    }

    /// Record that the maze carver has reached `p`.
    pub fn mark_carved(&mut self, p: Point) {
        if let Some(cell) = self.get_mut(p) {
            cell.mark_carved();
        }
    }
}

impl Index<Point> for Grid {
    type Output = Cell;

    /// Panics if `p` is out of range, like slice indexing.
    #[inline]
    fn index(&self, p: Point) -> &Cell {
        match self.idx(p) {
            Some(i) => &self.cells[i],
            None => panic!("point {p} outside {}x{} grid", self.rows, self.cols),
        }
    }
}

impl IndexMut<Point> for Grid {
    #[inline]
    fn index_mut(&mut self, p: Point) -> &mut Cell {
        match self.idx(p) {
            Some(i) => &mut self.cells[i],
            None => panic!("point {p} outside {}x{} grid", self.rows, self.cols),
        }
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
