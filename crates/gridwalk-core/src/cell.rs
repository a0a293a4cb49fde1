//! The [`Cell`] type and its per-cell state: [`CellState`], [`Walls`],
//! [`Side`].

use std::ops::{BitAnd, BitOr};

use crate::geom::Point;

/// Score value standing in for "infinitely far" / not yet reached.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// CellState
// ---------------------------------------------------------------------------

/// The role a cell currently plays. Renderers map this to a colour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Start,
    End,
    Barrier,
    /// Discovered by a search but not yet processed.
    Frontier,
    /// Fully processed by a search.
    Visited,
    /// On the reconstructed start→end path.
    Path,
}

// ---------------------------------------------------------------------------
// Side / Walls
// ---------------------------------------------------------------------------

/// One edge of a square cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Toward `y - 1`.
    Top,
    /// Toward `x + 1`.
    Right,
    /// Toward `y + 1`.
    Bottom,
    /// Toward `x - 1`.
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// The side facing this one from the adjacent cell.
    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// The side of `from` that is shared with `to`, or `None` if the two
    /// cells are not cardinally adjacent.
    ///
    /// A column delta selects Left/Right, a row delta selects Top/Bottom.
    pub fn between(from: Point, to: Point) -> Option<Side> {
        let d = to - from;
        match (d.x, d.y) {
            (0, -1) => Some(Side::Top),
            (1, 0) => Some(Side::Right),
            (0, 1) => Some(Side::Bottom),
            (-1, 0) => Some(Side::Left),
            _ => None,
        }
    }

    #[inline]
    pub const fn mask(self) -> Walls {
        match self {
            Side::Top => Walls::TOP,
            Side::Right => Walls::RIGHT,
            Side::Bottom => Walls::BOTTOM,
            Side::Left => Walls::LEFT,
        }
    }
}

/// Bitmask of the wall segments still standing around a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Walls(pub u8);

impl Walls {
    pub const NONE: Self = Self(0);
    pub const TOP: Self = Self(1 << 0);
    pub const RIGHT: Self = Self(1 << 1);
    pub const BOTTOM: Self = Self(1 << 2);
    pub const LEFT: Self = Self(1 << 3);
    pub const ALL: Self = Self(0b1111);

    /// Whether all bits in `other` are set in `self`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self & other).0 == other.0
    }

    /// Whether the wall on `side` is still standing.
    #[inline]
    pub fn has(self, side: Side) -> bool {
        self.contains(side.mask())
    }

    /// Knock down the wall on `side`.
    #[inline]
    pub fn remove(&mut self, side: Side) {
        self.0 &= !side.mask().0;
    }

    /// Number of walls still standing.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }
}

impl BitOr for Walls {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Walls {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// One grid unit: fixed position and pixel geometry, plus the mutable state
/// that barrier generators and searches read and write.
///
/// Score fields are public so search algorithms can relax them directly;
/// role changes go through the `make_*` methods, which keep Start and End
/// from being overwritten by barrier edits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Point,
    size: i32,
    state: CellState,
    /// Dijkstra distance from the start.
    pub distance: i32,
    /// A* cost from the start.
    pub g_score: i32,
    /// A* heuristic estimate to the end.
    pub h_score: i32,
    /// Handle of the cell this one was reached from.
    pub predecessor: Option<Point>,
    /// Search-specific "seen" flag.
    pub visited: bool,
    pub(crate) neighbors: Vec<Point>,
    walls: Walls,
    carved: bool,
    walled: bool,
}

impl Cell {
    /// Create a plain cell at `pos` with pixel side length `size`.
    pub fn new(pos: Point, size: i32) -> Self {
        Self {
            pos,
            size,
            state: CellState::Empty,
            distance: UNREACHABLE,
            g_score: UNREACHABLE,
            h_score: UNREACHABLE,
            predecessor: None,
            visited: false,
            neighbors: Vec::new(),
            walls: Walls::NONE,
            carved: false,
            walled: false,
        }
    }

    /// Create a maze cell: all four wall segments standing, not yet carved.
    pub fn walled(pos: Point, size: i32) -> Self {
        Self {
            walls: Walls::ALL,
            walled: true,
            ..Self::new(pos, size)
        }
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.pos.x
    }

    /// Pixel side length. Only meaningful to renderers.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Top-left pixel corner: `(col * size, row * size)`.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.pos.x * self.size, self.pos.y * self.size)
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.state == CellState::Start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.state == CellState::End
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }

    /// Whether the cell is Start or End.
    #[inline]
    pub fn is_endpoint(&self) -> bool {
        self.is_start() || self.is_end()
    }

    /// Path-adjacent cells as of the last `Grid::refresh_neighbors`.
    #[inline]
    pub fn neighbors(&self) -> &[Point] {
        &self.neighbors
    }

    #[inline]
    pub fn walls(&self) -> Walls {
        self.walls
    }

    /// Whether the maze carver has reached this cell.
    #[inline]
    pub fn is_carved(&self) -> bool {
        self.carved
    }

    /// Whether this cell uses the wall-segment model.
    #[inline]
    pub fn is_walled(&self) -> bool {
        self.walled
    }

    /// Sum of `g_score` and `h_score`, saturating at [`UNREACHABLE`].
    #[inline]
    pub fn f_score(&self) -> i32 {
        self.g_score.saturating_add(self.h_score)
    }

    pub(crate) fn make_start(&mut self) {
        self.state = CellState::Start;
        self.distance = 0;
        self.g_score = 0;
        self.h_score = 0;
    }

    pub(crate) fn make_end(&mut self) {
        self.state = CellState::End;
    }

    /// Turn the cell into a barrier. No-op on Start and End.
    pub fn make_barrier(&mut self) {
        if !self.is_endpoint() {
            self.state = CellState::Barrier;
        }
    }

    /// Turn a barrier back into an empty cell. Any other state is kept.
    pub fn clear_barrier(&mut self) {
        if self.is_barrier() {
            self.state = CellState::Empty;
        }
    }

    pub fn make_frontier(&mut self) {
        self.state = CellState::Frontier;
    }

    pub fn make_visited(&mut self) {
        self.state = CellState::Visited;
    }

    pub fn make_path(&mut self) {
        self.state = CellState::Path;
    }

    pub(crate) fn knock_down(&mut self, side: Side) {
        self.walls.remove(side);
    }

    pub(crate) fn mark_carved(&mut self) {
        self.carved = true;
    }

    /// Drop search results: scores, predecessor, the visited flag, and any
    /// Frontier/Visited/Path mark. Role, walls and carve state are kept.
    pub fn clear_search(&mut self) {
        self.distance = UNREACHABLE;
        self.g_score = UNREACHABLE;
        self.h_score = UNREACHABLE;
        self.predecessor = None;
        self.visited = false;
        match self.state {
            CellState::Frontier | CellState::Visited | CellState::Path => {
                self.state = CellState::Empty
            }
            CellState::Start => self.make_start(),
            _ => {}
        }
    }

    /// Restore construction-time values. Position and geometry are kept.
    pub fn reset(&mut self) {
        *self = if self.walled {
            Self::walled(self.pos, self.size)
        } else {
            Self::new(self.pos, self.size)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_defaults() {
        let c = Cell::new(Point::at(2, 3), 20);
        assert_eq!(c.state(), CellState::Empty);
        assert_eq!(c.origin(), Point::new(60, 40));
        assert_eq!(c.distance, UNREACHABLE);
        assert_eq!(c.f_score(), UNREACHABLE);
        assert!(c.predecessor.is_none());
        assert!(c.neighbors().is_empty());
        assert_eq!(c.walls(), Walls::NONE);
    }

    #[test]
    fn barrier_never_overwrites_endpoints() {
        let mut c = Cell::new(Point::at(0, 0), 1);
        c.make_start();
        c.make_barrier();
        assert!(c.is_start());
        c.make_end();
        c.make_barrier();
        assert!(c.is_end());
        c.clear_barrier();
        assert!(c.is_end());
    }

    #[test]
    fn start_zeroes_scores() {
        let mut c = Cell::new(Point::at(1, 1), 1);
        c.make_start();
        assert_eq!((c.distance, c.g_score, c.h_score), (0, 0, 0));
        assert_eq!(c.f_score(), 0);
    }

    #[test]
    fn reset_restores_walls() {
        let mut c = Cell::walled(Point::at(1, 1), 4);
        c.knock_down(Side::Left);
        c.mark_carved();
        c.make_visited();
        c.visited = true;
        c.reset();
        assert_eq!(c, Cell::walled(Point::at(1, 1), 4));
        assert_eq!(c.walls().count(), 4);
    }

    #[test]
    fn side_between_uses_axis_deltas() {
        let a = Point::at(3, 3);
        assert_eq!(Side::between(a, Point::at(2, 3)), Some(Side::Top));
        assert_eq!(Side::between(a, Point::at(3, 4)), Some(Side::Right));
        assert_eq!(Side::between(a, Point::at(4, 3)), Some(Side::Bottom));
        assert_eq!(Side::between(a, Point::at(3, 2)), Some(Side::Left));
        assert_eq!(Side::between(a, Point::at(4, 4)), None);
        for s in Side::ALL {
            assert_eq!(s.opposite().opposite(), s);
        }
    }

    #[test]
    fn walls_mask_ops() {
        let mut w = Walls::ALL;
        w.remove(Side::Right);
        assert!(!w.has(Side::Right));
        assert!(w.contains(Walls::TOP | Walls::LEFT));
        assert_eq!(w.count(), 3);
        assert_eq!(w & Walls::RIGHT, Walls::NONE);
    }
}
