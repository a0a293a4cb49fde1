use gridwalk_core::{Grid, Point, Progress, Stepper};
use rand::Rng;
use rand::seq::IndexedRandom;

/// An inclusive rectangle of cells still to be divided, plus the rows and
/// columns no dividing line may use because a door sits next to them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Chamber {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
    pub avoid_rows: Vec<i32>,
    pub avoid_cols: Vec<i32>,
}

impl Chamber {
    fn new(top: i32, bottom: i32, left: i32, right: i32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
            avoid_rows: Vec::new(),
            avoid_cols: Vec::new(),
        }
    }

    fn height(&self) -> i32 {
        self.bottom - self.top + 1
    }

    fn width(&self) -> i32 {
        self.right - self.left + 1
    }

    fn is_large_enough(&self) -> bool {
        self.height() >= 3 && self.width() >= 3
    }

    /// Pick the crossing point of the two dividing lines from the strict
    /// interior, skipping avoided rows and columns.
    fn centre(&self, rng: &mut impl Rng) -> Option<Point> {
        let rows: Vec<i32> = (self.top + 1..self.bottom)
            .filter(|r| !self.avoid_rows.contains(r))
            .collect();
        let cols: Vec<i32> = (self.left + 1..self.right)
            .filter(|c| !self.avoid_cols.contains(c))
            .collect();
        let &row = rows.choose(rng)?;
        let &col = cols.choose(rng)?;
        Some(Point::at(row, col))
    }

    /// A sub-chamber inheriting the parent's avoided lines that fall inside
    /// it, plus the ones given.
    fn sub(
        &self,
        (top, bottom): (i32, i32),
        (left, right): (i32, i32),
        door_row: Option<i32>,
        door_col: Option<i32>,
    ) -> Chamber {
        let mut c = Chamber::new(top, bottom, left, right);
        c.avoid_rows.extend(door_row);
        c.avoid_rows
            .extend(self.avoid_rows.iter().filter(|&&r| (top..=bottom).contains(&r)));
        c.avoid_cols.extend(door_col);
        c.avoid_cols
            .extend(self.avoid_cols.iter().filter(|&&col| (left..=right).contains(&col)));
        c
    }
}

/// The four arms of the cross drawn through a chamber's centre.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Segment {
    Upper,
    Lower,
    Left,
    Right,
}

impl Segment {
    pub const ALL: [Segment; 4] = [Segment::Upper, Segment::Lower, Segment::Left, Segment::Right];

    /// Cells of this arm, excluding the centre.
    pub fn cells(self, ch: &Chamber, centre: Point) -> Vec<Point> {
        let (row, col) = (centre.row(), centre.col());
        match self {
            Segment::Upper => (ch.top..row).map(|r| Point::at(r, col)).collect(),
            Segment::Lower => (row + 1..=ch.bottom).map(|r| Point::at(r, col)).collect(),
            Segment::Left => (ch.left..col).map(|c| Point::at(row, c)).collect(),
            Segment::Right => (col + 1..=ch.right).map(|c| Point::at(row, c)).collect(),
        }
    }
}

/// One completed split, handed to the hook of [`divide`]. Only tests read
/// the fields.
#[derive(Clone, Debug)]
#[cfg_attr(not(test), allow(dead_code))]
pub(crate) struct Division {
    pub chamber: Chamber,
    pub centre: Point,
    pub closed: Segment,
    /// Indexed like [`Segment::ALL`].
    pub doors: [Option<Point>; 4],
}

/// Build a maze of barrier lines by recursive division.
///
/// Each chamber is split by one full-width and one full-height barrier line
/// through a random interior point. Three of the four resulting arms get a
/// single door; the fourth, chosen at random, stays closed. Sub-chambers at
/// least three cells tall and wide are divided in turn, never drawing a line
/// that would seal an earlier door. Runs off an explicit stack.
///
/// One step per barrier cell drawn and per door opened.
pub fn recursive_division(
    grid: &mut Grid,
    rng: &mut impl Rng,
    steps: &mut Stepper<'_>,
) -> Progress {
    divide(grid, rng, steps, &mut |_: &Division| {})
}

pub(crate) fn divide(
    grid: &mut Grid,
    rng: &mut impl Rng,
    steps: &mut Stepper<'_>,
    record: &mut dyn FnMut(&Division),
) -> Progress {
    let root = Chamber::new(0, grid.rows() - 1, 0, grid.cols() - 1);
    if !root.is_large_enough() {
        log::trace!("{}x{} grid too small to divide", grid.rows(), grid.cols());
        return Progress::Completed;
    }
    let mut stack = vec![root];

    while let Some(chamber) = stack.pop() {
        let Some(centre) = chamber.centre(rng) else {
            continue;
        };
        let (row, col) = (centre.row(), centre.col());

        let horizontal = (chamber.left..=chamber.right).map(|c| Point::at(row, c));
        let vertical = (chamber.top..=chamber.bottom)
            .filter(|&r| r != row)
            .map(|r| Point::at(r, col));
        for p in horizontal.chain(vertical) {
            if steps.cancelled() {
                return Progress::Cancelled;
            }
            grid[p].make_barrier();
            steps.emit(grid);
        }

        let closed = Segment::ALL[rng.random_range(0..Segment::ALL.len())];
        let mut doors = [None; 4];
        for (slot, seg) in doors.iter_mut().zip(Segment::ALL) {
            if seg == closed {
                continue;
            }
            let Some(&door) = seg.cells(&chamber, centre).choose(rng) else {
                continue;
            };
            if steps.cancelled() {
                return Progress::Cancelled;
            }
            grid[door].clear_barrier();
            steps.emit(grid);
            *slot = Some(door);
        }
        log::trace!(
            "divided rows {}..={} cols {}..={} at {}, {:?} closed",
            chamber.top,
            chamber.bottom,
            chamber.left,
            chamber.right,
            centre,
            closed
        );

        let [upper, lower, left, right] = doors;
        let north = (chamber.top, row - 1);
        let south = (row + 1, chamber.bottom);
        let west = (chamber.left, col - 1);
        let east = (col + 1, chamber.right);
        let subs = [
            chamber.sub(south, east, lower.map(Point::row), right.map(Point::col)),
            chamber.sub(south, west, lower.map(Point::row), left.map(Point::col)),
            chamber.sub(north, east, upper.map(Point::row), right.map(Point::col)),
            chamber.sub(north, west, upper.map(Point::row), left.map(Point::col)),
        ];

        record(&Division {
            chamber,
            centre,
            closed,
            doors,
        });

        stack.extend(subs.into_iter().filter(Chamber::is_large_enough));
    }
    Progress::Completed
}
