//! Rendering a [`Grid`] into a lattice of [`Tone`]s, and diffing two
//! renders so only changed positions are redrawn.

use gridwalk_core::{Cell, CellKind, CellState, Grid, Point, Side};

/// The colour class of one canvas position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tone {
    #[default]
    Empty,
    Start,
    End,
    Barrier,
    Frontier,
    Visited,
    Path,
    /// A standing wall segment or lattice corner.
    Wall,
    /// A maze cell the carver has not reached yet.
    Uncarved,
}

impl Tone {
    pub fn of(cell: &Cell) -> Tone {
        match cell.state() {
            CellState::Empty if cell.is_walled() && !cell.is_carved() => Tone::Uncarved,
            CellState::Empty => Tone::Empty,
            CellState::Start => Tone::Start,
            CellState::End => Tone::End,
            CellState::Barrier => Tone::Barrier,
            CellState::Frontier => Tone::Frontier,
            CellState::Visited => Tone::Visited,
            CellState::Path => Tone::Path,
        }
    }

    /// Tone of an open passage between two neighbouring cells.
    fn passage(a: Tone, b: Tone) -> Tone {
        let on_path = |t: Tone| matches!(t, Tone::Path | Tone::Start | Tone::End);
        if a == b {
            a
        } else if a == Tone::Uncarved || b == Tone::Uncarved {
            Tone::Uncarved
        } else if on_path(a) && on_path(b) {
            Tone::Path
        } else {
            Tone::Empty
        }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Tone::Empty => (255, 255, 255),
            Tone::Start => (250, 157, 0),
            Tone::End => (128, 0, 128),
            Tone::Barrier | Tone::Wall => (0, 0, 0),
            Tone::Frontier => (70, 130, 180),
            Tone::Visited => (92, 192, 219),
            Tone::Path => (255, 255, 0),
            Tone::Uncarved => (128, 128, 128),
        }
    }

    /// Plain-text stand-in, used for headless output.
    pub const fn ascii(self) -> char {
        match self {
            Tone::Empty => '.',
            Tone::Start => 'S',
            Tone::End => 'E',
            Tone::Barrier | Tone::Wall => '#',
            Tone::Frontier => '+',
            Tone::Visited => '-',
            Tone::Path => '*',
            Tone::Uncarved => '~',
        }
    }
}

/// A rendered grid.
///
/// Plain grids map one cell to one position. Walled grids render as a
/// `(2 * rows + 1) x (2 * cols + 1)` lattice: cells sit on odd coordinates,
/// wall segments between them, and corners on even coordinates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Canvas {
    width: i32,
    height: i32,
    kind: CellKind,
    tones: Vec<Tone>,
}

impl Canvas {
    pub fn render(grid: &Grid) -> Canvas {
        match grid.kind() {
            CellKind::Plain => Canvas {
                width: grid.cols(),
                height: grid.rows(),
                kind: CellKind::Plain,
                tones: grid.iter().map(Tone::of).collect(),
            },
            CellKind::Walled => Self::render_lattice(grid),
        }
    }

    fn render_lattice(grid: &Grid) -> Canvas {
        let width = 2 * grid.cols() + 1;
        let height = 2 * grid.rows() + 1;
        let mut tones = Vec::with_capacity((width * height) as usize);
        for ly in 0..height {
            for lx in 0..width {
                let (row, col) = (ly / 2, lx / 2);
                let tone = match (ly % 2 == 1, lx % 2 == 1) {
                    (true, true) => Tone::of(&grid[Point::at(row, col)]),
                    (true, false) => edge(grid, Point::at(row, col - 1), Point::at(row, col)),
                    (false, true) => edge(grid, Point::at(row - 1, col), Point::at(row, col)),
                    (false, false) => Tone::Wall,
                };
                tones.push(tone);
            }
        }
        Canvas {
            width,
            height,
            kind: CellKind::Walled,
            tones,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn get(&self, p: Point) -> Option<Tone> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        self.tones.get((p.y * self.width + p.x) as usize).copied()
    }

    /// Positions whose tone differs from `prev`. Every position is returned
    /// when the two canvases have different shapes.
    pub fn diff(&self, prev: &Canvas) -> Vec<(Point, Tone)> {
        let same_shape = self.width == prev.width && self.height == prev.height;
        self.tones
            .iter()
            .enumerate()
            .filter(|&(i, t)| !same_shape || prev.tones[i] != *t)
            .map(|(i, &t)| {
                let i = i as i32;
                (Point::new(i % self.width, i / self.width), t)
            })
            .collect()
    }

    /// The grid cell drawn at canvas position `p`, if any.
    pub fn cell_at(&self, p: Point) -> Option<Point> {
        self.get(p)?;
        match self.kind {
            CellKind::Plain => Some(Point::at(p.y, p.x)),
            CellKind::Walled if p.x % 2 == 1 && p.y % 2 == 1 => Some(Point::at(p.y / 2, p.x / 2)),
            CellKind::Walled => None,
        }
    }

    /// One line of ASCII per canvas row.
    pub fn to_text(&self) -> String {
        let mut s = String::with_capacity(self.tones.len() + self.height as usize);
        for row in self.tones.chunks(self.width.max(1) as usize) {
            s.extend(row.iter().map(|t| t.ascii()));
            s.push('\n');
        }
        s
    }
}

/// Tone of the lattice position between `a` and the cell right of or below
/// it. Either may lie outside the grid on the border.
fn edge(grid: &Grid, a: Point, b: Point) -> Tone {
    let Some(side) = Side::between(a, b) else {
        return Tone::Wall;
    };
    let (ca, cb) = (grid.get(a), grid.get(b));
    let walled = ca.is_some_and(|c| c.walls().has(side))
        || cb.is_some_and(|c| c.walls().has(side.opposite()));
    match (ca, cb) {
        (Some(ca), Some(cb)) if !walled => Tone::passage(Tone::of(ca), Tone::of(cb)),
        _ => Tone::Wall,
    }
}
