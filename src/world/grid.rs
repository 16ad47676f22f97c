//! Grid coordinates, cell content flags, and the agent-side knowledge map.

/// Cell coordinate (row `i`, column `j`) in an N x N grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub i: usize,
    pub j: usize,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { i: 0, j: 0 };

    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    /// Manhattan distance between two coordinates.
    pub fn manhattan_distance(&self, other: &Coord) -> usize {
        self.i.abs_diff(other.i) + self.j.abs_diff(other.j)
    }

    /// True when `other` is exactly one orthogonal step away.
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// In-bounds 4-connected neighbors, in fixed (down, up, right, left)
    /// order. Deterministic order keeps exploration and planning
    /// reproducible.
    pub fn neighbors(&self, n: usize) -> Vec<Coord> {
        let mut result = Vec::with_capacity(4);
        if self.i + 1 < n {
            result.push(Coord::new(self.i + 1, self.j));
        }
        if self.i > 0 {
            result.push(Coord::new(self.i - 1, self.j));
        }
        if self.j + 1 < n {
            result.push(Coord::new(self.i, self.j + 1));
        }
        if self.j > 0 {
            result.push(Coord::new(self.i, self.j - 1));
        }
        result
    }
}

/// Observable content of a single cell as an explicit tagged set of boolean
/// flags. Stench and breeze are derived auras; wumpus, pit and gold are
/// placed content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellContent {
    pub wumpus: bool,
    pub pit: bool,
    pub gold: bool,
    pub stench: bool,
    pub breeze: bool,
}

impl CellContent {
    pub const EMPTY: CellContent = CellContent {
        wumpus: false,
        pit: false,
        gold: false,
        stench: false,
        breeze: false,
    };

    /// True when standing here is fatal.
    pub fn is_hazard(&self) -> bool {
        self.wumpus || self.pit
    }

    /// True when this cell warns of an adjacent hazard.
    pub fn is_ominous(&self) -> bool {
        self.stench || self.breeze
    }
}

/// Agent-side map of revealed cells. Cells start unknown and are revealed
/// by percept readings; a revealed cell stores the content observed at that
/// time.
#[derive(Clone, Debug)]
pub struct Knowledge {
    n: usize,
    cells: Vec<Option<CellContent>>,
}

impl Knowledge {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![None; n * n],
        }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    /// Observed content of `c`, or `None` when the cell is unrevealed or
    /// out of bounds.
    pub fn get(&self, c: Coord) -> Option<CellContent> {
        if c.i >= self.n || c.j >= self.n {
            return None;
        }
        self.cells[c.i * self.n + c.j]
    }

    pub fn reveal(&mut self, c: Coord, content: CellContent) {
        debug_assert!(c.i < self.n && c.j < self.n);
        self.cells[c.i * self.n + c.j] = Some(content);
    }

    /// Number of revealed cells.
    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate over revealed cells and their observed content.
    pub fn revealed(&self) -> impl Iterator<Item = (Coord, CellContent)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, c)| {
            c.map(|content| (Coord::new(idx / self.n, idx % self.n), content))
        })
    }
}
