//! Perfect-maze generation by randomized depth-first carving.

use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use tracing::debug;

pub const MIN_SIDE: usize = 5;
pub const START: Pos = Pos { x: 1, y: 1 };

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Path,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Vec<Tile>>,
}

impl Grid {
    fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![tile; width]; height],
        }
    }

    /// Builds a grid from text rows: `#` is a wall, `.` or a space is a path.
    pub fn parse(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        check_dimensions(width, height)?;

        let mut tiles = Vec::with_capacity(height);
        for (y, row) in rows.iter().enumerate() {
            let mut line = Vec::with_capacity(width);
            for (x, ch) in row.chars().enumerate() {
                let tile = match ch {
                    '#' => Tile::Wall,
                    '.' | ' ' => Tile::Path,
                    other => {
                        return Err(Error::Layout(format!(
                            "unexpected {:?} at ({}, {})",
                            other, x, y
                        )))
                    }
                };
                line.push(tile);
            }
            if line.len() != width {
                return Err(Error::Layout(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    line.len(),
                    width
                )));
            }
            tiles.push(line);
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn tile(&self, pos: Pos) -> Option<Tile> {
        self.tiles.get(pos.y).and_then(|row| row.get(pos.x)).copied()
    }

    pub fn is_path(&self, pos: Pos) -> bool {
        self.tile(pos) == Some(Tile::Path)
    }

    /// Goal cell for a grid of this size: the bottom-right room.
    pub fn goal(&self) -> Pos {
        Pos::new(self.width - 2, self.height - 2)
    }

    /// One cell over in `dir`, or `None` when that leaves the grid.
    pub fn neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        offset(pos, dir, 1).filter(|p| self.in_bounds(*p))
    }

    fn set(&mut self, pos: Pos, tile: Tile) {
        self.tiles[pos.y][pos.x] = tile;
    }

    pub fn path_count(&self) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&t| t == Tile::Path)
            .count()
    }

    /// Path cells on the odd lattice.
    pub fn room_count(&self) -> usize {
        self.count_path_where(|x, y| x % 2 == 1 && y % 2 == 1)
    }

    /// Path cells joining two rooms: exactly one odd coordinate.
    pub fn passage_count(&self) -> usize {
        self.count_path_where(|x, y| (x % 2 == 1) != (y % 2 == 1))
    }

    fn count_path_where(&self, pred: impl Fn(usize, usize) -> bool) -> usize {
        let mut count = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.tiles[y][x] == Tile::Path && pred(x, y) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Breadth-first reachability over path cells.
    pub fn flood(&self, start: Pos) -> Vec<Vec<bool>> {
        let mut seen = vec![vec![false; self.width]; self.height];
        if !self.is_path(start) {
            return seen;
        }
        let mut q = VecDeque::new();
        seen[start.y][start.x] = true;
        q.push_back(start);
        while let Some(pos) = q.pop_front() {
            for dir in Dir::ALL {
                let Some(next) = self.neighbor(pos, dir) else {
                    continue;
                };
                if seen[next.y][next.x] || !self.is_path(next) {
                    continue;
                }
                seen[next.y][next.x] = true;
                q.push_back(next);
            }
        }
        seen
    }

    pub fn reachable_count(&self, start: Pos) -> usize {
        self.flood(start)
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&s| s)
            .count()
    }
}

/// Reads a hand-made level. Start and goal must both be open.
pub fn load_layout(text: &str) -> Result<Grid> {
    let rows: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
    let grid = Grid::parse(&rows)?;
    for (what, pos) in [("start", START), ("goal", grid.goal())] {
        if !grid.is_path(pos) {
            return Err(Error::Layout(format!(
                "{} ({}, {}) is a wall",
                what, pos.x, pos.y
            )));
        }
    }
    Ok(grid)
}

pub fn offset(pos: Pos, dir: Dir, distance: usize) -> Option<Pos> {
    let (dx, dy) = dir.delta();
    let d = distance as isize;
    let nx = pos.x as isize + dx * d;
    let ny = pos.y as isize + dy * d;
    if nx < 0 || ny < 0 {
        return None;
    }
    Some(Pos::new(nx as usize, ny as usize))
}

pub fn check_dimensions(width: usize, height: usize) -> Result<()> {
    for (axis, value) in [("width", width), ("height", height)] {
        if value < MIN_SIDE || value % 2 == 0 {
            return Err(Error::InvalidDimension {
                axis,
                value,
                min: MIN_SIDE,
            });
        }
    }
    Ok(())
}

pub fn generate(width: usize, height: usize, rng: &mut impl Rng) -> Result<Grid> {
    check_dimensions(width, height)?;

    let mut grid = Grid::filled(width, height, Tile::Wall);
    let mut stack = vec![START];
    grid.set(START, Tile::Path);

    let mut candidates: Vec<(Pos, Pos)> = Vec::with_capacity(4);
    while let Some(&top) = stack.last() {
        candidates.clear();
        for dir in Dir::ALL {
            let (Some(between), Some(room)) = (offset(top, dir, 1), offset(top, dir, 2)) else {
                continue;
            };
            if grid.tile(room) == Some(Tile::Wall) {
                candidates.push((between, room));
            }
        }

        match candidates.choose(rng) {
            Some(&(between, room)) => {
                grid.set(between, Tile::Path);
                grid.set(room, Tile::Path);
                stack.push(room);
            }
            None => {
                stack.pop();
            }
        }
    }

    // Always reachable on odd grids; forced anyway so the goal is never a wall.
    let goal = grid.goal();
    grid.set(goal, Tile::Path);

    debug!(
        width,
        height,
        rooms = grid.room_count(),
        passages = grid.passage_count(),
        "maze generated"
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_path_cell_is_reachable_from_start() {
        for seed in 0..40u64 {
            for (w, h) in [(5, 5), (7, 5), (5, 9), (21, 21), (31, 15)] {
                let mut rng = StdRng::seed_from_u64(seed);
                let grid = generate(w, h, &mut rng).unwrap();
                assert_eq!(
                    grid.reachable_count(START),
                    grid.path_count(),
                    "seed {} size {}x{}",
                    seed,
                    w,
                    h
                );
            }
        }
    }

    #[test]
    fn carving_forms_a_spanning_tree() {
        for seed in 0..40u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate(15, 11, &mut rng).unwrap();
            assert_eq!(grid.room_count(), 7 * 5);
            assert_eq!(grid.room_count(), grid.passage_count() + 1);
            assert_eq!(grid.path_count(), grid.room_count() + grid.passage_count());
        }
    }

    #[test]
    fn goal_is_always_open() {
        for seed in 0..60u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate(9, 7, &mut rng).unwrap();
            assert_eq!(grid.goal(), Pos::new(7, 5));
            assert!(grid.is_path(grid.goal()));
        }
    }

    #[test]
    fn small_maze_connects_start_to_goal_without_cycles() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generate(5, 5, &mut rng).unwrap();
        let seen = grid.flood(START);
        assert!(seen[3][3]);
        assert_eq!(grid.reachable_count(START), grid.path_count());
        // 4 rooms joined by 3 passages.
        assert_eq!(grid.path_count(), 7);
    }

    #[test]
    fn border_stays_solid() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = generate(11, 9, &mut rng).unwrap();
        for x in 0..grid.width() {
            assert_eq!(grid.tile(Pos::new(x, 0)), Some(Tile::Wall));
            assert_eq!(grid.tile(Pos::new(x, 8)), Some(Tile::Wall));
        }
        for y in 0..grid.height() {
            assert_eq!(grid.tile(Pos::new(0, y)), Some(Tile::Wall));
            assert_eq!(grid.tile(Pos::new(10, y)), Some(Tile::Wall));
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate(21, 21, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = generate(21, 21, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_even_or_small_dimensions() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            generate(6, 7, &mut rng),
            Err(Error::InvalidDimension { axis: "width", value: 6, .. })
        ));
        assert!(matches!(
            generate(7, 8, &mut rng),
            Err(Error::InvalidDimension { axis: "height", value: 8, .. })
        ));
        assert!(matches!(
            generate(3, 7, &mut rng),
            Err(Error::InvalidDimension { axis: "width", value: 3, .. })
        ));
    }

    #[test]
    fn parse_reads_walls_and_paths() {
        let grid = Grid::parse(&["#####", "#.#.#", "#...#", "#.#.#", "#####"]).unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.tile(Pos::new(2, 1)), Some(Tile::Wall));
        assert_eq!(grid.tile(Pos::new(1, 2)), Some(Tile::Path));
        assert_eq!(grid.tile(Pos::new(5, 0)), None);
    }

    #[test]
    fn load_layout_skips_blank_lines_and_checks_endpoints() {
        let grid = load_layout("#####\n#...#\r\n#.#.#\n#...#\n#####\n\n").unwrap();
        assert_eq!((grid.width(), grid.height()), (5, 5));
        assert!(grid.is_path(grid.goal()));

        let err = load_layout("#####\n#...#\n#.#.#\n#..##\n#####\n").unwrap_err();
        assert!(err.to_string().contains("goal"));
        assert!(matches!(load_layout("####\n#..#\n#..#\n####\n"), Err(Error::InvalidDimension { .. })));
    }

    #[test]
    fn parse_rejects_ragged_rows_and_unknown_glyphs() {
        assert!(matches!(
            Grid::parse(&["#####", "#..#", "#...#", "#...#", "#####"]),
            Err(Error::Layout(_))
        ));
        assert!(matches!(
            Grid::parse(&["#####", "#.x.#", "#...#", "#...#", "#####"]),
            Err(Error::Layout(_))
        ));
    }
}
