use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap},
    fmt::{self, Display},
    ops::Index,
};

use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};
use smallvec::SmallVec;

const BLANK: u32 = 0;

// Grids are stored flat in row-major order, so the derived comparisons give
// structural equality and a lexicographic total order over the cells.
// Boards of different dimension are never mixed within one solve.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<u32>,
}

impl Board {
    // caller guarantees `rows` is square and holds every value in 0..n²
    // exactly once
    pub fn new(rows: Vec<Vec<u32>>) -> Board {
        let size = rows.len();
        let cells = rows.iter().flatten().copied().collect();
        Board { size, cells }
    }

    pub fn goal(size: usize) -> Board {
        Board {
            size,
            cells: goal_values(size).collect(),
        }
    }

    pub fn random(size: usize, rng: &mut impl Rng) -> Board {
        let mut cells: Vec<u32> = (0..(size * size) as u32).collect();
        cells.shuffle(rng);
        Board { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_goal(&self) -> bool {
        self.cells.iter().copied().eq(goal_values(self.size))
    }

    // misplaced tiles, the blank not counted
    pub fn hamming(&self) -> u32 {
        self.cells
            .iter()
            .zip_eq(goal_values(self.size))
            .filter(|&(&cell, home)| cell != BLANK && cell != home)
            .count() as u32
    }

    pub fn manhattan(&self) -> u32 {
        let mut total = 0;
        for (pos, &cell) in self.cells.iter().enumerate() {
            if cell != BLANK {
                let home = (cell - 1) as usize;
                total += (pos / self.size).abs_diff(home / self.size)
                    + (pos % self.size).abs_diff(home % self.size);
            }
        }
        total as u32
    }

    // Parity of the inversion count over the row-major flattening, blank
    // excluded from the pairwise comparisons. On even-sized boards the blank
    // contributes its row index counted from the top, plus one, instead.
    pub fn is_solvable(&self) -> bool {
        let mut count = 0;
        for (i, &cell) in self.cells.iter().enumerate() {
            if cell == BLANK && self.size % 2 == 0 {
                count += i / self.size + 1;
            } else {
                count += self.cells[i + 1..]
                    .iter()
                    .filter(|&&later| later != BLANK && later < cell)
                    .count();
            }
        }
        count % 2 == 0
    }

    pub fn swap_cells(&mut self, r1: usize, c1: usize, r2: usize, c2: usize) {
        self.cells.swap(r1 * self.size + c1, r2 * self.size + c2);
    }
}

// 1..n²-1 row-major, blank last; empty for the degenerate 0×0 board
fn goal_values(size: usize) -> impl Iterator<Item = u32> {
    let cells = (size * size) as u32;
    (1..cells).chain((cells > 0).then_some(BLANK))
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            writeln!(f, "{}", row.iter().format(" "))?;
        }
        Ok(())
    }
}

impl Index<usize> for Board {
    type Output = [u32];

    fn index(&self, row: usize) -> &Self::Output {
        &self.cells[row * self.size..(row + 1) * self.size]
    }
}

// up, down, left, right
const DIRECTIONS: &[(isize, isize)] = &[(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Clone)]
pub struct Solver {
    path: Vec<Board>,
}

impl Solver {
    pub fn new(start: &Board) -> Solver {
        let mut path = Vec::new();
        if start.is_goal() {
            path.push(start.clone());
        } else if start.is_solvable() {
            let parent = search(start);

            // every state between the goal and the start has a parent link
            let mut walk = Board::goal(start.size());
            while walk != *start {
                let prev = parent[&walk].clone();
                path.push(walk);
                walk = prev;
            }
            path.push(walk);
            path.reverse();
        }
        Solver { path }
    }

    pub fn moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn path(&self) -> &[Board] {
        &self.path
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Board> {
        self.path.iter()
    }
}

impl<'a> IntoIterator for &'a Solver {
    type Item = &'a Board;
    type IntoIter = std::slice::Iter<'a, Board>;

    fn into_iter(self) -> Self::IntoIter {
        self.path.iter()
    }
}

impl IntoIterator for Solver {
    type Item = Board;
    type IntoIter = std::vec::IntoIter<Board>;

    fn into_iter(self) -> Self::IntoIter {
        self.path.into_iter()
    }
}

// Best-first expansion until the goal is popped; returns the parent links.
// A neighbor's priority is `hamming + manhattan` of the board being expanded
// plus the neighbor's tentative cost, ties broken by the board ordering.
// The heap may hold several entries for one board at different priorities;
// the cost map keeps the best known value.
fn search(start: &Board) -> HashMap<Board, Board> {
    let mut parent = HashMap::new();
    let mut cost = HashMap::new();
    let mut frontier = BinaryHeap::new();

    let mut current = start.clone();
    cost.insert(current.clone(), 0u32);
    while !current.is_goal() {
        let (row, col) = blank_position(&current);
        let next_cost = cost[&current] + 1;
        let estimate = current.hamming() + current.manhattan();

        for &(r, c) in &blank_targets(&current, row, col) {
            let mut neighbor = current.clone();
            neighbor.swap_cells(row, col, r, c);
            if cost.get(&neighbor).map_or(true, |&known| known > next_cost) {
                parent.insert(neighbor.clone(), current.clone());
                cost.insert(neighbor.clone(), next_cost);
                frontier.push(Reverse((estimate + next_cost, neighbor)));
            }
        }

        // a solvable board keeps the frontier non-empty until the goal pops
        let Some(Reverse((_, next))) = frontier.pop() else {
            break;
        };
        current = next;
    }
    parent
}

fn blank_position(board: &Board) -> (usize, usize) {
    let mut blank = (0, 0);
    for i in 0..board.size() {
        for j in 0..board.size() {
            if board[i][j] == BLANK {
                blank = (i, j);
            }
        }
    }
    blank
}

fn blank_targets(board: &Board, row: usize, col: usize) -> SmallVec<[(usize, usize); 4]> {
    let size = board.size() as isize;
    let mut targets = SmallVec::new();
    for &(di, dj) in DIRECTIONS {
        let i = row as isize + di;
        let j = col as isize + dj;
        if (0..size).contains(&i) && (0..size).contains(&j) {
            targets.push((i as usize, j as usize));
        }
    }
    targets
}
