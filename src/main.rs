use npuzzle_solver::{Board, Solver};

// Each entry is a complete start grid: the values 0..n²-1 with 0 as the
// blank. The fourth one is unsolvable (two tiles transposed).
const EXAMPLES: &[[[u32; 3]; 3]] = &[
    [[1, 2, 3], [4, 5, 6], [7, 0, 8]],
    [[0, 1, 3], [4, 2, 5], [7, 8, 6]],
    [[8, 1, 3], [4, 0, 2], [7, 6, 5]],
    [[2, 1, 3], [4, 5, 6], [7, 8, 0]],
    [[1, 2, 3], [4, 5, 6], [7, 8, 0]],
];

fn main() {
    for grid in EXAMPLES {
        report(&Board::new(grid.iter().map(|row| row.to_vec()).collect()));
    }

    report(&Board::random(3, &mut rand::thread_rng()));
}

fn report(board: &Board) {
    println!("----");
    println!("Start:");
    println!("{}", board);

    let solver = Solver::new(board);
    if solver.path().is_empty() {
        println!("No solution");
    } else if solver.moves() == 0 {
        println!("Already solved");
    } else {
        println!("Solved in {} moves:", solver.moves());
        println!();
        for state in &solver {
            println!("{}", state);
        }
    }
}
