use grid_search::{Algorithm, Grid, Outcome, SearchConfig, SearchEngine};

// The heuristic weight scales the Manhattan estimate used by A*. Weights above 1 make cells that
// are closer to the target (ignoring obstacles) get expanded sooner. This is Weighted A*: it tends
// to expand fewer cells but may return a longer path. BFS is shown for reference.

fn main() {
    const N: i32 = 30;
    let mut grid = Grid::new(N as usize, N as usize);
    grid.select(1, 1);
    grid.select(N - 3, N - 3);
    for i in 0..N - 6 {
        grid.set_blocked(8, i, true);
        grid.set_blocked(20, N - 1 - i, true);
    }
    println!("{}", grid);

    let configs = [
        ("BFS", SearchConfig::new(Algorithm::Bfs)),
        ("A* (1.0)", SearchConfig::new(Algorithm::AStar)),
        ("A* (1.3)", SearchConfig::new(Algorithm::AStar).with_heuristic_weight(1.3)),
        ("A* (3.0)", SearchConfig::new(Algorithm::AStar).with_heuristic_weight(3.0)),
    ];
    for (name, config) in configs {
        let mut engine = SearchEngine::new();
        engine.start(&mut grid, &config).unwrap();
        let outcome = engine.run_to_end(&mut grid).cloned();
        let expanded = engine.visited_order().len();
        match outcome {
            Some(Outcome::Found(path)) => {
                println!("{name}: path of {} cells, {expanded} expansions", path.len())
            }
            other => println!("{name}: {:?} after {expanded} expansions", other),
        }
    }
    println!("{}", grid);
}
