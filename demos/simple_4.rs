use grid_search::{Algorithm, Grid, Outcome, SearchConfig, SearchEngine, StepEvent};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  T|
//  ___
// where
// - # marks an obstacle
// - S marks the source
// - T marks the target
//
// Cells have a 4-neighborhood and every step of the search is printed.

fn main() {
    let mut grid = Grid::new(3, 3);
    grid.select(0, 0);
    grid.select(2, 2);
    grid.set_blocked(1, 1, true);
    println!("{}", grid);

    let mut engine = SearchEngine::new();
    engine
        .start(&mut grid, &SearchConfig::new(Algorithm::Bfs))
        .unwrap();
    while let Some(step) = engine.step(&mut grid) {
        for event in &step.events {
            match event {
                StepEvent::Expanded { cell, .. } => println!("Expanded {}", cell),
                StepEvent::Found { path } => println!("Found {:?}", path),
                StepEvent::PathStep { cell, index } => println!("Path step {}: {}", index, cell),
                _ => {}
            }
        }
        println!("{}", grid);
    }
    if let Some(Outcome::Found(path)) = engine.outcome() {
        println!("Path:");
        for id in path {
            println!("{:?}", grid.cell(*id).unwrap().point());
        }
    }
}
