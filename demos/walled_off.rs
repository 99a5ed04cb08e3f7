use std::ops::ControlFlow;

use grid_search::{Algorithm, Outcome, SearchConfig, Session, SessionConfig};

// The target is enclosed by a ring of blocked cells, so every open cell reachable from the
// source is expanded before the search reports that the frontier is exhausted.
//  _______
// |S      |
// |  ###  |
// |  #T#  |
// |  ###  |
// |       |
//  _______

fn main() {
    let config = SessionConfig::default()
        .with_size(5, 7)
        .with_search(SearchConfig::default().with_delays(20, 20));
    let mut session = Session::new(config);
    session.select(0, 0).unwrap();
    session.select(2, 3).unwrap();
    for (row, col) in [(1, 2), (1, 3), (1, 4), (2, 2), (2, 4), (3, 2), (3, 3), (3, 4)] {
        session.set_blocked(row, col, true).unwrap();
    }
    session.start(Algorithm::AStar).unwrap();
    let outcome = session.play(|step, grid| {
        println!("{:?}\n{}", step.kinds(), grid);
        ControlFlow::Continue(())
    });
    match outcome {
        Some(Outcome::Exhausted) => println!(
            "No path, {} cells expanded",
            session.engine().visited_order().len()
        ),
        other => println!("{:?}", other),
    }
}
