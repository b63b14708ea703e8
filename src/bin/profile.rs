use std::time::Instant;

use mazery::{
    code::DEFAULT_VERSION,
    generators::new_maze,
    solvers::{Solver, SolverKind},
};

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(20);

    let mut build_time = std::time::Duration::ZERO;
    let mut solve_times = [std::time::Duration::ZERO; SolverKind::ALL.len()];
    for seed in 0..num_iters as u64 {
        let started = Instant::now();
        let Ok(mut maze) = new_maze(u8::MAX, u8::MAX, DEFAULT_VERSION, Some(seed)) else {
            eprintln!("Unknown code version {}", DEFAULT_VERSION);
            return Ok(());
        };
        build_time += started.elapsed();

        for (i, kind) in SolverKind::ALL.into_iter().enumerate() {
            let started = Instant::now();
            let solved = Solver::new(&mut maze, kind).and_then(|mut solver| solver.solve());
            if let Err(e) = solved {
                eprintln!("{} failed on maze {}: {}", kind, maze.code(), e);
            }
            solve_times[i] += started.elapsed();
        }
    }

    println!("{} mazes, build: {:?}", num_iters, build_time);
    for (kind, time) in SolverKind::ALL.iter().zip(solve_times) {
        println!("  {:<24} {:?}", kind.name(), time);
    }
    Ok(())
}
