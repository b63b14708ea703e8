use std::io::Write;

use crossterm::style::{self, Attribute, Color, Stylize};
use mazery::{
    code::DEFAULT_VERSION,
    generators::generate,
    maze::Maze,
    solvers::{SolveEvent, Solver, SolverKind},
};
use tracing_appender::non_blocking::WorkerGuard;

/// Sends logs to `mazery.log` in the working directory so they don't mix with the maze on
/// stdout. Set `DEBUG=1` for debug level logs.
fn init_logging() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", "mazery.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let level = match std::env::var("DEBUG") {
        Ok(val) if val == "1" => tracing::Level::DEBUG,
        _ => tracing::Level::INFO,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    guard
}

fn read_line(input: &mut String) -> std::io::Result<&str> {
    input.clear();
    std::io::stdin().read_line(input)?;
    Ok(input.trim())
}

fn main() -> std::io::Result<()> {
    let _guard = init_logging();
    let mut stdout = std::io::stdout();
    let mut input = String::new();

    println!("Enter maze dimensions (width height), or a maze code to rebuild a maze:");
    let answer = read_line(&mut input)?.to_string();
    let dims = answer
        .split_whitespace()
        .take(2)
        .filter_map(|s| s.parse::<u8>().ok())
        .collect::<Vec<_>>();

    let built = match dims.as_slice() {
        [width, height] => Maze::new(*width, *height, DEFAULT_VERSION, None),
        _ => Maze::from_code(&answer),
    };
    let mut maze = match built {
        Ok(maze) => maze,
        Err(e) => {
            eprintln!("Invalid maze: {}", e);
            return Ok(());
        }
    };
    generate(&mut maze);

    println!("Select maze solving algorithm (empty for a random one):");
    SolverKind::ALL
        .iter()
        .enumerate()
        .for_each(|(i, kind)| println!("{}. {}", i + 1, kind));
    let choice = read_line(&mut input)?
        .parse::<usize>()
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| SolverKind::ALL.get(i))
        .map(|kind| kind.name());

    // Count traversal events on another thread, the way a renderer would consume them
    let (event_tx, event_rx) = std::sync::mpsc::channel::<SolveEvent>();
    let counter = std::thread::spawn(move || {
        event_rx
            .iter()
            .fold((0usize, 0usize), |(steps, dead), event| match event {
                SolveEvent::Step { .. } => (steps + 1, dead),
                SolveEvent::DeadSquare(_) => (steps, dead + 1),
                SolveEvent::Path { .. } => (steps, dead),
            })
    });

    let (kind, taken, path_len) = {
        let mut solver = match Solver::from_name(&mut maze, choice) {
            Ok(solver) => solver.with_painter(event_tx),
            Err(e) => {
                eprintln!("Could not set up solver: {}", e);
                return Ok(());
            }
        };
        let taken = match solver.solve() {
            Ok(taken) => taken,
            Err(e) => {
                eprintln!("Solving failed: {}", e);
                return Ok(());
            }
        };
        (solver.kind(), taken, solver.path().len())
    };
    let (drawn_steps, dead_squares) = counter.join().unwrap_or_default();

    print!("{}", maze);
    crossterm::queue!(
        stdout,
        style::PrintStyledContent(
            format!("Maze {} solved by {}!\n", maze.code(), kind)
                .with(Color::Green)
                .attribute(Attribute::Bold)
        ),
        style::PrintStyledContent(
            format!(
                "  {} steps ({} drawn moves, {} dead squares), path of {} squares\n",
                taken, drawn_steps, dead_squares, path_len
            )
            .with(Color::Cyan)
        ),
    )?;
    stdout.flush()?;
    Ok(())
}
