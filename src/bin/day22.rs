use std::io;
use std::io::prelude::*;

use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use reactor::{
    parse_instructions, run_all, Bound, BoundedReactor, CubeFlipper, Instruction,
    SignedVolumeReactor,
};

fn part1(instructions: &[Instruction]) -> Result<i128, String> {
    let span = span!(Level::INFO, "part 1");
    let _enter = span.enter();
    let mut reactor = BoundedReactor::new(Bound::INITIALISATION);
    run_all(&mut reactor, instructions);
    let count = reactor.count_cubes_on().map_err(|e| e.to_string())?;
    println!("Day 22 part 1: {} cubes are on", count);
    Ok(count)
}

fn part2(instructions: &[Instruction]) -> Result<i128, String> {
    let span = span!(Level::INFO, "part 2");
    let _enter = span.enter();
    let mut reactor = SignedVolumeReactor::new();
    run_all(&mut reactor, instructions);
    event!(
        Level::INFO,
        "{} signed cuboids after {} steps",
        reactor.len(),
        instructions.len()
    );
    let count = reactor.count_cubes_on().map_err(|e| e.to_string())?;
    println!("Day 22 part 2: {} cubes are on", count);
    Ok(count)
}

fn run() -> Result<(), String> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(e.to_string());
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let lines: Vec<String> = io::BufReader::new(io::stdin())
        .lines()
        .collect::<Result<Vec<String>, io::Error>>()
        .map_err(|e| format!("failed to read input: {}", e))?;
    let instructions: Vec<Instruction> = parse_instructions(&lines).map_err(|e| e.to_string())?;
    event!(
        Level::INFO,
        "There are {} reboot steps in the input.",
        instructions.len()
    );

    let lit_in_bound = part1(&instructions)?;
    let lit_everywhere = part2(&instructions)?;

    let bound = Bound::INITIALISATION;
    if instructions.iter().all(|inst| bound.encloses(&inst.cuboid)) && lit_in_bound != lit_everywhere
    {
        event!(
            Level::WARN,
            "every step lies inside the initialisation area, but the counts differ: {} != {}",
            lit_in_bound,
            lit_everywhere
        );
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
