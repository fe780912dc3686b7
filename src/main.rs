//! Cellular CLI - Run automata from JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fmt::Display;
use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use cellular::{
    compute::{Automaton, GameOfLife, LineAutomaton, Life, OneDimensional, Rule, Survey},
    schema::{AutomatonConfig, Pattern, Seed, Topology},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [epochs] [rule]", args[0]);
        eprintln!();
        eprintln!("Run a cellular automaton from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to automaton configuration file");
        eprintln!("  epochs       Number of epochs (default: 15)");
        eprintln!("  rule         Rule number; omit to survey every rule (1-D only)");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let epochs: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(15);
    let rule: Option<Rule> = args.get(3).map(|s| {
        s.parse::<u128>().map(Rule).unwrap_or_else(|e| {
            eprintln!("Error parsing rule {:?}: {}", s, e);
            std::process::exit(1);
        })
    });

    let config = AutomatonConfig::from_json_file(&config_path).unwrap_or_else(|e| fail(e));
    let seed = load_seed(&config_path);

    eprintln!("Cellular Automaton");
    eprintln!("==================");
    eprintln!(
        "{} automaton, {}x{}, interaction {}",
        config.topology,
        config.width,
        config.height,
        config.interaction()
    );
    eprintln!("Epochs: {}", epochs);

    let start = Instant::now();
    match (config.topology, rule) {
        (Topology::Moore2d, _) => run_life(&config, &seed, epochs),
        (_, Some(rule)) => run_line(&config, &seed, rule, epochs),
        (_, None) => survey(&config, &seed, epochs),
    }
    eprintln!("Time: {:.2}s", start.elapsed().as_secs_f32());
}

fn fail(error: impl Display) -> ! {
    eprintln!("Error: {}", error);
    std::process::exit(1);
}

/// Seed from `<config>.seed.json` next to the configuration, if present.
fn load_seed(config_path: &Path) -> Seed {
    let seed_path = config_path.with_extension("seed.json");
    if !seed_path.exists() {
        return Seed::default();
    }
    let seed_str = fs::read_to_string(&seed_path).unwrap_or_else(|e| {
        eprintln!("Error reading seed file: {}", e);
        std::process::exit(1);
    });
    serde_json::from_str(&seed_str).unwrap_or_else(|e| {
        eprintln!("Error parsing seed: {}", e);
        std::process::exit(1);
    })
}

fn line_automaton(config: &AutomatonConfig, seed: &Seed) -> LineAutomaton<bool> {
    let start = seed.line(config.width).unwrap_or_else(|e| fail(e));
    let previous = match (config.topology, seed.previous_line(config.width)) {
        (Topology::SecondOrder1d, Ok(None)) => Some(vec![false; config.width]),
        (Topology::SecondOrder1d, Ok(previous)) => previous,
        (_, Ok(_)) => None,
        (_, Err(e)) => fail(e),
    };
    let configuration = config
        .build_line(start, previous)
        .unwrap_or_else(|e| fail(e));
    LineAutomaton::new(Arc::new(configuration)).unwrap_or_else(|e| fail(e))
}

fn render(cells: &[bool]) -> String {
    cells.iter().map(|&c| if c { '#' } else { '.' }).collect()
}

fn print_json(value: &impl Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}

fn run_line(config: &AutomatonConfig, seed: &Seed, rule: Rule, epochs: usize) {
    let mut automaton = line_automaton(config, seed);
    let history = automaton.run(rule, epochs).unwrap_or_else(|e| fail(e));
    for state in history {
        eprintln!("  {}", render(state));
    }
    print_json(history);
}

fn survey(config: &AutomatonConfig, seed: &Seed, epochs: usize) {
    let automaton = line_automaton(config, seed);
    let configuration = automaton.configuration();
    eprintln!("Rules: {}", configuration.rule_count());

    let survey = Survey::new(Arc::clone(configuration), epochs);
    let visited = survey
        .for_each(|trial| {
            if let Some(last) = trial.history.last() {
                let live = last.iter().filter(|c| **c).count();
                println!("{:>6}  {}  live={}", trial.rule.get(), render(last), live);
            }
            ControlFlow::Continue(())
        })
        .unwrap_or_else(|e| fail(e));
    eprintln!("Surveyed {} rules", visited);
}

fn run_life(config: &AutomatonConfig, seed: &Seed, epochs: usize) {
    let grid = seed
        .grid(config.width, config.height)
        .unwrap_or_else(|e| fail(e));
    let configuration = config.build_grid(grid).unwrap_or_else(|e| fail(e));
    let mut life = Life::<bool>::new(Arc::new(configuration));

    let history = life.run(GameOfLife, epochs).unwrap_or_else(|e| fail(e)).clone();
    if life.converged() {
        eprintln!("Still life after {} epochs", history.len() - 1);
    }
    if let Some(last) = history.last() {
        eprintln!("Final grid ({} live):", last.live_count());
        for row in last.rows() {
            eprintln!("  {}", render(row));
        }
    }
    print_json(&history);
}

fn print_example_config() {
    let config = AutomatonConfig {
        topology: Topology::SecondOrder1d,
        ..Default::default()
    };
    let seed = Seed {
        pattern: Pattern::Wolfram,
        previous: Some(Pattern::Random {
            probability: 0.5,
            seed: 42,
        }),
    };

    println!("Example configuration (config.json):");
    print_json(&config);
    println!();
    println!("Example seed (config.seed.json):");
    print_json(&seed);
}
