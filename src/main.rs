//! Shape Grammar CLI
//!
//! Usage:
//!   shape-grammar [OPTIONS] [FILE]
//!
//! Options:
//!   --validate      Report advisory diagnostics for the rule
//!   --strict        Refuse to subdivide a rule with diagnostics
//!   -v, --verbose   Log subdivision steps to stderr
//!   -h, --help      Print help

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shape_grammar::{subdivide, DivideConfig, Scene, Shape};

#[derive(Parser)]
#[command(name = "shape-grammar")]
#[command(about = "Apply a shape grammar divide rule to a parent scope")]
struct Cli {
    /// Scene file in TOML format (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Report advisory diagnostics for the rule
    #[arg(long)]
    validate: bool,

    /// Refuse to subdivide a rule that has diagnostics
    #[arg(long)]
    strict: bool,

    /// Log subdivision steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "shape_grammar=trace"
    } else {
        "shape_grammar=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let scene = match &cli.input {
        Some(path) => match Scene::from_file(path) {
            Ok(scene) => scene,
            Err(e) => {
                eprintln!("Error loading scene '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            match buffer.parse::<Scene>() {
                Ok(scene) => scene,
                Err(e) => {
                    eprintln!("Error loading scene: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let config = DivideConfig::new()
        .with_validation(cli.validate)
        .with_strict(cli.strict);

    if let Some(name) = &scene.name {
        println!("# {}", name);
    }
    println!("{}", scene.rule);

    // diagnostics are logged at warn level by subdivide
    match subdivide(&scene.rule, &config) {
        Ok(children) => {
            for (index, child) in children.iter().enumerate() {
                println!("{}", describe(index, child));
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn describe(index: usize, child: &Shape) -> String {
    let reference = match child.name() {
        Some(name) => name.to_string(),
        None => "<divide>".to_string(),
    };
    let extent = child.extent();
    let offset = child.transform().translation();
    format!(
        "{:>3}  {:<12} extent=({}, {}, {})  offset=({}, {}, {})",
        index, reference, extent.x, extent.y, extent.z, offset.x, offset.y, offset.z
    )
}

fn print_intro() {
    println!(
        r#"Shape Grammar - apply a divide rule to a parent scope

USAGE:
    shape-grammar [OPTIONS] [FILE]
    cat scene.toml | shape-grammar

OPTIONS:
    --validate       Report advisory diagnostics
    --strict         Refuse rules with diagnostics
    -v, --verbose    Log subdivision steps
    -h, --help       Print help

SCENE FORMAT:
    [parent]
    extent = [100, 40, 8]

    [rule]
    direction = "X"

    [[rule.args]]
    size = 30          # absolute
    leaf = "door"

    [[rule.args]]
    size = "70%"       # relative
    symbol = "wall""#
    );
}
