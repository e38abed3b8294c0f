//! Command line driver for the sparse Game of Life engine

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_of_life_sparse::{
    advance,
    config::{CliOverrides, Settings},
    game_of_life::{create_example_patterns, load_grid_from_file, save_grid_to_file},
    utils::{ColorOutput, GridFormatter},
    Position,
};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "game_of_life_sparse")]
#[command(about = "Sparse Game of Life on an unbounded lattice")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Advance a pattern by one generation
    Step {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Pattern file (overrides config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Where to write the next generation (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Lattice x of the pattern's first column (overrides config)
        #[arg(long, allow_hyphen_values = true, requires = "origin_y")]
        origin_x: Option<i64>,

        /// Lattice y of the pattern's first row (overrides config)
        #[arg(long, allow_hyphen_values = true, requires = "origin_x")]
        origin_y: Option<i64>,

        /// Evaluate candidate cells on the rayon pool
        #[arg(long)]
        parallel: bool,
    },

    /// Render a pattern with coordinates and statistics
    Show {
        /// Pattern file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Report the state of a single cell
    Query {
        /// Pattern file
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, allow_hyphen_values = true)]
        x: i64,

        #[arg(short, long, allow_hyphen_values = true)]
        y: i64,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_report(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Step {
            config,
            input,
            output,
            origin_x,
            origin_y,
            parallel,
        } => {
            let origin = origin_x.zip(origin_y).map(|(x, y)| Position::new(x, y));
            let overrides = CliOverrides {
                pattern_file: input,
                origin,
                output_file: output,
                parallel,
            };
            step_command(&config, &overrides)
        }
        Commands::Show { input } => show_command(&input),
        Commands::Query { input, x, y } => query_command(&input, Position::new(x, y)),
        Commands::Setup { directory, force } => setup_command(&directory, force),
    }
}

/// Error line with the whole context chain
fn error_report(err: &anyhow::Error) -> String {
    ColorOutput::error(&format!("Error: {:#}", err))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn step_command(config_path: &Path, overrides: &CliOverrides) -> Result<()> {
    let mut settings = load_settings(config_path)?;
    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;
    debug!("settings: {:?}", settings);

    let grid = load_grid_from_file(&settings.input.pattern_file, settings.input.origin)?;
    info!(
        "loaded {} living cells from {}",
        grid.living_count(),
        settings.input.pattern_file.display()
    );

    let start_time = Instant::now();
    let next = advance(&grid, &settings);
    info!(
        "advanced one generation in {:.3}ms",
        start_time.elapsed().as_secs_f64() * 1000.0
    );

    println!("{}", ColorOutput::info("Next generation:"));
    print!("{}", GridFormatter::format_grid(&next, &settings.output));
    print!("{}", GridFormatter::format_statistics(&next));

    if let Some(ref output_file) = settings.output.file {
        save_grid_to_file(&next, output_file, settings.output.format)
            .context("Failed to save next generation")?;
        println!(
            "{}",
            ColorOutput::success(&format!("Saved to {}", output_file.display()))
        );
    }

    Ok(())
}

fn show_command(input: &Path) -> Result<()> {
    let grid = load_grid_from_file(input, Position::new(0, 0))?;

    println!("{}", ColorOutput::info(&format!("Pattern {}:", input.display())));
    print!("{}", GridFormatter::format_grid_with_coords(&grid));
    print!("{}", GridFormatter::format_statistics(&grid));

    Ok(())
}

fn query_command(input: &Path, position: Position) -> Result<()> {
    let grid = load_grid_from_file(input, Position::new(0, 0))?;
    println!("{}", GridFormatter::format_cell(&grid, &position));
    Ok(())
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let pattern_dir = directory.join("patterns");

    for dir in [&config_dir, &pattern_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&pattern_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", pattern_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("Next: cargo run -- step --config {}", config_path.display());

    Ok(())
}
