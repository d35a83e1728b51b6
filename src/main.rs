//! windkit CLI - G-code generation for filament winding
//!
//! Reads a wind schedule and a machine configuration, plans the toolpath
//! and writes the program.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use windkit::{
    describe_layer, init_logging, MachineConfig, Schedule, WindCalculator, WindProgramGenerator,
    BUILD_DATE, DEFAULT_OUTPUT, VERSION,
};

#[derive(Parser)]
#[command(name = "windkit")]
#[command(about = "G-code generator for filament winding machines", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a G-code program from a wind schedule
    Generate {
        /// Wind schedule (.wind JSON)
        schedule: PathBuf,
        /// Machine configuration (.toml or .json)
        #[arg(short, long)]
        machine: PathBuf,
        /// Output file
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Feed rate to use instead of the schedule's default
        #[arg(long)]
        feed_rate: Option<f64>,
        /// Fail when any move or layer was skipped
        #[arg(long)]
        strict: bool,
    },
    /// Circuit count and valid start counts for a helical layer
    Calculate {
        /// Mandrel diameter (in)
        #[arg(long)]
        diameter: f64,
        /// Tow width (in)
        #[arg(long)]
        tow_width: f64,
        /// Wind angle (degrees from the mandrel axis)
        #[arg(long)]
        angle: f64,
    },
    /// Display the layers of a wind schedule
    Info {
        /// Wind schedule (.wind JSON)
        schedule: PathBuf,
    },
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            schedule,
            machine,
            output,
            feed_rate,
            strict,
        } => generate(&schedule, &machine, &output, feed_rate, strict)?,
        Commands::Calculate {
            diameter,
            tow_width,
            angle,
        } => calculate(diameter, tow_width, angle)?,
        Commands::Info { schedule } => show_info(&schedule)?,
    }

    Ok(())
}

fn generate(
    schedule_path: &Path,
    machine_path: &Path,
    output: &Path,
    feed_rate: Option<f64>,
    strict: bool,
) -> Result<()> {
    tracing::info!("windkit {} (built {})", VERSION, BUILD_DATE);

    let schedule = Schedule::load_from_file(schedule_path)
        .with_context(|| format!("Failed to load schedule {}", schedule_path.display()))?;
    let config = MachineConfig::load_from_file(machine_path)
        .with_context(|| format!("Failed to load machine config {}", machine_path.display()))?;

    for (index, layer) in schedule.indexed_layers() {
        println!("{}", describe_layer(index, layer));
    }

    let mut generator = WindProgramGenerator::new(&schedule, &config);
    if let Some(feed_rate) = feed_rate {
        generator = generator.with_feed_rate(feed_rate);
    }
    let program = generator.generate();

    program
        .write_to_file(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "Wrote {} lines of G-code to {}",
        program.gcode.len(),
        output.display()
    );

    for diagnostic in &program.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }

    if strict && !program.is_clean() {
        anyhow::bail!(
            "{} diagnostics reported; the program may not match the schedule",
            program.diagnostics.len()
        );
    }

    Ok(())
}

fn calculate(diameter: f64, tow_width: f64, angle: f64) -> Result<()> {
    let calc = WindCalculator::calculate(diameter, tow_width, angle)?;

    println!("Circuits: {}", calc.num_circuits);
    let starts: Vec<String> = calc
        .valid_start_counts
        .iter()
        .map(|s| s.to_string())
        .collect();
    println!("Valid start counts: {}", starts.join(", "));

    Ok(())
}

fn show_info(schedule_path: &Path) -> Result<()> {
    let schedule = Schedule::load_from_file(schedule_path)
        .with_context(|| format!("Failed to load schedule {}", schedule_path.display()))?;

    println!("Wind length: {}", schedule.length);
    println!("Default feed rate: {}", schedule.default_feed_rate);
    println!("Layers: {}", schedule.len());
    for (index, layer) in schedule.indexed_layers() {
        println!("  {}", describe_layer(index, layer));
    }
    for warning in &schedule.warnings {
        println!("  warning: {}", warning);
    }

    Ok(())
}
