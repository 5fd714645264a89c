use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fitdash_core::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Widest bar drawn in text charts
const BAR_WIDTH: usize = 30;

#[derive(Parser)]
#[command(name = "fitdash")]
#[command(about = "Personal workout and body-weight dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the workout progress breakdown (default)
    Metrics {
        /// Target body weight (overrides config)
        #[arg(long)]
        target: Option<f64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log exercises and submit them in one batch
    Exercise {
        /// Date to log under (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Record calorie intake and body weight
    Weight {
        /// Calorie intake
        #[arg(long)]
        calories: u32,

        /// Current body weight (kg or lbs)
        #[arg(long)]
        body_weight: f64,

        /// Date to log under (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List exercises and their default prescriptions
    Catalog,
}

fn main() -> Result<()> {
    // Initialize logging
    fitdash_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.store.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    let catalog = config.catalog()?;
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let mut store = fitdash_core::workbook::open_existing(&data_dir)?;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Some(Commands::Metrics { target, json }) => cmd_metrics(
            &store,
            &catalog,
            target.unwrap_or_else(|| config.target_weight()),
            json,
        ),
        Some(Commands::Exercise { date }) => {
            let stdin = io::stdin();
            cmd_exercise(&mut stdin.lock(), &mut store, &catalog, date.unwrap_or(today))
        }
        Some(Commands::Weight {
            calories,
            body_weight,
            date,
        }) => cmd_weight(
            &mut store,
            BodyMetricRow {
                date: date.unwrap_or(today),
                calories,
                body_weight,
            },
        ),
        Some(Commands::Catalog) => {
            display_catalog(&catalog);
            Ok(())
        }
        None => {
            // Default to the metrics screen
            cmd_metrics(&store, &catalog, config.target_weight(), false)
        }
    }
}

// ============================================================================
// Metrics screen
// ============================================================================

fn cmd_metrics(store: &CsvWorkbook, catalog: &Catalog, target: f64, json: bool) -> Result<()> {
    let exercise = ExerciseLogTable::load(store, catalog)?;
    let body = BodyMetricTable::load(store)?;
    let report = MetricsReport::build(&exercise, &body, target);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_report(&report);
    }
    Ok(())
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.clamp(1, BAR_WIDTH))
}

fn display_report(report: &MetricsReport) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  Workout Progress Breakdown");
    println!("╰─────────────────────────────────────────╯");
    println!();

    println!("Exercise Volume");
    if report.exercise_volume.is_empty() {
        println!("  No exercises logged yet.");
    } else {
        let max = report.exercise_volume.values().copied().max().unwrap_or(0) as f64;
        let name_width = report
            .exercise_volume
            .keys()
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0);
        for (name, total) in &report.exercise_volume {
            println!(
                "  {:<width$}  {} {}",
                name,
                bar(*total as f64, max),
                total,
                width = name_width
            );
        }
    }
    println!();

    match &report.top_muscle_group {
        MuscleSummary::Top(muscle) => println!("Top Muscle Group Targeted: {}", muscle),
        MuscleSummary::NoData => println!("No muscle group data available."),
        MuscleSummary::ColumnMissing => println!("Column 'Muscle' not found in data."),
    }
    println!();

    let Some(goal) = &report.weight_goal else {
        println!("No body weight recorded yet.");
        return;
    };
    println!("Current Weight: {:.1} kg/lbs", goal.current);
    println!("Target Weight: {:.1} kg/lbs", goal.target);
    println!("Weight Left to Lose: {:.1} kg/lbs", goal.remaining);
    println!();

    println!("Weight Loss Over Time");
    let max = report
        .weight_trend
        .iter()
        .map(|(_, w)| *w)
        .fold(0.0_f64, f64::max);
    for (date, weight) in &report.weight_trend {
        println!(
            "  {}  {:>6.1}  {}",
            date.format(DATE_FORMAT),
            weight,
            bar(*weight, max)
        );
    }
}

// ============================================================================
// Exercise tracker screen
// ============================================================================

fn cmd_exercise<R: BufRead, S: TabularStore>(
    input: &mut R,
    store: &mut S,
    catalog: &Catalog,
    date: NaiveDate,
) -> Result<()> {
    println!("\nExercise Tracker 🏋️");
    println!("Date: {}", date.format(DATE_FORMAT));

    let mut buffer = PendingEntryBuffer::new();

    loop {
        println!("─────────────────────────────────────────");
        println!("  'a' add exercise   'l' list   's' submit");
        println!("  'r' reset          'q' quit");
        let Some(choice) = read_line(input, "> ")? else {
            break;
        };

        match choice.to_lowercase().as_str() {
            "" => continue,
            "a" | "add" => {
                if let Some(row) = prompt_exercise(input, catalog, date)? {
                    println!("✓ {} added!", row.exercise);
                    buffer.add(row);
                }
            }
            "l" | "list" => display_pending(&buffer),
            "s" | "submit" => match buffer.commit(store) {
                Ok(count) => println!("✓ Exercises saved! ({} logged)", count),
                Err(CommitError::EmptyBuffer) => println!("⚠ Add at least one exercise first."),
                Err(e) => {
                    println!("✗ Failed to save exercises: {}", e);
                    println!("  Your {} entries are kept; press 's' to retry.", buffer.len());
                }
            },
            "r" | "reset" => {
                let dropped = buffer.reset();
                println!("✓ Cleared {} pending exercises.", dropped);
            }
            "q" | "quit" => break,
            other => println!("Unknown choice '{}'", other),
        }
    }

    if !buffer.is_empty() {
        println!("⚠ Discarding {} unsaved exercises.", buffer.len());
    }
    Ok(())
}

fn display_pending(buffer: &PendingEntryBuffer) {
    println!("Exercises Added So Far:");
    if buffer.is_empty() {
        println!("  No exercises added yet.");
        return;
    }
    for (i, row) in buffer.list().iter().enumerate() {
        println!("  {}. {}", i + 1, row.describe());
    }
}

/// Walk the user through one entry; `None` when they give up or input ends
fn prompt_exercise<R: BufRead>(
    input: &mut R,
    catalog: &Catalog,
    date: NaiveDate,
) -> Result<Option<ExerciseLogRow>> {
    println!("Which exercise did you do?");
    let names = catalog.names();
    for (i, name) in names.iter().enumerate() {
        println!("  {}. {}", i + 1, name);
    }
    let Some(choice) = read_line(input, "Exercise: ")? else {
        return Ok(None);
    };

    let name = match choice.parse::<usize>() {
        Ok(n) if (1..=names.len()).contains(&n) => names[n - 1].to_string(),
        _ => names
            .iter()
            .find(|n| n.eq_ignore_ascii_case(&choice))
            .map(|n| n.to_string())
            .unwrap_or(choice),
    };
    let prescription = match catalog.lookup(&name) {
        Ok(p) => p,
        Err(e) => {
            println!("✗ {}", e);
            return Ok(None);
        }
    };

    let kind = prescription.measure.kind();
    let Some(amount) = prompt_count(input, kind.label(), prescription.measure.amount())? else {
        return Ok(None);
    };
    let Some(sets) = prompt_count(input, "Number of sets", prescription.sets)? else {
        return Ok(None);
    };
    let weight = read_line(input, "Weight used (kg or lbs) [Optional]: ")?.unwrap_or_default();

    Ok(Some(ExerciseLogRow::new(
        date,
        name,
        sets,
        prescription.measure.with_amount(amount),
        prescription.muscle.clone(),
        Some(&weight),
    )))
}

/// Ask for a whole number of at least 1; Enter keeps the default
fn prompt_count<R: BufRead>(input: &mut R, label: &str, default: u32) -> Result<Option<u32>> {
    loop {
        let Some(answer) = read_line(input, &format!("{} [{}]: ", label, default))? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(Some(default));
        }
        match answer.parse::<u32>() {
            Ok(n) if n >= 1 => return Ok(Some(n)),
            _ => println!("✗ Please enter a whole number of at least 1."),
        }
    }
}

/// Prompt and read one trimmed line; `None` at end of input
fn read_line<R: BufRead>(input: &mut R, prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

// ============================================================================
// Weight tracker screen
// ============================================================================

fn cmd_weight<S: TabularStore>(store: &mut S, row: BodyMetricRow) -> Result<()> {
    println!("\nWeight Tracker ⚖️");
    println!("Today is {}", row.date.format(DATE_FORMAT));

    match fitdash_core::body_metrics::submit(&row, store) {
        Ok(()) => println!("✓ Thank you!"),
        Err(e) if e.is_warning() => println!("⚠ Please enter valid values for both fields."),
        Err(e) => {
            println!("✗ Failed to save body metrics: {}", e);
            return Err(e.into());
        }
    }
    Ok(())
}

// ============================================================================
// Catalog listing
// ============================================================================

fn display_catalog(catalog: &Catalog) {
    let width = catalog
        .names()
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0);
    for entry in catalog.entries() {
        let p = &entry.prescription;
        println!(
            "  {:<width$}  {:<8} {} x {}",
            entry.name,
            p.muscle,
            p.sets,
            p.measure,
            width = width
        );
    }
}
