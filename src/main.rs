use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::{error, warn};

use kcalrs::config::AppConfig;
use kcalrs::error::{ErrorSeverity, Result};
use kcalrs::logging::{init_logging, LogLevel};
use kcalrs::store::WeightStore;
use kcalrs::trend::DEFAULT_WINDOW_DAYS;
use kcalrs::{
    calculate_bmr, calculate_breakdown, calculate_weight_trend, goal_calories, sparkline_points,
    step_details, summarize, BreakdownInput, Gender, Goal, KcalError, SparklineOptions,
    WeightSummary, WeightTrend,
};

/// kcal - Daily energy expenditure and weight trend CLI
///
/// Estimates basal metabolic rate, step and session calories, composes a
/// per-day expenditure breakdown, and tracks bodyweight trend over time.
#[derive(Parser)]
#[command(name = "kcal")]
#[command(author = "kcalrs Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Daily energy expenditure and weight trend CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate basal metabolic rate from the configured profile
    Bmr {
        /// Age in years (overrides config)
        #[arg(long)]
        age: Option<f64>,

        /// Weight in kg (overrides config)
        #[arg(long)]
        weight: Option<f64>,

        /// Height in cm (overrides config)
        #[arg(long)]
        height: Option<f64>,

        /// Gender: male, female or other (overrides config)
        #[arg(long, value_parser = parse_gender)]
        gender: Option<Gender>,
    },

    /// Parse a step-range token and estimate its calories
    Steps {
        /// Step bucket token, e.g. "<10k", "14k", "10k-12k", ">20k"
        token: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compose the full daily expenditure breakdown
    Breakdown {
        /// Step bucket token for the day
        #[arg(short, long, default_value = "")]
        steps: String,

        /// Treat the day as a training day
        #[arg(short, long)]
        training_day: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a goal adjustment to an expenditure total
    Goal {
        /// Total daily expenditure in kcal
        tdee: f64,

        /// Goal key (defaults to the configured goal)
        #[arg(short, long)]
        goal: Option<String>,
    },

    /// Manage the bodyweight log
    Weight {
        #[command(subcommand)]
        command: WeightCommands,
    },

    /// Manage application configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum WeightCommands {
    /// Record a measurement (replaces any entry on the same date)
    Log {
        /// Measurement date, YYYY-MM-DD
        #[arg(value_parser = parse_cli_date)]
        date: NaiveDate,

        /// Body weight in kilograms
        weight: f64,
    },

    /// List logged entries
    List {
        /// Show only the most recent N entries
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Import entries from a date,weight CSV file
    Import {
        /// Input CSV path
        file: PathBuf,
    },

    /// Export entries to a date,weight CSV file
    Export {
        /// Output CSV path
        file: PathBuf,
    },

    /// Analyze the recent weight trend
    Trend {
        /// Analysis window in days
        #[arg(short, long, default_value_t = DEFAULT_WINDOW_DAYS)]
        window: u32,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate sparkline geometry for the recent entries
    Sparkline {
        /// Plot width in pixels
        #[arg(long, default_value_t = 320.0)]
        width: f64,

        /// Plot height in pixels
        #[arg(long, default_value_t = 96.0)]
        height: f64,

        /// Plot padding in pixels
        #[arg(long, default_value_t = 8.0)]
        padding: f64,

        /// Most recent entries to include
        #[arg(short, long, default_value_t = 30)]
        limit: usize,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Print the active configuration
    Show,

    /// Print the config file location
    Path,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };

    let mut log_config = config.log.clone();
    if cli.verbose > 0 {
        log_config.level = LogLevel::from_verbosity(cli.verbose);
    }
    init_logging(&log_config)?;

    if let Err(err) = run(&config, cli.command) {
        match err.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                error!(error = %err, "Command failed")
            }
            _ => warn!(error = %err, "Command failed"),
        }
        eprintln!("{} {}", "error:".red().bold(), err.user_message());
        std::process::exit(1);
    }
    Ok(())
}

fn run(config: &AppConfig, command: Commands) -> Result<()> {
    match command {
        Commands::Bmr {
            age,
            weight,
            height,
            gender,
        } => cmd_bmr(config, age, weight, height, gender),
        Commands::Steps { token, json } => cmd_steps(config, &token, json),
        Commands::Breakdown {
            steps,
            training_day,
            json,
        } => cmd_breakdown(config, &steps, training_day, json),
        Commands::Goal { tdee, goal } => cmd_goal(config, tdee, goal),
        Commands::Weight { command } => match command {
            WeightCommands::Log { date, weight } => cmd_weight_log(config, date, weight),
            WeightCommands::List { limit } => cmd_weight_list(config, limit),
            WeightCommands::Import { file } => cmd_weight_import(config, &file),
            WeightCommands::Export { file } => cmd_weight_export(config, &file),
            WeightCommands::Trend { window, json } => cmd_weight_trend(config, window, json),
            WeightCommands::Sparkline {
                width,
                height,
                padding,
                limit,
                json,
            } => cmd_weight_sparkline(config, width, height, padding, limit, json),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Init { force } => cmd_config_init(force),
            ConfigCommands::Show => cmd_config_show(config),
            ConfigCommands::Path => cmd_config_path(),
        },
    }
}

fn cmd_bmr(
    config: &AppConfig,
    age: Option<f64>,
    weight: Option<f64>,
    height: Option<f64>,
    gender: Option<Gender>,
) -> Result<()> {
    let mut profile = config.user.profile.clone();
    if let Some(age) = age {
        profile.age = age;
    }
    if let Some(weight) = weight {
        profile.weight_kg = weight;
    }
    if let Some(height) = height {
        profile.height_cm = height;
    }
    if let Some(gender) = gender {
        profile.gender = gender;
    }

    let bmr = calculate_bmr(&profile);
    println!("{}", "Basal Metabolic Rate".blue().bold());
    println!(
        "  Profile: {:.0} y, {:.1} kg, {:.1} cm, {}",
        profile.age, profile.weight_kg, profile.height_cm, profile.gender
    );
    if bmr.is_finite() {
        println!("  BMR: {} kcal/day", format!("{:.0}", bmr).bold());
    } else {
        println!(
            "{}",
            "  BMR is undefined for this profile (non-finite input)".yellow()
        );
    }
    Ok(())
}

fn cmd_steps(config: &AppConfig, token: &str, json: bool) -> Result<()> {
    let details = step_details(token, &config.user.profile);
    if json {
        return print_json(&details);
    }

    let parsed = &details.parsed_range;
    println!("{}", "Step Estimate".blue().bold());
    println!("  Token: {:?} ({})", token, parsed.operator);
    println!("  Range: {} to {}", bound(parsed.min), bound(parsed.max));
    println!("  Estimated steps: {}", details.estimated_steps);
    println!("  Calories: {} kcal", format_kcal(details.calories).bold());
    Ok(())
}

#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Component")]
    component: String,

    #[tabled(rename = "kcal")]
    calories: String,

    #[tabled(rename = "% of total")]
    share: String,
}

fn component_row(name: &str, part: f64, total: f64) -> ComponentRow {
    let share = if total > 0.0 {
        format!("{:.1}%", part / total * 100.0)
    } else {
        "-".to_string()
    };
    ComponentRow {
        component: name.to_string(),
        calories: format_kcal(part),
        share,
    }
}

fn cmd_breakdown(config: &AppConfig, steps: &str, training_day: bool, json: bool) -> Result<()> {
    let cardio_table = config.cardio_table();
    let training_table = config.training_table();
    let bmr = calculate_bmr(&config.user.profile);
    let breakdown = calculate_breakdown(&BreakdownInput {
        steps_token: steps,
        is_training_day: training_day,
        user_data: &config.user,
        bmr,
        cardio_table: &cardio_table,
        training_table: &training_table,
    });
    if json {
        return print_json(&breakdown);
    }

    let day_type = if training_day { "training day" } else { "rest day" };
    println!("{}", "Daily Expenditure".blue().bold());
    println!(
        "  {}, activity multiplier {:.2}, {} estimated steps",
        day_type, breakdown.activity_multiplier, breakdown.estimated_steps
    );

    let rows = vec![
        component_row("BMR", breakdown.bmr, breakdown.total),
        component_row("Base activity", breakdown.base_activity, breakdown.total),
        component_row("Steps", breakdown.step_calories, breakdown.total),
        component_row("Training", breakdown.training_burn, breakdown.total),
        component_row("Cardio", breakdown.cardio_burn, breakdown.total),
    ];
    println!("{}", Table::new(rows).with(Style::rounded()));
    println!("  Total: {} kcal/day", format_kcal(breakdown.total).bold());
    Ok(())
}

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "Goal")]
    goal: String,

    #[tabled(rename = "Adjustment")]
    adjustment: String,

    #[tabled(rename = "Target kcal")]
    target: String,
}

fn cmd_goal(config: &AppConfig, tdee: f64, goal: Option<String>) -> Result<()> {
    let key = goal.unwrap_or_else(|| config.goal.clone());
    let selected = Goal::from_key(&key);
    let target = goal_calories(tdee, &key);

    println!("{}", "Calorie Target".blue().bold());
    println!("  Goal: {} ({})", selected.key(), selected.description());
    println!("  Expenditure: {} kcal", format_kcal(tdee));
    println!("  Target: {} kcal/day", format_kcal(target).bold());

    let rows: Vec<GoalRow> = Goal::ALL
        .iter()
        .map(|goal| GoalRow {
            goal: goal.key().to_string(),
            adjustment: format!("{:+.0}", goal.adjustment()),
            target: format_kcal(goal_calories(tdee, goal.key())),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
    Ok(())
}

fn cmd_weight_log(config: &AppConfig, date: NaiveDate, weight: f64) -> Result<()> {
    let mut store = WeightStore::load(config.resolved_store_path()?)?;
    let entry = store.add_entry(date, weight)?;
    store.save()?;
    println!(
        "{} Logged {} kg on {}",
        "✓".green(),
        format!("{:.1}", entry.weight).bold(),
        entry.date
    );
    Ok(())
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Date")]
    date: String,

    #[tabled(rename = "Weight (kg)")]
    weight: String,
}

fn cmd_weight_list(config: &AppConfig, limit: Option<usize>) -> Result<()> {
    let store = WeightStore::load(config.resolved_store_path()?)?;
    if store.is_empty() {
        println!(
            "{}",
            "No entries yet. Log one with `kcal weight log <date> <kg>`.".yellow()
        );
        return Ok(());
    }

    let entries = store.entries();
    let start = limit.map_or(0, |limit| entries.len().saturating_sub(limit));
    let rows: Vec<EntryRow> = entries[start..]
        .iter()
        .map(|entry| EntryRow {
            date: entry.date.clone(),
            weight: format!("{:.1}", entry.weight),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
    println!("  Showing {} of {} entries", entries.len() - start, entries.len());
    Ok(())
}

fn cmd_weight_import(config: &AppConfig, file: &Path) -> Result<()> {
    let mut store = WeightStore::load(config.resolved_store_path()?)?;
    let outcome = store.import_csv(file)?;
    store.save()?;
    println!(
        "{} Imported {} entries ({} replaced, {} skipped) from {}",
        "✓".green(),
        outcome.added,
        outcome.replaced,
        outcome.skipped,
        file.display()
    );
    Ok(())
}

fn cmd_weight_export(config: &AppConfig, file: &Path) -> Result<()> {
    let store = WeightStore::load(config.resolved_store_path()?)?;
    let count = store.export_csv(file)?;
    println!(
        "{} Exported {} entries to {}",
        "✓".green(),
        count,
        file.display()
    );
    Ok(())
}

#[derive(Serialize)]
struct TrendReport<'a> {
    trend: &'a WeightTrend,
    summary: WeightSummary,
}

fn cmd_weight_trend(config: &AppConfig, window: u32, json: bool) -> Result<()> {
    let store = WeightStore::load(config.resolved_store_path()?)?;
    let trend = calculate_weight_trend(store.entries(), window);
    let summary = summarize(&trend.sample_range);
    if json {
        return print_json(&TrendReport {
            trend: &trend,
            summary,
        });
    }

    println!("{}", format!("Weight Trend ({} day window)", window).blue().bold());
    println!("  Trend: {}", trend.label.bold());
    println!("  Change: {:+.2} kg ({})", trend.delta, trend.direction);
    println!("  Weekly rate: {:+.2} kg/week", trend.weekly_rate);
    if let (Some(first), Some(last)) = (trend.sample_range.first(), trend.sample_range.last()) {
        println!(
            "  Sample: {} entries, {} to {}",
            summary.count, first.date, last.date
        );
        println!(
            "  Mean {:.1} kg, std dev {:.2}, min {:.1}, max {:.1}",
            summary.mean, summary.std_dev, summary.min, summary.max
        );
    }
    Ok(())
}

fn cmd_weight_sparkline(
    config: &AppConfig,
    width: f64,
    height: f64,
    padding: f64,
    limit: usize,
    json: bool,
) -> Result<()> {
    let options = SparklineOptions {
        width,
        height,
        padding,
        limit,
    };
    let store = WeightStore::load(config.resolved_store_path()?)?;
    let sparkline = sparkline_points(store.entries(), &options);
    if json {
        return print_json(&sparkline);
    }

    if sparkline.coordinates.is_empty() {
        println!(
            "{}",
            "Not enough entries for a sparkline (need at least 2).".yellow()
        );
        return Ok(());
    }

    println!("{}", "Weight Sparkline".blue().bold());
    println!(
        "  {} points, scale {:.1} to {:.1} kg",
        sparkline.values.len(),
        sparkline.min,
        sparkline.max
    );
    println!("  points: {}", sparkline.points);
    println!("  area: {}", sparkline.area_path);
    Ok(())
}

fn cmd_config_init(force: bool) -> Result<()> {
    let path = AppConfig::default_path()?;
    if path.exists() && !force {
        println!(
            "{}",
            format!(
                "Config already exists at {}. Use --force to overwrite.",
                path.display()
            )
            .yellow()
        );
        return Ok(());
    }
    AppConfig::default().save_to_file(&path)?;
    println!("{} Wrote default config to {}", "✓".green(), path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml = toml::to_string_pretty(config)
        .map_err(|err| KcalError::Internal(err.to_string()))?;
    println!("{}", toml);
    Ok(())
}

fn cmd_config_path() -> Result<()> {
    println!("{}", AppConfig::default_path()?.display());
    Ok(())
}

fn parse_gender(value: &str) -> std::result::Result<Gender, String> {
    match value.to_lowercase().as_str() {
        "male" => Ok(Gender::Male),
        "female" | "other" => Ok(Gender::Female),
        _ => Err(format!(
            "{:?} is not a gender category (male, female, other)",
            value
        )),
    }
}

fn parse_cli_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("{:?} is not a YYYY-MM-DD date", value))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|err| KcalError::Internal(err.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn format_kcal(value: f64) -> String {
    if value.is_finite() {
        format!("{:.0}", value)
    } else {
        "n/a".to_string()
    }
}

fn bound(value: Option<i64>) -> String {
    value.map_or_else(|| "open".to_string(), |bound| bound.to_string())
}
