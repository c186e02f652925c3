// Main entry point
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use colored::Colorize;
use serde_json::json;
use wattson::application::insights::classify_source;
use wattson::application::series;
use wattson::domain::model::{DailyStats, HourlySlot, Insight, InsightSource};
use wattson::infrastructure::config::{self, load_config, Logging};
use wattson::interfaces::cli::Cli;
use wattson::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config()?;

    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }

    // CLI backend overrides config
    if let Some(backend) = &cli.backend {
        config.backend = backend.clone();
    }

    let state = AppState::new(config)?;

    if cli.status {
        print_status(&state);
        return Ok(());
    }

    let today = Local::now().date_naive();
    let date = match &cli.date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")?,
        None => today,
    };

    let data = series::hourly_data(date, today);
    let stats = series::daily_stats(&data);

    // Payloads mirror what the dashboard sends per insight kind
    let payload = match cli.kind.as_str() {
        "currentLoad" => json!({
            "hourlyLoad": data.iter().map(|s| s.load).collect::<Vec<_>>()
        }),
        "pricing" => json!({
            "prices": data.iter().map(|s| s.real_time_price).collect::<Vec<_>>()
        }),
        _ => json!({
            "date": date.to_string(),
            "hourly": &data,
            "stats": &stats,
        }),
    };

    let was_cached = !cli.nocache && state.insights.cached(&payload, &cli.kind)?.is_some();

    let text = tokio::select! {
        result = async {
            if cli.nocache {
                state.insights.request_uncached(&payload, &cli.kind).await
            } else {
                state.insights.request(&payload, &cli.kind).await
            }
        } => result?,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Interrupted while waiting for insights");
            return Ok(());
        }
    };

    let source = classify_source(&text, was_cached);
    let insight = Insight {
        kind: cli.kind.clone(),
        text,
        source,
    };

    if cli.json {
        let output = json!({
            "date": date.to_string(),
            "stats": stats,
            "insight": insight,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(date, &data, &stats, &insight);
    }

    Ok(())
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    tracing_subscriber::fmt().with_env_filter(filter).init();

    Ok(())
}

fn print_report(date: NaiveDate, data: &[HourlySlot], stats: &DailyStats, insight: &Insight) {
    println!(
        "{} {}",
        "Electricity Overview".bright_magenta().bold().underline(),
        date.format("%Y-%m-%d").to_string().cyan()
    );
    println!();

    println!(
        "  {} {} MW (peak {} MW, avg {} MW)",
        "Load:".bright_white(),
        stats.total_load,
        stats.peak_load,
        stats.avg_load
    );
    println!(
        "  {} term-ahead {:.2} / real-time {:.2} (est. savings {})",
        "Price:".bright_white(),
        stats.avg_term_ahead,
        stats.avg_real_time,
        stats.total_savings
    );

    if let (Some(first), Some(last)) = (data.first(), data.last()) {
        println!(
            "  {} {} @ {} MW .. {} @ {} MW",
            "Range:".bright_white(),
            first.time_slot,
            first.load,
            last.time_slot,
            last.load
        );
    }

    let source_indicator = match insight.source {
        InsightSource::Cache => "[cached]",
        InsightSource::Generated => "[generated]",
        InsightSource::Fallback => "[unavailable]",
    };
    println!();
    println!(
        "{} {}",
        format!("Insights ({})", insight.kind).yellow().bold(),
        source_indicator.cyan()
    );
    for line in insight.text.lines() {
        println!("  {}", line);
    }
}

fn print_status(state: &AppState) {
    println!("{}", "wattson Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("Backend: {}", state.config.backend);
    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!("Response cache: {} entries", state.insights.cache_len());

    match state.config.backend.as_str() {
        "gemini" => {
            if state.config.gemini.resolve_api_key().is_some() {
                println!("Gemini API: Configured");
            } else {
                println!("Gemini API: Not configured");
            }
        }
        _ => {
            println!("Ollama host: {}", state.config.ollama.resolve_base_url());
        }
    }
}
