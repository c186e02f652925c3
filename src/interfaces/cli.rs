use clap::Parser;

#[derive(Parser)]
#[command(name = "wattson")]
#[command(about = "A command-line insights companion for synthetic electricity data.")]
#[command(version)]
pub struct Cli {
    /// Insight kind: general, currentLoad or pricing
    #[arg(short = 'k', long, default_value = "general")]
    pub kind: String,

    /// Override the configured backend (ollama or gemini)
    #[arg(short = 'b', long)]
    pub backend: Option<String>,

    /// Don't use cached result
    #[arg(short = 'n', long)]
    pub nocache: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    /// Target date, YYYY-MM-DD (defaults to today)
    pub date: Option<String>,
}
