use clap::Parser;

/// Sentinel — a locked-down kiosk shell for a single remote web app.
#[derive(Parser, Debug)]
#[command(name = "sentinel", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
