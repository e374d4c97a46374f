//! Cutoffbot entry point.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cutoffbot::data::{Branch, Campus};
use cutoffbot::query::Selector;
use cutoffbot::{Config, IncomingItem, JsonLinesSink, JsonLinesSource, Runner};

/// Cutoff reply bot for BITSAT cutoff questions.
#[derive(Parser, Debug)]
#[command(name = "cutoffbot")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stream incoming items (JSON lines on stdin) and emit replies
    /// (JSON lines on stdout)
    Run,
    /// Classify one comment and print the reply, if any
    Ask {
        /// Comment text
        text: String,
        /// Author display name used in the reply
        #[arg(short, long, default_value = "someone")]
        author: String,
        /// Treat the author as a bot account
        #[arg(long)]
        bot: bool,
    },
    /// Print cutoff table rows
    Table {
        /// Restrict to one campus (pilani, goa, hyderabad)
        #[arg(long)]
        campus: Option<String>,
        /// Restrict to one branch (cse, ece, mechanical, ...)
        #[arg(long)]
        branch: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    match args.command {
        Command::Run => run_stream(&config).await,
        Command::Ask { text, author, bot } => ask(&config, &text, &author, bot),
        Command::Table { campus, branch } => print_table(&config, campus, branch),
    }
}

/// Pump stdin items through the pipeline until the stream ends or the
/// active window closes.
async fn run_stream(config: &Config) -> anyhow::Result<()> {
    let pipeline = config.build_pipeline()?;
    let mut runner = Runner::new(
        pipeline,
        config.bot_registry(),
        config.schedule,
        config.runner_config(),
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut source = JsonLinesSource::new(stdin);
    let mut sink = JsonLinesSink::new(tokio::io::stdout());

    let summary = runner.run(&mut source, &mut sink).await;
    tracing::info!(
        seen = summary.seen,
        replied = summary.replied,
        "stream closed"
    );
    Ok(())
}

fn ask(config: &Config, text: &str, author: &str, bot: bool) -> anyhow::Result<()> {
    let pipeline = config.build_pipeline()?;
    let mut item = IncomingItem::new(author, text);
    item.is_bot = bot || config.bot_registry().is_bot(author);

    match pipeline.handle(&item) {
        Some(reply) => println!("{reply}"),
        None => println!("(ignored)"),
    }
    Ok(())
}

fn print_table(
    config: &Config,
    campus: Option<String>,
    branch: Option<String>,
) -> anyhow::Result<()> {
    let campus = match campus {
        Some(key) => Selector::One(
            Campus::from_key(&key.to_lowercase())
                .ok_or_else(|| anyhow::anyhow!("unknown campus: {key}"))?,
        ),
        None => Selector::All,
    };
    let branch = match branch {
        Some(key) => Selector::One(
            Branch::from_key(&key.to_lowercase())
                .ok_or_else(|| anyhow::anyhow!("unknown branch: {key}"))?,
        ),
        None => Selector::All,
    };

    let table = match &config.data.cutoff_file {
        Some(path) => cutoffbot::CutoffTable::from_file(path)?,
        None => cutoffbot::CutoffTable::builtin(),
    };
    for entry in table.lookup(campus, branch) {
        println!(
            "{:<10} {:<18} {:>3}/{}",
            entry.campus.display_name(),
            entry.branch.display_name(),
            entry.score,
            entry.max_score
        );
    }
    Ok(())
}
