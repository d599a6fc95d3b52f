use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use simplifier_core::{Metric, Strategy, WordReplacer};
use simplifier_store::{Settings, replace_file};

#[derive(Parser)]
#[command(
    name = "simplifier",
    about = "Replace words with their closest match from a controlled vocabulary"
)]
struct Cli {
    /// Word-embeddings file (overrides settings for this run)
    #[arg(long, global = true)]
    embeddings: Option<PathBuf>,

    /// Replacement-words file (overrides settings for this run)
    #[arg(long, global = true)]
    candidates: Option<PathBuf>,

    /// Field separator in the embeddings file
    #[arg(long, global = true)]
    embedding_delimiter: Option<String>,

    /// Field separator in the replacement-words file
    #[arg(long, global = true)]
    candidate_delimiter: Option<String>,

    /// dot-product | cosine | euclidean | euclidean-no-sqrt
    #[arg(long, global = true)]
    metric: Option<Metric>,

    /// most-similar | least-similar | random | biased-most-similar | array
    #[arg(long, global = true)]
    strategy: Option<Strategy>,

    /// Number of similar words kept per replaced word
    #[arg(long, global = true)]
    top_n: Option<usize>,

    /// Seed for the random strategies
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simplify a text file line by line
    File {
        /// Input text file (defaults to the saved setting)
        input: Option<PathBuf>,
        /// Output text file (defaults to the saved setting)
        output: Option<PathBuf>,
    },

    /// Simplify one line of text
    Text {
        /// Text to simplify
        text: String,
    },

    /// Show the replacement candidates for a word, least to most similar
    Similar {
        word: String,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show or change saved settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the effective settings
    Show,
    /// Save one setting
    Set { key: String, value: String },
    /// Delete saved settings and restore defaults
    Reset,
}

fn data_dir() -> Option<PathBuf> {
    std::env::var("SIMPLIFIER_DATA_DIR").ok().map(PathBuf::from)
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let base = data_dir();

    match &cli.command {
        Commands::File { input, output } => {
            cmd_file(&cli, base.as_deref(), input.as_deref(), output.as_deref())
        }
        Commands::Text { text } => cmd_text(&cli, base.as_deref(), text),
        Commands::Similar { word, json } => cmd_similar(&cli, base.as_deref(), word, *json),
        Commands::Settings { action } => cmd_settings(&cli, base.as_deref(), action),
    }
}

/// Saved settings with this run's command-line overrides applied.
fn effective_settings(cli: &Cli, base: Option<&Path>) -> Result<Settings> {
    let mut settings = Settings::load(base).context("failed to load settings")?;
    if let Some(p) = &cli.embeddings {
        settings.embeddings = p.clone();
    }
    if let Some(p) = &cli.candidates {
        settings.candidates = p.clone();
    }
    if let Some(d) = &cli.embedding_delimiter {
        settings.embedding_delimiter = d.clone();
    }
    if let Some(d) = &cli.candidate_delimiter {
        settings.candidate_delimiter = d.clone();
    }
    if let Some(m) = cli.metric {
        settings.metric = m;
    }
    if let Some(s) = cli.strategy {
        settings.strategy = s;
    }
    if let Some(n) = cli.top_n {
        if n == 0 {
            bail!("--top-n must be at least 1");
        }
        settings.top_n = n;
    }
    Ok(settings)
}

fn open_engine(cli: &Cli, settings: &Settings) -> Result<WordReplacer> {
    let mut engine = match cli.seed {
        Some(seed) => WordReplacer::seeded(seed),
        None => WordReplacer::new(),
    };
    settings.configure(&mut engine);
    settings.load_stores(&mut engine).with_context(|| {
        format!(
            "failed to load {} / {}",
            settings.embeddings.display(),
            settings.candidates.display()
        )
    })?;
    tracing::debug!(
        "engine ready: metric={}, strategy={}, top_n={}",
        engine.metric().key(),
        engine.strategy().key(),
        engine.top_n()
    );
    Ok(engine)
}

fn cmd_file(
    cli: &Cli,
    base: Option<&Path>,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let settings = effective_settings(cli, base)?;
    let input = input.unwrap_or(settings.input.as_path());
    let output = output.unwrap_or(settings.output.as_path());
    let mut engine = open_engine(cli, &settings)?;

    let lines = replace_file(&mut engine, input, output)
        .with_context(|| format!("failed to simplify {}", input.display()))?;

    println!("wrote {lines} lines to {}", output.display());
    Ok(())
}

fn cmd_text(cli: &Cli, base: Option<&Path>, text: &str) -> Result<()> {
    let settings = effective_settings(cli, base)?;
    let mut engine = open_engine(cli, &settings)?;
    let replaced = engine.replace_text(text).context("failed to simplify text")?;
    println!("{replaced}");
    Ok(())
}

fn cmd_similar(cli: &Cli, base: Option<&Path>, word: &str, json: bool) -> Result<()> {
    let settings = effective_settings(cli, base)?;
    let engine = open_engine(cli, &settings)?;
    let word = word.to_lowercase();

    let Some(similar) = engine.similar_words(&word) else {
        bail!("no embedding for '{word}'");
    };

    if json {
        let out = serde_json::to_string_pretty(&similar).context("failed to serialize")?;
        println!("{out}");
    } else {
        println!("{} ({}, top {})", word, engine.metric(), engine.top_n());
        for s in &similar {
            println!("  {:>12.6}  {}", s.score, s.word);
        }
    }
    Ok(())
}

fn cmd_settings(cli: &Cli, base: Option<&Path>, action: &SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => {
            let settings = effective_settings(cli, base)?;
            println!("# {}", Settings::path(base).display());
            print!("{}", settings_summary(&settings));
        }
        SettingsAction::Set { key, value } => {
            let mut settings = Settings::load(base).context("failed to load settings")?;
            settings
                .set(key, value)
                .with_context(|| format!("cannot set {key}"))?;
            settings.save(base).context("failed to save settings")?;
            println!("{key} = {value}");
        }
        SettingsAction::Reset => {
            Settings::reset(base).context("failed to reset settings")?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}

fn settings_summary(s: &Settings) -> String {
    format!(
        "embeddings:          {}\n\
         candidates:          {}\n\
         input:               {}\n\
         output:              {}\n\
         embedding-delimiter: {:?}\n\
         candidate-delimiter: {:?}\n\
         top-n:               {}\n\
         metric:              {} ({})\n\
         strategy:            {} ({})\n",
        s.embeddings.display(),
        s.candidates.display(),
        s.input.display(),
        s.output.display(),
        s.embedding_delimiter,
        s.candidate_delimiter,
        s.top_n,
        s.metric.key(),
        s.metric,
        s.strategy.key(),
        s.strategy,
    )
}
