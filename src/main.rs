use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use g2e_translator::session;
use g2e_translator::{AppConfig, LanguageTag, NavigationResult, ProviderKind, TranslatorController};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "g2e", version, about = "German → English translation with parallel corpus stepping")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Translation provider: web, cloud or mock
    #[arg(long, global = true)]
    provider: Option<ProviderKind>,

    /// Use the mock translator (same as --provider mock)
    #[arg(short, long, global = true)]
    mock: bool,

    /// Seconds to wait for one translation
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate German text to English
    Translate {
        /// Text to translate
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Show one corpus line with its translation and reference
    Show {
        /// German corpus file
        #[arg(long)]
        de: PathBuf,
        /// English reference corpus file
        #[arg(long)]
        en: Option<PathBuf>,
        /// 1-based line number
        line: usize,
    },
    /// Interactive session reading commands from stdin
    Browse {
        #[arg(long)]
        de: Option<PathBuf>,
        #[arg(long)]
        en: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())
        .context("loading configuration")?
        .with_env()
        .context("reading environment overrides")?;

    if let Some(provider) = cli.provider {
        config.provider = provider;
    }
    if cli.mock {
        config.provider = ProviderKind::Mock;
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(&cli)?;
    let translator = config
        .build_translator()
        .context("initializing translation provider")?;
    info!(provider = translator.provider_name(), timeout_secs = config.timeout_secs, "ready");

    let mut controller = TranslatorController::new(translator);

    match cli.command {
        Command::Translate { text } => {
            let text = text.join(" ");
            let translated = controller
                .translate(&text, LanguageTag::De, LanguageTag::En)
                .await
                .context("translation failed")?;
            println!("{}", translated);
        }
        Command::Show { de, en, line } => {
            controller.open_corpus(LanguageTag::De, Some(de.as_path()))?;
            if let Some(en) = &en {
                controller.open_corpus(LanguageTag::En, Some(en.as_path()))?;
            }

            match controller.navigate_to(line).await {
                NavigationResult::NoPhrase { index } => {
                    bail!(
                        "no German phrase at line {} ({} lines in {})",
                        index,
                        controller.line_count(LanguageTag::De),
                        de.display()
                    );
                }
                NavigationResult::Phrase {
                    index,
                    german,
                    english_reference,
                    translation,
                } => {
                    println!("line {}", index);
                    println!("  de:  {}", german);
                    match translation {
                        Ok(text) => println!("  mt:  {}", text),
                        Err(e) => println!("  mt:  (failed: {})", e),
                    }
                    println!(
                        "  ref: {}",
                        english_reference.as_deref().unwrap_or("(no reference)")
                    );
                }
            }
        }
        Command::Browse { de, en } => {
            for (language, path) in [(LanguageTag::De, de), (LanguageTag::En, en)] {
                if let Some(path) = path {
                    controller.open_corpus(language, Some(path.as_path()))?;
                }
            }

            let mut stdout = std::io::stdout();
            println!("{}", session::HELP);
            session::render(&controller, &mut stdout)?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session::run(&mut controller, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}
