use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libyethangul::{script, CompositionEngine, JamoTable, SyllableComposer, YetHangulConfig};
use yethangul_core::utils;

#[derive(Parser)]
#[command(name = "yethangul")]
#[command(about = "Archaic Hangul (옛한글) composition engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Keyboard configuration (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a jamo string (e.g. "ㅿㅡㄹ")
    Compose {
        text: String,
    },
    /// Replay a key script (e.g. "r k s space", "altgr+s m f")
    Keys {
        /// Start in archaic mode
        #[arg(long)]
        archaic: bool,
        script: String,
    },
    /// Show the combination table
    Table {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read key scripts line by line
    Repl {
        /// Start in archaic mode
        #[arg(long)]
        archaic: bool,
    },
}

#[derive(Serialize)]
struct TableRow {
    trigger: String,
    jamo: char,
    name: &'static str,
    archaic: bool,
}

fn init_tracing(verbose: bool) {
    if !verbose && std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let filter = if verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| filter.into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<YetHangulConfig> {
    let Some(path) = path else {
        return Ok(YetHangulConfig::default());
    };
    let config = YetHangulConfig::load_toml(path)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("failed to load config {}", path.display()))?;
    config
        .validate(&JamoTable::standard())
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn build_engine(config: &YetHangulConfig, archaic: bool) -> CompositionEngine {
    let mut engine = CompositionEngine::from_config(config);
    if archaic {
        engine.set_archaic_mode(true);
    }
    engine
}

fn print_output(text: &str) {
    println!("{}", text);
    println!("  {}", utils::codepoints(text));
}

fn handle_compose(config: &YetHangulConfig, text: &str) {
    let mut composer = SyllableComposer::new(JamoTable::standard())
        .with_compound_vowels(config.base.compound_vowels);
    print_output(&composer.compose_text(text));
}

fn handle_keys(config: &YetHangulConfig, archaic: bool, keys: &str) -> anyhow::Result<()> {
    let mut engine = build_engine(config, archaic);
    let text = script::run(&mut engine, keys).map_err(|e| anyhow::anyhow!(e))?;
    print_output(&text);
    Ok(())
}

fn handle_table(config: &YetHangulConfig, json: bool) -> anyhow::Result<()> {
    let jamo = JamoTable::standard();
    let rows: Vec<TableRow> = config
        .combination_table(&jamo)
        .entries()
        .into_iter()
        .filter_map(|(pattern, symbol)| {
            let letter = jamo.lookup(symbol)?;
            Some(TableRow {
                trigger: pattern.to_string(),
                jamo: symbol,
                name: letter.name,
                archaic: letter.archaic,
            })
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            let marker = if row.archaic { "*" } else { " " };
            println!("{:<16} {} {} {}", row.trigger, row.jamo, marker, row.name);
        }
    }
    Ok(())
}

fn run_repl(config: &YetHangulConfig, archaic: bool) {
    let mut engine = build_engine(config, archaic);

    println!("yethangul: type a key script per line and press Enter");
    println!("Example: altgr+s m f  (ㅿㅡㄹ), toggle switches archaic mode");
    println!("Ctrl-D to exit.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        match line {
            Ok(raw) => {
                let input = raw.trim();
                if input.is_empty() {
                    continue;
                }
                match script::run(&mut engine, input) {
                    Ok(text) => {
                        let mode = if engine.is_archaic_mode() { "archaic" } else { "modern" };
                        println!("[{}] {}", mode, text);
                        println!("  {}", utils::codepoints(&text));
                    }
                    Err(e) => eprintln!("error: {}", e),
                }
            }
            Err(e) => {
                eprintln!("error reading stdin: {}", e);
                break;
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Some(Commands::Compose { text }) => handle_compose(&config, &text),
        Some(Commands::Keys { archaic, script }) => handle_keys(&config, archaic, &script)?,
        Some(Commands::Table { json }) => handle_table(&config, json)?,
        Some(Commands::Repl { archaic }) => run_repl(&config, archaic),
        None => run_repl(&config, false),
    }
    Ok(())
}
