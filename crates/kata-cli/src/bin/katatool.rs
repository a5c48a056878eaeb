use clap::{Parser, Subcommand};

use kata_cli::commands::live_ops::LiveOptions;
use kata_cli::commands::{config_ops, convert_ops, live_ops};

#[derive(Parser)]
#[command(name = "katatool", about = "Katakana romanization and translation tool")]
struct Cli {
    /// Log pipeline decisions to stderr (RUST_LOG overrides the level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report whether text contains Japanese script
    Detect {
        /// Text to inspect
        text: String,
    },
    /// Romanize text to Hepburn romaji (fails on malformed input)
    Romanize {
        /// Katakana or hiragana text
        text: String,
    },
    /// Convert katakana to hiragana
    Hiragana {
        /// Katakana text
        text: String,
    },
    /// Convert hiragana to katakana
    Katakana {
        /// Hiragana text
        text: String,
    },
    /// Translate text to English through the fallback pipeline
    Translate {
        /// Japanese text
        text: String,
        /// Output the typed outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the Japanese/Romaji/English export file
    Export {
        /// Japanese text
        text: String,
        /// Output path (.txt is added when there is no extension)
        #[arg(short, long)]
        output: String,
        /// Leave the English section blank
        #[arg(long)]
        no_translate: bool,
    },
    /// Read input lines from stdin and print live romaji/English updates
    Live {
        /// Translate on the event loop instead of a worker thread
        #[arg(long)]
        inline: bool,
        /// Debounce delay in milliseconds (default from settings)
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Print the default settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Path to the settings file
        file: String,
    },
    /// Print the default Hepburn table TOML
    RomajiExport,
    /// Validate a Hepburn table TOML file
    RomajiValidate {
        /// Path to the table file
        file: String,
    },
}

fn init_logging(verbose: bool) {
    if !verbose {
        return;
    }
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Detect { text } => convert_ops::detect_cmd(&text),
        Command::Romanize { text } => convert_ops::romanize_cmd(&text),
        Command::Hiragana { text } => convert_ops::hiragana_cmd(&text),
        Command::Katakana { text } => convert_ops::katakana_cmd(&text),
        Command::Translate { text, json } => convert_ops::translate_cmd(&text, json),
        Command::Export {
            text,
            output,
            no_translate,
        } => convert_ops::export_cmd(&text, &output, no_translate),
        Command::Live { inline, delay_ms } => {
            live_ops::live_cmd(&LiveOptions { inline, delay_ms });
        }
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
        Command::RomajiExport => config_ops::romaji_export(),
        Command::RomajiValidate { file } => config_ops::romaji_validate(&file),
    }
}
