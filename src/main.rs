//! CLI entry point for `msgshell`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use humansize::{format_size, DECIMAL};

use msgshell::config::Config;
use msgshell::convert;
use msgshell::export::{attachment, text};
use msgshell::model::email::Email;
use msgshell::parser::dump::DumpParser;

#[derive(Parser)]
#[command(
    name = "msgshell",
    version,
    about = "Convert parsed Outlook messages into plain emails"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a message and print it
    Show {
        path: PathBuf,
        /// Print the converted email as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a text rendering plus all attachments and embedded images
    Export {
        path: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract attachments (and embedded images with --inline)
    Attachments {
        path: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        inline: bool,
    },
    /// Write the current configuration to the config file
    InitConfig,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = msgshell::config::load_config();

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Commands::Show { path, json } => cmd_show(&path, json, &config),
        Commands::Export { path, output } => cmd_export(&path, output, &config),
        Commands::Attachments {
            path,
            output,
            inline,
        } => cmd_attachments(&path, output, inline, &config),
        Commands::InitConfig => cmd_init_config(&config),
        Commands::Completions { shell } => cmd_completions(shell),
        Commands::Manpage => cmd_manpage(),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = msgshell::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "msgshell.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Parse and convert one message file.
fn load_email(path: &Path, config: &Config) -> anyhow::Result<Email> {
    // The conversion drops the configured defaults and starts blank.
    let builder = convert::convert_file(path, &DumpParser::new(), config.starting_builder())
        .with_context(|| format!("converting {}", path.display()))?;
    Ok(builder.build())
}

/// Resolve the output directory: `-o`, then `[export] default_output_dir`, then `.`.
fn output_dir(output: Option<PathBuf>, config: &Config) -> PathBuf {
    output
        .or_else(|| config.export.default_output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "message".to_string())
}

fn cmd_show(path: &Path, json: bool, config: &Config) -> anyhow::Result<()> {
    let email = load_email(path, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&email)?);
    } else {
        print!("{}", text::render_text(&email));
    }
    Ok(())
}

fn cmd_export(path: &Path, output: Option<PathBuf>, config: &Config) -> anyhow::Result<()> {
    let email = load_email(path, config)?;
    let stem = file_stem(path);
    let folder = output_dir(output, config).join(attachment::message_folder_name(&email, &stem));
    std::fs::create_dir_all(&folder)
        .with_context(|| format!("creating {}", folder.display()))?;

    let text_name = attachment::sanitize_filename_part(&stem, 80);
    let text_path = text::export_text(&email, &folder, &text_name)?;
    let resources = attachment::export_resources(&email, &folder, true)?;

    println!("Exported to {}", folder.display());
    println!("  {}", text_path.display());
    for p in &resources {
        println!("  {}", p.display());
    }
    Ok(())
}

fn cmd_attachments(
    path: &Path,
    output: Option<PathBuf>,
    inline: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let email = load_email(path, config)?;
    let dir = output_dir(output, config);
    let paths = attachment::export_resources(&email, &dir, inline)?;

    if paths.is_empty() {
        println!("No attachments in {}", path.display());
        return Ok(());
    }
    let total = if inline {
        email.payload_size()
    } else {
        email.attachments().iter().map(|a| a.size()).sum::<u64>()
    };
    println!(
        "Extracted {} file(s), {} total",
        paths.len(),
        format_size(total, DECIMAL)
    );
    for p in &paths {
        println!("  {}", p.display());
    }
    Ok(())
}

fn cmd_init_config(config: &Config) -> anyhow::Result<()> {
    msgshell::config::save_config(config)?;
    if let Some(path) = msgshell::config::config_file_path() {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "msgshell", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}
