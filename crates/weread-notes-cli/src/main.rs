use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use weread_notes_config::{SettingKey, Settings};
use weread_notes_engine::{
    ConfirmFormat, FORMAT_DONE_NOTICE, LOADING_TEXT, ReflectionClient, ReflectionPanel,
    ReflectionRequest, Reformatter, book_name_from_markdown, reflection_targets,
};

#[derive(Parser)]
#[command(name = "weread-notes", version)]
#[command(about = "Turn WeRead clipboard exports into structured Markdown notes")]
struct Cli {
    /// Settings file to use instead of ~/.config/weread-notes/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reformat an export read from FILE or stdin
    Format {
        file: Option<PathBuf>,
        /// Write the result here instead of stdout
        #[arg(short, long, conflicts_with = "in_place")]
        output: Option<PathBuf>,
        /// Replace FILE with the result
        #[arg(long, requires = "file")]
        in_place: bool,
        /// Do not ask before replacing FILE
        #[arg(short, long)]
        yes: bool,
    },
    /// List the quotes of a formatted document
    Quotes { file: PathBuf },
    /// Ask the reflection service about one quote
    Reflect {
        /// Formatted document to take the quote from
        #[arg(conflicts_with = "quote")]
        file: Option<PathBuf>,
        /// Quote number as printed by `quotes`
        #[arg(long, default_value_t = 1, requires = "file")]
        index: usize,
        #[arg(long)]
        quote: Option<String>,
        #[arg(long, requires = "quote")]
        thought: Option<String>,
        /// Book name when it cannot be read from FILE
        #[arg(long)]
        book: Option<String>,
    },
    /// Show or change the reflection service settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    Show,
    Path,
    Set { key: String, value: String },
    ResetPrompt,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut logger = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        logger.filter_level(log::LevelFilter::Warn);
    }
    logger.init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Settings::config_path);
    log::debug!("config path: {}", config_path.display());

    match cli.command {
        Command::Format {
            file,
            output,
            in_place,
            yes,
        } => format(file.as_deref(), output.as_deref(), in_place, yes),
        Command::Quotes { file } => quotes(&file),
        Command::Reflect {
            file,
            index,
            quote,
            thought,
            book,
        } => {
            let settings = Settings::load_from_path(&config_path)?;
            let (quote, thought, book) = match (file, quote) {
                (Some(file), _) => {
                    let markdown = read_file(&file)?;
                    let mut targets = reflection_targets(&markdown);
                    if index == 0 || index > targets.len() {
                        bail!(
                            "No quote #{index} in {} ({} found)",
                            file.display(),
                            targets.len()
                        );
                    }
                    let target = targets.swap_remove(index - 1);
                    let book = book_name_from_markdown(&markdown).or(book);
                    (target.quote, target.thought, book)
                }
                (None, Some(quote)) => (quote, thought.unwrap_or_default(), book),
                (None, None) => bail!("Either FILE or --quote is required"),
            };
            reflect(&settings, &config_path, &quote, &thought, book.as_deref()).await
        }
        Command::Config { action } => config(action, &config_path),
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn format(file: Option<&Path>, output: Option<&Path>, in_place: bool, yes: bool) -> Result<()> {
    let raw = match file {
        Some(path) => read_file(path)?,
        None => io::read_to_string(io::stdin()).context("Failed to read stdin")?,
    };

    let mut reformatter = Reformatter::new();
    let markdown = reformatter.reformat(&raw);
    log::info!("book: {:?}", reformatter.book_name());

    let target = match (file, output) {
        (_, Some(output)) => Some(output),
        (Some(file), None) if in_place => {
            let name = file.file_stem().and_then(|stem| stem.to_str());
            if !yes && !confirm(&ConfirmFormat::for_document(name))? {
                eprintln!("已取消");
                return Ok(());
            }
            Some(file)
        }
        _ => None,
    };

    match target {
        Some(path) => std::fs::write(path, &markdown)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => io::stdout().write_all(markdown.as_bytes())?,
    }
    eprintln!("{FORMAT_DONE_NOTICE}");
    Ok(())
}

fn confirm(dialog: &ConfirmFormat) -> Result<bool> {
    let mut stderr = io::stderr();
    writeln!(stderr, "{}", dialog.heading)?;
    write!(
        stderr,
        "{} [y = {} / N = {}] ",
        dialog.message, dialog.confirm_label, dialog.cancel_label
    )?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "确认" | "确认格式化"
    ))
}

fn quotes(file: &Path) -> Result<()> {
    let markdown = read_file(file)?;
    let targets = reflection_targets(&markdown);
    if targets.is_empty() {
        eprintln!("No quotes found in {}", file.display());
        return Ok(());
    }

    for (i, target) in targets.iter().enumerate() {
        println!("{}. {}", i + 1, target.quote);
        if !target.thought.is_empty() {
            println!("   {}", target.thought);
        }
    }
    Ok(())
}

async fn reflect(
    settings: &Settings,
    config_path: &Path,
    quote: &str,
    thought: &str,
    book: Option<&str>,
) -> Result<()> {
    if !settings.reflection_enabled() {
        bail!(
            "Reflection is not configured, set endpoint_url, api_key and model_name in {}",
            config_path.display()
        );
    }

    let client = ReflectionClient::new(settings.reflection_config())?;
    let request = ReflectionRequest {
        quote,
        thought,
        book_name: book.unwrap_or_default(),
    };

    eprintln!("{LOADING_TEXT}");
    let result = client.reflect(&request).await;
    match ReflectionPanel::new(quote, thought, &result) {
        ReflectionPanel::Failed(message) => bail!("{message}"),
        panel => print!("{panel}"),
    }
    Ok(())
}

fn config(action: ConfigAction, config_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Path => println!("{}", config_path.display()),
        ConfigAction::Show => {
            let settings = Settings::load_from_path(config_path)?;
            for key in SettingKey::ALL {
                let value = match key {
                    SettingKey::ApiKey => mask_secret(settings.get(key)),
                    _ => settings.get(key).to_string(),
                };
                println!("{key} = {value}");
            }
            let status = if settings.reflection_enabled() {
                "enabled"
            } else {
                "disabled"
            };
            println!("reflection: {status}");
        }
        ConfigAction::Set { key, value } => {
            let key: SettingKey = key.parse()?;
            let mut settings = Settings::load_from_path(config_path)?;
            settings.set(key, value);
            settings.save_to_path(config_path)?;
            eprintln!("Saved {key} to {}", config_path.display());
        }
        ConfigAction::ResetPrompt => {
            let mut settings = Settings::load_from_path(config_path)?;
            settings.reset_prompt_template();
            settings.save_to_path(config_path)?;
            eprintln!("Prompt template reset in {}", config_path.display());
        }
    }
    Ok(())
}

fn mask_secret(secret: &str) -> String {
    if secret.is_empty() || secret.starts_with('$') {
        return secret.to_string();
    }
    let visible: String = secret.chars().take(3).collect();
    format!("{visible}****")
}
