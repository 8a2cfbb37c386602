#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::application::logging;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Command as PromptCommand;
use crate::domain::models::GenerationRequest;
use crate::domain::models::GenerationResult;
use crate::domain::models::HealthStatus;
use crate::domain::services::actions::help_text;
use crate::infrastructure::backends::BackendManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

pub fn format_generation(res: &GenerationResult) -> String {
    let sections = [
        (
            Paint::new("STRUCTURED PROMPT").underline().bold().to_string(),
            res.structured_prompt.trim_end().to_string(),
        ),
        (
            Paint::new("SYSTEM PROMPT").underline().bold().to_string(),
            res.system_prompt.trim_end().to_string(),
        ),
    ]
    .iter()
    .map(|(title, text)| {
        return format!("{title}\n{text}");
    })
    .collect::<Vec<String>>()
    .join("\n\n");

    let mut footer = format!(
        "Original Command: \"{}\"\nGenerated: {}",
        res.command,
        res.created_at_display()
    );
    if let Some(id) = &res.id {
        footer = format!("{footer}\nID: {id}");
    }

    return format!("{sections}\n\n{footer}");
}

pub fn format_health(status: &HealthStatus) -> String {
    let key_configured = if status.llm_key_configured { "yes" } else { "no" };
    return format!(
        "Status: {}\nLLM key configured: {key_configured}",
        status.status
    );
}

fn print_generation(res: &GenerationResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(res)?);
    } else {
        println!("{}", format_generation(res));
    }

    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Joins the words passed to `generate`, so quoting the command is optional.
pub fn command_text(matches: &ArgMatches) -> String {
    return matches
        .get_many::<String>("command")
        .map(|words| {
            return words.map(|e| return e.as_str()).collect::<Vec<&str>>().join(" ");
        })
        .unwrap_or_default();
}

async fn generate_once(text: &str, json: bool) -> Result<()> {
    let command = PromptCommand::parse(text)?;
    let backend = BackendManager::get()?;
    let res = backend
        .generate(&GenerationRequest::new(1, command))
        .await?;

    return print_generation(&res, json);
}

async fn get_prompt(id: &str, json: bool) -> Result<()> {
    let res = BackendManager::get()?.get_prompt(id).await?;
    return print_generation(&res, json);
}

async fn health() -> Result<()> {
    let status = BackendManager::get()?.health_check().await?;
    println!(
        "{}\nURL: {}",
        format_health(&status),
        Config::get(ConfigKey::BackendURL)
    );

    return Ok(());
}

fn arg_json() -> Arg {
    return Arg::new("json")
        .long("json")
        .help("Print the raw JSON returned by the service.")
        .action(ArgAction::SetTrue);
}

fn arg_backend_url() -> Arg {
    return Arg::new(ConfigKey::BackendURL.to_string())
        .short('u')
        .long(ConfigKey::BackendURL.to_string())
        .env("PROMPTSMITH_BACKEND_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the prompt generation service. An empty value uses the default origin. [default: {}]",
            Config::default(ConfigKey::BackendURL)
        ))
        .global(true);
}

fn arg_backend_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::BackendHealthCheckTimeout.to_string())
        .long(ConfigKey::BackendHealthCheckTimeout.to_string())
        .env("PROMPTSMITH_BACKEND_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out when health checking the prompt generation service. [default: {}]",
            Config::default(ConfigKey::BackendHealthCheckTimeout)
        ))
        .global(true);
}

fn arg_config_file() -> Arg {
    return Arg::new(ConfigKey::ConfigFile.to_string())
        .short('c')
        .long(ConfigKey::ConfigFile.to_string())
        .env("PROMPTSMITH_CONFIG_FILE")
        .num_args(1)
        .help(format!(
            "Path to configuration file [default: {}]",
            Config::default(ConfigKey::ConfigFile)
        ))
        .global(true);
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for promptsmith")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running promptsmith with environment variable RUST_LOG=promptsmith")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_generate() -> Command {
    return Command::new("generate")
        .about("Generate prompts for a single command and print them, without starting the UI.")
        .arg(
            Arg::new("command")
                .help("The command to transform, e.g. Write a blog post about AI")
                .num_args(1..)
                .required(true),
        )
        .arg(arg_json());
}

fn subcommand_get() -> Command {
    return Command::new("get")
        .about("Print a previous generation stored by the prompt service.")
        .arg(
            Arg::new("id")
                .short('i')
                .long("id")
                .help("Generation ID")
                .num_args(1)
                .required(true),
        )
        .arg(arg_json());
}

pub fn build() -> Command {
    let hotkeys_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") {
                return Paint::new(format!("UI {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("promptsmith")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(hotkeys_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(subcommand_generate())
        .subcommand(subcommand_get())
        .subcommand(Command::new("health").about("Check that the prompt service is reachable."))
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(arg_backend_url())
        .arg(arg_backend_health_check_timeout())
        .arg(arg_config_file());
}

/// Returns true when the terminal UI should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = logging::log_dir().join(logging::LOG_FILE_NAME);
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    println!("{}", ConfigKey::VARIANTS.join("\n"));
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("generate", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            generate_once(&command_text(subcmd_matches), subcmd_matches.get_flag("json")).await?;
            return Ok(false);
        }
        Some(("get", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            if let Some(id) = subcmd_matches.get_one::<String>("id") {
                get_prompt(id, subcmd_matches.get_flag("json")).await?;
            }
            return Ok(false);
        }
        Some(("health", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            health().await?;
            return Ok(false);
        }
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
