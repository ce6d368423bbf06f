//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use crate::config::Config;
use clap::{Args, Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// promptlib - validate, render and inspect versioned prompt documents
///
/// Prompt documents are YAML or JSON files holding a system prompt, a user
/// template with `{{name}}` placeholders, declared inputs and the target model.
#[derive(Parser, Debug)]
#[command(
    name = "promptlib",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "PROMPTLIB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a prompt document and report every violation
    Validate(ValidateArgs),

    /// Resolve inputs and render the prompt text
    Render(RenderArgs),

    /// Render the prompt and print the provider request payload
    Request(RequestArgs),

    /// Print the tracking metadata of a prompt document
    Metadata(MetadataArgs),

    /// List the prompt documents found in a directory
    List(ListArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the prompt document (JSON or YAML)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Reject keys that are not part of the document format
    #[arg(short, long)]
    pub strict: bool,

    /// Show the validated document
    #[arg(long)]
    pub detailed: bool,

    /// Stop reporting after this many violations (0 = all)
    #[arg(long, default_value = "0")]
    pub max_errors: usize,
}

/// Caller-supplied input values
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// Input value as KEY=VALUE, converted to the declared input type
    #[arg(short = 'i', long = "input", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub input: Vec<(String, String)>,

    /// JSON or YAML file with a mapping of input values
    #[arg(long = "inputs", value_name = "FILE")]
    pub inputs_file: Option<PathBuf>,
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Path to the prompt document (JSON or YAML)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub inputs: InputArgs,

    /// Render only the user template, without the system prompt
    #[arg(long)]
    pub user_only: bool,

    /// Reject keys that are not part of the document format
    #[arg(short, long)]
    pub strict: bool,

    /// Write the rendered prompt to a file
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the request command
#[derive(Parser, Debug)]
pub struct RequestArgs {
    /// Path to the prompt document (JSON or YAML)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub inputs: InputArgs,

    /// Reject keys that are not part of the document format
    #[arg(short, long)]
    pub strict: bool,

    /// Write the request body to a file
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the metadata command
#[derive(Parser, Debug)]
pub struct MetadataArgs {
    /// Path to the prompt document (JSON or YAML)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Directory to scan (defaults to the configured prompts_dir)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Only show versions of this prompt
    #[arg(short, long, value_name = "PROMPT_ID")]
    pub prompt: Option<String>,

    /// Pick the newest non-deprecated version matching a range (e.g. ^1.2.0)
    #[arg(short, long, value_name = "RANGE", requires = "prompt")]
    pub range: Option<String>,

    /// Reject keys that are not part of the document format
    #[arg(short, long)]
    pub strict: bool,

    /// Also show files that failed to load
    #[arg(long)]
    pub show_rejected: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show(ConfigShowArgs),

    /// Write a configuration file with default values
    Init(ConfigInitArgs),

    /// Show which configuration file is in use
    Path,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Write the user config (in the platform config directory) instead of .promptlib.toml
    #[arg(long)]
    pub user: bool,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable formatted output
    #[default]
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Parse a `KEY=VALUE` argument; the value may itself contain `=`
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{}'", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{}'", raw));
    }

    Ok((key.to_string(), value.to_string()))
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Output format from the flag, falling back to the configuration
    pub fn output_format(&self, config: &Config) -> OutputFormat {
        self.output.unwrap_or(config.output.format)
    }

    /// Check if colored output should be used
    pub fn use_color(&self, config: &Config) -> bool {
        !self.no_color && config.output.color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli::parse_from(["promptlib", "-vv", "validate", "doc.yml"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["promptlib", "--quiet", "validate", "doc.yml"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_input_arguments() {
        let cli = Cli::parse_from([
            "promptlib",
            "render",
            "doc.yml",
            "-i",
            "name=Sam",
            "--input",
            "query=a=b",
            "--inputs",
            "values.json",
        ]);

        let Commands::Render(args) = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(
            args.inputs.input,
            vec![
                ("name".to_string(), "Sam".to_string()),
                ("query".to_string(), "a=b".to_string()),
            ]
        );
        assert_eq!(args.inputs.inputs_file, Some(PathBuf::from("values.json")));
        assert!(!args.user_only);
    }

    #[test]
    fn test_malformed_input_argument_is_rejected() {
        assert!(Cli::try_parse_from(["promptlib", "render", "doc.yml", "-i", "novalue"]).is_err());
        assert!(Cli::try_parse_from(["promptlib", "render", "doc.yml", "-i", "=x"]).is_err());
    }

    #[test]
    fn test_output_format_falls_back_to_config() {
        let mut config = Config::default();
        config.output.format = OutputFormat::Yaml;

        let cli = Cli::parse_from(["promptlib", "metadata", "doc.yml"]);
        assert_eq!(cli.output_format(&config), OutputFormat::Yaml);

        let cli = Cli::parse_from(["promptlib", "-o", "json-pretty", "metadata", "doc.yml"]);
        assert_eq!(cli.output_format(&config), OutputFormat::JsonPretty);
    }

    #[test]
    fn test_range_requires_prompt() {
        assert!(Cli::try_parse_from(["promptlib", "list", "--range", "^1.0.0"]).is_err());
        assert!(Cli::try_parse_from(["promptlib", "list", "-p", "x", "--range", "^1.0.0"]).is_ok());
    }

    #[test]
    fn test_no_color_disables_color() {
        let cli = Cli::parse_from(["promptlib", "--no-color", "metadata", "doc.yml"]);
        assert!(!cli.use_color(&Config::default()));
    }
}
