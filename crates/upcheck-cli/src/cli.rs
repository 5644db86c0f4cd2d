//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;
use upcheck_core::ConfigOverrides;
use upcheck_core::FileCategory;
use upcheck_core::SizeRule;
use upcheck_core::UploadConfig;

#[derive(Parser)]
#[command(name = "upcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect a file as if it had just been uploaded
    Check(CheckArgs),
    /// Inspect a file and store it without overwriting
    Store(StoreArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub upload: UploadArgs,
}

#[derive(clap::Args)]
pub struct StoreArgs {
    #[command(flatten)]
    pub upload: UploadArgs,

    /// Destination directory (default: configured destination)
    #[arg(value_name = "DEST_DIR")]
    pub dest_dir: Option<PathBuf>,

    /// File name without extension (default: generated)
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,
}

/// Options shared by every command that inspects an upload.
#[derive(clap::Args)]
pub struct UploadArgs {
    /// File to treat as the received upload
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Client-supplied file name (default: FILE's name)
    #[arg(long, value_name = "NAME")]
    pub client_name: Option<String>,

    /// Form field the upload arrives under
    #[arg(long, value_name = "FIELD")]
    pub field: Option<String>,

    /// File category: image, text, audio, video, zip, app, font, file
    #[arg(short, long, value_parser = parse_category)]
    pub category: Option<FileCategory>,

    /// Allowed extension (can be repeated; overrides the category)
    #[arg(long = "ext", short = 'e', value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Maximum upload size in megabytes
    #[arg(long, value_name = "MB")]
    pub max_size: Option<u64>,

    /// Upload cap imposed by the server, in megabytes
    #[arg(long, value_name = "MB")]
    pub server_max_size: Option<u64>,

    /// Compare sizes against the cap in bytes rather than the legacy scaled threshold
    #[arg(long)]
    pub strict_size: bool,

    /// Check the file signature against the category
    #[arg(long)]
    pub verify_content: bool,

    /// Transport error code reported by the server (0 = none)
    #[arg(long, default_value_t = 0, value_name = "CODE", allow_negative_numbers = true)]
    pub transport_error: i32,

    /// JSON settings object, e.g. '{"type":"zip","max_size":10}'
    #[arg(long, value_name = "JSON", value_parser = parse_settings)]
    pub settings: Option<ConfigOverrides>,
}

impl UploadArgs {
    /// Builds the validator configuration. Settings are applied first;
    /// explicit flags win over them.
    pub fn to_config(&self) -> UploadConfig {
        let mut config = UploadConfig::default();
        if let Some(settings) = &self.settings {
            config = config.apply(settings.clone());
        }
        if let Some(field) = &self.field {
            config = config.with_field_name(field.as_str());
        }
        if let Some(category) = self.category {
            config = config.with_category(category);
        }
        if !self.extensions.is_empty() {
            config = config.with_extensions(self.extensions.iter().map(String::as_str));
        }
        if let Some(max_size) = self.max_size {
            config = config.with_max_size_mb(max_size);
        }
        if self.strict_size {
            config = config.with_size_rule(SizeRule::Strict);
        }
        if self.verify_content {
            config = config.with_content_verification(true);
        }
        config
    }
}

fn parse_category(s: &str) -> Result<FileCategory, String> {
    s.parse().map_err(|_| {
        let names: Vec<&str> = FileCategory::ALL.iter().map(|c| c.as_str()).collect();
        format!("unknown category '{s}' (expected one of: {})", names.join(", "))
    })
}

fn parse_settings(s: &str) -> Result<ConfigOverrides, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid settings: {e}"))
}
