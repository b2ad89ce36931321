//! FolioCli application.
//!
//! Wires parsed arguments, loaded configuration, and logging to the
//! command handlers.

use crate::cli::{CliArgs, Command};
use crate::config::FolioConfig;
use crate::{config_handlers, handlers};
use folio_core::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ============================================================================
// FolioCli
// ============================================================================

/// The CLI application.
pub struct FolioCli {
    name: String,
    config: Arc<FolioConfig>,
    version: String,
}

impl FolioCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = FolioConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: FolioConfig) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Get a reference to the loaded config.
    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    /// Library crates log through `log`; the subscriber picks those records up.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        let config = &*self.config;
        match args.command {
            Some(Command::Parse { file, json }) => {
                handlers::handle_parse(config, Path::new(&file), json).await
            }
            Some(Command::List { json }) => handlers::handle_list(config, json).await,
            Some(Command::Show { slug, json, html }) => {
                handlers::handle_show(config, &slug, json, html).await
            }
            Some(Command::Preview { slug }) => handlers::handle_preview(config, &slug).await,
            Some(Command::Validate { json }) => handlers::handle_validate(config, json).await,
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {} - use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
