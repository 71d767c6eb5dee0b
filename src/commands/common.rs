//! Settings and helpers shared between the report and serve commands.

use super::config::{Config, MAX_PAGE_SIZE};
use crate::Result;
use crate::facts::GitHubSource;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use core::error::Error;
use core::fmt::{Debug, Formatter};
use core::num::NonZeroU32;
use core::time::Duration;
use ohno::IntoAppError;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Resolve the mode against whether the destination is a terminal.
    #[must_use]
    pub const fn use_colors(self, is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_terminal,
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared between the report and serve commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// GitHub account whose repositories are summarized
    #[arg(long, short = 'u', value_name = "NAME", env = "GH_USERNAME")]
    pub user: String,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Path to configuration file (default is `gh-langs.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Number of repositories requested per page
    #[arg(long, value_name = "COUNT", value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PAGE_SIZE)))]
    pub page_size: Option<u32>,

    /// Base URL of the GitHub REST API
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Everything needed to collect one summary, resolved from flags, environment, and configuration.
#[derive(Clone)]
pub struct Settings {
    pub account: String,
    pub token: Option<String>,
    pub page_size: NonZeroU32,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub port: u16,
}

impl Settings {
    /// Resolve settings, with command-line flags taking precedence over the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded
    pub fn from_args(args: &CommonArgs) -> Result<Self> {
        let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
        Self::resolve(args, config)
    }

    fn resolve(args: &CommonArgs, config: Config) -> Result<Self> {
        let page_size = args.page_size.unwrap_or(config.page_size);

        Ok(Self {
            account: args.user.clone(),
            token: args.token.clone().filter(|token| !token.is_empty()),
            page_size: NonZeroU32::new(page_size).into_app_err("page size must be at least 1")?,
            api_base_url: args.api_url.clone().unwrap_or(config.api_base_url),
            request_timeout: config.request_timeout,
            port: config.port,
        })
    }

    /// Create the GitHub data source described by these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn data_source(&self) -> Result<GitHubSource> {
        GitHubSource::new(&self.account, self.token.as_deref(), &self.api_base_url, self.request_timeout)
    }
}

impl Debug for Settings {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Settings")
            .field("account", &self.account)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("page_size", &self.page_size)
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout", &self.request_timeout)
            .field("port", &self.port)
            .finish()
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // A logger may already be installed when commands run repeatedly in one process.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

/// Render an error followed by each of its sources, separated by `: `.
pub fn error_chain(error: &(dyn Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{CollectError, DataSourceError};

    fn args(user: &str) -> CommonArgs {
        CommonArgs {
            user: user.to_string(),
            token: None,
            config: None,
            page_size: None,
            api_url: None,
            color: ColorMode::Never,
            log_level: LogLevel::None,
        }
    }

    #[test]
    fn test_color_mode() {
        assert!(ColorMode::Always.use_colors(false));
        assert!(!ColorMode::Never.use_colors(true));
        assert!(ColorMode::Auto.use_colors(true));
        assert!(!ColorMode::Auto.use_colors(false));
    }

    #[test]
    fn test_resolve_uses_config_defaults() {
        let settings = Settings::resolve(&args("octocat"), Config::default()).unwrap();

        assert_eq!(settings.account, "octocat");
        assert_eq!(settings.token, None);
        assert_eq!(settings.page_size.get(), 20);
        assert_eq!(settings.api_base_url, "https://api.github.com");
        assert_eq!(settings.request_timeout, Duration::from_secs(60));
        assert_eq!(settings.port, 3000);
    }

    #[test]
    fn test_resolve_flags_override_config() {
        let args = CommonArgs {
            token: Some("ghp_secret".to_string()),
            page_size: Some(100),
            api_url: Some("http://localhost:9999".to_string()),
            ..args("octocat")
        };

        let config = Config {
            page_size: 5,
            port: 8080,
            ..Config::default()
        };

        let settings = Settings::resolve(&args, config).unwrap();
        assert_eq!(settings.token.as_deref(), Some("ghp_secret"));
        assert_eq!(settings.page_size.get(), 100);
        assert_eq!(settings.api_base_url, "http://localhost:9999");
        assert_eq!(settings.port, 8080);
    }

    #[test]
    fn test_resolve_ignores_empty_token() {
        let args = CommonArgs {
            token: Some(String::new()),
            ..args("octocat")
        };

        let settings = Settings::resolve(&args, Config::default()).unwrap();
        assert_eq!(settings.token, None);
    }

    #[test]
    fn test_settings_debug_redacts_token() {
        let args = CommonArgs {
            token: Some("ghp_secret".to_string()),
            ..args("octocat")
        };

        let settings = Settings::resolve(&args, Config::default()).unwrap();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_error_chain() {
        let error = CollectError {
            page: 2,
            source: DataSourceError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            },
        };

        assert_eq!(
            error_chain(&error),
            "fetching page 2 failed: server responded with status 500 Internal Server Error"
        );
    }
}
