//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (render, watch, init, validate), and their associated
//! argument structs. Every flag has an environment variable equivalent
//! for container deployments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "lbrender",
    version,
    long_version = concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("LBRENDER_GIT_SHORT"),
        ", ",
        env!("LBRENDER_BUILD_PROFILE"),
        ")"
    ),
    about = "HAProxy config renderer for logical load balancers",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        lbrender init                        Create a starter state file\n  \
        lbrender render                      Render ./lbrender.yaml to ./haproxy.cfg\n  \
        lbrender watch -o /etc/haproxy.cfg   Re-render whenever the state changes\n\n  \
        Docs: https://github.com/lbrender/lbrender"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the logical state to an HAProxy config file
    Render(RenderArgs),

    /// Re-render whenever the state file changes
    Watch(WatchArgs),

    /// Generate a starter state file
    Init(InitArgs),

    /// Validate a state file without rendering
    Validate(ValidateArgs),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        lbrender render                              Render ./lbrender.yaml\n  \
        lbrender render -s pool.json -o haproxy.cfg  Specific state and output\n  \
        lbrender render --stdout                     Preview without writing\n  \
        lbrender render --socket /run/lb.sock        Expose the stats socket")]
pub struct RenderArgs {
    /// Logical state file (.yaml, .json, .toml)
    #[arg(short, long, env = "LBRENDER_STATE", default_value = "lbrender.yaml")]
    pub state: PathBuf,

    /// Output HAProxy config path
    #[arg(short, long, env = "LBRENDER_OUTPUT", default_value = "haproxy.cfg")]
    pub output: PathBuf,

    /// Stats socket path to expose in the global section
    #[arg(long, env = "LBRENDER_SOCKET")]
    pub socket: Option<PathBuf>,

    /// Print the rendered config to stdout instead of writing the file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        lbrender watch                               Watch ./lbrender.yaml\n  \
        lbrender watch --poll-interval 5             Tighter change polling\n  \
        lbrender watch -o /etc/haproxy/haproxy.cfg   Production target")]
pub struct WatchArgs {
    /// Logical state file (.yaml, .json, .toml)
    #[arg(short, long, env = "LBRENDER_STATE", default_value = "lbrender.yaml")]
    pub state: PathBuf,

    /// Output HAProxy config path
    #[arg(short, long, env = "LBRENDER_OUTPUT", default_value = "haproxy.cfg")]
    pub output: PathBuf,

    /// Stats socket path to expose in the global section
    #[arg(long, env = "LBRENDER_SOCKET")]
    pub socket: Option<PathBuf>,

    /// Seconds between state file change checks
    #[arg(long, env = "POLL_INTERVAL_SECS", default_value_t = 10)]
    pub poll_interval: u64,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        lbrender init                             Quick start state file (yaml)\n  \
        lbrender init -i                          Interactive wizard\n  \
        lbrender init -f toml -o pool.toml        Non-interactive, TOML format")]
pub struct InitArgs {
    /// Output format
    #[arg(short, long, default_value = "yaml")]
    pub format: StateFormat,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include a health monitor and extra members in the template
    #[arg(long, conflicts_with = "interactive")]
    pub full: bool,

    /// Launch interactive wizard to build the state step by step
    #[arg(short, long)]
    pub interactive: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// State file to validate
    #[arg(default_value = "lbrender.yaml")]
    pub state: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ValidateFormat,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum StateFormat {
    Yaml,
    Json,
    Toml,
}

impl StateFormat {
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ValidateFormat {
    Text,
    Json,
}
