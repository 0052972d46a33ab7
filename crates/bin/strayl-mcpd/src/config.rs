use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;

use strayl_core::client::DEFAULT_API_URL;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4021";

#[derive(Parser, Debug)]
#[command(name = "strayl-mcpd", version, about = "Strayl MCP daemon.")]
struct CliArgs {
    /// Bearer credential for the Strayl backend. Tools that reach the
    /// backend fail with a configuration error when it is absent.
    #[arg(long, env = "STRAYL_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "STRAYL_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[arg(
        long = "stdio",
        env = "STRAYL_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long = "http",
        env = "STRAYL_MCP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(long, env = "STRAYL_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone, Debug)]
pub struct StraylMcpdConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub mcp_http_addr: SocketAddr,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl StraylMcpdConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for StraylMcpdConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.api_url.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "STRAYL_API_URL",
                value: args.api_url,
            });
        }
        if !args.enable_stdio && !args.mcp_serve {
            return Err(ConfigError::MissingSetting(
                "at least one of --stdio or --http",
            ));
        }

        let api_key = args.api_key.filter(|value| !value.trim().is_empty());

        Ok(Self {
            api_key,
            api_url: args.api_url,
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            mcp_http_addr: args.mcp_http_addr,
        })
    }
}
