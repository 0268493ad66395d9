use clap::{Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use stockagent_core::loader::DEFAULT_FETCH_TIMEOUT;
use stockagent_core::lookup::{DEFAULT_ACCESS_KEY, DEFAULT_SOURCE};
use stockagent_core::{KeywordClassifier, LookupDefaults};
use stockagent_mcp::server::McpHttpServerConfig;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4020";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = DEFAULT_FETCH_TIMEOUT.as_secs();
const DEFAULT_SSE_KEEP_ALIVE_SECS: u64 = 15;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "stockagent-mcpd", version, about = "StockAgent portfolio MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "DEFAULT_ACCESS_KEY", default_value = DEFAULT_ACCESS_KEY)]
    default_access_key: String,

    #[arg(long, env = "STOCKAGENT_DEFAULT_SOURCE", default_value = DEFAULT_SOURCE)]
    default_source: String,

    #[arg(
        long,
        env = "STOCKAGENT_FETCH_TIMEOUT_SECS",
        default_value_t = DEFAULT_FETCH_TIMEOUT_SECS
    )]
    fetch_timeout_secs: u64,

    /// Comma-separated keyword table replacing the built-in portfolio keywords.
    #[arg(long, env = "STOCKAGENT_KEYWORDS", value_delimiter = ',')]
    keywords: Vec<String>,

    #[arg(
        long = "stdio",
        env = "STOCKAGENT_ENABLE_STDIO",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "STOCKAGENT_MCP_SERVE",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(long, env = "STOCKAGENT_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        env = "STOCKAGENT_MCP_STATEFUL",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    mcp_stateful: bool,

    /// Seconds between SSE keep-alive pings; 0 disables them.
    #[arg(
        long,
        env = "STOCKAGENT_MCP_SSE_KEEP_ALIVE_SECS",
        default_value_t = DEFAULT_SSE_KEEP_ALIVE_SECS
    )]
    mcp_sse_keep_alive_secs: u64,

    #[arg(long, env = "STOCKAGENT_LOG", default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct StockAgentConfig {
    pub default_access_key: String,
    pub default_source: String,
    pub fetch_timeout: Duration,
    pub keywords: Option<Vec<String>>,
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub mcp_http_addr: SocketAddr,
    pub mcp_stateful: bool,
    pub mcp_sse_keep_alive: Option<Duration>,
    pub log_filter: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSetting { name: &'static str, value: String },
    NoTransport,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
            Self::NoTransport => write!(
                f,
                "no transport enabled: set STOCKAGENT_ENABLE_STDIO or STOCKAGENT_MCP_SERVE"
            ),
        }
    }
}

impl Error for ConfigError {}

impl StockAgentConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    pub fn lookup_defaults(&self) -> LookupDefaults {
        LookupDefaults::default()
            .with_access_key(self.default_access_key.clone())
            .with_source(self.default_source.clone())
    }

    pub fn classifier(&self) -> KeywordClassifier {
        self.keywords
            .as_ref()
            .map_or_else(KeywordClassifier::default, KeywordClassifier::new)
    }

    pub const fn http_config(&self) -> McpHttpServerConfig {
        McpHttpServerConfig {
            addr: self.mcp_http_addr,
            stateful_mode: self.mcp_stateful,
            sse_keep_alive: self.mcp_sse_keep_alive,
        }
    }
}

impl TryFrom<CliArgs> for StockAgentConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let default_access_key = if args.default_access_key.trim().is_empty() {
            DEFAULT_ACCESS_KEY.to_string()
        } else {
            args.default_access_key
        };

        if args.default_source.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "STOCKAGENT_DEFAULT_SOURCE",
                value: args.default_source,
            });
        }

        if args.fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "STOCKAGENT_FETCH_TIMEOUT_SECS",
                value: args.fetch_timeout_secs.to_string(),
            });
        }

        let keywords = if args.keywords.is_empty() {
            None
        } else {
            let keywords: Vec<String> = args
                .keywords
                .iter()
                .map(|keyword| keyword.trim())
                .filter(|keyword| !keyword.is_empty())
                .map(str::to_string)
                .collect();
            if keywords.is_empty() {
                return Err(ConfigError::InvalidSetting {
                    name: "STOCKAGENT_KEYWORDS",
                    value: args.keywords.join(","),
                });
            }
            Some(keywords)
        };

        if !args.enable_stdio && !args.mcp_serve {
            return Err(ConfigError::NoTransport);
        }

        Ok(Self {
            default_access_key,
            default_source: args.default_source,
            fetch_timeout: Duration::from_secs(args.fetch_timeout_secs),
            keywords,
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            mcp_http_addr: args.mcp_http_addr,
            mcp_stateful: args.mcp_stateful,
            mcp_sse_keep_alive: (args.mcp_sse_keep_alive_secs > 0)
                .then(|| Duration::from_secs(args.mcp_sse_keep_alive_secs)),
            log_filter: args.log_filter,
        })
    }
}
