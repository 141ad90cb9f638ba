//! Configuration for sockecho
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

use crate::error::{Result, SockError};

/// Default address for both the server listener and the client dial
pub const DEFAULT_ADDR: &str = "localhost:8080";

/// What the client does when its reader sees the server go away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectPolicy {
    /// Print the disconnect and terminate the whole process
    ExitProcess,

    /// Report the disconnect to the foreground loop, which ends the session.
    ///
    /// The socket is shut down as soon as the reader notices, so the next
    /// line sent fails at once. A foreground blocked reading the console
    /// still only notices once that read returns.
    Notify,
}

/// Main configuration for the echo server and client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Server Configuration
    // -------------------------------------------------------------------------
    /// TCP listen address
    pub listen_addr: String,

    /// Connection read timeout (milliseconds, 0 = block forever)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = block forever)
    pub write_timeout_ms: u64,

    /// Disable Nagle's algorithm on every stream
    pub nodelay: bool,

    // -------------------------------------------------------------------------
    // Client Configuration
    // -------------------------------------------------------------------------
    /// Address the client dials
    pub server_addr: String,

    /// Pause after each sent line so replies don't garble the prompt
    pub input_pace_ms: u64,

    /// Reaction to a server disconnect
    pub disconnect_policy: DisconnectPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_ADDR.to_string(),
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            nodelay: true,
            server_addr: DEFAULT_ADDR.to_string(),
            input_pace_ms: 100,
            disconnect_policy: DisconnectPolicy::ExitProcess,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        (self.write_timeout_ms > 0).then(|| Duration::from_millis(self.write_timeout_ms))
    }

    pub fn input_pace(&self) -> Duration {
        Duration::from_millis(self.input_pace_ms)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the TCP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the address the client connects to
    pub fn server_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.server_addr = addr.into();
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    /// Set the pause after each line the client sends (in milliseconds)
    pub fn input_pace_ms(mut self, ms: u64) -> Self {
        self.config.input_pace_ms = ms;
        self
    }

    pub fn disconnect_policy(mut self, policy: DisconnectPolicy) -> Self {
        self.config.disconnect_policy = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

// =============================================================================
// Chat Configuration
// =============================================================================

/// Environment variable holding the API key for the chat endpoint
pub const API_KEY_ENV: &str = "DASHSCOPE_API_KEY";

/// OpenAI-compatible endpoint the chat command talks to
pub const DEFAULT_CHAT_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";

pub const DEFAULT_CHAT_MODEL: &str = "qwen3-8b";

pub const DEFAULT_CHAT_PROMPT: &str = "你是谁";

/// Configuration for the one-shot chat completion
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,

    /// Whole-request timeout (milliseconds, 0 = reqwest default)
    pub timeout_ms: u64,
}

impl ChatConfig {
    /// Build a config around an explicit API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_CHAT_BASE_URL.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            timeout_ms: 0,
        }
    }

    /// Read the API key from `DASHSCOPE_API_KEY`
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(SockError::Config(format!("{} is not set", API_KEY_ENV))),
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = ms;
        self
    }

    /// Full URL of the chat-completions route
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
