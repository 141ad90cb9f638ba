//! sockecho binary
//!
//! `server`, `client`, `demo` and `ask` subcommands. Every path exits 0;
//! failures are reported as printed diagnostics.

use std::io;

use clap::{CommandFactory, Parser, Subcommand};
use sockecho::chat::ChatClient;
use sockecho::config::{DEFAULT_ADDR, DEFAULT_CHAT_PROMPT};
use sockecho::demo::Demo;
use sockecho::{ChatConfig, Client, Config, Server};
use tracing_subscriber::{fmt, EnvFilter};

/// Line-oriented TCP echo server and client
#[derive(Parser, Debug)]
#[command(name = "sockecho")]
#[command(about = "Line-oriented TCP echo server and client")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 启动服务器
    Server {
        /// Listen address (host:port)
        #[arg(short, long, default_value = DEFAULT_ADDR)]
        listen: String,

        /// Per-connection read timeout in milliseconds (0 = none)
        #[arg(long, default_value = "0")]
        read_timeout_ms: u64,
    },

    /// 启动客户端
    Client {
        /// Server address (host:port)
        #[arg(short, long, default_value = DEFAULT_ADDR)]
        server: String,

        /// Pause after each sent line in milliseconds
        #[arg(long, default_value = "100")]
        pace_ms: u64,
    },

    /// 演示Socket基础概念
    Demo,

    /// Send one prompt to the chat-completion endpoint
    Ask {
        /// Prompt text
        #[arg(default_value = DEFAULT_CHAT_PROMPT)]
        prompt: String,

        /// Model name
        #[arg(long)]
        model: Option<String>,

        /// OpenAI-compatible base URL
        #[arg(long)]
        base_url: Option<String>,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sockecho=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            print!("{}", e.render());
            return;
        }
    };

    let Some(command) = args.command else {
        let _ = Args::command().print_help();
        println!();
        println!("服务器默认监听: {}", DEFAULT_ADDR);
        return;
    };

    match command {
        Commands::Server { listen, read_timeout_ms } => {
            let config = Config::builder()
                .listen_addr(listen)
                .read_timeout_ms(read_timeout_ms)
                .build();

            let result = Server::bind(config).and_then(|server| server.run());
            if let Err(e) = result {
                tracing::error!("服务器启动失败: {}", e);
            }
        }

        Commands::Client { server, pace_ms } => {
            let config = Config::builder()
                .server_addr(server)
                .input_pace_ms(pace_ms)
                .build();

            let result = Client::new(config)
                .connect()
                .and_then(|session| session.run(io::stdin().lock(), io::stdout()));
            match result {
                Ok(end) => tracing::debug!("Session ended: {:?}", end),
                Err(e) => tracing::error!("客户端连接失败: {}", e),
            }
        }

        Commands::Demo => {
            if let Err(e) = Demo::new().run() {
                tracing::error!("演示失败: {}", e);
            }
        }

        Commands::Ask { prompt, model, base_url } => {
            let mut config = match ChatConfig::from_env() {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!("{}", e);
                    return;
                }
            };
            if let Some(model) = model {
                config = config.model(model);
            }
            if let Some(url) = base_url {
                config = config.base_url(url);
            }

            match ChatClient::new(config).and_then(|client| client.complete(&prompt)) {
                Ok(answer) => println!("{}", answer),
                Err(e) => tracing::error!("Chat request failed: {}", e),
            }
        }
    }
}
