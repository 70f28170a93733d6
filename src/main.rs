use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use chat_relay::connector::api::http;
use chat_relay::{
    Commands, Container, ContainerConfig, ConversationUseCase, MissingCredentialPolicy,
    ProviderKind, RelayClient, Router,
};

const CONNECTION_TROUBLE: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

#[derive(Parser)]
#[command(name = "chat-relay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// LLM backend the relay forwards to
    #[arg(long, global = true, env = "CHAT_RELAY_PROVIDER", value_enum, default_value = "gemini")]
    provider: ProviderKind,

    #[arg(long, global = true, env = "GOOGLE_API_KEY", hide_env_values = true)]
    google_api_key: Option<String>,

    #[arg(long, global = true, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    openrouter_api_key: Option<String>,

    /// Model identifier; defaults depend on the provider
    #[arg(long, global = true, env = "CHAT_RELAY_MODEL")]
    model: Option<String>,

    /// Provider API base URL; defaults depend on the provider
    #[arg(long, global = true, env = "CHAT_RELAY_BASE_URL")]
    base_url: Option<String>,

    /// Timeout for a single upstream call, in seconds
    #[arg(long, global = true, env = "CHAT_RELAY_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,

    /// Whether a missing credential stops startup or fails each request
    #[arg(
        long,
        global = true,
        env = "CHAT_RELAY_MISSING_CREDENTIAL",
        value_enum,
        default_value = "fail-fast"
    )]
    missing_credential: MissingCredentialPolicy,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn container_config(&self) -> ContainerConfig {
        ContainerConfig {
            provider: self.provider,
            google_api_key: self.google_api_key.clone(),
            openrouter_api_key: self.openrouter_api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            missing_credential: self.missing_credential,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    // RUST_LOG, when set, takes precedence over --verbose.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = cli.container_config();

    match cli.command {
        Commands::Serve { port, public } => serve(config, port, public).await,
        Commands::Chat { url } => chat(url, config.timeout).await,
        command => {
            // Offline commands never call the provider.
            config.missing_credential = MissingCredentialPolicy::PerRequest;
            let container = Container::new(config)?;
            let output = Router::new(&container).route(command).await?;
            println!("{}", output);
            Ok(())
        }
    }
}

async fn serve(config: ContainerConfig, port: u16, public: bool) -> Result<()> {
    let container = Arc::new(Container::new(config).context("Cannot start the chat relay")?);

    let host = if public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
    let addr = SocketAddr::from((host, port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        "Backend server listening on {} (provider: {})",
        addr,
        container.provider_name()
    );
    info!("Chat endpoint: http://localhost:{}{}", port, http::CHAT_PATH);

    axum::serve(listener, http::routes(container))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}

async fn chat(url: String, timeout: Duration) -> Result<()> {
    let client = Arc::new(RelayClient::new(url, timeout));
    info!("Chatting through {}", client.url());

    let mut conversation = ConversationUseCase::with_default_seed(client);
    if let Some(greeting) = conversation.last_assistant_message() {
        println!("{}\n", greeting);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if matches!(line.trim(), "/quit" | "/exit") {
            break;
        }

        match conversation.send(&line).await {
            Ok(Some(reply)) => println!("\n{}\n", reply),
            Ok(None) => {}
            Err(_) => println!("\n{}\n", CONNECTION_TROUBLE),
        }
    }

    Ok(())
}
