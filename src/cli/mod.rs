use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP chat relay
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "3001")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the relay on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Chat with a running relay from the terminal
    Chat {
        /// Relay endpoint to post transcripts to
        #[arg(long, env = "CHAT_RELAY_URL", default_value = "http://localhost:3001/api/chat")]
        url: String,
    },

    /// Print what the configured provider would receive for a transcript file
    Normalize {
        /// JSON file holding `{"messages": [...]}` or a bare message array
        path: PathBuf,
    },
}
