use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Send one message to the assistant and print its reply
    Chat {
        message: String,

        /// Continue an existing thread instead of starting a new one
        #[arg(short, long)]
        thread: Option<String>,

        /// Print the response envelope as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the API key can read the configured assistant
    Validate {
        /// Print the response envelope as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the chat endpoint over HTTP
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },
}
