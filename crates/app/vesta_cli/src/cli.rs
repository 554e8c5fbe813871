use clap::{Args, Parser, Subcommand};
use vesta_api_client::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(name = "vesta_cli", version, about = "Terminal client for the Vesta chat API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat(ServerArgs),

    /// Check that the chat endpoint is alive.
    Ping(ServerArgs),

    /// Print the version.
    Version,
}

#[derive(Args, Debug)]
pub struct ServerArgs {
    /// Base URL of the chat server.
    #[arg(long, env = "VESTA_SERVER_URL", default_value = DEFAULT_BASE_URL)]
    pub server: String,
}
