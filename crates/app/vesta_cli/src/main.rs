// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands, ServerArgs};
use vesta_api_client::ChatClient;

mod cli;
mod logging;
mod render;
mod repl;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    match &args.command {
        Commands::Chat(server) => chat(server).await?,
        Commands::Ping(server) => ping(server).await?,
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

async fn chat(server: &ServerArgs) -> Result<()> {
    let client = ChatClient::new(&server.server)?;
    log::info!("chatting with {}", client.base_url());

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    repl::run(stdin, &mut stdout, &client).await?;
    Ok(())
}

async fn ping(server: &ServerArgs) -> Result<()> {
    let client = ChatClient::new(&server.server)?;

    let banner = client.banner().await?;
    let liveness = client.liveness().await?;
    if liveness.reply.is_empty() {
        return Err(Error::Custom(format!(
            "{} answered without a reply",
            client.base_url()
        )));
    }

    println!("{banner}");
    println!("{}", liveness.reply);
    Ok(())
}
