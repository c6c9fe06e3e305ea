use std::{net::IpAddr, time::Duration};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use inquiry_testing::relay::{self, StubReply};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Relay {
            host,
            port,
            fail,
            status,
            delay_ms,
        } => {
            let reply = match fail {
                Some(error) => StubReply::failure(status.unwrap_or(500), error),
                None => StubReply::ok(),
            }
            .with_delay(Duration::from_millis(delay_ms));
            relay::start_server(host, port, reply).await?
        }
        Command::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                env!("CARGO_BIN_NAME"),
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start a mail relay that accepts inquiries without sending any email
    Relay {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8003")]
        port: u16,
        /// Reject every inquiry with this error message
        #[arg(long)]
        fail: Option<String>,
        /// Status code used together with --fail
        #[arg(long, requires = "fail")]
        status: Option<u16>,
        /// Wait this many milliseconds before responding
        #[arg(long, default_value = "0")]
        delay_ms: u64,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}
