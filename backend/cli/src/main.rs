use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use markpreview_gateway::GatewayState;

#[derive(Parser)]
#[command(name = "markpreview")]
#[command(about = "Live markdown preview server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the preview HTTP server
    Serve {
        /// Port to bind the HTTP server to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
        /// Path to the YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Convert a markdown file (or stdin) and print the HTML fragment
    Render {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,
        /// Print a JSON envelope carrying the truncation flag
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, config } => {
            let path = config.unwrap_or_else(markpreview_config::config_file_path);
            let mut config = markpreview_config::load_and_prepare(&path).await?;
            if let Some(port) = port {
                config.port = port;
            }

            logging::init_logger(&config.log_dir, &config.log_level);
            info!(
                port = config.port,
                bind = %config.bind_address,
                static_dir = %config.static_dir,
                "Starting preview server"
            );

            let addr = config.socket_addr()?;
            let state = GatewayState::new(config);
            markpreview_gateway::start_server(addr, state).await
        }
        Commands::Render { file, json } => {
            let input = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read stdin")?;
                    buf
                }
            };

            let rendered = markdown::render(&input);
            if json {
                println!("{}", serde_json::to_string(&rendered)?);
            } else {
                if rendered.truncated {
                    eprintln!("warning: input was malformed; output is truncated");
                }
                println!("{}", rendered.html);
            }
            Ok(())
        }
    }
}
