mod cli;

use crate::cli::{Cli, Commands};
use clap::Parser;
use tracing::{error, info};

use qrcode_batch_server::application::use_cases::RunApplicationUseCase;
use qrcode_batch_server::debug::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            // Initialize logging
            if let Err(e) = init_logging(&args.debug_config()) {
                eprintln!("Failed to initialize logging: {}", e);
            }

            info!("Starting application...");
            let use_case = RunApplicationUseCase::new(args.into_app_config());

            match use_case.execute().await {
                Ok(_) => {
                    info!("Application terminated normally");
                }
                Err(e) => {
                    error!("Application failed: {}", e);
                    eprintln!("❌ Application failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
