// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Frontdesk - a support chatbot with human handoff.
//!
//! This is the binary entry point for the Frontdesk service.

mod doctor;
mod serve;

use clap::{Parser, Subcommand};

/// Frontdesk - a support chatbot with human handoff.
#[derive(Parser, Debug)]
#[command(name = "frontdesk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the webhook service.
    Serve,
    /// Check connectivity to the session store, responder, and platform.
    Doctor,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match frontdesk_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            frontdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Doctor) => doctor::run_doctor(config).await,
        None => {
            println!("frontdesk: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
