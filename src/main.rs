// src/main.rs
// =============================================================================
// This is the entry point of our application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Run the search (or the server) and print the result
// 4. Exit with proper code (0 = target found, 1 = unreachable, 2 = error)
//
// Rust concepts used:
// - async/await: Because the crawl blocks on many network requests
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the breadth-first search engine
mod fetch; // src/fetch.rs - the HTTP client wrapper
mod links; // src/links/ - link discovery strategies
mod server; // src/server.rs - the thin HTTP wrapper

use anyhow::Result;
use clap::Parser;
use serde_json::json;

use cli::{Cli, Commands, Mode};
use crawl::{Crawler, Tracking};
use fetch::WikiClient;
use links::Strategy;
use server::ServerConfig;

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = target found
//   Ok(1) = target unreachable
//   Err = unexpected error (mapped to exit code 2 above)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            start_title,
            mode,
            source,
            multi_parent,
            target,
            contact,
            json,
        } => {
            handle_search(
                &start_title,
                mode,
                source,
                tracking_for(multi_parent),
                &target,
                &contact,
                json,
            )
            .await
        }
        Commands::Serve {
            port,
            mode,
            source,
            multi_parent,
            target,
            contact,
        } => {
            let config = ServerConfig {
                target,
                contact,
                strategy: source,
                tracking: tracking_for(multi_parent),
                mode,
            };
            server::serve(config, port).await?;
            Ok(0)
        }
    }
}

fn tracking_for(multi_parent: bool) -> Tracking {
    if multi_parent {
        Tracking::Multi
    } else {
        Tracking::Single
    }
}

// Handles the 'search' subcommand
async fn handle_search(
    start_title: &str,
    mode: Mode,
    strategy: Strategy,
    tracking: Tracking,
    target: &str,
    contact: &str,
    json_output: bool,
) -> Result<i32> {
    if !json_output {
        println!("🔍 Searching from: {}", start_title);
        println!("🎯 Target: {}", target);
    }

    let client = WikiClient::new(contact)?;
    let source = strategy.into_source(client);
    let crawler = Crawler::new(source, target, tracking);

    match mode {
        Mode::Hops => match crawler.min_hops(start_title).await {
            Some(hops) => {
                print_hops(start_title, hops, json_output)?;
                Ok(0)
            }
            None => {
                print_unreachable(start_title, target, json_output)?;
                Ok(1)
            }
        },
        Mode::Path => match crawler.find_path(start_title).await? {
            Some(path) => {
                print_path(start_title, &path, json_output)?;
                Ok(0)
            }
            None => {
                print_unreachable(start_title, target, json_output)?;
                Ok(1)
            }
        },
    }
}

// Prints a hop-count result
fn print_hops(start_title: &str, hops: usize, json_output: bool) -> Result<()> {
    if json_output {
        let output = json!({ "starting_page": start_title, "result": hops });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!();
        println!("🎉 Found in {} hop(s)", hops);
    }
    Ok(())
}

// Prints a full-path result as a numbered chain
fn print_path(start_title: &str, path: &[String], json_output: bool) -> Result<()> {
    if json_output {
        let output = json!({ "starting_page": start_title, "result": path });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("🎉 Found in {} hop(s):", path.len().saturating_sub(1));
    for (index, title) in path.iter().enumerate() {
        println!("   {}. {}", index + 1, title);
    }
    Ok(())
}

// Prints the unreachable outcome (a legitimate result, not an error)
fn print_unreachable(start_title: &str, target: &str, json_output: bool) -> Result<()> {
    if json_output {
        let output = json!({ "starting_page": start_title, "result": "unreachable" });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!();
        println!("❌ Could not reach {} from {}", target, start_title);
    }
    Ok(())
}
