// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand, ValueEnum};

use crate::crawl::KEVIN_BACON_TITLE;
use crate::fetch::DEFAULT_CONTACT;
use crate::links::Strategy;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "bacon-pathfinder",
    version = "0.1.0",
    about = "Find the shortest Wikipedia link path from any article to Kevin Bacon",
    long_about = "bacon-pathfinder crawls Wikipedia breadth-first from a starting article, \
                  following article links until it reaches the target article. It reports \
                  either the number of hops or the full path, and can also run as a small \
                  HTTP server answering one search per request."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

/// What a search should report when it finds the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Just the number of link hops from start to target
    Hops,
    /// The full chain of article titles, start to target
    Path,
}

// This enum defines our subcommands (search, serve)
//
// Each variant represents a different subcommand the user can run
// The fields inside each variant become the arguments for that subcommand
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for the shortest link path from a starting article
    ///
    /// Example: bacon-pathfinder search "Footloose_(1984_film)"
    Search {
        /// Wikipedia article title to start from, in URL form
        /// (underscores instead of spaces)
        start_title: String,

        /// What to report: the hop count or the full path
        #[arg(long, value_enum, default_value = "path")]
        mode: Mode,

        /// Where to read links from: the rendered HTML of each page,
        /// or the paginated link-listing API
        #[arg(long, value_enum, default_value = "html")]
        source: Strategy,

        /// Track every shortest-level parent of each article instead of
        /// only the first discoverer
        #[arg(long)]
        multi_parent: bool,

        /// Article title to search for
        #[arg(long, default_value = KEVIN_BACON_TITLE)]
        target: String,

        /// Contact string sent as the User-Agent on every outbound request
        #[arg(long, default_value = DEFAULT_CONTACT)]
        contact: String,

        /// Output the result in JSON format instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run the HTTP server that answers GET /<starting_page>
    ///
    /// Example: bacon-pathfinder serve --port 3000
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 3000)]
        port: u16,

        /// What each request reports: the hop count or the full path
        #[arg(long, value_enum, default_value = "path")]
        mode: Mode,

        /// Where to read links from: rendered HTML or the listing API
        #[arg(long, value_enum, default_value = "html")]
        source: Strategy,

        /// Track every shortest-level parent instead of only the first
        #[arg(long)]
        multi_parent: bool,

        /// Article title every search runs toward
        #[arg(long, default_value = KEVIN_BACON_TITLE)]
        target: String,

        /// Contact string sent as the User-Agent on every outbound request
        #[arg(long, default_value = DEFAULT_CONTACT)]
        contact: String,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What are derive macros?
//    - #[derive(...)] automatically generates code for common operations
//    - Parser: generates CLI parsing logic
//    - ValueEnum: lets an enum be used as the value of a flag, with the
//      variant names (lowercased) as the accepted values
//
// 2. Why default_value vs default_value_t?
//    - default_value takes a string that clap parses like user input
//    - default_value_t takes a typed value directly
//    - Our target default is a &str constant, so default_value fits it
//
// 3. What does #[arg(long)] on a bool do?
//    - Creates a flag like --multi-parent that is false unless present
//    - clap converts the underscore in the field name to a dash
// -----------------------------------------------------------------------------
