//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use gameshelf_catalog::{Format, GameId, Platform, Status};
use gameshelf_collection::{FormatFilter, SortKey};

#[derive(Parser)]
#[command(name = "gameshelf")]
#[command(about = "Track your video game collection, backlog and play queue", long_about = None)]
pub(crate) struct Cli {
    /// Collection database file (defaults to the saved setting, then the data dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filter and sort arguments shared by list, export and stats.
#[derive(Args, Clone, Default)]
pub(crate) struct FilterArgs {
    /// Case-insensitive title search
    #[arg(short, long)]
    pub text: Option<String>,

    /// Statuses to include (e.g., Pendiente,Jugando)
    #[arg(short, long, value_delimiter = ',')]
    pub status: Vec<Status>,

    /// Platforms to include (e.g., switch,ps5,pc)
    #[arg(short, long, value_delimiter = ',')]
    pub platform: Vec<Platform>,

    /// Format: all, digital or physical
    #[arg(short, long, default_value = "all")]
    pub format: FormatFilter,

    /// Sort: date_desc, date_asc, title_asc, title_desc, rating_desc
    #[arg(long, default_value = "date_desc")]
    pub sort: SortKey,
}

/// Field changes for `edit`. Only given fields are written.
#[derive(Args, Clone, Default)]
pub(crate) struct EditArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub platform: Option<Platform>,

    #[arg(long)]
    pub format: Option<Format>,

    #[arg(long)]
    pub status: Option<Status>,

    /// Your rating, 0 to 10 in steps of 0.5
    #[arg(long, conflicts_with = "clear_rating")]
    pub rating: Option<f32>,

    /// Remove your rating
    #[arg(long)]
    pub clear_rating: bool,

    /// Critic score, 0 to 100
    #[arg(long)]
    pub critic_score: Option<i32>,

    /// Date you started playing (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_started")]
    pub started: Option<NaiveDate>,

    #[arg(long)]
    pub clear_started: bool,

    /// Date you finished (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_finished")]
    pub finished: Option<NaiveDate>,

    #[arg(long)]
    pub clear_finished: bool,

    /// Make this game a DLC of another base game
    #[arg(long, conflicts_with = "no_parent")]
    pub dlc_of: Option<GameId>,

    /// Make this game a base game again
    #[arg(long)]
    pub no_parent: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create an account
    Signup {
        email: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign in and remember the session
    Login {
        email: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and forget the session
    Logout,

    /// Request a password-reset link
    ResetPassword { email: String },

    /// Change the password of the signed-in account
    SetPassword {
        /// New password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Show the signed-in account
    Whoami,

    /// List your collection
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Show a flat table instead of the grouped grid
        #[arg(long)]
        table: bool,
    },

    /// Show one game in detail
    Show { id: GameId },

    /// Search the game catalog
    Search {
        query: String,

        /// Result page (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Fetch descriptions and screenshots for every result
        #[arg(long)]
        details: bool,
    },

    /// Search the catalog and add a result to your collection
    Add {
        query: String,

        /// Which search result to add (1-based)
        #[arg(long, default_value_t = 1)]
        pick: usize,

        #[arg(long)]
        platform: Option<Platform>,

        #[arg(long, default_value = "Digital")]
        format: Format,

        #[arg(long, default_value = "Pendiente")]
        status: Status,

        /// Add as a DLC of this base game
        #[arg(long)]
        dlc_of: Option<GameId>,

        /// Add as a DLC of the base game whose title contains this text
        #[arg(long, conflicts_with = "dlc_of")]
        dlc_of_title: Option<String>,
    },

    /// Edit a game's fields
    Edit {
        id: GameId,

        #[command(flatten)]
        changes: EditArgs,
    },

    /// Replace a game's notes (empty text clears them)
    Notes { id: GameId, text: String },

    /// Delete a game (and its DLCs)
    Delete { id: GameId },

    /// Show or rearrange the play queue
    Queue {
        #[command(subcommand)]
        action: Option<QueueAction>,

        /// Include games hidden from the queue
        #[arg(long, global = true)]
        show_hidden: bool,
    },

    /// Search alternative cover images
    Covers { query: String },

    /// Set a game's cover image
    SetCover { id: GameId, url: String },

    /// Import games from a CSV file
    Import { file: PathBuf },

    /// Export the (filtered) collection to a CSV file
    Export {
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show collection statistics
    Stats {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Manage settings and the catalog API key
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum QueueAction {
    /// Show the queue (default)
    Show,

    /// Move a game to a new position (1-based)
    Move { id: GameId, position: usize },

    /// Hide a game from the queue
    Hide { id: GameId },

    /// Show a hidden game in the queue again
    Unhide { id: GameId },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show settings and API key source
    Show,

    /// Print the settings and credentials file paths
    Path,

    /// Save the RAWG API key to the credentials file
    SetKey { key: String },
}
