//! CLI interface for Photogram

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "photogram")]
#[command(author = "Krakaw")]
#[command(version = "1.0.0")]
#[command(about = "Share photos, likes and comments", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new photogram.toml configuration file
    Init,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create an account and log in
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "PHOTOGRAM_PASSWORD")]
        password: String,
    },

    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "PHOTOGRAM_PASSWORD")]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged in user
    Whoami,

    /// Update your profile; only the given fields change
    Profile {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        bio: Option<String>,

        /// Profile image reference
        #[arg(short, long)]
        image: Option<String>,

        #[arg(short, long)]
        password: Option<String>,
    },

    /// Show a user by id
    User {
        id: String,

        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Browse and interact with photos
    Photo {
        #[command(subcommand)]
        action: PhotoAction,
    },
}

#[derive(Subcommand)]
pub enum PhotoAction {
    /// Show a photo with its likes and comments
    Show { id: String },

    /// List photos, newest first
    List {
        /// Only photos posted by this user id
        #[arg(short, long)]
        user: Option<String>,

        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Search photos by title
    Search {
        query: String,

        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Post a new photo
    Post {
        #[arg(short, long)]
        title: String,

        /// Image reference
        #[arg(short, long)]
        image: String,
    },

    /// Change the title of one of your photos
    Rename {
        id: String,

        #[arg(short, long)]
        title: String,
    },

    /// Delete one of your photos
    Delete { id: String },

    /// Like a photo
    Like { id: String },

    /// Comment on a photo
    Comment { id: String, text: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
