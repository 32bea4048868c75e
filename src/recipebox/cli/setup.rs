use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "recipebox", bin_name = "recipebox", version)]
#[command(about = "Find recipes and keep your favorites close", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search recipes by name
    #[command(alias = "s")]
    Search {
        /// Keywords; joined with spaces
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,
    },

    /// List recipes whose name starts with a letter
    Letter { letter: String },

    /// Read a recipe: ingredients and steps
    #[command(alias = "view")]
    Show { id: String },

    /// Show a random recipe
    Random,

    /// Search interactively, one query per line on stdin
    Browse,

    /// Manage favorites
    #[command(subcommand)]
    #[command(alias = "favs")]
    Fav(FavCommands),

    /// Sign in to your account
    Login {
        email: String,
        /// Falls back to RECIPEBOX_PASSWORD, then a line on stdin
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account
    Signup {
        email: String,
        username: String,
        /// Falls back to RECIPEBOX_PASSWORD, then a line on stdin
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Get or set configuration
    Config {
        /// Configuration key
        key: Option<String>,
        /// Value to set
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FavCommands {
    /// Add a recipe to favorites by id
    Add { id: String },

    /// Remove a recipe from favorites
    #[command(alias = "rm")]
    Remove { id: String },

    /// List favorites
    #[command(alias = "ls")]
    List,

    /// Remove every favorite
    Clear,

    /// Print how many favorites are saved
    Count,
}
