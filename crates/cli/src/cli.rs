use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "stockkeep",
    about = "Track item stock levels in a JSON inventory file",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Inventory file (overrides STOCKKEEP_DATA_PATH)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Low-stock threshold (overrides STOCKKEEP_LOW_STOCK_THRESHOLD)
    #[arg(long, global = true)]
    pub threshold: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty inventory file
    Init(InitArgs),
    /// Add stock for an item
    Add(AddArgs),
    /// Remove stock for an item
    Remove(RemoveArgs),
    /// Show the quantity of one item
    Get(GetArgs),
    /// List items below the low-stock threshold
    Low,
    /// Print every item and its quantity
    Report,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Replace an existing inventory file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    pub item: String,
    /// Whole number of units (>= 0)
    #[arg(allow_hyphen_values = true)]
    pub qty: String,
    /// Start from an empty inventory if the file does not exist yet
    #[arg(long)]
    pub create: bool,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    pub item: String,
    /// Whole number of units (>= 0)
    #[arg(allow_hyphen_values = true)]
    pub qty: String,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    pub item: String,
}
