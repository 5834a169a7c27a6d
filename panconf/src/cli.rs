use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "panconf")]
#[command(about = "Render firewall XML configuration as XML, JSON, flat paths, or set commands")]
pub struct Cli {
    /// Path query selecting what to render, for example ./shared/address.
    pub xpath: Option<String>,
    /// Configuration file to read; `-` reads stdin.
    #[arg(long, default_value = "-")]
    pub config: PathBuf,
    /// Print the selection as XML.
    #[arg(long)]
    pub xml: bool,
    /// Print the selection as JSON.
    #[arg(long)]
    pub json: bool,
    /// Compact JSON in document order instead of indented with sorted keys.
    #[arg(long, requires = "json")]
    pub compact: bool,
    /// Print the selection as flat path lines.
    #[arg(long)]
    pub flat: bool,
    /// Path prefix for flat lines.
    #[arg(long, default_value = "./", allow_hyphen_values = true)]
    pub flat_prefix: String,
    /// Print the selection as set commands.
    #[arg(long)]
    pub set: bool,
    /// Command prefix for set lines.
    #[arg(long, default_value = "set ", allow_hyphen_values = true)]
    pub prefix: String,
    /// Collapse multiple members into one `[ a b ]` set command.
    #[arg(long)]
    pub mlist: bool,
    /// Print version, Panorama, and multi-vsys detection.
    #[arg(long)]
    pub classify: bool,
    /// Render the release profile's default paths instead of an XPATH.
    #[arg(long, conflicts_with = "xpath")]
    pub defaults: bool,
    /// Print the release profile's default paths.
    #[arg(long)]
    pub list_defaults: bool,
    /// Release profiles TOML replacing the built-in table.
    #[arg(long)]
    pub profiles_file: Option<PathBuf>,
    /// Tag that always becomes a JSON list; repeat to list several. Replaces
    /// the default `entry` and `member`.
    #[arg(long = "forcelist", value_name = "TAG")]
    pub forcelist: Vec<String>,
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn wants_output(&self) -> bool {
        self.xml || self.json || self.flat || self.set
    }
}
