use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use hierview_outline::config::{MatchPolicy, OutlineConfig, PathDisplay};

use crate::input::InputSource;
use crate::logging::LogLevel;

/// Browse a list of paths as a searchable outline.
#[derive(Parser, Debug, Clone)]
#[command(name = "hierview", version, about)]
pub struct Cli {
    /// File to read paths from; words are joined with spaces. Reads stdin when omitted.
    pub path: Vec<String>,

    /// Separator used when showing the focused node's path.
    #[arg(long, default_value = "::")]
    pub separator: String,

    /// Keep a blank root (such as `/`) in the displayed path.
    #[arg(long)]
    pub keep_root: bool,

    /// Which nodes can match a search on their own.
    #[arg(long, value_enum, default_value_t = MatchPolicyArg::Leaf)]
    pub match_policy: MatchPolicyArg,

    #[arg(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Log file. Defaults to hierview.log in the user data directory.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchPolicyArg {
    /// Only leaves match; their ancestors are shown to reach them.
    Leaf,
    /// Any node whose label contains the query matches.
    Any,
}

impl From<MatchPolicyArg> for MatchPolicy {
    fn from(arg: MatchPolicyArg) -> Self {
        match arg {
            MatchPolicyArg::Leaf => MatchPolicy::Leaf,
            MatchPolicyArg::Any => MatchPolicy::Any,
        }
    }
}

impl Cli {
    pub fn source(&self) -> InputSource {
        InputSource::from_args(&self.path)
    }
}

impl From<&Cli> for OutlineConfig {
    fn from(cli: &Cli) -> Self {
        OutlineConfig {
            display: PathDisplay {
                separator: cli.separator.clone(),
                strip_blank_root: !cli.keep_root,
            },
            match_policy: cli.match_policy.into(),
        }
    }
}
