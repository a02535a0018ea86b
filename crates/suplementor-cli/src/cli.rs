//! CLI argument definitions for the supplement comparison tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use suplementor_export::ExportFormat;
use suplementor_model::{
    EvidenceLevel, FilterPatch, NumericRange, SortDirection, SortKey, SortState,
    SupplementCategory,
};
use tracing::level_filters::LevelFilter;

use crate::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "suplementor",
    version,
    about = "Filter, sort, compare and export supplement datasets",
    long_about = "Filter, sort, compare and export supplement datasets.\n\n\
                  Reads a JSON dataset (an array of records or {\"supplements\": [...]}),\n\
                  applies filters, presets and sorting, and prints or exports the view."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML configuration file (default: ./suplementor.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the filtered and sorted view as a table.
    List(ListArgs),

    /// Export the filtered and sorted view to CSV, TSV, JSON or HTML.
    Export(ExportArgs),

    /// Compare selected supplements side by side.
    Compare(CompareArgs),

    /// Manage saved filter presets.
    #[command(subcommand)]
    Presets(PresetCommand),

    /// Print a share-link query string for the given filters.
    Share(ShareArgs),
}

/// Dataset plus everything that shapes the view.
#[derive(Args)]
pub struct ViewArgs {
    /// Path to the JSON dataset.
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Apply a saved or built-in preset before other filters.
    #[arg(long = "preset", value_name = "ID")]
    pub preset: Option<String>,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub sort: SortArgs,
}

#[derive(Args, Default)]
pub struct FilterArgs {
    /// Start from a share-link query string (e.g. "c=VITAMIN&sr=8-10").
    #[arg(long = "query-string", value_name = "QUERY")]
    pub query_string: Option<String>,

    /// Case-insensitive text search over names, descriptions and tags.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Restrict to a category (repeatable).
    #[arg(long = "category", value_name = "CATEGORY")]
    pub categories: Vec<SupplementCategory>,

    /// Restrict to an evidence level (repeatable).
    #[arg(long = "evidence", value_name = "LEVEL")]
    pub evidence: Vec<EvidenceLevel>,

    /// Starting price range, e.g. 0-120.
    #[arg(long = "price", value_name = "LO-HI", allow_hyphen_values = true)]
    pub price: Option<NumericRange>,

    /// Safety rating range on the 0-10 scale, e.g. 8-10.
    #[arg(long = "safety", value_name = "LO-HI", allow_hyphen_values = true)]
    pub safety: Option<NumericRange>,

    /// User rating range on the 0-5 scale, e.g. 4-5.
    #[arg(long = "rating", value_name = "LO-HI", allow_hyphen_values = true)]
    pub rating: Option<NumericRange>,

    /// Only supplements with research studies.
    #[arg(long = "has-studies")]
    pub has_studies: bool,

    /// Only supplements with user reviews.
    #[arg(long = "has-reviews")]
    pub has_reviews: bool,

    /// Only supplements of natural origin (herbs and adaptogens).
    #[arg(long = "natural")]
    pub natural: bool,

    /// Only supplements with known interactions.
    #[arg(long = "has-interactions")]
    pub has_interactions: bool,

    /// Match an active compound by substring (repeatable).
    #[arg(long = "compound", value_name = "NAME")]
    pub compounds: Vec<String>,

    /// Match a clinical condition by substring (repeatable).
    #[arg(long = "condition", value_name = "CONDITION")]
    pub conditions: Vec<String>,

    /// Match a mechanism pathway or description by substring (repeatable).
    #[arg(long = "mechanism", value_name = "MECHANISM")]
    pub mechanisms: Vec<String>,

    /// Exclude supplements listing this side effect (repeatable).
    #[arg(long = "exclude-side-effect", value_name = "EFFECT")]
    pub excluded_side_effects: Vec<String>,

    /// Match a tag by substring (repeatable).
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

impl FilterArgs {
    /// Patch holding only the dimensions given on the command line.
    pub fn patch(&self) -> FilterPatch {
        let mut patch = FilterPatch::new();
        if let Some(search) = &self.search {
            patch.search_query = Some(search.clone());
        }
        if !self.categories.is_empty() {
            patch = patch.categories(self.categories.iter().copied());
        }
        if !self.evidence.is_empty() {
            patch = patch.evidence_levels(self.evidence.iter().copied());
        }
        patch.price_range = self.price;
        patch.safety_range = self.safety;
        patch.rating_range = self.rating;
        for (flag, target) in [
            (self.has_studies, &mut patch.has_studies_only),
            (self.has_reviews, &mut patch.has_reviews_only),
            (self.natural, &mut patch.natural_only),
            (self.has_interactions, &mut patch.has_interactions_only),
        ] {
            if flag {
                *target = Some(true);
            }
        }
        if !self.compounds.is_empty() {
            patch = patch.active_compounds(self.compounds.iter().cloned());
        }
        if !self.conditions.is_empty() {
            patch = patch.clinical_conditions(self.conditions.iter().cloned());
        }
        if !self.mechanisms.is_empty() {
            patch = patch.mechanisms(self.mechanisms.iter().cloned());
        }
        if !self.excluded_side_effects.is_empty() {
            patch = patch.side_effects(self.excluded_side_effects.iter().cloned());
        }
        if !self.tags.is_empty() {
            patch = patch.tags(self.tags.iter().cloned());
        }
        patch
    }
}

#[derive(Args, Default)]
pub struct SortArgs {
    /// Sort key (name, localizedName, category, evidenceLevel, safetyRating,
    /// userRating, price, studyCount).
    #[arg(long = "sort", value_name = "KEY")]
    pub sort: Option<SortKey>,

    /// Sort descending instead of ascending.
    #[arg(long = "desc", requires = "sort")]
    pub desc: bool,
}

impl SortArgs {
    pub fn sort_state(&self) -> Option<SortState> {
        let direction = if self.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        self.sort.map(|key| SortState::new(key, direction))
    }
}

#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Directory holding saved presets (overrides the configuration file).
    #[arg(long = "preset-dir", value_name = "DIR")]
    pub preset_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Directory holding saved presets (overrides the configuration file).
    #[arg(long = "preset-dir", value_name = "DIR")]
    pub preset_dir: Option<PathBuf>,

    /// Output format (default from configuration, csv otherwise).
    #[arg(long = "format", value_enum)]
    pub format: Option<ExportFormatArg>,

    /// Comma-separated record fields to export, in order.
    #[arg(long = "columns", value_name = "FIELDS", value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Export every record field.
    #[arg(long = "all-columns")]
    pub all_columns: bool,

    /// Title for HTML output.
    #[arg(long = "title", value_name = "TEXT")]
    pub title: Option<String>,

    /// Write to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompareArgs {
    /// Path to the JSON dataset.
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Record id to compare (repeatable, in display order).
    #[arg(long = "id", value_name = "ID", required = true)]
    pub ids: Vec<String>,

    /// Maximum number of compared records (overrides the configuration file).
    #[arg(long = "max", value_name = "N")]
    pub max: Option<usize>,
}

#[derive(Subcommand)]
pub enum PresetCommand {
    /// List built-in and saved presets.
    List(PresetDirArgs),

    /// Show the filters and sort stored in a preset.
    Show {
        /// Preset id.
        id: String,
        #[command(flatten)]
        dir: PresetDirArgs,
    },

    /// Save the given filters and sort as a new preset.
    Save(SavePresetArgs),

    /// Delete a saved preset.
    Delete {
        /// Preset id.
        id: String,
        #[command(flatten)]
        dir: PresetDirArgs,
    },
}

#[derive(Args, Default)]
pub struct PresetDirArgs {
    /// Directory holding saved presets (overrides the configuration file).
    #[arg(long = "preset-dir", value_name = "DIR")]
    pub preset_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct SavePresetArgs {
    /// Preset name.
    pub name: String,

    /// Optional description.
    #[arg(long = "description", value_name = "TEXT")]
    pub description: Option<String>,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub sort: SortArgs,

    #[command(flatten)]
    pub dir: PresetDirArgs,
}

#[derive(Args)]
pub struct ShareArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub sort: SortArgs,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Tsv,
    Json,
    Html,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(format: ExportFormatArg) -> Self {
        match format {
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Tsv => ExportFormat::Tsv,
            ExportFormatArg::Json => ExportFormat::Json,
            ExportFormatArg::Html => ExportFormat::Html,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
