//! Command line arguments

// standard library
use std::path::PathBuf;

// external crates
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

// gtools modules
use gtools_nuclide::QueryOptions;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

const AFTER_HELP: &str = "\
Query options are taken from --config if given, falling back to the defaults
(delta 2 keV, no thresholds). Any option given on the command line overrides
both.

Examples:
    gtools search 609.3 --delta 0.5 --intensity 1
    gtools chain Ra-226 --branching 0.01
    gtools spectrum U-238 --branching 0.1 --limit
    gtools --data ./tables lines Co-60";

#[derive(Parser, Debug)]
#[command(
    name = "gtools",
    version,
    about = "Identify gamma lines and predict decay chain spectra",
    help_template = HELP_TEMPLATE,
    after_help = AFTER_HELP,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Reference tables to use instead of the built-in dataset
    ///
    /// Either a directory of CSV tables, or a .json/.bin snapshot written by
    /// the export command.
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// JSON file of base query options
    #[arg(long, global = true, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find gamma lines close to an energy
    Search(SearchArgs),
    /// List the gamma lines of a nuclide
    Lines(LinesArgs),
    /// List the decay products of a nuclide
    Chain(ChainArgs),
    /// Gamma lines of a nuclide and all of its decay products
    Spectrum(SpectrumArgs),
    /// Find characteristic X-rays by energy or element
    Xray(XrayArgs),
    /// Write the active reference tables to disk
    Export(ExportArgs),
    /// Build reference tables from the IAEA chart of nuclides
    Fetch(FetchArgs),
}

/// Line filters shared by commands that list gamma lines
#[derive(Args, Debug, Clone, Copy)]
pub struct LineFilter {
    /// Minimum line intensity (%)
    #[arg(short, long, value_name = "PERCENT")]
    pub intensity: Option<f64>,

    /// Only keep lines within 10% of the strongest line of each nuclide
    #[arg(short, long)]
    pub limit: bool,
}

impl LineFilter {
    fn apply(&self, mut options: QueryOptions) -> QueryOptions {
        if let Some(intensity) = self.intensity {
            options.intensity_threshold = intensity;
        }
        if self.limit {
            options.limit_intensity = true;
        }
        options
    }
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Centre of the search window (keV)
    #[arg(allow_negative_numbers = true)]
    pub energy: f64,

    /// Half width of the search window (keV)
    #[arg(short, long, value_name = "KEV")]
    pub delta: Option<f64>,

    /// Minimum half-life of the emitter (s)
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub halflife: Option<f64>,

    /// Minimum line intensity (%)
    #[arg(short, long, value_name = "PERCENT")]
    pub intensity: Option<f64>,
}

#[derive(Args, Debug)]
pub struct LinesArgs {
    /// Nuclide name e.g. Co-60, ba137m
    pub nuclide: String,

    #[command(flatten)]
    pub filter: LineFilter,
}

#[derive(Args, Debug)]
pub struct ChainArgs {
    /// Root nuclide of the chain
    pub nuclide: String,

    /// Minimum cumulative branching ratio of a product
    #[arg(short, long, value_name = "RATIO")]
    pub branching: Option<f64>,

    /// Only list the product names
    #[arg(long)]
    pub brief: bool,
}

#[derive(Args, Debug)]
pub struct SpectrumArgs {
    /// Root nuclide of the chain
    pub nuclide: String,

    /// Minimum cumulative branching ratio of a product
    #[arg(short, long, value_name = "RATIO")]
    pub branching: Option<f64>,

    #[command(flatten)]
    pub filter: LineFilter,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["energy", "element"])))]
pub struct XrayArgs {
    /// Centre of the search window (keV)
    pub energy: Option<f64>,

    /// List every line of an element instead
    #[arg(short, long, value_name = "SYMBOL")]
    pub element: Option<String>,

    /// Half width of the search window (keV)
    #[arg(short, long, value_name = "KEV")]
    pub delta: Option<f64>,
}

/// Output formats of the export command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// JSON snapshot
    #[default]
    Json,
    /// Compact binary snapshot
    Binary,
    /// Directory of CSV tables
    Csv,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file, or directory for csv
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: ExportFormat,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Nuclides to request e.g. co60 ni60
    #[arg(required = true, num_args(1..))]
    pub nuclides: Vec<String>,

    /// Directory to write the CSV tables into
    #[arg(short, long, value_name = "DIR", default_value = "tables")]
    pub output: PathBuf,
}

// ! Mapping onto query options

impl SearchArgs {
    pub fn options(&self, mut options: QueryOptions) -> QueryOptions {
        if let Some(delta) = self.delta {
            options.delta = delta;
        }
        if let Some(halflife) = self.halflife {
            options.halflife_threshold = halflife;
        }
        if let Some(intensity) = self.intensity {
            options.intensity_threshold = intensity;
        }
        options
    }
}

impl LinesArgs {
    pub fn options(&self, options: QueryOptions) -> QueryOptions {
        self.filter.apply(options)
    }
}

impl ChainArgs {
    pub fn options(&self, mut options: QueryOptions) -> QueryOptions {
        if let Some(branching) = self.branching {
            options.branching_ratio_threshold = branching;
        }
        options
    }
}

impl SpectrumArgs {
    pub fn options(&self, mut options: QueryOptions) -> QueryOptions {
        if let Some(branching) = self.branching {
            options.branching_ratio_threshold = branching;
        }
        self.filter.apply(options)
    }
}

impl XrayArgs {
    pub fn options(&self, mut options: QueryOptions) -> QueryOptions {
        if let Some(delta) = self.delta {
            options.delta = delta;
        }
        options
    }
}
