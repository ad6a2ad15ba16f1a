//! Command-line definition.

use std::path::PathBuf;

use clap::{
    Args,
    Parser,
    Subcommand,
};

use crate::app::{
    NormaliseRun,
    Summary,
    TranslateRun,
    run_normalise,
    run_translate,
};
use crate::config::{
    self,
    SettingsOverrides,
};
use crate::error::Error;
use crate::locale::LocaleSource;

/// locale-sync - propagate spreadsheet translations into locale JSON trees
#[derive(Parser, Debug)]
#[command(name = "locale-sync")]
#[command(version)]
#[command(about = "Propagate spreadsheet translations into locale JSON trees", long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Subcommand; translation runs when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Arguments of the default translate run
    #[command(flatten)]
    pub translate: TranslateArgs,

    /// Directory that paths and patterns are resolved against
    #[arg(long, global = true, default_value = ".")]
    pub cwd: PathBuf,

    /// Where a document's locale is read from
    #[arg(long, global = true, value_enum, alias = "fileLocaleSource")]
    pub file_locale_source: Option<LocaleSource>,

    /// Enable debug logging and list every changed file
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Append log output to this file instead of the console
    #[arg(long, global = true, alias = "logFile")]
    pub log_file: Option<PathBuf>,
}

/// Translate run: table plus destination glob.
#[derive(Args, Debug, Default)]
pub struct TranslateArgs {
    /// Translation table (CSV)
    #[arg(required = true)]
    pub source: Option<PathBuf>,

    /// Glob selecting the destination documents
    #[arg(required = true)]
    pub destinations: Option<String>,

    /// Core document used when a placeholder has no regional translation
    #[arg(long)]
    pub core: Option<PathBuf>,

    /// Also translate keys whose path contains a source phrase
    #[arg(long, alias = "translateKeys")]
    pub translate_keys: bool,
}

/// Subcommands besides the default translate run.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Remove entries already provided by base documents
    #[command(alias = "normalize")]
    Normalise(NormaliseArgs),
}

/// Normalise run: document glob plus brand layout.
#[derive(Args, Debug)]
pub struct NormaliseArgs {
    /// Glob selecting the documents to normalise
    pub files_pattern: String,

    /// Path component, counted from the end, that names the brand
    #[arg(long, alias = "brandPosition")]
    pub brand_position: Option<usize>,

    /// Brand every other brand falls back to
    #[arg(long, alias = "baseBrandName")]
    pub base_brand_name: Option<String>,
}

impl Cli {
    /// Loads settings and executes the selected run.
    pub fn run(self) -> Result<Summary, Error> {
        let mut overrides =
            SettingsOverrides { file_locale_source: self.file_locale_source, ..Default::default() };

        match self.command {
            Some(Command::Normalise(args)) => {
                overrides.brand_position = args.brand_position;
                overrides.base_brand_name = args.base_brand_name;
                let settings = config::load_settings(&self.cwd, overrides)?;
                run_normalise(&NormaliseRun {
                    cwd: self.cwd,
                    files_pattern: args.files_pattern,
                    settings,
                })
            }
            None => {
                let TranslateArgs { source, destinations, core, translate_keys } = self.translate;
                overrides.core = core;
                overrides.translate_keys = translate_keys.then_some(true);
                let settings = config::load_settings(&self.cwd, overrides)?;
                run_translate(&TranslateRun {
                    cwd: self.cwd,
                    source: source.unwrap_or_default(),
                    destinations: destinations.unwrap_or_default(),
                    settings,
                })
            }
        }
    }
}
