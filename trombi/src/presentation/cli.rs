use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "trombi: rename photos from a spreadsheet and pack them by reference", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// `FILE=PERSON_ID` given to `--assign`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub file: String,
    pub person: u32,
}

pub fn parse_assignment(s: &str) -> Result<Assignment, String> {
    let (file, id) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected FILE=PERSON_ID, got {s:?}"))?;
    if file.is_empty() {
        return Err(format!("missing photo file name in {s:?}"));
    }
    let person = id
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid person id {id:?}: {e}"))?;
    Ok(Assignment {
        file: file.to_string(),
        person,
    })
}

/// Spreadsheet, photos and the association steps applied to them, in order:
/// manual assignments, auto-match, then removals.
#[derive(Args)]
pub struct SessionArgs {
    /// spreadsheet (.xlsx/.xls) listing the persons
    pub sheet: PathBuf,

    /// photo files or directories (searched recursively)
    pub photos: Vec<PathBuf>,

    /// bind a photo to a person by hand: FILE=PERSON_ID (FILE is the photo's file name)
    #[arg(long = "assign", value_parser = parse_assignment)]
    pub assign: Vec<Assignment>,

    /// after matching, drop the photo of this person id (it goes back to the pool)
    #[arg(long = "unassign")]
    pub unassign: Vec<u32>,

    /// skip matching photos to persons by file name
    #[arg(long)]
    pub no_auto: bool,

    /// when a person is assigned a second photo, keep the first one in the pool
    #[arg(long)]
    pub return_displaced: bool,

    /// let auto-match give a photo to persons who already have one (first match wins)
    #[arg(long)]
    pub match_any: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the persons read from a spreadsheet
    Persons {
        sheet: PathBuf,
        /// print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show which spreadsheet column fills first name, last name and reference
    Columns { sheet: PathBuf },

    /// Dry run: show the associations a pack would use
    Match {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Build the zip archive of renamed photos, one folder per reference
    Pack {
        #[command(flatten)]
        session: SessionArgs,

        /// output directory for the archive
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// image copied into every reference folder
        #[arg(long)]
        logo: Option<PathBuf>,

        /// project name used in the archive file name
        #[arg(long)]
        project: Option<String>,

        /// fixed entry timestamps for reproducible archives
        #[arg(long)]
        deterministic: bool,

        /// store entries without compression
        #[arg(long)]
        stored: bool,

        /// print the per-reference summary as JSON on stdout
        #[arg(long)]
        summary: bool,
    },

    /// Copy one photo under the canonical name of one person
    Rename {
        photo: PathBuf,
        #[arg(long)]
        sheet: PathBuf,
        /// person id as listed by `persons`
        #[arg(long)]
        person: u32,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Summarise an archive built by `pack`
    Inspect {
        archive: PathBuf,
        /// print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
