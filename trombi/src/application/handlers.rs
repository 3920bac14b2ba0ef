use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use trombi_core::error::{Result, TrombiError};
use trombi_core::ingest::sheet::read_table_from_path;
use trombi_core::{
    ArchiveOptions, AssociationEngine, AssociationPolicy, Compression, MatchEligibility, Photo,
    collect_inputs, export_single, inspect_archive, read_persons_from_path, write_archive,
};

use crate::presentation::cli::SessionArgs;

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| TrombiError::Format(format!("json: {e}")))
}

/// Loads persons and photos and replays the association steps of `args`.
fn open_session(args: SessionArgs) -> Result<AssociationEngine> {
    let persons = read_persons_from_path(&args.sheet)?;
    let mut policy = if args.return_displaced {
        AssociationPolicy::returning_displaced()
    } else {
        AssociationPolicy::default()
    };
    if args.match_any {
        policy.auto_match = MatchEligibility::AnyPerson;
    }
    let mut engine = AssociationEngine::with_persons(persons, policy);

    let roots: Vec<&Path> = args.photos.iter().map(|p| p.as_path()).collect();
    let inputs = collect_inputs(&roots)?;
    for s in &inputs.spreadsheets {
        warn!(path = %s.display(), "spreadsheet among photo inputs ignored");
    }
    for p in &inputs.ignored {
        warn!(path = %p.display(), "not an image, ignored");
    }
    engine.add_photos(inputs.photos);

    for a in &args.assign {
        let index = engine.pool_index_of(&a.file).ok_or_else(|| {
            TrombiError::Format(format!("no unassigned photo named {:?}", a.file))
        })?;
        let m = engine.assign(index, a.person)?;
        eprintln!("assign: {} -> {}", a.file, m.file_name);
    }

    if !args.no_auto {
        match engine.auto_match() {
            Ok(report) => eprintln!(
                "auto-match: {} photo(s) matched, {} unassigned",
                report.count(),
                report.remaining
            ),
            Err(e @ TrombiError::NothingToMatch { .. }) => eprintln!("auto-match: {e}"),
            Err(e) => return Err(e),
        }
    }

    for id in &args.unassign {
        match engine.remove(*id) {
            Ok(photo) => eprintln!("unassign: person {id} released photo {photo}"),
            Err(e @ TrombiError::NotMapped(_)) => eprintln!("unassign: {e}"),
            Err(e) => return Err(e),
        }
    }
    Ok(engine)
}

fn print_session(engine: &AssociationEngine) {
    for p in engine.persons() {
        match engine.mapping_for(p.id) {
            Some(m) => println!(
                "#{:<4} {:<40} <- {}",
                p.id,
                m.file_name,
                m.photo.name()
            ),
            None => println!(
                "#{:<4} {} {} [{}]  (no photo)",
                p.id, p.last_name, p.first_name, p.reference
            ),
        }
    }
    for e in engine.unassigned() {
        println!("unassigned {:<6} {}", e.id.to_string(), e.photo.name());
    }
}

pub fn handle_persons(sheet: PathBuf, json: bool) -> Result<()> {
    let persons = read_persons_from_path(&sheet)?;
    if json {
        println!("{}", to_json(&persons)?);
        return Ok(());
    }
    for p in &persons {
        println!(
            "#{:<4} {:<20} {:<20} {}",
            p.id, p.last_name, p.first_name, p.reference
        );
    }
    eprintln!("persons: {} row(s) in {}", persons.len(), sheet.display());
    Ok(())
}

pub fn handle_columns(sheet: PathBuf) -> Result<()> {
    let report = read_table_from_path(&sheet)?.column_report();
    let show = |role: &str, col: &Option<String>| match col {
        Some(h) => println!("{role:<11} {h}"),
        None => println!("{role:<11} (not found, placeholders used)"),
    };
    show("first name", &report.first_name);
    show("last name", &report.last_name);
    show("reference", &report.reference);
    println!("headers     {}", report.headers.join(" | "));
    Ok(())
}

pub fn handle_match(session: SessionArgs) -> Result<()> {
    let engine = open_session(session)?;
    print_session(&engine);
    Ok(())
}

pub fn handle_pack(
    session: SessionArgs,
    out: PathBuf,
    logo: Option<PathBuf>,
    project: Option<String>,
    deterministic: bool,
    stored: bool,
    summary: bool,
) -> Result<()> {
    let logo = logo.map(Photo::from_path).transpose()?;
    let engine = open_session(session)?;

    let opts = ArchiveOptions {
        project_name: project,
        deterministic,
        compression: if stored {
            Compression::Stored
        } else {
            Compression::Deflated
        },
        ..Default::default()
    };
    let built = write_archive(&out, &engine.mappings(), logo.as_ref(), &opts)?;
    for e in engine.unassigned() {
        eprintln!("pack: left out {}", e.photo.name());
    }
    eprintln!(
        "pack: wrote {} ({} photo(s) in {} folder(s))",
        built.path.display(),
        built.summary.total_photos,
        built.summary.references.len()
    );
    if summary {
        println!("{}", to_json(&built.summary)?);
    }
    Ok(())
}

pub fn handle_rename(photo: PathBuf, sheet: PathBuf, person: u32, out: PathBuf) -> Result<()> {
    let persons = read_persons_from_path(&sheet)?;
    let mut engine = AssociationEngine::with_persons(persons, AssociationPolicy::default());
    let mapping = engine.attach(Photo::from_path(&photo)?, person)?;
    let path = export_single(mapping, &out)?;
    eprintln!("rename: {} -> {}", photo.display(), path.display());
    Ok(())
}

pub fn handle_inspect(archive: PathBuf, json: bool) -> Result<()> {
    let summary = inspect_archive(&archive)?;
    if json {
        println!("{}", to_json(&summary)?);
        return Ok(());
    }
    if let Some(project) = &summary.project_name {
        println!("project  {project}");
    }
    for (reference, r) in &summary.references {
        println!(
            "{:<24} photos={:<4} logo={}",
            reference,
            r.photo_count,
            if r.has_logo { "yes" } else { "no" }
        );
    }
    println!("total    {} photo(s)", summary.total_photos);
    Ok(())
}
