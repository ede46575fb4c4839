/*
 * create.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Create command implementation
 */

//! Create command implementation.
//!
//! Validates the step type name and extension, asks before writing into an
//! existing step type folder, runs the creator and prints what it did.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::debug;

use step_type_create::{
    CreateOptions, DirectoryTemplates, EmbeddedTemplates, InstantiationReport, ManifestOutcome,
    NameSet, OverwriteDecision, StepTypeCreator,
};

/// Arguments for the create command
#[derive(Debug)]
pub struct CreateArgs {
    /// Step type name
    pub name: String,
    /// Step type file extension
    pub extension: String,
    /// Directory to create the step type folder in
    pub dir: Option<PathBuf>,
    /// Manifest path override
    pub manifest: Option<PathBuf>,
    /// Template directory override
    pub templates: Option<PathBuf>,
    /// Skip the overwrite prompt
    pub yes: bool,
    /// Print the report as JSON
    pub json: bool,
}

/// Execute the create command against the process's stdin and stdout
pub fn execute(args: CreateArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    execute_with(args, &mut stdin.lock(), &mut stdout.lock())
}

/// Execute the create command, reading the overwrite answer from `input`
/// and printing to `out`.
pub fn execute_with<R, W>(args: CreateArgs, input: &mut R, out: &mut W) -> Result<()>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    // Validate before touching the filesystem
    let names = NameSet::new(&args.name, &args.extension)?;

    let root = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let mut options = CreateOptions::new(root);
    if let Some(manifest) = args.manifest {
        options = options.with_manifest_path(manifest);
    }
    debug!("Creating step type with {:?}", options);

    let creator = StepTypeCreator::new(names, options);

    let decision = if creator.destination_exists() && !args.yes {
        let destination = creator.destination();
        let proceed = if args.json {
            confirm_overwrite(&destination, &mut *input, &mut io::stderr())?
        } else {
            confirm_overwrite(&destination, &mut *input, &mut *out)?
        };
        OverwriteDecision::from(proceed)
    } else {
        OverwriteDecision::Proceed
    };

    let report = match &args.templates {
        Some(dir) => creator.run(&DirectoryTemplates::new(dir), decision),
        None => creator.run(&EmbeddedTemplates, decision),
    };

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        print_report(&report, &creator.options().manifest_path, out)?;
    }

    match report.fatal_error {
        Some(error) => Err(anyhow::Error::new(error).context("Step creation failed")),
        None => Ok(()),
    }
}

/// Warn that `folder` will be overwritten and ask whether to continue.
///
/// Only the exact answer `yes` proceeds. End of input counts as no.
pub fn confirm_overwrite<R, W>(folder: &Path, input: &mut R, out: &mut W) -> Result<bool>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    writeln!(
        out,
        "{} the folder {} already exists, if you continue, the contents will be overwritten.",
        "Warning:".yellow(),
        folder.display()
    )?;
    write!(out, "Are you sure you want to continue? (yes, no) ")?;
    out.flush()?;

    let mut answer = String::new();
    let read = input
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    if read == 0 {
        return Ok(false);
    }

    Ok(answer.trim_end_matches(['\r', '\n']) == "yes")
}

/// Print the progress lines for a finished run.
pub fn print_report<W>(
    report: &InstantiationReport,
    manifest_path: &Path,
    out: &mut W,
) -> io::Result<()>
where
    W: Write + ?Sized,
{
    if report.aborted {
        writeln!(out, "#Step creation aborted")?;
        return Ok(());
    }

    if report.folder_ready {
        let folder = report
            .destination
            .file_name()
            .unwrap_or(report.destination.as_os_str());
        writeln!(out, "#Creating folder:")?;
        writeln!(out, "{}", folder.to_string_lossy())?;

        writeln!(out, "#Creating Files:")?;
        for path in &report.created_files {
            writeln!(out, "{}", path.display())?;
        }
    }

    if let ManifestOutcome::Updated { .. } = report.manifest {
        let manifest_name = manifest_path.file_name().map_or_else(
            || manifest_path.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        );
        writeln!(out, "#Adding new step to {manifest_name} file")?;
    }

    for warning in &report.warnings {
        writeln!(out, "{}", format!("#Warning, {warning}").yellow())?;
    }

    if report.fatal_error.is_none() {
        writeln!(out, "#Step creation complete")?;
    }

    Ok(())
}
