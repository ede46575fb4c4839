/*
 * engine.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Writes a new step type folder from a template source.
 */

use crate::content::ContentRewriter;
use crate::filename::destination_path;
use crate::manifest::{ManifestUpdate, update_manifest};
use crate::names::NameSet;
use crate::report::{CreateWarning, InstantiationReport, ManifestOutcome, error_chain};
use crate::templates::TemplateSource;
use crate::types::{CreateError, CreateOptions, GeneratedFile, OverwriteDecision, TemplateAsset};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Creates one step type.
///
/// Holds everything a run needs; there is no shared state between
/// creators. Run it once per step type.
#[derive(Debug, Clone)]
pub struct StepTypeCreator {
    names: NameSet,
    options: CreateOptions,
    rewriter: ContentRewriter,
}

impl StepTypeCreator {
    pub fn new(names: NameSet, options: CreateOptions) -> Self {
        let rewriter = ContentRewriter::new(&names);
        Self {
            names,
            options,
            rewriter,
        }
    }

    pub fn names(&self) -> &NameSet {
        &self.names
    }

    pub fn options(&self) -> &CreateOptions {
        &self.options
    }

    /// The step type folder, `<root>/<lower-first name>`.
    pub fn destination(&self) -> PathBuf {
        self.options.root.join(self.names.lower_first())
    }

    /// Whether the step type folder is already there. Callers should
    /// confirm with the user before running in that case.
    pub fn destination_exists(&self) -> bool {
        self.destination().exists()
    }

    /// Rename and rewrite a single template asset.
    pub fn generate(&self, asset: &TemplateAsset) -> GeneratedFile {
        GeneratedFile {
            relative_path: destination_path(&asset.archive_path, &self.names),
            content: self.rewriter.rewrite(&asset.text()),
        }
    }

    /// Write every asset from `source` into the step type folder, then
    /// register the step type in the manifest.
    ///
    /// With [`OverwriteDecision::Abort`] nothing is touched. The first
    /// template or write error stops the run; the manifest is left alone
    /// and the report lists the files written so far. Manifest problems
    /// only produce warnings.
    pub fn run(&self, source: &dyn TemplateSource, decision: OverwriteDecision) -> InstantiationReport {
        let mut report = InstantiationReport::new(self.destination());

        if decision == OverwriteDecision::Abort {
            info!("Step creation aborted, nothing written");
            report.aborted = true;
            return report;
        }

        if let Err(error) = self.write_files(source, &mut report) {
            warn!("Step creation failed: {}", error_chain(&error));
            if !report.created_files.is_empty() {
                report.warnings.push(CreateWarning::PartialOutput {
                    created: report.created_files.len(),
                });
            }
            report.fatal_error = Some(error);
            return report;
        }

        self.register(&mut report);
        report
    }

    fn write_files(
        &self,
        source: &dyn TemplateSource,
        report: &mut InstantiationReport,
    ) -> Result<(), CreateError> {
        let destination = self.destination();
        let existed = destination.is_dir();

        fs::create_dir_all(&destination).map_err(|source| CreateError::FolderCreate {
            path: destination.clone(),
            source,
        })?;
        report.folder_created = !existed;
        report.folder_ready = true;
        debug!(
            "Using folder {} (new: {})",
            destination.display(),
            report.folder_created
        );

        debug!("Reading {}", source.describe());
        for asset in source.assets()? {
            let asset = asset?;
            let file = self.generate(&asset);
            let path = self.options.root.join(&file.relative_path);

            fs::write(&path, &file.content)
                .map_err(|source| CreateError::FileWrite { path: path.clone(), source })?;

            info!("Created {} from {}", path.display(), asset.archive_path);
            report.created_files.push(file.relative_path);
        }

        Ok(())
    }

    fn register(&self, report: &mut InstantiationReport) {
        match update_manifest(&self.options.manifest_path, &self.names) {
            Ok(ManifestUpdate::Missing(path)) => {
                report.manifest = ManifestOutcome::Missing;
                report.warnings.push(CreateWarning::ManifestMissing { path });
            }
            Ok(ManifestUpdate::Updated { path, duplicate }) => {
                info!("Registered {} in {}", self.names.node_name(), path.display());
                report.manifest = ManifestOutcome::Updated { duplicate };
                if duplicate {
                    report.warnings.push(CreateWarning::DuplicateManifestEntry {
                        path,
                        name: self.names.upper_first().to_string(),
                    });
                }
            }
            Err(error) => {
                let reason = error_chain(&error);
                warn!("Manifest not updated: {}", reason);
                report.manifest = ManifestOutcome::Failed;
                report.warnings.push(CreateWarning::ManifestNotUpdated { reason });
            }
        }
    }
}
