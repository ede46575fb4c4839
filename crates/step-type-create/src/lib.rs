/*
 * step-type-create
 * Copyright (c) 2025 Posit, PBC
 *
 * Step type scaffolding for the VLE authoring tool.
 *
 * A step type is a folder of JavaScript, HTML and CSS files under
 * `vle/node/<name>/`, registered in `setupNodes.js`. This crate creates
 * one from a bundled template set in which the type is spelled
 * `template` / `Template`.
 *
 * # Architecture
 *
 * ```text
 * NameSet ──┬─> rewrite_file_name ──┐
 *           └─> ContentRewriter ────┼─> StepTypeCreator::run ─> InstantiationReport
 * TemplateSource (embedded | dir) ──┘            │
 *                                                └─> update_manifest (setupNodes.js)
 * ```
 *
 * The crate does no console I/O. Deciding whether to overwrite an existing
 * folder and printing the report are left to the caller.
 *
 * # Usage
 *
 * ```ignore
 * use step_type_create::{CreateOptions, EmbeddedTemplates, NameSet, OverwriteDecision, StepTypeCreator};
 *
 * let names = NameSet::new("quiz", "qz")?;
 * let creator = StepTypeCreator::new(names, CreateOptions::new("vle/node"));
 * let report = creator.run(&EmbeddedTemplates, OverwriteDecision::Proceed);
 *
 * for path in &report.created_files {
 *     println!("{}", path.display());
 * }
 * ```
 */

mod content;
mod engine;
mod filename;
mod manifest;
mod names;
mod report;
mod templates;
mod types;

pub use content::{ContentRewriter, rewrite_content};
pub use engine::StepTypeCreator;
pub use filename::{destination_path, rewrite_file_name};
pub use manifest::{ManifestPatch, ManifestUpdate, manifest_entry, patch_manifest, update_manifest};
pub use names::NameSet;
pub use report::{CreateWarning, InstantiationReport, ManifestOutcome};
pub use templates::{AssetIter, DirectoryTemplates, EmbeddedTemplates, TEMPLATE_PREFIX, TemplateSource};
pub use types::{
    CreateError, CreateOptions, GeneratedFile, MANIFEST_FILE_NAME, ManifestError,
    OverwriteDecision, TemplateAsset,
};
