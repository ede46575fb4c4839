/*
 * report.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The outcome of one step type creation run.
 */

use crate::types::CreateError;
use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// What happened to the manifest during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ManifestOutcome {
    /// The run stopped before the manifest step
    NotAttempted,
    /// There was no manifest to update
    Missing,
    /// The entry was added
    Updated { duplicate: bool },
    /// The manifest could not be read, patched or written
    Failed,
}

/// A non-fatal problem worth telling the user about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CreateWarning {
    ManifestMissing {
        path: PathBuf,
    },
    DuplicateManifestEntry {
        path: PathBuf,
        name: String,
    },
    ManifestNotUpdated {
        reason: String,
    },
    PartialOutput {
        created: usize,
    },
}

impl fmt::Display for CreateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateWarning::ManifestMissing { path } => write!(
                f,
                "{} not found, the new step type was not registered",
                path.display()
            ),
            CreateWarning::DuplicateManifestEntry { path, name } => write!(
                f,
                "{} contains duplicate entries with the nodeName {}. Please resolve the duplicate entry manually.",
                path.display(),
                name
            ),
            CreateWarning::ManifestNotUpdated { reason } => {
                write!(f, "manifest not updated: {reason}")
            }
            CreateWarning::PartialOutput { created } => write!(
                f,
                "step creation stopped after {created} file(s), the step type folder is incomplete"
            ),
        }
    }
}

/// Everything a run did, in order.
///
/// Always returned, even when the run failed part way: `created_files`
/// lists exactly what was written before the failure.
#[derive(Debug, Serialize)]
pub struct InstantiationReport {
    /// The step type folder
    pub destination: PathBuf,

    /// The folder did not exist before this run
    pub folder_created: bool,

    /// The folder exists and files can be written into it
    pub folder_ready: bool,

    /// Written files, relative to the creation root
    pub created_files: Vec<PathBuf>,

    pub manifest: ManifestOutcome,

    pub warnings: Vec<CreateWarning>,

    /// The caller declined to write into the destination
    pub aborted: bool,

    #[serde(serialize_with = "serialize_error")]
    pub fatal_error: Option<CreateError>,
}

impl InstantiationReport {
    pub(crate) fn new(destination: PathBuf) -> Self {
        Self {
            destination,
            folder_created: false,
            folder_ready: false,
            created_files: Vec::new(),
            manifest: ManifestOutcome::NotAttempted,
            warnings: Vec::new(),
            aborted: false,
            fatal_error: None,
        }
    }

    /// The run finished without being aborted or failing.
    pub fn is_success(&self) -> bool {
        !self.aborted && self.fatal_error.is_none()
    }
}

/// An error and its causes on one line, outermost first.
pub(crate) fn error_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn serialize_error<S>(error: &Option<CreateError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match error {
        Some(error) => serializer.serialize_some(&error_chain(error)),
        None => serializer.serialize_none(),
    }
}
