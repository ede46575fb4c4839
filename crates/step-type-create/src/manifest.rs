/*
 * manifest.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Registration of a new step type in `setupNodes.js`.
 *
 * The manifest is treated as text, not parsed. The first `]` is taken to
 * close the `SetupNodes.setupFiles` array and the last `}` before it to
 * close the array's last element. The new entry is spliced in right after
 * that brace. A manifest with another array or object ahead of the
 * registry will be patched in the wrong place.
 */

use crate::names::NameSet;
use crate::types::ManifestError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Result of patching manifest text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPatch {
    /// The manifest with the new entry inserted
    pub content: String,

    /// The manifest already mentioned the step type before patching.
    /// Advisory only: the entry is inserted regardless.
    pub duplicate: bool,
}

/// Result of updating a manifest file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestUpdate {
    /// No manifest at the given path; nothing was changed
    Missing(PathBuf),

    /// The manifest was rewritten with the new entry
    Updated { path: PathBuf, duplicate: bool },
}

/// The text inserted after the last element of the registry array.
pub fn manifest_entry(names: &NameSet) -> String {
    format!(
        ",\n\t{{\n\t\tnodeName:\"{}\",\n\t\tnodeSetupPath:\"vle/node/{}/setup.js\"\n\t}}",
        names.node_name(),
        names.lower_first()
    )
}

/// Insert an entry for `names` into manifest text.
///
/// Not idempotent: patching an already patched manifest adds a second entry
/// and reports it as a duplicate.
pub fn patch_manifest(text: &str, names: &NameSet) -> Result<ManifestPatch, ManifestError> {
    let closing_bracket = text
        .find(']')
        .ok_or_else(|| ManifestError::Malformed("no closing ']' found".to_string()))?;

    let closing_brace = text[..closing_bracket].rfind('}').ok_or_else(|| {
        ManifestError::Malformed("no '}' found before the first ']'".to_string())
    })?;

    let duplicate = text.contains(names.upper_first());
    let insert_at = closing_brace + 1;

    let entry = manifest_entry(names);
    let mut content = String::with_capacity(text.len() + entry.len());
    content.push_str(&text[..insert_at]);
    content.push_str(&entry);
    content.push_str(&text[insert_at..]);

    Ok(ManifestPatch { content, duplicate })
}

/// Register `names` in the manifest file at `path`.
///
/// A missing manifest is not an error; it is reported as
/// [`ManifestUpdate::Missing`] and nothing is written.
pub fn update_manifest(path: &Path, names: &NameSet) -> Result<ManifestUpdate, ManifestError> {
    update_manifest_with(path, names, |path, content| fs::write(path, content))
}

/// [`update_manifest`] with the final write done by `write`.
pub(crate) fn update_manifest_with<F>(
    path: &Path,
    names: &NameSet,
    write: F,
) -> Result<ManifestUpdate, ManifestError>
where
    F: FnOnce(&Path, &str) -> io::Result<()>,
{
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No manifest at {}", path.display());
            return Ok(ManifestUpdate::Missing(path.to_path_buf()));
        }
        Err(source) => {
            return Err(ManifestError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let patch = patch_manifest(&text, names)?;
    if patch.duplicate {
        warn!(
            "{} already mentions {}",
            path.display(),
            names.upper_first()
        );
    }

    write(path, &patch.content).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(ManifestUpdate::Updated {
        path: path.to_path_buf(),
        duplicate: patch.duplicate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const MANIFEST: &str = "SetupNodes.setupFiles = [\n\t{nodeName:\"A\",nodeSetupPath:\"x\"}\n]";

    fn quiz() -> NameSet {
        NameSet::new("quiz", "qz").unwrap()
    }

    #[test]
    fn test_inserts_entry_before_closing_bracket() {
        let patch = patch_manifest(MANIFEST, &quiz()).unwrap();

        assert_eq!(
            patch.content,
            "SetupNodes.setupFiles = [\n\t{nodeName:\"A\",nodeSetupPath:\"x\"},\n\t{\n\t\tnodeName:\"QuizNode\",\n\t\tnodeSetupPath:\"vle/node/quiz/setup.js\"\n\t}\n]"
        );
        assert!(!patch.duplicate);
        assert_eq!(
            patch.content.matches('{').count(),
            MANIFEST.matches('{').count() + 1
        );
        assert!(patch.content.ends_with("\n\t}\n]"));
    }

    #[test]
    fn test_text_after_bracket_untouched() {
        let text = format!("{MANIFEST};\n\nSetupNodes.other = {{a:1}};\n");
        let patch = patch_manifest(&text, &quiz()).unwrap();
        assert!(patch.content.ends_with("\n];\n\nSetupNodes.other = {a:1};\n"));
        assert_eq!(patch.content.matches("QuizNode").count(), 1);
    }

    #[test]
    fn test_duplicate_is_advisory() {
        let once = patch_manifest(MANIFEST, &quiz()).unwrap();
        let twice = patch_manifest(&once.content, &quiz()).unwrap();

        assert!(twice.duplicate);
        assert_eq!(twice.content.matches("nodeName:\"QuizNode\"").count(), 2);
    }

    #[test]
    fn test_duplicate_detected_anywhere() {
        let text = "// Quiz lives elsewhere\nSetupNodes.setupFiles = [\n\t{nodeName:\"A\"}\n]";
        assert!(patch_manifest(text, &quiz()).unwrap().duplicate);
    }

    #[test]
    fn test_missing_bracket_is_malformed() {
        let err = patch_manifest("SetupNodes.setupFiles = [{nodeName:\"A\"}", &quiz()).unwrap_err();
        assert!(matches!(err, ManifestError::Malformed(_)));
    }

    #[test]
    fn test_empty_array_is_malformed() {
        let err = patch_manifest("SetupNodes.setupFiles = [];", &quiz()).unwrap_err();
        assert!(matches!(err, ManifestError::Malformed(_)));
    }

    #[test]
    fn test_first_bracket_wins() {
        // The heuristic stops at the first `]`, even if it closes something else
        let text = "var other = [{a:1}];\nSetupNodes.setupFiles = [\n\t{nodeName:\"A\"}\n];";
        let patch = patch_manifest(text, &quiz()).unwrap();
        assert!(patch.content.starts_with("var other = [{a:1},\n\t{\n\t\tnodeName:\"QuizNode\""));
    }

    #[test]
    fn test_update_manifest_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("setupNodes.js");

        let update = update_manifest(&path, &quiz()).unwrap();
        assert_eq!(update, ManifestUpdate::Missing(path.clone()));
        assert!(!path.exists());
    }

    #[test]
    fn test_update_manifest_writes_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("setupNodes.js");
        fs::write(&path, MANIFEST).unwrap();

        let update = update_manifest(&path, &quiz()).unwrap();
        assert_eq!(
            update,
            ManifestUpdate::Updated {
                path: path.clone(),
                duplicate: false
            }
        );

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("nodeSetupPath:\"vle/node/quiz/setup.js\""));
    }

    #[test]
    fn test_update_manifest_malformed_leaves_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("setupNodes.js");
        fs::write(&path, "nothing here").unwrap();

        let err = update_manifest(&path, &quiz()).unwrap_err();
        assert!(matches!(err, ManifestError::Malformed(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "nothing here");
    }

    #[test]
    fn test_update_manifest_read_error() {
        let temp = TempDir::new().unwrap();
        // A directory where the manifest should be cannot be read as text
        let path = temp.path().join("setupNodes.js");
        fs::create_dir(&path).unwrap();

        let err = update_manifest(&path, &quiz()).unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
    }

    #[test]
    fn test_update_manifest_write_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("setupNodes.js");
        fs::write(&path, MANIFEST).unwrap();

        let err = update_manifest_with(&path, &quiz(), |_, content| {
            assert!(content.contains("nodeName:\"QuizNode\""));
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only file system"))
        })
        .unwrap_err();

        match err {
            ManifestError::Write { path: failed, source } => {
                assert_eq!(failed, path);
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected a write error, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), MANIFEST);
    }
}
