/*
 * filename.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Destination file names for template assets.
 */

use crate::names::NameSet;
use std::path::PathBuf;

/// Marker extension used by the template set for step content files.
const TEMPLATE_EXTENSION_MARKER: &str = ".te";

/// File name fragment that is never renamed.
const PROTECTED_COMPOUND: &str = "templateTemplate";

/// Compute the generated file name for a template asset.
///
/// Steps, in order:
/// 1. take the last `/`-separated segment of `archive_path`
/// 2. replace every `.te` with `.<extension>`
/// 3. unless the result contains `templateTemplate`, replace the first
///    `template` with the lower-first name and then the first `Template`
///    with the upper-first name
pub fn rewrite_file_name(archive_path: &str, names: &NameSet) -> String {
    let base = archive_path
        .rsplit_once('/')
        .map_or(archive_path, |(_, file_name)| file_name);

    let file_name = base.replace(
        TEMPLATE_EXTENSION_MARKER,
        &format!(".{}", names.extension()),
    );

    if file_name.contains(PROTECTED_COMPOUND) {
        return file_name;
    }

    file_name
        .replacen("template", names.lower_first(), 1)
        .replacen("Template", names.upper_first(), 1)
}

/// Path of the generated file relative to the creation root
/// (e.g. `quiz/QuizNode.js`).
pub fn destination_path(archive_path: &str, names: &NameSet) -> PathBuf {
    PathBuf::from(names.lower_first()).join(rewrite_file_name(archive_path, names))
}
