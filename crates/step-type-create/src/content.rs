/*
 * content.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Content rewriting for template assets.
 *
 * The template set spells the step type as `template` / `Template`. Those
 * stand-ins are replaced globally, which also hits framework hooks whose
 * names happen to contain `Template`. Such hooks are listed in
 * `PROTECTED_IDENTIFIERS` and put back after the blanket replacement.
 */

use crate::names::NameSet;

/// Template file path literal in `setup.js`. Its extension follows the new type.
const TEMPLATE_FILE_PATH_LITERAL: &str =
    "nodeTemplateFilePath:'node/template/templateTemplate.te'";

/// Extension literal in `setup.js`.
const NODE_EXTENSION_LITERAL: &str = "nodeExtension:'te'";

/// Framework identifiers that must keep `Template` in their name, as
/// `(prefix, suffix)` around the `Template` segment. Restored in this order.
///
/// Adding a hook to the template set that contains `Template` requires a
/// new row here.
const PROTECTED_IDENTIFIERS: &[(&str, &str)] = &[
    ("node", "Params"),
    ("addNode", "Params"),
    ("node", "FilePath"),
    ("getHTMLContent", ""),
    ("excelExportString", ""),
];

/// A literal, global substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Substitution {
    from: String,
    to: String,
}

impl Substitution {
    fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    fn apply(&self, text: &str) -> String {
        text.replace(&self.from, &self.to)
    }
}

/// Rewrites template file contents for one step type.
///
/// Built once per [`NameSet`]; rewriting is a pure function of the input.
#[derive(Debug, Clone)]
pub struct ContentRewriter {
    steps: Vec<Substitution>,
}

impl ContentRewriter {
    pub fn new(names: &NameSet) -> Self {
        let ext = names.extension();
        let lower = names.lower_first();
        let upper = names.upper_first();

        let mut steps = vec![
            Substitution::new(
                TEMPLATE_FILE_PATH_LITERAL,
                TEMPLATE_FILE_PATH_LITERAL.replace(".te'", &format!(".{ext}'")),
            ),
            Substitution::new(NODE_EXTENSION_LITERAL, format!("nodeExtension:'{ext}'")),
            Substitution::new("template", lower),
            Substitution::new("Template", upper),
            // templateTemplate comes out as e.g. quizQuiz
            Substitution::new(format!("{lower}{upper}"), format!("{lower}Template")),
        ];

        steps.extend(PROTECTED_IDENTIFIERS.iter().map(|(prefix, suffix)| {
            Substitution::new(
                format!("{prefix}{upper}{suffix}"),
                format!("{prefix}Template{suffix}"),
            )
        }));

        Self { steps }
    }

    /// Apply every substitution, in order, to `content`.
    pub fn rewrite(&self, content: &str) -> String {
        self.steps
            .iter()
            .fold(content.to_string(), |text, step| step.apply(&text))
    }
}

/// Convenience wrapper around [`ContentRewriter`] for a single file.
pub fn rewrite_content(content: &str, names: &NameSet) -> String {
    ContentRewriter::new(names).rewrite(content)
}
