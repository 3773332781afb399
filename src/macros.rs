//! Visual Studio `$(Macro)` expansion.
//!
//! Every target carries a small, fixed [`MacroTable`] derived from where its
//! project file lives:
//!
//! - `$(ProjectDir)`: directory of the `.vcxproj`, with a trailing `\`
//! - `$(SolutionDir)`: directory of the owning `.sln`, with a trailing `\`
//!   (only known for projects reached through a solution)
//!
//! [`MacroResolver`] substitutes those values into property text.  Anything it
//! cannot resolve is left exactly as written, so expansion is safe to repeat.

use std::collections::HashMap;
use std::path::Path;

/// Separator appended to directory macros, following Visual Studio's own
/// convention for `$(ProjectDir)` and `$(SolutionDir)`.
pub const DIR_MACRO_SEPARATOR: char = '\\';

/// A fragment of a property value that may contain `$(Name)` references.
#[derive(Debug, Clone, PartialEq)]
pub enum TextPart<'a> {
    /// Literal text.
    Literal(&'a str),
    /// A `$(Name)` reference; holds the inner name.
    Macro(&'a str),
}

/// Split `s` into literal runs and `$(Name)` references.
///
/// An unterminated `$(` is kept as literal text.
pub fn split_macros(s: &str) -> Vec<TextPart<'_>> {
    let mut parts = Vec::new();
    let mut rest = s;

    while let Some(start) = rest.find("$(") {
        let after = &rest[start + 2..];
        let Some(len) = after.find(')') else {
            break;
        };
        if start > 0 {
            parts.push(TextPart::Literal(&rest[..start]));
        }
        parts.push(TextPart::Macro(&after[..len]));
        rest = &after[len + 1..];
    }

    if !rest.is_empty() {
        parts.push(TextPart::Literal(rest));
    }

    parts
}

/// Directory macro value: `dir` plus a trailing separator, or empty.
fn dir_macro(dir: &Path) -> String {
    let mut value = dir.to_string_lossy().into_owned();
    if !value.is_empty() {
        value.push(DIR_MACRO_SEPARATOR);
    }
    value
}

/// Per-target macro values.  Built once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacroTable {
    values: HashMap<String, String>,
}

impl MacroTable {
    /// Macros for the project at `project_path`, optionally owned by a
    /// solution living in `solution_dir`.
    pub fn for_project(project_path: &Path, solution_dir: Option<&Path>) -> Self {
        let mut values = HashMap::new();
        let project_dir = project_path.parent().unwrap_or(Path::new(""));
        values.insert("ProjectDir".to_string(), dir_macro(project_dir));
        if let Some(dir) = solution_dir {
            values.insert("SolutionDir".to_string(), dir_macro(dir));
        }
        Self { values }
    }

    /// Replacement text for macro `name`, if known.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Expands `$(Name)` tokens against a [`MacroTable`].
#[derive(Debug, Clone, Copy)]
pub struct MacroResolver<'a> {
    table: &'a MacroTable,
    enabled: bool,
}

impl<'a> MacroResolver<'a> {
    pub fn new(table: &'a MacroTable, enabled: bool) -> Self {
        Self { table, enabled }
    }

    /// Expansion of a single macro, or `None` when expansion is disabled or
    /// the macro is unknown.
    pub fn expand_macro(&self, name: &str) -> Option<&'a str> {
        if !self.enabled {
            return None;
        }
        self.table.get(name)
    }

    /// Expand every `$(Name)` in `text`.  Unresolved references are written
    /// back verbatim; replacement values are not re-scanned.
    pub fn expand(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        for part in split_macros(text) {
            match part {
                TextPart::Literal(s) => result.push_str(s),
                TextPart::Macro(name) => match self.expand_macro(name) {
                    Some(value) => result.push_str(value),
                    None => {
                        result.push_str("$(");
                        result.push_str(name);
                        result.push(')');
                    }
                },
            }
        }
        result
    }
}
