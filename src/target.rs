use std::path::Path;

use crate::error::{Error, Result};
use crate::expect::Expectation;
use crate::macros::MacroTable;

/// What kind of CMake target a project becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Executable,
    StaticLibrary,
    SharedLibrary,
}

impl TargetKind {
    /// Map a `<ConfigurationType>` value onto a target kind.
    ///
    /// The set is closed: `Utility`, `Makefile` and anything else have no
    /// CMake counterpart here and fail the translation.
    pub fn from_configuration_type(value: &str) -> Result<Self> {
        match value {
            "Application" => Ok(Self::Executable),
            "StaticLibrary" => Ok(Self::StaticLibrary),
            "DynamicLibrary" => Ok(Self::SharedLibrary),
            other => Err(Error::UnmappedConfigurationType(other.to_string())),
        }
    }
}

/// A checked setting whose observed value differs from what the translator
/// assumes.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub expectation: &'static Expectation,
    pub actual: String,
}

/// One translated build target.
#[derive(Debug, Clone)]
pub struct Target {
    pub name: String,
    pub kind: TargetKind,
    pub include_directories: Vec<String>,
    pub compile_definitions: Vec<String>,
    pub macros: MacroTable,
    pub unexpected: Vec<Mismatch>,
}

/// Mutable draft of a [`Target`], filled in while a project tree is walked.
#[derive(Debug, Clone)]
pub struct TargetBuilder {
    name: Option<String>,
    kind: Option<TargetKind>,
    include_directories: Vec<String>,
    compile_definitions: Vec<String>,
    macros: MacroTable,
    unexpected: Vec<Mismatch>,
}

impl TargetBuilder {
    /// Start a draft for the project at `project_path`; `solution_dir` is the
    /// directory of the owning solution, if any.
    pub fn new(project_path: &Path, solution_dir: Option<&Path>) -> Self {
        Self {
            name: None,
            kind: None,
            include_directories: Vec::new(),
            compile_definitions: Vec::new(),
            macros: MacroTable::for_project(project_path, solution_dir),
            unexpected: Vec::new(),
        }
    }

    pub fn macros(&self) -> &MacroTable {
        &self.macros
    }

    pub fn kind(&self) -> Option<TargetKind> {
        self.kind
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn set_kind(&mut self, kind: TargetKind) {
        self.kind = Some(kind);
    }

    /// Replace the include directories (raw, not yet path-normalized).
    pub fn set_include_directories(&mut self, dirs: Vec<String>) {
        self.include_directories = dirs;
    }

    pub fn set_compile_definitions(&mut self, defs: Vec<String>) {
        self.compile_definitions = defs;
    }

    pub fn add_unexpected(&mut self, mismatches: impl IntoIterator<Item = Mismatch>) {
        self.unexpected.extend(mismatches);
    }

    /// Finalize the draft.  A project never named, or never given a kind, is
    /// rejected.
    pub fn build(self) -> Result<Target> {
        let name = self.name.ok_or_else(|| Error::missing("ProjectName", "PropertyGroup Label=\"Globals\""))?;
        let kind = self.kind.ok_or_else(|| Error::MissingTargetKind { name: name.clone() })?;
        Ok(Target {
            name,
            kind,
            include_directories: self.include_directories,
            compile_definitions: self.compile_definitions,
            macros: self.macros,
            unexpected: self.unexpected,
        })
    }
}
