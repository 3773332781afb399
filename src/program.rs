use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use log::info;

use crate::emit;
use crate::error::{Error, Result};
use crate::project::{self, ProjectInput};
use crate::solution::SolutionProjects;
use crate::target::Target;

/// Run-wide translation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Substitute known `$(Macro)` references in list properties.
    pub expand_macros: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { expand_macros: true }
    }
}

/// What an input path is, judged by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Solution,
    Project,
}

impl InputKind {
    pub fn classify(path: &Path) -> Result<Self> {
        match path.extension().and_then(OsStr::to_str) {
            Some("sln") => Ok(Self::Solution),
            Some("vcxproj") => Ok(Self::Project),
            _ => Err(Error::UnsupportedInput { path: path.to_path_buf() }),
        }
    }
}

/// Make `path` absolute and resolve `.` and `..` lexically.  The filesystem
/// is not consulted, so symlinks are not followed.
fn absolute_clean(path: &Path) -> io::Result<PathBuf> {
    let mut clean = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                clean.pop();
            }
            other => clean.push(other),
        }
    }
    Ok(clean)
}

/// One translation run over a list of `.sln` / `.vcxproj` inputs.
#[derive(Debug, Clone)]
pub struct Program {
    inputs: Vec<PathBuf>,
    config: Config,
}

impl Program {
    pub fn new(inputs: impl IntoIterator<Item = impl Into<PathBuf>>, config: Config) -> Self {
        Self { inputs: inputs.into_iter().map(Into::into).collect(), config }
    }

    /// Translate every input into targets, in input order (solution order
    /// within a solution).  The first failure aborts the whole run.
    pub fn translate(&self) -> Result<Vec<Target>> {
        let mut targets = Vec::new();

        for input in &self.inputs {
            let path = absolute_clean(input).map_err(|e| Error::io(input, e))?;
            match InputKind::classify(&path)? {
                InputKind::Project => {
                    targets.push(self.read_project(&ProjectInput::standalone(path))?);
                }
                InputKind::Solution => {
                    let projects = SolutionProjects::open(&path)?;
                    let solution_dir = projects.directory().to_path_buf();
                    info!("{}: reading solution", path.display());
                    for project in projects {
                        let input = ProjectInput::in_solution(project?, &solution_dir);
                        targets.push(self.read_project(&input)?);
                    }
                }
            }
        }

        Ok(targets)
    }

    /// Read, parse and walk a single project file.  The file is closed before
    /// this returns.
    pub fn read_project(&self, input: &ProjectInput) -> Result<Target> {
        let source = std::fs::read_to_string(&input.path).map_err(|e| Error::io(&input.path, e))?;
        let doc = roxmltree::Document::parse(&source).map_err(|source| Error::Xml {
            path: input.path.clone(),
            source,
        })?;
        project::walk(doc.root_element(), input, self.config.expand_macros)
    }

    /// Translate all inputs, then write the CMake declarations to `out`.
    /// Nothing is written unless every input translated.
    pub fn run(&self, out: &mut impl Write) -> Result<()> {
        let targets = self.translate()?;
        emit::write_cmake(out, &targets)?;
        Ok(())
    }
}
