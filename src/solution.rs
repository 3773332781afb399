//! Scan Visual Studio `.sln` files for the `.vcxproj` files they reference.
//!
//! A solution is line-oriented text.  The only lines of interest look like
//!
//! ```text
//! Project("{8BC9CEB8-8B4A-11D0-8D11-00A0C91BC942}") = "App", "sub\app.vcxproj", "{...}"
//! ```
//!
//! Each such line is matched by an anchored [`chumsky`] grammar; every other
//! line (headers, `Global` sections, solution folders, C# projects) is
//! skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use chumsky::prelude::*;
use log::debug;

use crate::error::{Error, Result};

/// File extension of Visual C++ project files, including the dot.
pub const PROJECT_SUFFIX: &str = ".vcxproj";

/// `Project("{GUID}") = "Name", "path.vcxproj"` followed by anything.
fn project_line_parser<'a>() -> impl Parser<'a, &'a str, &'a str, extra::Err<Simple<'a, char>>> {
    let space = any().filter(|c: &char| c.is_whitespace());

    let quoted = just('"')
        .ignore_then(none_of('"').repeated().to_slice())
        .then_ignore(just('"'));

    let guid = just("(\"{")
        .ignore_then(one_of("-0123456789ABCDEF").repeated())
        .then_ignore(just("}\")"));

    just("Project")
        .ignore_then(guid)
        .ignore_then(space)
        .ignore_then(just('='))
        .ignore_then(space)
        .ignore_then(quoted)
        .ignore_then(just(','))
        .ignore_then(space)
        .ignore_then(quoted.filter(|path: &&str| path.ends_with(PROJECT_SUFFIX)))
        .then_ignore(any().repeated())
}

/// Return the project path declared by a solution line, or `None` when the
/// line is not a `.vcxproj` project declaration.
pub fn parse_project_line(line: &str) -> Option<&str> {
    project_line_parser().parse(line).into_result().ok()
}

/// Lazy iterator over the project files referenced by one solution.
///
/// Lines are read on demand; relative paths are resolved against the
/// solution's own directory.
#[derive(Debug)]
pub struct SolutionProjects {
    path: PathBuf,
    directory: PathBuf,
    lines: Lines<BufReader<File>>,
}

impl SolutionProjects {
    /// Open the solution at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| Error::io(&path, e))?;
        let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self { path, directory, lines: BufReader::new(file).lines() })
    }

    /// Directory containing the solution file (the `$(SolutionDir)` of every
    /// project it yields).
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl Iterator for SolutionProjects {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(Error::io(&self.path, e))),
            };
            if let Some(project) = parse_project_line(&line) {
                // Solutions are written with '\'; '/' works on every platform.
                let project = self.directory.join(project.replace('\\', "/"));
                debug!("{}: found {}", self.path.display(), project.display());
                return Some(Ok(project));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CPP_GUID: &str = "8BC9CEB8-8B4A-11D0-8D11-00A0C91BC942";

    #[test]
    fn matches_vcxproj_declaration() {
        let line = format!(
            r#"Project("{{{CPP_GUID}}}") = "App", "sub\app.vcxproj", "{{11111111-2222-3333-4444-555555555555}}""#
        );
        assert_eq!(parse_project_line(&line), Some(r"sub\app.vcxproj"));
    }

    #[test]
    fn matches_without_trailing_guid() {
        let line = format!(r#"Project("{{{CPP_GUID}}}") = "Lib", "lib.vcxproj""#);
        assert_eq!(parse_project_line(&line), Some("lib.vcxproj"));
    }

    #[test]
    fn skips_other_project_kinds() {
        // C# project and solution folder.
        let csproj = r#"Project("{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}") = "Tool", "tool\tool.csproj", "{A}""#;
        let folder = r#"Project("{2150E333-8FDC-42A3-9474-1A3956D46DE8}") = "Docs", "Docs", "{B}""#;
        assert_eq!(parse_project_line(csproj), None);
        assert_eq!(parse_project_line(folder), None);
    }

    #[test]
    fn skips_non_project_lines() {
        for line in [
            "",
            "Microsoft Visual Studio Solution File, Format Version 12.00",
            "EndProject",
            "Global",
            "\tGlobalSection(SolutionConfigurationPlatforms) = preSolution",
            r#"  Project("{8BC9CEB8-8B4A-11D0-8D11-00A0C91BC942}") = "A", "a.vcxproj""#,
        ] {
            assert_eq!(parse_project_line(line), None, "line: {line:?}");
        }
    }

    #[test]
    fn lowercase_guid_is_rejected() {
        let line = r#"Project("{8bc9ceb8-8b4a-11d0-8d11-00a0c91bc942}") = "A", "a.vcxproj""#;
        assert_eq!(parse_project_line(line), None);
    }

    #[test]
    fn iterates_in_file_order_relative_to_solution() {
        let dir = tempfile::tempdir().unwrap();
        let sln = dir.path().join("all.sln");
        std::fs::write(
            &sln,
            format!(
                "Microsoft Visual Studio Solution File, Format Version 12.00\r\n\
                 Project(\"{{{CPP_GUID}}}\") = \"B\", \"b\\b.vcxproj\", \"{{X}}\"\r\n\
                 EndProject\r\n\
                 Project(\"{{{CPP_GUID}}}\") = \"A\", \"a.vcxproj\", \"{{Y}}\"\r\n\
                 EndProject\r\n"
            ),
        )
        .unwrap();

        let projects = SolutionProjects::open(&sln).unwrap();
        assert_eq!(projects.directory(), dir.path());
        let paths: Vec<PathBuf> = projects.collect::<Result<_>>().unwrap();
        assert_eq!(
            paths,
            vec![dir.path().join("b/b.vcxproj"), dir.path().join("a.vcxproj")]
        );
    }

    #[test]
    fn absolute_project_paths_stay_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let project = elsewhere.path().join("lib.vcxproj");
        let sln = dir.path().join("all.sln");
        std::fs::write(
            &sln,
            format!("Project(\"{{{CPP_GUID}}}\") = \"Lib\", \"{}\", \"{{Z}}\"\r\n", project.display()),
        )
        .unwrap();

        let paths: Vec<PathBuf> = SolutionProjects::open(&sln).unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(paths, vec![project]);
    }

    #[test]
    fn missing_solution_is_io_error() {
        let err = SolutionProjects::open("does/not/exist.sln").unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "{err:?}");
    }
}
