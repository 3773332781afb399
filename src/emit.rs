//! CMake output.

use std::fmt::Display;
use std::io::{self, Write};

use crate::list::to_cmake_path;
use crate::target::{Target, TargetKind};

/// Write one `name PRIVATE ...` command body, one item per line.
fn write_private_list(
    out: &mut impl Write,
    command: &str,
    name: &str,
    items: impl IntoIterator<Item = impl Display>,
) -> io::Result<()> {
    writeln!(out, "{command}({name} PRIVATE")?;
    for item in items {
        writeln!(out, "  {item}")?;
    }
    writeln!(out, ")")
}

/// Write the declarations for a single target.
pub fn write_target(out: &mut impl Write, target: &Target) -> io::Result<()> {
    let name = &target.name;
    match target.kind {
        TargetKind::Executable => writeln!(out, "add_executable({name})")?,
        TargetKind::SharedLibrary => writeln!(out, "add_library({name} SHARED)")?,
        TargetKind::StaticLibrary => writeln!(out, "add_library({name} STATIC)")?,
    }

    if !target.include_directories.is_empty() {
        write_private_list(
            out,
            "target_include_directories",
            name,
            target.include_directories.iter().map(|d| to_cmake_path(d)),
        )?;
    }

    if !target.compile_definitions.is_empty() {
        write_private_list(
            out,
            "target_compile_definitions",
            name,
            &target.compile_definitions,
        )?;
    }

    for mismatch in &target.unexpected {
        writeln!(
            out,
            "# {name}: expected <{}> of '{}' was actually '{}'",
            mismatch.expectation.tag, mismatch.expectation.text, mismatch.actual
        )?;
    }

    Ok(())
}

/// Write every target, in order, separated by blank lines.
pub fn write_cmake<'t>(out: &mut impl Write, targets: impl IntoIterator<Item = &'t Target>) -> io::Result<()> {
    for (i, target) in targets.into_iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write_target(out, target)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expect::{CL_EXPECTATIONS, LINK_EXPECTATIONS};
    use crate::target::{Mismatch, TargetBuilder};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn target(name: &str, kind: TargetKind) -> TargetBuilder {
        let mut draft = TargetBuilder::new(Path::new("/p/x.vcxproj"), None);
        draft.set_name(name);
        draft.set_kind(kind);
        draft
    }

    fn render(targets: &[Target]) -> String {
        let mut out = Vec::new();
        write_cmake(&mut out, targets).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn creation_lines_per_kind() {
        let targets = [
            target("Tool", TargetKind::Executable).build().unwrap(),
            target("Core", TargetKind::StaticLibrary).build().unwrap(),
            target("Api", TargetKind::SharedLibrary).build().unwrap(),
        ];
        assert_eq!(
            render(&targets),
            "add_executable(Tool)\n\nadd_library(Core STATIC)\n\nadd_library(Api SHARED)\n"
        );
    }

    #[test]
    fn include_directories_are_normalized_definitions_are_not() {
        let mut draft = target("App", TargetKind::SharedLibrary);
        draft.set_include_directories(vec!["C:\\src\\inc".into(), "../common".into()]);
        draft.set_compile_definitions(vec!["PATH=\"a\\b\"".into(), "FOO".into()]);

        assert_eq!(
            render(&[draft.build().unwrap()]),
            "add_library(App SHARED)\n\
             target_include_directories(App PRIVATE\n  C:/src/inc\n  ../common\n)\n\
             target_compile_definitions(App PRIVATE\n  PATH=\"a\\b\"\n  FOO\n)\n"
        );
    }

    #[test]
    fn mismatches_become_comments() {
        let mut draft = target("App", TargetKind::Executable);
        draft.add_unexpected([
            Mismatch { expectation: &CL_EXPECTATIONS[0], actual: "Disabled".into() },
            Mismatch { expectation: &LINK_EXPECTATIONS[2], actual: "MachineX86".into() },
        ]);

        assert_eq!(
            render(&[draft.build().unwrap()]),
            "add_executable(App)\n\
             # App: expected <Optimization> of 'MaxSpeed' was actually 'Disabled'\n\
             # App: expected <TargetMachine> of 'MachineX64' was actually 'MachineX86'\n"
        );
    }

    #[test]
    fn empty_target_list_writes_nothing() {
        assert_eq!(render(&[]), "");
    }
}
