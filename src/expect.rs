//! Settings the translator cannot carry over faithfully.
//!
//! Rather than translating optimization level, CRT flavour, precompiled
//! headers or link outputs, the translator assumes fixed values for them and
//! reports any project that deviates.  A deviation is a diagnostic, not an
//! error.

use log::warn;

use crate::error::{Error, Result};
use crate::project::{Namespace, find_child, element_text};
use crate::target::Mismatch;

/// A `(tag, expected text)` pair.
#[derive(Debug, PartialEq, Eq)]
pub struct Expectation {
    pub tag: &'static str,
    pub text: &'static str,
}

/// Checked inside `<ClCompile>`.
pub static CL_EXPECTATIONS: [Expectation; 3] = [
    Expectation { tag: "Optimization", text: "MaxSpeed" },
    Expectation { tag: "RuntimeLibrary", text: "MultiThreadedDLL" },
    Expectation { tag: "PrecompiledHeader", text: "" },
];

/// Checked inside `<Link>`, for every kind except static libraries.
pub static LINK_EXPECTATIONS: [Expectation; 3] = [
    Expectation { tag: "OutputFile", text: "$(OutDir)$(ProjectName)$(RADF_BUILD_VER).dll" },
    Expectation {
        tag: "ImportLibrary",
        text: r"$(SolutionDir)lib\$(RADF_ARCH_RELEASE)\$(ProjectName)$(RADF_BUILD_VER).lib",
    },
    Expectation { tag: "TargetMachine", text: "MachineX64" },
];

/// Compare the children of `node` against `expectations`.
///
/// Text is trimmed and compared literally (macros are not expanded).  Every
/// expected tag must be present.
pub fn check(
    node: roxmltree::Node,
    ns: Namespace,
    expectations: &'static [Expectation],
) -> Result<Vec<Mismatch>> {
    let parent = node.tag_name().name();
    let mut mismatches = Vec::new();

    for expectation in expectations {
        let child = find_child(node, ns, expectation.tag)
            .ok_or_else(|| Error::missing(expectation.tag, parent))?;
        let actual = element_text(child);
        if actual != expectation.text {
            warn!(
                "<{}> expected '{}', found '{}'",
                expectation.tag, expectation.text, actual
            );
            mismatches.push(Mismatch { expectation, actual: actual.to_string() });
        }
    }

    Ok(mismatches)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

    fn with_cl(body: &str, f: impl FnOnce(roxmltree::Node, Namespace)) {
        let xml = format!(r#"<Project xmlns="{NS}"><ClCompile>{body}</ClCompile></Project>"#);
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let root = doc.root_element();
        let ns = Namespace::of_root(root).unwrap();
        let cl = find_child(root, ns, "ClCompile").unwrap();
        f(cl, ns);
    }

    #[test]
    fn matching_settings_record_nothing() {
        with_cl(
            "<Optimization>MaxSpeed</Optimization>\
             <RuntimeLibrary> MultiThreadedDLL </RuntimeLibrary>\
             <PrecompiledHeader />",
            |cl, ns| {
                assert!(check(cl, ns, &CL_EXPECTATIONS).unwrap().is_empty());
            },
        );
    }

    #[test]
    fn mismatches_are_recorded_in_table_order() {
        with_cl(
            "<PrecompiledHeader>Use</PrecompiledHeader>\
             <Optimization>Disabled</Optimization>\
             <RuntimeLibrary>MultiThreadedDLL</RuntimeLibrary>",
            |cl, ns| {
                let found = check(cl, ns, &CL_EXPECTATIONS).unwrap();
                assert_eq!(
                    found,
                    vec![
                        Mismatch { expectation: &CL_EXPECTATIONS[0], actual: "Disabled".into() },
                        Mismatch { expectation: &CL_EXPECTATIONS[2], actual: "Use".into() },
                    ]
                );
            },
        );
    }

    #[test]
    fn missing_setting_is_fatal() {
        with_cl("<Optimization>MaxSpeed</Optimization>", |cl, ns| {
            let err = check(cl, ns, &CL_EXPECTATIONS).unwrap_err();
            assert!(
                matches!(&err, Error::MissingElement { tag, parent } if tag == "RuntimeLibrary" && parent == "ClCompile"),
                "{err:?}"
            );
        });
    }
}
