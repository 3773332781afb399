//! Walk a parsed `.vcxproj` tree into a [`Target`].
//!
//! Only the direct children of `<Project>` are inspected, and only those
//! whose `Condition` is absent or selects `Release|x64`.  No condition
//! expression is ever evaluated: any other condition string, however it is
//! spelled, excludes the node.
//!
//! Recognised children:
//!
//! | Element                                   | Effect                           |
//! |-------------------------------------------|----------------------------------|
//! | `<PropertyGroup Label="Globals">`         | `<ProjectName>` → target name    |
//! | `<PropertyGroup Label="Configuration">`   | `<ConfigurationType>` → kind     |
//! | `<ItemDefinitionGroup>`                   | `<ClCompile>` lists + checks, `<Link>` checks |

use std::path::PathBuf;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::expect::{self, CL_EXPECTATIONS, LINK_EXPECTATIONS};
use crate::list::parse_list;
use crate::macros::MacroResolver;
use crate::target::{Target, TargetBuilder, TargetKind};

/// The one non-default configuration the translator understands.
pub const RELEASE_X64_CONDITION: &str = "'$(Configuration)|$(Platform)'=='Release|x64'";

/// XML namespace of a project document, read once from the root element and
/// passed to every tag comparison.
///
/// MSBuild versions have used different namespace URIs, so it is never
/// hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace<'a>(Option<&'a str>);

impl<'a> Namespace<'a> {
    /// Read the namespace of `root`, which must be a `<Project>` element.
    /// Returns the tag actually found when it is not.
    pub fn of_root(root: roxmltree::Node<'a, '_>) -> std::result::Result<Self, String> {
        let tag = root.tag_name();
        if tag.name() != "Project" {
            return Err(tag.name().to_string());
        }
        Ok(Self(tag.namespace()))
    }

    /// Whether `node` is the element `<{self}name>`.
    pub fn is(&self, node: roxmltree::Node, name: &str) -> bool {
        node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == self.0
    }
}

/// First child element of `parent` named `tag` in namespace `ns`.
pub fn find_child<'a, 'input>(
    parent: roxmltree::Node<'a, 'input>,
    ns: Namespace,
    tag: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    parent.children().find(|c| ns.is(*c, tag))
}

/// Trimmed text of an element; an empty element reads as `""`.
pub fn element_text<'a>(node: roxmltree::Node<'a, '_>) -> &'a str {
    node.text().map(str::trim).unwrap_or("")
}

/// Text of the required child `tag` of `parent`.
fn required_text<'a>(parent: roxmltree::Node<'a, '_>, ns: Namespace, tag: &str) -> Result<&'a str> {
    find_child(parent, ns, tag)
        .map(element_text)
        .ok_or_else(|| Error::missing(tag, parent.tag_name().name()))
}

/// Whether a child of `<Project>` applies to the translated configuration.
pub fn node_applies(node: roxmltree::Node) -> bool {
    match node.attribute("Condition") {
        None => true,
        Some(condition) => condition == RELEASE_X64_CONDITION,
    }
}

/// Where a project file came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInput {
    /// Absolute path of the `.vcxproj`.
    pub path: PathBuf,
    /// Directory of the owning `.sln`, when the project was listed by one.
    pub solution_dir: Option<PathBuf>,
}

impl ProjectInput {
    pub fn standalone(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), solution_dir: None }
    }

    pub fn in_solution(path: impl Into<PathBuf>, solution_dir: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), solution_dir: Some(solution_dir.into()) }
    }
}

/// Translate the project rooted at `root`.
pub fn walk(root: roxmltree::Node, input: &ProjectInput, expand_macros: bool) -> Result<Target> {
    let ns = Namespace::of_root(root).map_err(|tag| Error::NotAProject {
        path: input.path.clone(),
        tag,
    })?;

    let mut draft = TargetBuilder::new(&input.path, input.solution_dir.as_deref());

    for node in root.children().filter(|n| n.is_element() && node_applies(*n)) {
        if ns.is(node, "PropertyGroup") {
            match node.attribute("Label") {
                Some("Globals") => {
                    let name = required_text(node, ns, "ProjectName")?;
                    debug!("project name: {name}");
                    draft.set_name(name);
                }
                Some("Configuration") => {
                    let value = required_text(node, ns, "ConfigurationType")?;
                    debug!("configuration type: {value}");
                    draft.set_kind(TargetKind::from_configuration_type(value)?);
                }
                _ => {}
            }
        } else if ns.is(node, "ItemDefinitionGroup") {
            read_item_definitions(node, ns, &mut draft, expand_macros)?;
        }
    }

    let target = draft.build()?;
    info!("{}: {} ({:?})", input.path.display(), target.name, target.kind);
    Ok(target)
}

/// `<ItemDefinitionGroup>`: compile lists plus compile/link checks.
fn read_item_definitions(
    node: roxmltree::Node,
    ns: Namespace,
    draft: &mut TargetBuilder,
    expand_macros: bool,
) -> Result<()> {
    let cl = find_child(node, ns, "ClCompile").ok_or_else(|| Error::missing("ClCompile", "ItemDefinitionGroup"))?;

    let resolver = MacroResolver::new(draft.macros(), expand_macros);
    let read_list = |tag: &str| -> Vec<String> {
        find_child(cl, ns, tag)
            .map(|n| parse_list(element_text(n)).map(|item| resolver.expand(item)).collect())
            .unwrap_or_default()
    };
    let include_directories = read_list("AdditionalIncludeDirectories");
    let compile_definitions = read_list("PreprocessorDefinitions");

    draft.set_include_directories(include_directories);
    draft.set_compile_definitions(compile_definitions);
    draft.add_unexpected(expect::check(cl, ns, &CL_EXPECTATIONS)?);

    if draft.kind() != Some(TargetKind::StaticLibrary) {
        let link = find_child(node, ns, "Link").ok_or_else(|| Error::missing("Link", "ItemDefinitionGroup"))?;
        draft.add_unexpected(expect::check(link, ns, &LINK_EXPECTATIONS)?);
    }

    Ok(())
}
