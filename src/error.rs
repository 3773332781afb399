use std::path::PathBuf;

/// Everything that aborts a translation run.
///
/// Property mismatches are not errors; they are recorded on the target as
/// [`crate::target::Mismatch`] values and emitted as comments.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input is neither a `.sln` nor a `.vcxproj` file.
    #[error("Unsupported file type of {}", path.display())]
    UnsupportedInput { path: PathBuf },

    /// A solution or project file could not be opened or read.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A project file is not well-formed XML.
    #[error("XML Error in {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// The document root is not a `<Project>` element.
    #[error("{}: root element <{tag}> is not <Project>", path.display())]
    NotAProject { path: PathBuf, tag: String },

    /// A required child element is absent.
    #[error("Element <{tag}> not found in <{parent}>")]
    MissingElement { tag: String, parent: String },

    /// `<ConfigurationType>` names a project kind with no CMake counterpart.
    #[error("Unsupported ConfigurationType '{0}'")]
    UnmappedConfigurationType(String),

    /// No `Configuration` property group set the target kind.
    #[error("Project '{name}' has no ConfigurationType")]
    MissingTargetKind { name: String },

    /// Writing the CMake output failed.
    #[error("Output Error: {0}")]
    Write(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn missing(tag: &str, parent: &str) -> Self {
        Self::MissingElement { tag: tag.to_string(), parent: parent.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
