use std::fmt;
use std::path::{Path, PathBuf};

/// Terminal failure while loading an input file. Reported once; the session
/// never continues with partial data.
#[derive(Debug)]
pub enum LoadError {
    Read { path: PathBuf, source: std::io::Error },
    Csv { path: PathBuf, source: csv::Error },
    Json { path: PathBuf, source: serde_json::Error },
    MissingObject { path: PathBuf, object: String },
    Empty { path: PathBuf },
}

impl LoadError {
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. }
            | Self::Csv { path, .. }
            | Self::Json { path, .. }
            | Self::MissingObject { path, .. }
            | Self::Empty { path } => path,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "failed to parse CSV '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "failed to parse JSON '{}': {source}", path.display())
            }
            Self::MissingObject { path, object } => write!(
                f,
                "topology '{}' has no object named '{object}'",
                path.display()
            ),
            Self::Empty { path } => write!(f, "'{}' contains no usable rows", path.display()),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::MissingObject { .. } | Self::Empty { .. } => None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read(PathBuf, std::io::Error),
    Parse(PathBuf, serde_yaml::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(path, err) => write!(f, "failed to read config '{}': {err}", path.display()),
            Self::Parse(path, err) => {
                write!(f, "failed to parse config '{}': {err}", path.display())
            }
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
