//! Plan types: planned operations, the merged plan and execution modes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use steering_core::errors::Claimant;
use steering_core::Vendor;

/// What a planned operation does. Every path is relative to the output
/// root; a symlink `target` is relative to the link's parent directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Action {
    EnsureDirectory {
        path: PathBuf,
    },
    CreateSymlink {
        target: PathBuf,
        link: PathBuf,
    },
    WriteFile {
        path: PathBuf,
        #[serde(skip)]
        content: String,
    },
}

impl Action {
    /// The output path this action creates.
    pub fn path(&self) -> &Path {
        match self {
            Self::EnsureDirectory { path } | Self::WriteFile { path, .. } => path,
            Self::CreateSymlink { link, .. } => link,
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Self::EnsureDirectory { .. } => OperationKind::Directory,
            Self::CreateSymlink { .. } => OperationKind::Symlink,
            Self::WriteFile { .. } => OperationKind::File,
        }
    }
}

/// Filesystem item kind, shared by actions and manifest entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Directory,
    Symlink,
    File,
}

impl OperationKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Symlink => "symlink",
            Self::File => "file",
        }
    }
}

/// One filesystem operation produced by an adapter. Immutable once planned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedOperation {
    pub vendor: Vendor,
    /// Relative path of the rule this operation came from, if any.
    pub origin: Option<PathBuf>,
    #[serde(flatten)]
    pub action: Action,
}

impl PlannedOperation {
    pub fn ensure_directory(vendor: Vendor, path: impl Into<PathBuf>) -> Self {
        Self {
            vendor,
            origin: None,
            action: Action::EnsureDirectory { path: path.into() },
        }
    }

    pub fn write_file(
        vendor: Vendor,
        origin: Option<&Path>,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            vendor,
            origin: origin.map(Path::to_path_buf),
            action: Action::WriteFile {
                path: path.into(),
                content: content.into(),
            },
        }
    }

    pub fn create_symlink(
        vendor: Vendor,
        origin: &Path,
        target: impl Into<PathBuf>,
        link: impl Into<PathBuf>,
    ) -> Self {
        Self {
            vendor,
            origin: Some(origin.to_path_buf()),
            action: Action::CreateSymlink {
                target: target.into(),
                link: link.into(),
            },
        }
    }

    pub fn path(&self) -> &Path {
        self.action.path()
    }

    pub fn claimant(&self) -> Claimant {
        Claimant {
            vendor: self.vendor,
            origin: self.origin.clone(),
        }
    }
}

/// Apply mutates the output root; DryRun only reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    Apply,
    #[default]
    DryRun,
}

/// The merged operations of every selected adapter for one invocation.
///
/// Directory operations come first (deduplicated), then file and symlink
/// operations in adapter order. Recomputed from scratch every run.
#[derive(Debug, Clone, Default)]
pub struct GenerationPlan {
    pub vendors: Vec<Vendor>,
    pub operations: Vec<PlannedOperation>,
}

impl GenerationPlan {
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlannedOperation> {
        self.operations.iter()
    }
}
