//! Plan execution: conflict detection, dry-run reporting, apply.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};
use steering_core::errors::{ConflictError, ExecuteError};

use super::manifest::{hash_content, Manifest, ManifestEntry};
use super::report::{Outcome, Report, ReportEntry};
use super::types::{Action, ExecutionMode, GenerationPlan, OperationKind, PlannedOperation};
use crate::adapters::paths::to_slash;

#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    pub mode: ExecutionMode,
    /// Overwrite existing items that steering does not manage.
    pub force: bool,
    /// Remove earlier outputs of the planned vendors that this plan no
    /// longer produces.
    pub prune_stale: bool,
    /// Manifest location, relative to the output root.
    pub manifest_path: PathBuf,
}

/// What is currently at an output path. Symlinks are not followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disk {
    Missing,
    File,
    Directory,
    Symlink,
}

impl Disk {
    fn name(self) -> &'static str {
        match self {
            Self::Missing => "missing path",
            Self::File => "file",
            Self::Directory => "directory",
            Self::Symlink => "symlink",
        }
    }
}

enum Assessment {
    Proceed(Outcome),
    /// An unmanaged item that `force` overwrites.
    Forced,
    Conflict(ConflictError),
}

struct Removal {
    path: String,
    entry: ManifestEntry,
}

/// Check `plan` against `output_root` and apply it or report it.
///
/// Conflict detection, path checks and outcome computation are identical in
/// both modes, so a dry run predicts apply exactly. In `Apply` mode any
/// unresolved conflict fails the run before the filesystem is touched.
pub fn execute(
    plan: &GenerationPlan,
    output_root: &Path,
    options: &ExecuteOptions,
) -> Result<Report, ExecuteError> {
    let manifest_path = output_root.join(&options.manifest_path);
    let previous = Manifest::load(&manifest_path)?;
    let mut report = Report::new(options.mode);

    let duplicates = duplicate_targets(plan);
    let blocked: FxHashSet<PathBuf> = duplicates.iter().map(|c| c.path().to_path_buf()).collect();
    report.conflicts.extend(duplicates);

    let mut steps: Vec<(&PlannedOperation, Outcome)> = Vec::with_capacity(plan.len());
    for op in plan.iter() {
        if blocked.contains(op.path()) {
            steps.push((op, Outcome::Skipped));
            continue;
        }
        match assess(op, output_root, &previous, options.force)? {
            Assessment::Proceed(outcome) => steps.push((op, outcome)),
            Assessment::Forced => {
                report.warnings.push(format!(
                    "overwriting unmanaged {} (force)",
                    op.path().display()
                ));
                steps.push((op, Outcome::Update));
            }
            Assessment::Conflict(conflict) => {
                report.conflicts.push(conflict);
                steps.push((op, Outcome::Skipped));
            }
        }
    }

    let (removals, mut next) = stale_entries(plan, output_root, &previous, options, &mut report)?;

    for (op, outcome) in &steps {
        report.entries.push(ReportEntry {
            vendor: op.vendor,
            kind: op.action.kind(),
            path: op.path().to_path_buf(),
            origin: op.origin.clone(),
            outcome: *outcome,
        });
    }
    for removal in &removals {
        report.entries.push(ReportEntry {
            vendor: removal.entry.vendor,
            kind: removal.entry.kind,
            path: PathBuf::from(&removal.path),
            origin: None,
            outcome: Outcome::Remove,
        });
    }

    if options.mode == ExecutionMode::DryRun {
        tracing::info!(
            changes = report.changes(),
            conflicts = report.conflicts.len(),
            "dry run complete"
        );
        return Ok(report);
    }

    if report.has_conflicts() {
        return Err(ExecuteError::Conflicts(report.conflicts));
    }

    for (op, outcome) in &steps {
        if matches!(outcome, Outcome::Create | Outcome::Update) {
            apply(op, output_root)?;
            tracing::debug!(vendor = %op.vendor, path = %op.path().display(), %outcome, "applied");
        }
        if let Some(entry) = manifest_entry(op) {
            next.record(op.path(), entry);
        }
    }

    for removal in &removals {
        let full = output_root.join(&removal.path);
        fs::remove_file(&full).map_err(|e| ExecuteError::io(&full, e))?;
        tracing::debug!(vendor = %removal.entry.vendor, path = %removal.path, "removed stale output");
    }

    if next.save_if_changed(&manifest_path)? {
        tracing::debug!(path = %manifest_path.display(), "manifest updated");
    }

    tracing::info!(
        created = report.count(Outcome::Create),
        updated = report.count(Outcome::Update),
        removed = report.count(Outcome::Remove),
        unchanged = report.count(Outcome::Unchanged),
        "generation applied"
    );
    Ok(report)
}

/// One conflict per output path claimed by more than one file or symlink
/// operation (or by a directory and a file), listing every claimant.
fn duplicate_targets(plan: &GenerationPlan) -> Vec<ConflictError> {
    let mut by_path: FxHashMap<&Path, Vec<&PlannedOperation>> = FxHashMap::default();
    let mut order = Vec::new();
    for op in plan.iter() {
        let claimants = by_path.entry(op.path()).or_insert_with(|| {
            order.push(op.path());
            Vec::new()
        });
        claimants.push(op);
    }

    order
        .into_iter()
        .filter_map(|path| {
            let ops = by_path.get(path)?;
            let all_directories = ops.iter().all(|op| op.action.kind() == OperationKind::Directory);
            (ops.len() > 1 && !all_directories).then(|| ConflictError::DuplicateTarget {
                path: path.to_path_buf(),
                claimants: ops.iter().map(|op| op.claimant()).collect(),
            })
        })
        .collect()
}

fn assess(
    op: &PlannedOperation,
    output_root: &Path,
    manifest: &Manifest,
    force: bool,
) -> Result<Assessment, ExecuteError> {
    let full = output_root.join(op.path());
    let disk = inspect(&full)?;
    let kind = op.action.kind();

    let mismatch = |found: Disk| {
        Assessment::Conflict(ConflictError::TypeMismatch {
            path: op.path().to_path_buf(),
            expected: kind.name(),
            found: found.name(),
            claimant: op.claimant(),
        })
    };
    let replace = || {
        if manifest.is_managed(op.path(), op.vendor, kind) {
            Assessment::Proceed(Outcome::Update)
        } else if force {
            Assessment::Forced
        } else {
            Assessment::Conflict(ConflictError::Unmanaged {
                path: op.path().to_path_buf(),
                claimant: op.claimant(),
            })
        }
    };

    let assessment = match (&op.action, disk) {
        (_, Disk::Missing) => Assessment::Proceed(Outcome::Create),
        (Action::EnsureDirectory { .. }, Disk::Directory) => Assessment::Proceed(Outcome::Unchanged),
        // A symlink to a directory serves as the directory.
        (Action::EnsureDirectory { .. }, Disk::Symlink) if full.is_dir() => {
            Assessment::Proceed(Outcome::Unchanged)
        }
        (Action::EnsureDirectory { .. }, found) => mismatch(found),
        (_, Disk::Directory) => mismatch(Disk::Directory),
        (Action::WriteFile { content, .. }, Disk::File) => {
            let existing = fs::read(&full).map_err(|e| ExecuteError::io(&full, e))?;
            if existing == content.as_bytes() {
                Assessment::Proceed(Outcome::Unchanged)
            } else {
                replace()
            }
        }
        (Action::CreateSymlink { target, .. }, Disk::Symlink) => {
            let existing = fs::read_link(&full).map_err(|e| ExecuteError::io(&full, e))?;
            if existing == *target {
                Assessment::Proceed(Outcome::Unchanged)
            } else {
                replace()
            }
        }
        // A file where a symlink is planned or the other way round.
        _ => replace(),
    };
    Ok(assessment)
}

fn inspect(path: &Path) -> Result<Disk, ExecuteError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => Ok(Disk::Symlink),
        Ok(meta) if meta.is_dir() => Ok(Disk::Directory),
        Ok(_) => Ok(Disk::File),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Disk::Missing),
        // A parent that is not a directory is reported by its own
        // EnsureDirectory operation.
        Err(_) if path.parent().is_some_and(|p| !p.is_dir()) => Ok(Disk::Missing),
        Err(e) => Err(ExecuteError::io(path, e)),
    }
}

/// Split the previous manifest into stale outputs to remove and entries to
/// carry into the next manifest.
fn stale_entries(
    plan: &GenerationPlan,
    output_root: &Path,
    previous: &Manifest,
    options: &ExecuteOptions,
    report: &mut Report,
) -> Result<(Vec<Removal>, Manifest), ExecuteError> {
    let planned: FxHashSet<String> = plan.iter().map(|op| to_slash(op.path())).collect();
    let mut removals = Vec::new();
    let mut carried = Manifest::default();

    for (path, entry) in &previous.entries {
        if planned.contains(path) {
            continue;
        }
        if !options.prune_stale || !plan.vendors.contains(&entry.vendor) {
            carried.entries.insert(path.clone(), entry.clone());
            continue;
        }
        match current_hash(&output_root.join(path), entry.kind)? {
            None => {}
            Some(hash) if hash == entry.hash => removals.push(Removal {
                path: path.clone(),
                entry: entry.clone(),
            }),
            Some(_) => {
                tracing::warn!(%path, "stale output was modified; leaving it in place");
                report
                    .warnings
                    .push(format!("kept {path}: modified since steering generated it"));
            }
        }
    }
    Ok((removals, carried))
}

/// Hash of what is on disk now, comparable with a manifest hash. `None` if
/// the path is gone; an empty string if it changed kind.
fn current_hash(path: &Path, kind: OperationKind) -> Result<Option<String>, ExecuteError> {
    let hash = match (inspect(path)?, kind) {
        (Disk::Missing, _) => return Ok(None),
        (Disk::Symlink, OperationKind::Symlink) => {
            let target = fs::read_link(path).map_err(|e| ExecuteError::io(path, e))?;
            hash_content(to_slash(&target).as_bytes())
        }
        (Disk::File, OperationKind::File) => {
            let bytes = fs::read(path).map_err(|e| ExecuteError::io(path, e))?;
            hash_content(&bytes)
        }
        _ => String::new(),
    };
    Ok(Some(hash))
}

fn manifest_entry(op: &PlannedOperation) -> Option<ManifestEntry> {
    let hash = match &op.action {
        Action::EnsureDirectory { .. } => return None,
        Action::WriteFile { content, .. } => hash_content(content.as_bytes()),
        Action::CreateSymlink { target, .. } => hash_content(to_slash(target).as_bytes()),
    };
    Some(ManifestEntry {
        vendor: op.vendor,
        kind: op.action.kind(),
        hash,
    })
}

fn apply(op: &PlannedOperation, output_root: &Path) -> Result<(), ExecuteError> {
    let full = output_root.join(op.path());
    match &op.action {
        Action::EnsureDirectory { .. } => {
            fs::create_dir_all(&full).map_err(|e| ExecuteError::io(&full, e))
        }
        Action::WriteFile { content, .. } => {
            prepare(&full)?;
            fs::write(&full, content).map_err(|e| ExecuteError::io(&full, e))
        }
        Action::CreateSymlink { target, .. } => {
            prepare(&full)?;
            symlink(target, &full).map_err(|e| ExecuteError::io(&full, e))
        }
    }
}

/// Create the parent directory and remove whatever file or symlink is in
/// the way. Never writes through an existing symlink.
fn prepare(path: &Path) -> Result<(), ExecuteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ExecuteError::io(parent, e))?;
    }
    match fs::symlink_metadata(path) {
        Ok(meta) if !meta.is_dir() => fs::remove_file(path).map_err(|e| ExecuteError::io(path, e)),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ExecuteError::io(path, e)),
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

#[cfg(not(any(unix, windows)))]
fn symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        ErrorKind::Unsupported,
        "symlinks are not supported on this platform",
    ))
}
