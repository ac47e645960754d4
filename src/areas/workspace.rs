use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::config::WorkspaceConfig;
use crate::errors::{IoContext, VcError, VcResult};
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Name of the repository marker directory inside the working directory
pub const REPOSITORY_DIR: &str = ".minivc";

const IGNORED_PATHS: [&str; 3] = [REPOSITORY_DIR, ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
    /// Scratch directory for replacement content, on the same filesystem
    scratch_path: Box<Path>,
    policy: WorkspaceConfig,
}

impl Workspace {
    pub fn new(path: Box<Path>, scratch_path: Box<Path>, policy: WorkspaceConfig) -> Self {
        Workspace {
            path,
            scratch_path,
            policy,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether a working-relative file falls under the extension policy
    pub fn is_tracked(&self, file_name: &str) -> bool {
        self.policy.is_tracked_extension(Path::new(file_name))
    }

    /// List every policy-matching file, as sorted working-relative names
    /// using `/` separators
    pub fn list_files(&self) -> VcResult<Vec<String>> {
        let mut files = self.walk_files(&self.path)?;
        files.retain(|name| self.is_tracked(name));
        files.sort();

        Ok(files)
    }

    /// List every file below a working-relative directory, whatever its
    /// extension
    pub fn list_all_files_in(&self, dir_name: &str) -> VcResult<Vec<String>> {
        let mut files = self.walk_files(&self.path.join(dir_name))?;
        files.sort();

        Ok(files)
    }

    pub fn dir_exists(&self, name: &str) -> bool {
        self.path.join(name).is_dir()
    }

    /// Turn a user-supplied path (absolute or relative to the working
    /// directory) into a working-relative file name
    pub fn normalize(&self, path: &Path) -> VcResult<String> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.path.join(path)
        };

        let mut components = Vec::new();
        for component in absolute.components() {
            match component {
                Component::ParentDir => {
                    components.pop();
                }
                Component::CurDir => {}
                other => components.push(other),
            }
        }
        let absolute = components.iter().collect::<PathBuf>();

        self.relative_name(&absolute).ok_or_else(|| {
            VcError::io(
                format!("{} is outside the working directory", path.display()),
                std::io::Error::from(std::io::ErrorKind::InvalidInput),
            )
        })
    }

    pub fn file_exists(&self, file_name: &str) -> bool {
        self.path.join(file_name).is_file()
    }

    pub fn read_file(&self, file_name: &str) -> VcResult<Bytes> {
        let file_path = self.path.join(file_name);

        std::fs::read(&file_path)
            .map(Bytes::from)
            .io_context(|| format!("unable to read file {}", file_path.display()))
    }

    /// Replace one working file atomically
    pub fn write_file(&self, file_name: &str, content: &[u8]) -> VcResult<()> {
        let staged = self.write_scratch(content, file_name)?;
        self.move_into_place(staged, file_name)
    }

    /// Delete a working file, returning whether it existed
    pub fn remove_file(&self, file_name: &str) -> VcResult<bool> {
        let file_path = self.path.join(file_name);

        if !file_path.is_file() {
            return Ok(false);
        }

        std::fs::remove_file(&file_path)
            .io_context(|| format!("failed to remove file {}", file_path.display()))?;
        self.prune_empty_parents(file_name);

        Ok(true)
    }

    // Every replacement is written to scratch files before the working
    // directory is touched, so a failed write leaves it as it was. Obsolete
    // files inside a directory that a replacement takes the place of go
    // first, then files are renamed into place, then the other obsolete
    // files are deleted.
    pub fn apply_migration(&self, migration: &Migration) -> VcResult<()> {
        let mut replacements = Vec::new();
        for action in [ActionType::Add, ActionType::Modify] {
            for (file_name, content) in migration.actions_of(action) {
                let content = content.as_ref().ok_or_else(|| {
                    VcError::io(
                        format!("no content planned for {file_name}"),
                        std::io::Error::from(std::io::ErrorKind::InvalidData),
                    )
                })?;
                replacements.push((self.write_scratch(content, file_name)?, file_name));
            }
        }

        for (file_name, _) in migration.actions_of(ActionType::Delete) {
            if migration.is_in_replaced_dir(file_name) {
                tracing::debug!(%file_name, "clearing directory in the way of a file");
                self.remove_file(file_name)?;
            }
        }

        for (staged, file_name) in replacements {
            tracing::debug!(%file_name, "restoring working file");
            self.move_into_place(staged, file_name)?;
        }

        for (file_name, _) in migration.actions_of(ActionType::Delete) {
            tracing::debug!(%file_name, "removing working file");
            self.remove_file(file_name)?;
        }

        Ok(())
    }

    fn write_scratch(&self, content: &[u8], file_name: &str) -> VcResult<tempfile::NamedTempFile> {
        std::fs::create_dir_all(&self.scratch_path).io_context(|| {
            format!(
                "unable to create scratch directory {}",
                self.scratch_path.display()
            )
        })?;

        let mut staged = tempfile::NamedTempFile::new_in(&self.scratch_path)
            .io_context(|| format!("unable to create scratch file for {file_name}"))?;
        staged
            .write_all(content)
            .io_context(|| format!("unable to write scratch file for {file_name}"))?;

        Ok(staged)
    }

    fn move_into_place(&self, staged: tempfile::NamedTempFile, file_name: &str) -> VcResult<()> {
        let file_path = self.path.join(file_name);

        // only an emptied directory may be replaced
        if file_path.is_dir() {
            std::fs::remove_dir(&file_path).io_context(|| {
                format!("failed to remove directory in the way of {file_name}")
            })?;
        }
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)
                .io_context(|| format!("failed to create parent directory for {file_name}"))?;
        }

        staged
            .persist(&file_path)
            .map_err(|e| VcError::io(format!("failed to write file {file_name}"), e.error))?;

        Ok(())
    }

    /// Remove directories left empty by a deletion, up to the working root
    fn prune_empty_parents(&self, file_name: &str) {
        let mut parent = Path::new(file_name).parent();

        while let Some(dir) = parent {
            if dir.as_os_str().is_empty() {
                break;
            }
            // remove_dir only succeeds on empty directories
            if std::fs::remove_dir(self.path.join(dir)).is_err() {
                break;
            }
            parent = dir.parent();
        }
    }

    fn walk_files(&self, root: &Path) -> VcResult<Vec<String>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored(&entry.file_name().to_string_lossy()))
        {
            let entry = entry
                .map_err(std::io::Error::from)
                .io_context(|| format!("unable to scan {}", root.display()))?;

            if entry.file_type().is_file() {
                files.extend(self.relative_name(entry.path()));
            }
        }

        Ok(files)
    }

    fn is_ignored(name: &str) -> bool {
        IGNORED_PATHS.contains(&name)
    }

    fn relative_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(self.path.as_ref()).ok()?;

        if relative.as_os_str().is_empty()
            || relative.components().any(|component| {
                matches!(component, Component::Normal(name) if Self::is_ignored(&name.to_string_lossy()))
            })
        {
            return None;
        }

        Some(
            relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
        )
    }
}
