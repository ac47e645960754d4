use crate::areas::repository::Repository;
use crate::errors::{VcError, VcResult};
use std::path::Path;

/// Files touched by one `add`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddReport {
    pub staged: Vec<String>,
    /// Files left alone because the extension policy does not track them
    pub skipped: Vec<String>,
}

impl Repository {
    /// Stage one file, or every tracked file below a directory
    pub fn add(&mut self, path: &Path) -> VcResult<AddReport> {
        let file_name = self.workspace().normalize(path)?;
        let absolute = self.workspace().path().join(&file_name);

        if absolute.is_dir() {
            let prefix = format!("{file_name}/");
            let files = self
                .workspace()
                .list_files()?
                .into_iter()
                .filter(|name| name.starts_with(&prefix))
                .collect::<Vec<_>>();
            return self.add_files(files);
        }

        if !absolute.is_file() {
            return Err(VcError::io(
                format!("pathspec '{}' did not match any file", path.display()),
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ));
        }

        if !self.workspace().is_tracked(&file_name) {
            tracing::info!(%file_name, "skipping file outside the extension policy");
            return Ok(AddReport {
                staged: Vec::new(),
                skipped: vec![file_name],
            });
        }

        self.add_files(vec![file_name])
    }

    /// Stage every tracked file in the working directory
    pub fn add_all(&mut self) -> VcResult<AddReport> {
        let files = self.workspace().list_files()?;
        self.add_files(files)
    }

    fn add_files(&mut self, files: Vec<String>) -> VcResult<AddReport> {
        let head = self.head_commit()?;
        let mut report = AddReport::default();

        for file_name in files {
            let content = self.workspace().read_file(&file_name)?;
            let oid = self.blobs().put(&file_name, &content)?;

            let staging = &mut self.state_mut().staging;
            let unchanged = head.file(&file_name) == Some(&oid)
                && !staging.removed().contains(&file_name);

            if unchanged {
                // matches HEAD, so any earlier staged version is dropped
                staging.unstage(&file_name);
                tracing::debug!(%file_name, "file matches HEAD, nothing to stage");
                continue;
            }

            tracing::debug!(%file_name, blob = %oid, "staged file");
            staging.stage(file_name.clone(), oid);
            report.staged.push(file_name);
        }

        Ok(report)
    }
}
