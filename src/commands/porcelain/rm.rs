use crate::areas::repository::Repository;
use crate::errors::{VcError, VcResult};
use std::path::Path;

impl Repository {
    /// Schedule a staged or tracked file for removal and delete it from the
    /// working directory
    pub fn remove(&mut self, path: &Path) -> VcResult<String> {
        let file_name = self.workspace().normalize(path)?;
        let tracked = self.head_commit()?.file(&file_name).is_some();

        if !tracked && !self.staging().is_staged(&file_name) {
            return Err(VcError::NotStaged(file_name));
        }

        self.state_mut().staging.remove(&file_name);
        if self.workspace().remove_file(&file_name)? {
            tracing::debug!(%file_name, "deleted working file");
        }

        tracing::info!(%file_name, "scheduled file for removal");
        Ok(file_name)
    }
}
