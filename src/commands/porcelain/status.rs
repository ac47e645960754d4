use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusInfo;
use crate::errors::VcResult;

impl Repository {
    pub fn status(&self) -> VcResult<StatusInfo> {
        let head = self.head_commit()?;

        StatusInfo::inspect(
            self.workspace(),
            head.staged_files(),
            self.staging(),
            self.branches(),
            self.current_branch(),
        )
    }
}
