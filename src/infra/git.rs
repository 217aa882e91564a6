use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

/// Version control adapter backed by the system `git` binary.
pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    async fn run_git(&self, args: &[&str]) -> AppResult<String> {
        debug!(?args, root = %self.workspace_root.display(), "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workspace_root)
            .output()
            .await
            .map_err(|err| {
                AppError::VersionControl(format!("failed to run git: {err}"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::VersionControl(format!(
                "git {} failed: {}",
                args.first().copied().unwrap_or_default(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn parse_paths(listing: &str) -> Vec<String> {
        listing
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn staged_paths(&self) -> AppResult<Vec<String>> {
        let listing = self.run_git(&["diff", "--cached", "--name-only"]).await?;
        Ok(Self::parse_paths(&listing))
    }

    async fn newly_added_paths(&self) -> AppResult<Vec<String>> {
        let listing = self
            .run_git(&["diff", "--cached", "--name-only", "--diff-filter=A"])
            .await?;
        Ok(Self::parse_paths(&listing))
    }

    async fn cached_diff(&self, path: &str) -> AppResult<String> {
        self.run_git(&["diff", "--cached", "--", path]).await
    }
}
