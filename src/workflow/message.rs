use tracing::debug;

use crate::context::AppContext;
use crate::domain::change::{StagedChange, StagedChanges};
use crate::domain::digest::{scope, summarize};
use crate::domain::message::CommitMessage;
use crate::error::AppResult;
use crate::workflow::prompt::build_prompt;

/// Returned when the index holds nothing to describe. A terminal state, not
/// an error.
pub const NO_STAGED_CHANGES: &str = "No staged changes found";

const GENERATION_ERROR_PREFIX: &str = "Error generating commit message";

/// Run the full pipeline and return the message text.
///
/// The result is always a string: the formatted commit message, the
/// no-changes sentinel, or a readable description of a generation failure.
/// Version control failures still propagate as errors.
pub async fn generate_commit_message(ctx: &AppContext, max_tokens: u32) -> AppResult<String> {
    let changes = collect_staged_changes(ctx).await?;

    if changes.is_empty() {
        return Ok(NO_STAGED_CHANGES.to_string());
    }

    debug!(
        files = changes.len(),
        scope = %scope(&changes.paths()),
        "summarizing staged changes"
    );

    let digest = summarize(&changes);
    let prompt = build_prompt(&digest);

    match ctx.language_model.generate(&prompt, max_tokens).await {
        Ok(raw) => Ok(CommitMessage::from_response(&raw).render()),
        Err(err) => Ok(format!("{GENERATION_ERROR_PREFIX}: {err}")),
    }
}

/// Merge the staged and newly-added listings (first seen wins) and fetch the
/// cached diff for each path.
async fn collect_staged_changes(ctx: &AppContext) -> AppResult<StagedChanges> {
    let mut paths = ctx.version_control.staged_paths().await?;
    paths.extend(ctx.version_control.newly_added_paths().await?);

    let mut entries = Vec::new();
    let mut seen = Vec::new();
    for path in paths {
        if seen.contains(&path) {
            continue;
        }
        let diff_text = ctx.version_control.cached_diff(&path).await?;
        seen.push(path.clone());
        entries.push(StagedChange { path, diff_text });
    }

    Ok(StagedChanges::new(entries))
}
