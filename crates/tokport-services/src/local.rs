use std::path::Path;
use tokport_core::Result;
use tokport_domain::PlannedFile;

use crate::plan::PlannedUpdate;

/// Write planned files under `root`, creating folders as needed.
pub fn write_updates(root: &Path, plan: &[PlannedUpdate]) -> Result<Vec<PlannedFile>> {
    let mut written = Vec::with_capacity(plan.len());
    for update in plan {
        let rel = update.file.path().trim_start_matches('/');
        let target = root.join(rel);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, update.file.content())?;
        tracing::debug!(event = "file_written", path = %target.display());
        written.push(update.summary());
    }
    Ok(written)
}
