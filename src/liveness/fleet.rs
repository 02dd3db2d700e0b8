use std::path::Path;

use tokio::task::JoinSet;
use tracing::warn;

use crate::types::LivenessSummary;

use super::{now_millis, LivenessAggregator};

/// List agent directory names under `root`.
///
/// Symlinks are followed. Plain files and names that are not valid UTF-8 are
/// skipped. Order is whatever the filesystem returns.
pub async fn list_agent_directories(root: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(root).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let is_dir = match tokio::fs::metadata(entry.path()).await {
            Ok(metadata) => metadata.is_dir(),
            Err(_) => false,
        };
        if !is_dir {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    Ok(names)
}

impl LivenessAggregator {
    /// Summarize every directory concurrently.
    ///
    /// Output order matches `directories`. Agents whose task panics or is still
    /// running at the deadline get the empty summary; the others are unaffected.
    pub async fn summarize_fleet(&self, directories: &[String], now_ms: i64) -> Vec<LivenessSummary> {
        let mut tasks = JoinSet::new();
        for (idx, directory) in directories.iter().enumerate() {
            let aggregator = self.clone();
            let directory = directory.clone();
            tasks.spawn(async move { (idx, aggregator.summarize_agent(&directory, now_ms).await) });
        }

        let mut slots: Vec<Option<LivenessSummary>> = vec![None; directories.len()];
        let deadline = self.deadline;
        let expired = async move {
            match deadline {
                Some(limit) => tokio::time::sleep(limit).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::pin!(expired);

        loop {
            tokio::select! {
                // Drain finished agents before the deadline can win
                biased;
                joined = tasks.join_next() => match joined {
                    Some(Ok((idx, summary))) => slots[idx] = Some(summary),
                    Some(Err(err)) => warn!(error = %err, "Agent summary task failed"),
                    None => break,
                },
                _ = &mut expired => {
                    let pending = tasks.len();
                    warn!(pending, "Fleet deadline reached, degrading unfinished agents");
                    tasks.abort_all();
                    break;
                }
            }
        }

        directories
            .iter()
            .zip(slots)
            .map(|(directory, slot)| slot.unwrap_or_else(|| self.empty_summary(directory)))
            .collect()
    }

    /// List the data root and summarize everything in it at the current time.
    ///
    /// Only the listing can fail; per-agent problems degrade inside the result.
    pub async fn read_fleet(&self) -> std::io::Result<Vec<LivenessSummary>> {
        let directories = list_agent_directories(self.data_root()).await?;
        Ok(self.summarize_fleet(&directories, now_millis()).await)
    }
}
