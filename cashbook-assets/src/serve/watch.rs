//! Watches source trees and reruns the task that builds them.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use cashbook_types::{AssetsConfig, BuildError};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as _};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::tasks::{Runner, Task};

struct Group {
    /// `None` for trees that need a page reload only
    task: Option<Task>,
    roots: Vec<PathBuf>,
}

/// Watched source trees, one group per task.
pub struct Watcher {
    groups: Vec<Group>,
    /// Trees the tasks write to
    ignored: Vec<PathBuf>,
    debounce: Duration,
    events: mpsc::UnboundedReceiver<Vec<PathBuf>>,
    _watcher: RecommendedWatcher,
}

async fn resolve(path: &Path) -> PathBuf {
    tokio::fs::canonicalize(path).await.unwrap_or_else(|_| path.to_path_buf())
}

fn watch_error(path: &Path, e: &notify::Error) -> BuildError {
    BuildError::Watch { path: path.display().to_string(), message: e.to_string() }
}

impl Watcher {
    pub async fn new(config: &AssetsConfig, debounce: Duration) -> Result<Self, BuildError> {
        let (tx, events) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) if !matches!(event.kind, EventKind::Access(_)) => {
                // receiver gone means the server is shutting down
                let _ = tx.send(event.paths);
            },
            Ok(_) => {},
            Err(e) => tracing::warn!("File watcher error: {e}"),
        })
        .map_err(|e| watch_error(Path::new("."), &e))?;

        let paths = &config.paths;
        let mut scripts = vec![paths.web_crate.join("src")];
        scripts.extend(paths.vendor_scripts.iter().cloned());
        let specs = [
            (Some(Task::Sass), paths.styles.clone()),
            (Some(Task::Scripts), scripts),
            (Some(Task::Images), paths.images.clone()),
            (None, paths.templates.clone()),
        ];

        let mut groups = Vec::with_capacity(specs.len());
        for (task, configured) in specs {
            let mut roots = Vec::with_capacity(configured.len());
            for root in configured {
                let Ok(meta) = tokio::fs::metadata(&root).await else {
                    tracing::debug!("Not watching missing {}", root.display());
                    continue;
                };
                let root = resolve(&root).await;
                let mode =
                    if meta.is_dir() { RecursiveMode::Recursive } else { RecursiveMode::NonRecursive };
                watcher.watch(&root, mode).map_err(|e| watch_error(&root, &e))?;
                roots.push(root);
            }
            groups.push(Group { task, roots });
        }

        let ignored = vec![
            resolve(&paths.dest).await,
            resolve(&paths.src.join("stylesheets").join("vendor")).await,
        ];
        Ok(Self { groups, ignored, debounce, events, _watcher: watcher })
    }

    /// Groups containing any of `changed`, in group order, each once.
    fn tasks_for(&self, changed: &[PathBuf]) -> Vec<Option<Task>> {
        let changed: Vec<&PathBuf> = changed
            .iter()
            .filter(|path| !self.ignored.iter().any(|ignored| path.starts_with(ignored)))
            .collect();
        self.groups
            .iter()
            .filter(|group| {
                changed.iter().any(|path| group.roots.iter().any(|root| path.starts_with(root)))
            })
            .map(|group| group.task)
            .collect()
    }

    /// Waits for a change, then for `debounce` without further changes.
    /// `None` once the watcher has stopped.
    pub async fn next_batch(&mut self) -> Option<Vec<Option<Task>>> {
        loop {
            let mut changed = self.events.recv().await?;
            let sleep = tokio::time::sleep(self.debounce);
            tokio::pin!(sleep);
            loop {
                tokio::select! {
                    () = &mut sleep => break,
                    more = self.events.recv() => {
                        let Some(more) = more else { break };
                        changed.extend(more);
                        sleep.as_mut().reset(Instant::now() + self.debounce);
                    }
                }
            }
            let tasks = self.tasks_for(&changed);
            if !tasks.is_empty() {
                return Some(tasks);
            }
        }
    }
}

/// Reruns tasks for each batch of changes. Task failures are logged and
/// watching continues.
pub fn spawn(runner: Arc<Runner>, mut watcher: Watcher) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(changed) = watcher.next_batch().await {
            for task in changed {
                let Some(task) = task else {
                    tracing::info!("Templates changed, reload the page");
                    continue;
                };
                tracing::info!("Sources for '{task}' changed");
                match runner.run(&[task]).await {
                    Ok(reports) => {
                        if let Some(report) = reports.last() {
                            tracing::info!(
                                "Rebuilt '{task}' at {}, reload the page",
                                report.started_at.format("%H:%M:%S")
                            );
                        }
                    },
                    Err(e) if e.is_transient() => tracing::error!("Rebuilding '{task}' failed: {e}"),
                    Err(e) => tracing::error!("Rebuilding '{task}' failed: {e}; check assets.json"),
                }
            }
        }
        tracing::warn!("File watcher stopped, sources are no longer rebuilt");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashbook_types::AssetPaths;

    const DEBOUNCE: Duration = Duration::from_millis(50);

    fn config_in(root: &Path) -> AssetsConfig {
        let mut config = AssetsConfig::default();
        config.paths = AssetPaths {
            src: root.join("src"),
            dest: root.join("dest"),
            styles: vec![root.join("src/stylesheets")],
            web_crate: root.join("web"),
            images: vec![root.join("src/images")],
            templates: vec![root.join("templates")],
            ..AssetPaths::default()
        };
        config
    }

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        for sub in ["src/stylesheets/vendor", "src/images", "templates", "dest"] {
            std::fs::create_dir_all(dir.path().join(sub)).expect("mkdir");
        }
        dir
    }

    async fn next(watcher: &mut Watcher) -> Vec<Option<Task>> {
        tokio::time::timeout(Duration::from_secs(10), watcher.next_batch())
            .await
            .expect("change reported in time")
            .expect("watcher running")
    }

    #[tokio::test]
    async fn test_maps_paths_to_groups_once() {
        let dir = tree();
        let watcher = Watcher::new(&config_in(dir.path()), DEBOUNCE).await.expect("watcher");
        let root = resolve(dir.path()).await;

        let changed = [
            root.join("templates/base.html"),
            root.join("src/stylesheets/app.scss"),
            root.join("src/stylesheets/_forms.scss"),
        ];
        assert_eq!(watcher.tasks_for(&changed), [Some(Task::Sass), None]);
        assert!(watcher.tasks_for(&[root.join("elsewhere.txt")]).is_empty());
    }

    #[tokio::test]
    async fn test_task_outputs_are_ignored() {
        let dir = tree();
        let mut config = config_in(dir.path());
        config.paths.images.push(dir.path().join("dest"));
        let watcher = Watcher::new(&config, DEBOUNCE).await.expect("watcher");
        let root = resolve(dir.path()).await;

        let changed = [
            root.join("src/stylesheets/vendor/_hopscotch.scss"),
            root.join("dest/images/logo.png"),
        ];
        assert!(watcher.tasks_for(&changed).is_empty());
    }

    #[tokio::test]
    async fn test_missing_roots_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let watcher = Watcher::new(&config_in(dir.path()), DEBOUNCE).await.expect("watcher");
        assert!(watcher.groups.iter().all(|group| group.roots.is_empty()));
    }

    #[tokio::test]
    async fn test_edit_in_place_triggers_rebuild() {
        let dir = tree();
        let style = dir.path().join("src/stylesheets/app.scss");
        std::fs::write(&style, "a { color: red; }").expect("write");
        let mut watcher = Watcher::new(&config_in(dir.path()), DEBOUNCE).await.expect("watcher");

        // same length, so only the content differs
        std::fs::write(&style, "a { color: tan; }").expect("write");
        assert_eq!(next(&mut watcher).await, [Some(Task::Sass)]);
    }

    #[tokio::test]
    async fn test_burst_of_changes_is_one_batch() {
        let dir = tree();
        let mut watcher = Watcher::new(&config_in(dir.path()), DEBOUNCE).await.expect("watcher");

        std::fs::write(dir.path().join("src/images/a.png"), "a").expect("write");
        std::fs::write(dir.path().join("templates/base.html"), "<html>").expect("write");
        std::fs::write(dir.path().join("src/images/b.png"), "b").expect("write");
        std::fs::remove_file(dir.path().join("src/images/a.png")).expect("remove");

        let mut seen = next(&mut watcher).await;
        // a slow filesystem may split the burst
        while seen.len() < 2 {
            for task in next(&mut watcher).await {
                if !seen.contains(&task) {
                    seen.push(task);
                }
            }
        }
        seen.sort_by_key(|task| task.map(|t| t.name()));
        assert_eq!(seen, [None, Some(Task::Images)]);
    }
}
