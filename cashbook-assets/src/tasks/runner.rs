use std::time::{Duration, Instant};

use cashbook_types::{AssetsConfig, BuildError};
use chrono::{DateTime, Local};

use super::files::{clean_dir, mirror};
use super::tool::run_tool;
use super::{plan, sass, scripts, Task};

/// One completed task.
#[derive(Debug, Clone)]
pub struct TaskReport {
    pub task: Task,
    pub started_at: DateTime<Local>,
    pub elapsed: Duration,
}

/// Runs task plans against one configuration.
pub struct Runner {
    config: AssetsConfig,
}

impl Runner {
    pub fn new(config: AssetsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssetsConfig {
        &self.config
    }

    /// Runs `targets` and their dependencies, stopping at the first failure.
    pub async fn run(&self, targets: &[Task]) -> Result<Vec<TaskReport>, BuildError> {
        let order = plan(targets)?;
        let names: Vec<&str> = order.iter().map(|t| t.name()).collect();
        tracing::debug!("Plan: {}", names.join(" -> "));

        let mut reports = Vec::with_capacity(order.len());
        for task in order {
            let started_at = Local::now();
            let clock = Instant::now();
            tracing::info!("Starting '{task}'...");
            if let Err(e) = self.execute(task).await {
                tracing::error!("'{task}' errored after {:?}: {e}", clock.elapsed());
                return Err(e);
            }
            let elapsed = clock.elapsed();
            tracing::info!("Finished '{task}' after {elapsed:?}");
            reports.push(TaskReport { task, started_at, elapsed });
        }
        Ok(reports)
    }

    async fn execute(&self, task: Task) -> Result<(), BuildError> {
        let paths = &self.config.paths;
        match task {
            Task::Build | Task::Clean => {},
            Task::CleanCss => clean_dir(&paths.stylesheets_dest()).await?,
            Task::CleanJs => clean_dir(&paths.scripts_dest()).await?,
            Task::CleanImages => clean_dir(&paths.images_dest()).await?,
            Task::VendorCss => {
                let copied = sass::vendor_css(paths).await?;
                tracing::debug!("{copied} vendor stylesheets updated");
            },
            Task::Sass => {
                let compiled = sass::compile(&self.config).await?;
                tracing::info!("{compiled} stylesheets compiled");
            },
            Task::Scripts => scripts::build(&self.config).await?,
            Task::Images => {
                let dest = paths.images_dest();
                let mut copied = 0;
                for src in &paths.images {
                    copied += mirror(src, &dest).await?;
                }
                tracing::info!("{copied} images copied");
            },
            Task::Lint => {
                for command in &self.config.commands.lint {
                    run_tool(Task::Lint, command, &[]).await?;
                }
            },
        }
        Ok(())
    }
}
