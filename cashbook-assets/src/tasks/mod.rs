//! Asset tasks and their dependency graph.
//!
//! Every task names the tasks that must run before it. [`plan`] flattens
//! a set of requested tasks into an execution order where each task runs
//! once, after all of its dependencies.

mod files;
mod runner;
mod sass;
mod scripts;
mod tool;

pub use runner::{Runner, TaskReport};

use std::fmt;

use cashbook_types::BuildError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Build,
    Clean,
    CleanCss,
    CleanJs,
    CleanImages,
    VendorCss,
    Sass,
    Scripts,
    Images,
    Lint,
}

impl Task {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Clean => "clean",
            Self::CleanCss => "clean-css",
            Self::CleanJs => "clean-js",
            Self::CleanImages => "clean-images",
            Self::VendorCss => "vendor-css",
            Self::Sass => "sass",
            Self::Scripts => "scripts",
            Self::Images => "images",
            Self::Lint => "lint",
        }
    }

    /// Tasks that must complete first, in order.
    pub const fn dependencies(self) -> &'static [Self] {
        match self {
            Self::Build => &[Self::Sass, Self::Scripts, Self::Images],
            Self::Clean => &[Self::CleanCss, Self::CleanJs, Self::CleanImages],
            Self::Sass => &[Self::CleanCss, Self::VendorCss],
            Self::Scripts => &[Self::CleanJs],
            Self::Images => &[Self::CleanImages],
            Self::CleanCss | Self::CleanJs | Self::CleanImages | Self::VendorCss | Self::Lint => &[],
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Execution order for `targets` and everything they depend on.
pub fn plan(targets: &[Task]) -> Result<Vec<Task>, BuildError> {
    plan_with(targets, Task::dependencies)
}

/// Depth-first topological order over an arbitrary dependency function.
fn plan_with<T, F>(targets: &[T], dependencies: F) -> Result<Vec<T>, BuildError>
where
    T: Copy + PartialEq + fmt::Display + 'static,
    F: Fn(T) -> &'static [T],
{
    fn visit<T, F>(task: T, deps: &F, path: &mut Vec<T>, order: &mut Vec<T>) -> Result<(), BuildError>
    where
        T: Copy + PartialEq + fmt::Display + 'static,
        F: Fn(T) -> &'static [T],
    {
        if order.contains(&task) {
            return Ok(());
        }
        if path.contains(&task) {
            return Err(BuildError::DependencyCycle { task: task.to_string() });
        }
        path.push(task);
        for &dep in deps(task) {
            visit(dep, deps, path, order)?;
        }
        path.pop();
        order.push(task);
        Ok(())
    }

    let mut order = Vec::new();
    let mut path = Vec::new();
    for &task in targets {
        visit(task, &dependencies, &mut path, &mut order)?;
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_plan_order() {
        let order = plan(&[Task::Build]).expect("plan");
        assert_eq!(
            order,
            [
                Task::CleanCss,
                Task::VendorCss,
                Task::Sass,
                Task::CleanJs,
                Task::Scripts,
                Task::CleanImages,
                Task::Images,
                Task::Build,
            ]
        );
    }

    #[test]
    fn test_each_task_runs_once() {
        let order = plan(&[Task::Sass, Task::Build, Task::Clean]).expect("plan");
        for task in &order {
            assert_eq!(order.iter().filter(|t| *t == task).count(), 1, "{task} planned twice");
        }
        assert_eq!(order.first(), Some(&Task::CleanCss));
        assert_eq!(order.last(), Some(&Task::Clean));
    }

    #[test]
    fn test_dependencies_precede_dependents() {
        let all = [
            Task::Build,
            Task::Clean,
            Task::CleanCss,
            Task::CleanJs,
            Task::CleanImages,
            Task::VendorCss,
            Task::Sass,
            Task::Scripts,
            Task::Images,
            Task::Lint,
        ];
        let order = plan(&all).expect("plan");
        for task in all {
            let at = order.iter().position(|t| *t == task).expect("planned");
            for dep in task.dependencies() {
                let dep_at = order.iter().position(|t| t == dep).expect("planned");
                assert!(dep_at < at, "{dep} should run before {task}");
            }
        }
    }

    #[test]
    fn test_cycle_is_reported() {
        #[derive(Debug, Clone, Copy, PartialEq)]
        enum Node {
            A,
            B,
            C,
        }
        impl fmt::Display for Node {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{self:?}")
            }
        }
        let deps = |n: Node| -> &'static [Node] {
            match n {
                Node::A => &[Node::B],
                Node::B => &[Node::C],
                Node::C => &[Node::A],
            }
        };
        let err = plan_with(&[Node::A], deps).expect_err("cycle");
        assert_eq!(err, BuildError::DependencyCycle { task: "A".into() });
    }
}
