//! Validated task dependency graph
//!
//! The graph is built once per invocation from the loaded task definitions and
//! is read-only afterwards. It answers the three scheduling questions: which
//! tasks a root needs, in which order they can run, and which of them can run
//! at the same time.

use std::collections::{HashMap, HashSet};
use wrkit_core::{Error, Result, TaskDefinition};

/// Traversal state used by cycle detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Directed graph of tasks, edges pointing from a task to its dependencies
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    tasks: HashMap<String, TaskDefinition>,
}

impl TaskGraph {
    /// Validate the definitions and build the graph.
    ///
    /// Every dependency must name a defined task and the graph must be acyclic.
    pub fn build(tasks: HashMap<String, TaskDefinition>) -> Result<Self> {
        let graph = Self { tasks };

        for name in graph.sorted_names() {
            for dependency in graph.dependencies(name) {
                if !graph.tasks.contains_key(dependency) {
                    return Err(Error::unknown_dependency(name, dependency));
                }
            }
        }

        graph.detect_cycle()?;

        tracing::debug!(tasks = graph.tasks.len(), "task graph built");
        Ok(graph)
    }

    pub fn get(&self, name: &str) -> Option<&TaskDefinition> {
        self.tasks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Declared dependencies of a task, empty for unknown names
    pub fn dependencies(&self, name: &str) -> &[String] {
        self.tasks
            .get(name)
            .map(|task| task.dependencies.as_slice())
            .unwrap_or_default()
    }

    fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tasks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Three-color depth-first search. Reports the first cycle found as the
    /// path from its entry node back to itself.
    fn detect_cycle(&self) -> Result<()> {
        let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(self.tasks.len());
        let mut stack: Vec<&str> = Vec::new();

        for name in self.sorted_names() {
            if !marks.contains_key(name) {
                self.visit(name, &mut marks, &mut stack)?;
            }
        }
        Ok(())
    }

    fn visit<'a>(
        &'a self,
        node: &'a str,
        marks: &mut HashMap<&'a str, Mark>,
        stack: &mut Vec<&'a str>,
    ) -> Result<()> {
        marks.insert(node, Mark::InProgress);
        stack.push(node);

        for dependency in self.dependencies(node) {
            match marks.get(dependency.as_str()) {
                Some(Mark::InProgress) => {
                    let start = stack
                        .iter()
                        .position(|n| *n == dependency)
                        .unwrap_or_default();
                    let mut path: Vec<String> =
                        stack[start..].iter().map(|n| n.to_string()).collect();
                    path.push(dependency.clone());
                    return Err(Error::CycleDetected { path });
                }
                Some(Mark::Done) => {}
                None => self.visit(dependency, marks, stack)?,
            }
        }

        stack.pop();
        marks.insert(node, Mark::Done);
        Ok(())
    }

    /// Root and its transitive dependencies in dependency-first order.
    ///
    /// Dependencies are visited in declared order, each task is emitted once
    /// after all of its dependencies, and the root is emitted last.
    pub fn subgraph(&self, root: &str) -> Result<Vec<String>> {
        let (root, _) = self
            .tasks
            .get_key_value(root)
            .ok_or_else(|| Error::task_not_found(root))?;

        let mut order = Vec::new();
        let mut visited: HashSet<&str> = HashSet::from([root.as_str()]);
        // (task, index of the next dependency to visit)
        let mut frames: Vec<(&str, usize)> = vec![(root.as_str(), 0)];

        while let Some(frame) = frames.last_mut() {
            let (node, next) = *frame;
            let dependencies = self.dependencies(node);

            if next < dependencies.len() {
                frame.1 += 1;
                let dependency = dependencies[next].as_str();
                if visited.insert(dependency) {
                    frames.push((dependency, 0));
                }
            } else {
                order.push(node.to_string());
                frames.pop();
            }
        }

        Ok(order)
    }

    /// Partition the root's subgraph into waves.
    ///
    /// Every task lands in the earliest wave after all of its dependencies, so
    /// the number of waves equals the longest dependency chain. Members of a
    /// wave are sorted by name.
    pub fn waves(&self, root: &str) -> Result<Vec<Vec<String>>> {
        let members = self.subgraph(root)?;

        let mut in_degree: HashMap<&str, usize> = HashMap::with_capacity(members.len());
        let mut dependents: HashMap<&str, Vec<&str>> = HashMap::with_capacity(members.len());
        for task in &members {
            let dependencies = self.dependencies(task);
            in_degree.insert(task, dependencies.len());
            for dependency in dependencies {
                dependents.entry(dependency).or_default().push(task);
            }
        }

        let mut waves = Vec::new();
        let mut ready: Vec<&str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(task, _)| *task)
            .collect();
        let mut placed = 0;

        while !ready.is_empty() {
            ready.sort_unstable();
            let mut next = Vec::new();

            for task in &ready {
                for dependent in dependents.get(task).into_iter().flatten() {
                    if let Some(degree) = in_degree.get_mut(dependent) {
                        *degree -= 1;
                        if *degree == 0 {
                            next.push(*dependent);
                        }
                    }
                }
            }

            placed += ready.len();
            waves.push(ready.iter().map(|t| t.to_string()).collect());
            ready = next;
        }

        if placed != members.len() {
            // Only reachable if the acyclic invariant was broken after build
            return Err(Error::configuration(format!(
                "could not order the dependencies of '{root}'"
            )));
        }

        Ok(waves)
    }
}
