//! Dependency cycle detection
//!
//! Builds a directed graph over clean task ids (task -> prerequisite
//! edges) and reports every distinct cycle. Cycles are data, not
//! errors: callers still score and rank a cyclic batch.

use crate::types::CleanTask;
use std::collections::{HashMap, HashSet};

/// Tri-state visitation marker for the traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Directed dependency graph over a clean batch
///
/// Node order follows first occurrence in the batch; a duplicate id
/// keeps the edge list of its last occurrence.
struct DependencyGraph<'a> {
    /// Node ids in first-occurrence order
    order: Vec<&'a str>,

    /// Adjacency: task id -> prerequisite ids
    edges: HashMap<&'a str, &'a [String]>,
}

impl<'a> DependencyGraph<'a> {
    fn new(tasks: &'a [CleanTask]) -> Self {
        let mut order = Vec::with_capacity(tasks.len());
        let mut edges: HashMap<&'a str, &'a [String]> = HashMap::with_capacity(tasks.len());

        for task in tasks {
            if !edges.contains_key(task.id.as_str()) {
                order.push(task.id.as_str());
            }
            edges.insert(task.id.as_str(), task.dependencies.as_slice());
        }

        Self { order, edges }
    }

    /// Depth-first walk from `root` on an explicit stack.
    ///
    /// Each frame carries (node, next child index) so arbitrarily long
    /// dependency chains cannot exhaust the call stack. The stack
    /// doubles as the current path: hitting an in-progress node records
    /// the sub-path from that node to the top as a cycle.
    fn walk(
        &self,
        root: &'a str,
        marks: &mut HashMap<&'a str, Mark>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        let mut stack: Vec<(&'a str, usize)> = vec![(root, 0)];
        marks.insert(root, Mark::InProgress);

        while let Some(&(node, child_idx)) = stack.last() {
            let children = self.edges.get(node).copied().unwrap_or(&[]);

            match children.get(child_idx) {
                Some(dep) => {
                    if let Some(frame) = stack.last_mut() {
                        frame.1 += 1;
                    }
                    let dep = dep.as_str();
                    // dangling reference, not this component's concern
                    if !self.edges.contains_key(dep) {
                        continue;
                    }
                    match marks.get(dep).copied().unwrap_or(Mark::Unvisited) {
                        Mark::Unvisited => {
                            marks.insert(dep, Mark::InProgress);
                            stack.push((dep, 0));
                        }
                        Mark::InProgress => {
                            if let Some(start) = stack.iter().position(|&(n, _)| n == dep) {
                                let cycle =
                                    stack[start..].iter().map(|&(n, _)| n.to_string()).collect();
                                cycles.push(cycle);
                            }
                        }
                        Mark::Done => {}
                    }
                }
                None => {
                    marks.insert(node, Mark::Done);
                    stack.pop();
                }
            }
        }
    }
}

/// Report all distinct directed cycles in a clean batch.
///
/// Two cycles naming the same node set count as one regardless of
/// rotation; the first discovery wins. Returns an empty list for an
/// acyclic dependency relation.
pub fn detect_cycles(tasks: &[CleanTask]) -> Vec<Vec<String>> {
    let graph = DependencyGraph::new(tasks);
    let mut marks: HashMap<&str, Mark> = HashMap::with_capacity(graph.order.len());
    let mut cycles = Vec::new();

    for &root in &graph.order {
        if marks.get(root).copied().unwrap_or(Mark::Unvisited) == Mark::Unvisited {
            graph.walk(root, &mut marks, &mut cycles);
        }
    }

    dedupe_cycles(cycles)
}

/// Collapse cycles sharing a node set, keeping the first discovered.
fn dedupe_cycles(cycles: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut unique = Vec::new();

    for cycle in cycles {
        let mut key = cycle.clone();
        key.sort();
        key.dedup();
        if seen.insert(key) {
            unique.push(cycle);
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, deps: &[&str]) -> CleanTask {
        CleanTask {
            id: id.to_string(),
            title: id.to_string(),
            due_date: None,
            estimated_hours: None,
            importance: 5,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn test_two_node_cycle() {
        let batch = vec![task("t1", &["t2"]), task("t2", &["t1"])];

        let cycles = detect_cycles(&batch);

        assert_eq!(cycles.len(), 1);
        let mut nodes = cycles[0].clone();
        nodes.sort();
        assert_eq!(nodes, vec!["t1", "t2"]);
    }

    #[test]
    fn test_acyclic_chain() {
        let batch = vec![task("a", &[]), task("b", &["a"]), task("c", &["b"])];

        assert!(detect_cycles(&batch).is_empty());
    }

    #[test]
    fn test_self_loop() {
        let batch = vec![task("a", &["a"])];

        assert_eq!(detect_cycles(&batch), vec![vec!["a".to_string()]]);
    }

    #[test]
    fn test_dangling_dependency_ignored() {
        let batch = vec![task("a", &["ghost"]), task("b", &["a"])];

        assert!(detect_cycles(&batch).is_empty());
    }

    #[test]
    fn test_duplicate_edges_report_one_cycle() {
        let batch = vec![task("a", &["b"]), task("b", &["a", "a"])];

        let cycles = detect_cycles(&batch);

        assert_eq!(cycles.len(), 1);
    }

    #[test]
    fn test_disjoint_cycles_both_reported() {
        let batch = vec![
            task("a", &["b"]),
            task("b", &["a"]),
            task("c", &["d"]),
            task("d", &["c"]),
        ];

        let cycles = detect_cycles(&batch);

        assert_eq!(cycles.len(), 2);
    }

    #[test]
    fn test_duplicate_ids_keep_last_edges() {
        // the second "a" carries no dependencies, so no cycle survives
        let batch = vec![task("a", &["b"]), task("a", &[]), task("b", &["a"])];

        assert!(detect_cycles(&batch).is_empty());
    }

    #[test]
    fn test_inner_cycle_found_from_outside() {
        let batch = vec![task("a", &["b"]), task("b", &["c"]), task("c", &["b"])];

        let cycles = detect_cycles(&batch);

        assert_eq!(cycles.len(), 1);
        let mut nodes = cycles[0].clone();
        nodes.sort();
        assert_eq!(nodes, vec!["b", "c"]);
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let n = 10_000;
        let mut batch: Vec<CleanTask> = (0..n - 1)
            .map(|i| task(&format!("n{}", i), &[&format!("n{}", i + 1)]))
            .collect();
        batch.push(task(&format!("n{}", n - 1), &["n0"]));

        let cycles = detect_cycles(&batch);

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), n);
    }

    #[test]
    fn test_empty_batch() {
        assert!(detect_cycles(&[]).is_empty());
    }
}
