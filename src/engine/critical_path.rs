use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::{Hash, Hasher};

use uuid::Uuid;

use crate::model::ScheduledTask;

/// Ids of the tasks on the single longest dependency chain, weighted by
/// task duration in days.
///
/// Dependencies pointing at ids missing from `tasks` are ignored. Cycles
/// never recurse: members of a cycle are unreachable by the topological
/// pass and simply drop out of consideration, so a cyclic graph yields a
/// shorter path rather than an error.
pub fn critical_path(tasks: &[ScheduledTask]) -> HashSet<Uuid> {
    if tasks.is_empty() {
        return HashSet::new();
    }

    let index: HashMap<Uuid, usize> = tasks.iter().enumerate().map(|(i, t)| (t.id, i)).collect();

    // dependency -> dependents, resolvable edges only
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
    let mut indegree: Vec<usize> = vec![0; tasks.len()];
    for (i, task) in tasks.iter().enumerate() {
        for dep in &task.depends_on {
            if let Some(&from) = index.get(dep) {
                dependents[from].push(i);
                indegree[i] += 1;
            }
        }
    }

    // Kahn's algorithm; nodes inside cycles never reach indegree 0.
    let mut queue: VecDeque<usize> = (0..tasks.len()).filter(|&i| indegree[i] == 0).collect();
    let mut topo_order: Vec<usize> = Vec::with_capacity(tasks.len());
    let mut indegree_left = indegree.clone();
    while let Some(i) = queue.pop_front() {
        topo_order.push(i);
        for &next in &dependents[i] {
            indegree_left[next] -= 1;
            if indegree_left[next] == 0 {
                queue.push_back(next);
            }
        }
    }
    let processed: HashSet<usize> = topo_order.iter().copied().collect();

    // Longest path ending at each node, in topological order.
    let mut length: Vec<i64> = vec![0; tasks.len()];
    let mut pred: Vec<Option<usize>> = vec![None; tasks.len()];
    for &i in &topo_order {
        let own = tasks[i].duration_days();
        let mut best: Option<(i64, usize)> = None;
        for dep in &tasks[i].depends_on {
            if let Some(&from) = index.get(dep) {
                if processed.contains(&from) {
                    let candidate = length[from];
                    if best.map_or(true, |(b, _)| candidate > b) {
                        best = Some((candidate, from));
                    }
                }
            }
        }
        match best {
            Some((len, from)) => {
                length[i] = own + len;
                pred[i] = Some(from);
            }
            None => length[i] = own,
        }
    }

    // End tasks are graph sinks: nothing processed depends on them.
    // First evaluated wins ties, in task order.
    let mut end: Option<usize> = None;
    for i in 0..tasks.len() {
        if !processed.contains(&i) || !dependents[i].is_empty() {
            continue;
        }
        if end.map_or(true, |e| length[i] > length[e]) {
            end = Some(i);
        }
    }

    let mut path = HashSet::new();
    let mut cursor = end;
    while let Some(i) = cursor {
        path.insert(tasks[i].id);
        cursor = pred[i];
    }
    path
}

/// Structural fingerprint of the dependency graph: ids, dates and edges.
/// UI-only changes (toggles, zoom) leave it unchanged.
pub fn graph_signature(tasks: &[ScheduledTask]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for task in tasks {
        task.id.hash(&mut hasher);
        task.start.hash(&mut hasher);
        task.end.hash(&mut hasher);
        task.depends_on.hash(&mut hasher);
    }
    hasher.finish()
}

/// Memoizes the critical path keyed on the graph signature, so toggling
/// the overlay or re-rendering does not redo the graph walk.
#[derive(Debug, Default)]
pub struct CriticalPathCache {
    key: Option<u64>,
    path: HashSet<Uuid>,
}

impl CriticalPathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached critical path for `tasks`, recomputed only when the graph
    /// actually changed.
    pub fn path_for(&mut self, tasks: &[ScheduledTask]) -> &HashSet<Uuid> {
        let key = graph_signature(tasks);
        if self.key != Some(key) {
            self.path = critical_path(tasks);
            self.key = Some(key);
        }
        &self.path
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TaskPriority, TaskStatus};
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap() + chrono::Duration::days(day as i64)
    }

    fn task(title: &str, start: u32, end: u32, deps: &[Uuid]) -> ScheduledTask {
        ScheduledTask {
            id: Uuid::new_v4(),
            title: title.to_string(),
            start: d(start),
            end: d(end),
            is_milestone: end - start <= 1,
            progress: 0,
            depends_on: deps.to_vec(),
            assignee_id: None,
            assignee_name: None,
            priority: TaskPriority::None,
            status: TaskStatus::Todo,
        }
    }

    #[test]
    fn chain_beats_short_end_task() {
        // A(0..2) <- B(2..5) <- C(5..9), plus unrelated D(0..1)
        let a = task("a", 0, 2, &[]);
        let b = task("b", 2, 5, &[a.id]);
        let c = task("c", 5, 9, &[b.id]);
        let e = task("d", 0, 1, &[]);
        let expected: HashSet<Uuid> = [a.id, b.id, c.id].into_iter().collect();
        let tasks = vec![a, b, c, e];
        assert_eq!(critical_path(&tasks), expected);
    }

    #[test]
    fn picks_the_longer_of_two_branches() {
        let root = task("root", 0, 3, &[]);
        let short = task("short", 3, 4, &[root.id]);
        let long_a = task("long a", 3, 8, &[root.id]);
        let long_b = task("long b", 8, 14, &[long_a.id]);
        let expected: HashSet<Uuid> = [root.id, long_a.id, long_b.id].into_iter().collect();
        let tasks = vec![root, short, long_a, long_b];
        let path = critical_path(&tasks);
        assert_eq!(path, expected);
    }

    #[test]
    fn maximality_over_all_paths() {
        // diamond: root -> {mid1 (2d), mid2 (6d)} -> sink
        let root = task("root", 0, 2, &[]);
        let mid1 = task("mid1", 2, 4, &[root.id]);
        let mid2 = task("mid2", 2, 8, &[root.id]);
        let sink = task("sink", 8, 11, &[mid1.id, mid2.id]);
        let tasks = vec![root.clone(), mid1.clone(), mid2.clone(), sink.clone()];
        let path = critical_path(&tasks);
        assert!(path.contains(&root.id));
        assert!(path.contains(&mid2.id));
        assert!(path.contains(&sink.id));
        assert!(!path.contains(&mid1.id));
    }

    #[test]
    fn two_cycle_terminates_with_finite_result() {
        let mut a = task("a", 0, 5, &[]);
        let mut b = task("b", 5, 10, &[]);
        b.depends_on = vec![a.id];
        a.depends_on = vec![b.id];
        let c = task("c", 0, 2, &[]);
        let tasks = vec![a, b, c.clone()];
        // cycle members drop out, the independent task remains
        let path = critical_path(&tasks);
        assert_eq!(path, [c.id].into_iter().collect());
    }

    #[test]
    fn dangling_dependency_is_ignored() {
        let ghost = Uuid::new_v4();
        let a = task("a", 0, 4, &[ghost]);
        let tasks = vec![a.clone()];
        assert_eq!(critical_path(&tasks), [a.id].into_iter().collect());
    }

    #[test]
    fn empty_graph_yields_empty_set() {
        assert!(critical_path(&[]).is_empty());
    }

    #[test]
    fn cache_hits_until_the_graph_changes() {
        let a = task("a", 0, 2, &[]);
        let b = task("b", 2, 6, &[a.id]);
        let mut tasks = vec![a, b];

        let mut cache = CriticalPathCache::new();
        let first = cache.path_for(&tasks).clone();
        assert_eq!(cache.path_for(&tasks), &first);

        let before = graph_signature(&tasks);
        tasks[1].end = d(9);
        assert_ne!(graph_signature(&tasks), before);
        assert!(cache.path_for(&tasks).contains(&tasks[1].id));
    }
}
