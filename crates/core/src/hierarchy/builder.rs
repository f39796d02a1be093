//! Hierarchy builder - turns a flat goal list into a parent/child forest
//!
//! # Algorithm
//! 1. Index every goal by id (duplicate ids are rejected)
//! 2. Resolve each `parent_id` against the index; an unresolved parent makes
//!    the goal a root (filtered inputs routinely drop parents)
//! 3. Walk every parent chain once with three-state marking to find cycles
//! 4. Order goals breadth-first, rejecting any chain deeper than the limit
//! 5. Assemble owned nodes children-first, so no step recurses
//!
//! Roots and children keep input order; nothing is sorted.
//!
//! The depth limit keeps every returned forest safe to clone, compare and
//! serialize, since those operations walk a node's subtree recursively.

use ahash::AHashMap as HashMap; // Fast non-cryptographic hasher
use ahash::AHashSet as HashSet;
use goalpulse_domain::constants::DEFAULT_MAX_HIERARCHY_DEPTH;
use goalpulse_domain::{Goal, GoalNode, GoalPulseError, Result};
use tracing::{debug, warn};

/// Resolved parent links for one goal collection
struct ParentIndex<'a> {
    goals: &'a [Goal],
    parent_of: Vec<Option<usize>>,
}

impl<'a> ParentIndex<'a> {
    fn new(goals: &'a [Goal]) -> Result<Self> {
        let mut positions: HashMap<&str, usize> = HashMap::with_capacity(goals.len());
        for (idx, goal) in goals.iter().enumerate() {
            if positions.insert(goal.id.as_str(), idx).is_some() {
                return Err(GoalPulseError::invalid_record(
                    "goal",
                    goal.id.clone(),
                    "id",
                    "is duplicated",
                ));
            }
        }

        let parent_of = goals
            .iter()
            .map(|goal| {
                let parent_id = goal.parent_id.as_deref()?;
                let parent = positions.get(parent_id).copied();
                if parent.is_none() {
                    debug!(goal_id = %goal.id, parent_id, "Parent not in collection, treating goal as root");
                }
                parent
            })
            .collect();

        Ok(Self { goals, parent_of })
    }

    /// Fail with the members of the first cycle found
    fn ensure_acyclic(&self) -> Result<()> {
        const UNVISITED: u8 = 0;
        const ON_PATH: u8 = 1;
        const DONE: u8 = 2;

        let mut state = vec![UNVISITED; self.goals.len()];
        let mut path = Vec::new();

        for start in 0..self.goals.len() {
            path.clear();
            let mut cursor = Some(start);

            while let Some(idx) = cursor {
                match state[idx] {
                    UNVISITED => {
                        state[idx] = ON_PATH;
                        path.push(idx);
                        cursor = self.parent_of[idx];
                    }
                    ON_PATH => {
                        let begin = path.iter().position(|&p| p == idx).unwrap_or(0);
                        let goal_ids: Vec<String> =
                            path[begin..].iter().map(|&p| self.goals[p].id.clone()).collect();
                        warn!(goal_ids = ?goal_ids, "Cycle detected in goal hierarchy");
                        return Err(GoalPulseError::CyclicHierarchy { goal_ids });
                    }
                    _ => break,
                }
            }

            for &idx in &path {
                state[idx] = DONE;
            }
        }

        Ok(())
    }

    fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.parent_of.iter().enumerate().filter(|(_, p)| p.is_none()).map(|(idx, _)| idx)
    }

    fn children(&self) -> Vec<Vec<usize>> {
        let mut children = vec![Vec::new(); self.goals.len()];
        for (idx, parent) in self.parent_of.iter().enumerate() {
            if let Some(parent) = parent {
                children[*parent].push(idx);
            }
        }
        children
    }
}

/// Build a forest from a flat goal collection
///
/// The forest owns clones of the input goals; mutating it never touches the
/// input. Every goal appears exactly once. Chains are limited to
/// [`DEFAULT_MAX_HIERARCHY_DEPTH`] levels; see [`build_forest_bounded`].
///
/// # Errors
/// - `CyclicHierarchy` when a goal is transitively its own ancestor
/// - `HierarchyTooDeep` when a chain exceeds the default depth
/// - `InvalidRecord` when two goals share an id
pub fn build_forest(goals: &[Goal]) -> Result<Vec<GoalNode>> {
    build_forest_bounded(goals, DEFAULT_MAX_HIERARCHY_DEPTH)
}

/// Build a forest whose deepest chain holds at most `max_depth` levels
///
/// Roots are level 1.
///
/// # Errors
/// Same as [`build_forest`], with `HierarchyTooDeep` naming the first goal
/// found below `max_depth`.
pub fn build_forest_bounded(goals: &[Goal], max_depth: usize) -> Result<Vec<GoalNode>> {
    let index = ParentIndex::new(goals)?;
    index.ensure_acyclic()?;

    let children = index.children();
    let roots: Vec<usize> = index.roots().collect();

    // Breadth-first order puts every parent before its children; building in
    // reverse therefore always finds the children already assembled.
    let mut order = Vec::with_capacity(goals.len());
    let mut level = vec![0usize; goals.len()];
    for &root in &roots {
        level[root] = 1;
        order.push(root);
    }
    let mut cursor = 0;
    while cursor < order.len() {
        let idx = order[cursor];
        if level[idx] > max_depth {
            warn!(goal_id = %goals[idx].id, max_depth, "Goal hierarchy exceeds depth limit");
            return Err(GoalPulseError::HierarchyTooDeep {
                goal_id: goals[idx].id.clone(),
                max_depth,
            });
        }
        for &child in &children[idx] {
            level[child] = level[idx] + 1;
            order.push(child);
        }
        cursor += 1;
    }

    let mut built: Vec<Option<GoalNode>> = vec![None; goals.len()];
    for &idx in order.iter().rev() {
        let node_children =
            children[idx].iter().filter_map(|&child| built[child].take()).collect();
        built[idx] = Some(GoalNode { goal: goals[idx].clone(), children: node_children });
    }

    let forest: Vec<GoalNode> = roots.iter().filter_map(|&idx| built[idx].take()).collect();
    debug!(goal_count = goals.len(), root_count = forest.len(), "Built goal forest");
    Ok(forest)
}

/// Check a goal collection for cycles without building the forest
///
/// # Errors
/// Same conditions as [`build_forest`].
pub fn ensure_acyclic(goals: &[Goal]) -> Result<()> {
    ParentIndex::new(goals)?.ensure_acyclic()
}

/// Pre-order walk of a forest with a visited-set guard
///
/// Yields each node with its depth (roots are depth 0). A forest assembled by
/// hand can repeat a goal id; that is reported as a cycle instead of being
/// walked twice.
///
/// # Errors
/// `CyclicHierarchy` naming the repeated id.
pub fn depth_first(forest: &[GoalNode]) -> Result<Vec<(&GoalNode, usize)>> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    let mut stack: Vec<(&GoalNode, usize)> = forest.iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        if !visited.insert(node.id()) {
            warn!(goal_id = %node.id(), "Goal reached twice while walking forest");
            return Err(GoalPulseError::CyclicHierarchy { goal_ids: vec![node.id().to_string()] });
        }
        out.push((node, depth));
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }

    Ok(out)
}

/// Number of nodes in a forest
///
/// # Errors
/// See [`depth_first`].
pub fn count_nodes(forest: &[GoalNode]) -> Result<usize> {
    depth_first(forest).map(|nodes| nodes.len())
}

/// Number of levels in the deepest branch; 0 for an empty forest
///
/// # Errors
/// See [`depth_first`].
pub fn max_depth(forest: &[GoalNode]) -> Result<usize> {
    Ok(depth_first(forest)?.iter().map(|(_, depth)| depth + 1).max().unwrap_or(0))
}

/// Parent chain of a goal, nearest parent first
///
/// Returns an empty chain for roots, orphans and unknown ids.
///
/// # Errors
/// `CyclicHierarchy` when the chain loops back on itself.
pub fn ancestors_of<'a>(goals: &'a [Goal], goal_id: &str) -> Result<Vec<&'a Goal>> {
    let by_id: HashMap<&str, &Goal> = goals.iter().map(|g| (g.id.as_str(), g)).collect();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut chain = Vec::new();

    let mut cursor = by_id.get(goal_id).and_then(|g| g.parent_id.as_deref());
    visited.insert(goal_id);

    while let Some(parent_id) = cursor {
        let Some(parent) = by_id.get(parent_id) else {
            break;
        };
        if !visited.insert(parent_id) {
            let mut goal_ids: Vec<String> = visited.iter().map(|id| (*id).to_string()).collect();
            goal_ids.sort();
            return Err(GoalPulseError::CyclicHierarchy { goal_ids });
        }
        chain.push(*parent);
        cursor = parent.parent_id.as_deref();
    }

    Ok(chain)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use goalpulse_domain::{GoalLevel, GoalType};

    use super::*;

    fn goal(id: &str, parent: Option<&str>) -> Goal {
        Goal {
            id: id.to_string(),
            title: format!("Goal {id}"),
            description: None,
            level: GoalLevel::Team,
            goal_type: GoalType::Okr,
            parent_id: parent.map(str::to_string),
            owner_name: None,
            department_name: None,
            progress: 50.0,
            target_progress: None,
            forecast_progress: None,
            status: None,
            risk_level: None,
            trend: None,
            start_date: None,
            end_date: None,
            created_at: Utc::now(),
        }
    }

    fn ids(nodes: &[GoalNode]) -> Vec<&str> {
        nodes.iter().map(GoalNode::id).collect()
    }

    #[test]
    fn children_attach_regardless_of_input_order() {
        let goals = vec![goal("c2", Some("p")), goal("p", None), goal("c1", Some("p"))];
        let forest = build_forest(&goals).unwrap();

        assert_eq!(ids(&forest), vec!["p"]);
        assert_eq!(ids(&forest[0].children), vec!["c2", "c1"], "children keep input order");
    }

    #[test]
    fn roots_keep_input_order() {
        let goals = vec![goal("b", None), goal("a", None), goal("c", None)];
        assert_eq!(ids(&build_forest(&goals).unwrap()), vec!["b", "a", "c"]);
    }

    #[test]
    fn unresolved_parent_becomes_root() {
        let goals = vec![goal("team", Some("missing-dept")), goal("solo", None)];
        let forest = build_forest(&goals).unwrap();
        assert_eq!(ids(&forest), vec!["team", "solo"]);
    }

    #[test]
    fn empty_input_yields_empty_forest() {
        assert!(build_forest(&[]).unwrap().is_empty());
        assert_eq!(max_depth(&[]).unwrap(), 0);
    }

    #[test]
    fn two_goal_cycle_is_detected() {
        let goals = vec![goal("root", None), goal("a", Some("b")), goal("b", Some("a"))];
        let err = build_forest(&goals).unwrap_err();
        match err {
            GoalPulseError::CyclicHierarchy { mut goal_ids } => {
                goal_ids.sort();
                assert_eq!(goal_ids, vec!["a", "b"]);
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn self_parent_is_a_cycle() {
        let goals = vec![goal("a", Some("a"))];
        assert!(matches!(ensure_acyclic(&goals), Err(GoalPulseError::CyclicHierarchy { .. })));
    }

    #[test]
    fn branch_hanging_off_a_cycle_is_rejected() {
        let goals = vec![goal("x", Some("a")), goal("a", Some("b")), goal("b", Some("a"))];
        assert!(build_forest(&goals).is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let goals = vec![goal("a", None), goal("a", None)];
        assert!(matches!(build_forest(&goals), Err(GoalPulseError::InvalidRecord { .. })));
    }

    fn chain(len: usize) -> Vec<Goal> {
        let mut goals = vec![goal("g0", None)];
        for i in 1..len {
            goals.push(goal(&format!("g{i}"), Some(&format!("g{}", i - 1))));
        }
        goals
    }

    #[test]
    fn deep_chain_builds_walks_and_drops() {
        let goals = chain(100_000);
        let forest = build_forest_bounded(&goals, usize::MAX).unwrap();
        assert_eq!(count_nodes(&forest).unwrap(), 100_000);
        assert_eq!(max_depth(&forest).unwrap(), 100_000);
        drop(forest);
    }

    #[test]
    fn default_depth_limit_is_inclusive() {
        let forest = build_forest(&chain(DEFAULT_MAX_HIERARCHY_DEPTH)).unwrap();
        assert_eq!(max_depth(&forest).unwrap(), DEFAULT_MAX_HIERARCHY_DEPTH);

        match build_forest(&chain(DEFAULT_MAX_HIERARCHY_DEPTH + 1)) {
            Err(GoalPulseError::HierarchyTooDeep { goal_id, max_depth }) => {
                assert_eq!(goal_id, format!("g{DEFAULT_MAX_HIERARCHY_DEPTH}"));
                assert_eq!(max_depth, DEFAULT_MAX_HIERARCHY_DEPTH);
            }
            other => panic!("expected depth error, got {other:?}"),
        }
    }

    #[test]
    fn depth_limit_applies_to_each_branch() {
        let goals = vec![goal("r", None), goal("a", Some("r")), goal("b", Some("r")), goal("b1", Some("b"))];
        assert!(build_forest_bounded(&goals, 3).is_ok());
        assert!(matches!(
            build_forest_bounded(&goals, 2),
            Err(GoalPulseError::HierarchyTooDeep { goal_id, .. }) if goal_id == "b1"
        ));
    }

    #[test]
    fn depth_first_rejects_repeated_ids() {
        let leaf = GoalNode::leaf(goal("dup", None));
        let forest = vec![
            GoalNode { goal: goal("a", None), children: vec![leaf.clone()] },
            GoalNode { goal: goal("b", None), children: vec![leaf] },
        ];
        assert!(matches!(depth_first(&forest), Err(GoalPulseError::CyclicHierarchy { .. })));
    }

    #[test]
    fn depth_first_is_preorder_with_depths() {
        let goals = vec![goal("r", None), goal("a", Some("r")), goal("a1", Some("a")), goal("b", Some("r"))];
        let forest = build_forest(&goals).unwrap();
        let walk: Vec<(&str, usize)> =
            depth_first(&forest).unwrap().into_iter().map(|(n, d)| (n.id(), d)).collect();
        assert_eq!(walk, vec![("r", 0), ("a", 1), ("a1", 2), ("b", 1)]);
    }

    #[test]
    fn ancestors_are_nearest_first() {
        let goals = vec![goal("c", None), goal("d", Some("c")), goal("t", Some("d"))];
        let chain: Vec<&str> =
            ancestors_of(&goals, "t").unwrap().iter().map(|g| g.id.as_str()).collect();
        assert_eq!(chain, vec!["d", "c"]);
        assert!(ancestors_of(&goals, "c").unwrap().is_empty());
        assert!(ancestors_of(&goals, "unknown").unwrap().is_empty());
    }

    #[test]
    fn ancestors_detect_cycles() {
        let goals = vec![goal("a", Some("b")), goal("b", Some("a"))];
        assert!(ancestors_of(&goals, "a").is_err());
    }
}
