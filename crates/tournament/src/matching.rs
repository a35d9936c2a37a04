//! Minimum-weight matching on small undirected graphs.
//!
//! The pairing engine only needs one contract from this module: given a
//! compatibility graph, return a matching that covers as many nodes as
//! possible and, among those, has minimum total edge weight. Tournament
//! rosters are small, so an exact branch-and-bound search is used; a
//! Blossom-style algorithm would satisfy the same contract.

/// An undirected weighted edge between node indices `a` and `b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub weight: u32,
}

impl Edge {
    pub fn new(a: usize, b: usize, weight: u32) -> Self {
        Self { a, b, weight }
    }
}

/// Compute a maximum-cardinality, minimum-weight matching.
///
/// Returns matched index pairs `(a, b)` with `a < b`. Nodes without any
/// compatible partner are simply left out. Deterministic: for equally
/// good matchings the one found first in ascending index order wins.
pub fn minimum_weight_matching(n: usize, edges: &[Edge]) -> Vec<(usize, usize)> {
    let mut weight = vec![vec![None; n]; n];
    for e in edges {
        if e.a < n && e.b < n && e.a != e.b {
            weight[e.a][e.b] = Some(e.weight);
            weight[e.b][e.a] = Some(e.weight);
        }
    }

    let mut best = Best {
        pairs: Vec::new(),
        matched: 0,
        weight: 0,
    };
    let mut used = vec![false; n];
    let mut current = Vec::new();
    search(0, &weight, &mut used, &mut current, 0, &mut best);
    best.pairs
}

struct Best {
    pairs: Vec<(usize, usize)>,
    matched: usize,
    weight: u64,
}

fn search(
    from: usize,
    weight: &[Vec<Option<u32>>],
    used: &mut Vec<bool>,
    current: &mut Vec<(usize, usize)>,
    current_weight: u64,
    best: &mut Best,
) {
    let n = used.len();

    // Next unmatched node; every node before `from` is already decided.
    let i = match (from..n).find(|&i| !used[i]) {
        Some(i) => i,
        None => {
            let matched = current.len() * 2;
            if matched > best.matched || (matched == best.matched && current_weight < best.weight) {
                best.pairs = current.clone();
                best.matched = matched;
                best.weight = current_weight;
            }
            return;
        }
    };

    // Bound: even matching everything left cannot beat the best found.
    let remaining = (i..n).filter(|&j| !used[j]).count();
    if current.len() * 2 + remaining < best.matched {
        return;
    }

    used[i] = true;
    for j in (i + 1)..n {
        if used[j] {
            continue;
        }
        if let Some(w) = weight[i][j] {
            used[j] = true;
            current.push((i, j));
            search(i + 1, weight, used, current, current_weight + u64::from(w), best);
            current.pop();
            used[j] = false;
        }
    }
    // Leave `i` unmatched.
    search(i + 1, weight, used, current, current_weight, best);
    used[i] = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_cheapest_perfect_matching() {
        // Square graph: (0-1, 2-3) costs 2, (0-3, 1-2) costs 20.
        let edges = [
            Edge::new(0, 1, 1),
            Edge::new(2, 3, 1),
            Edge::new(0, 3, 10),
            Edge::new(1, 2, 10),
        ];
        let m = minimum_weight_matching(4, &edges);
        assert_eq!(m, vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn cardinality_beats_weight() {
        // One cheap edge that blocks a perfect matching vs. two
        // expensive edges that cover everyone.
        let edges = [
            Edge::new(1, 2, 1),
            Edge::new(0, 1, 50),
            Edge::new(2, 3, 50),
        ];
        let m = minimum_weight_matching(4, &edges);
        assert_eq!(m.len(), 2);
        assert_eq!(m, vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn odd_graph_leaves_cheapest_node_out() {
        // Triangle plus weights arranged so leaving node 2 out is best.
        let edges = [
            Edge::new(0, 1, 1),
            Edge::new(0, 2, 5),
            Edge::new(1, 2, 5),
        ];
        let m = minimum_weight_matching(3, &edges);
        assert_eq!(m, vec![(0, 1)]);
    }

    #[test]
    fn isolated_nodes_stay_unmatched() {
        let edges = [Edge::new(0, 1, 3)];
        let m = minimum_weight_matching(4, &edges);
        assert_eq!(m, vec![(0, 1)]);
    }

    #[test]
    fn empty_graph_has_empty_matching() {
        assert!(minimum_weight_matching(0, &[]).is_empty());
        assert!(minimum_weight_matching(3, &[]).is_empty());
    }
}
