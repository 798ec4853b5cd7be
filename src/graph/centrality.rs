// Degree centrality over the co-occurrence graph.

use super::cooccurrence::CooccurrenceGraph;

/// Degree / (node count - 1) for every node, in node order.
///
/// A graph with zero or one node has nothing to be central to; every
/// centrality is 0 there, as it is for any isolated node.
pub fn degree_centrality(g: &CooccurrenceGraph) -> Vec<(String, f64)> {
    let graph = g.graph();
    let n = graph.node_count();
    let scale = if n > 1 { 1.0 / (n - 1) as f64 } else { 0.0 };

    graph
        .node_indices()
        .map(|idx| {
            let degree = graph.neighbors(idx).count();
            (graph[idx].clone(), degree as f64 * scale)
        })
        .collect()
}

/// Sort descending (stable, so ties keep node order) and keep the first `n`.
pub fn rank(mut centralities: Vec<(String, f64)>, n: usize) -> Vec<(String, f64)> {
    centralities.sort_by(|a, b| b.1.total_cmp(&a.1));
    centralities.truncate(n);
    centralities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadline::Deadline;

    fn build(texts: &[&str]) -> CooccurrenceGraph {
        let records: Vec<String> = texts.iter().map(|s| s.to_string()).collect();
        CooccurrenceGraph::build(&records, 100, None, &Deadline::unbounded()).unwrap()
    }

    #[test]
    fn test_star_graph() {
        let g = build(&["hub a", "hub b", "hub c"]);
        let ranked = rank(degree_centrality(&g), 10);
        assert_eq!(ranked[0].0, "hub");
        assert!((ranked[0].1 - 1.0).abs() < 1e-12);
        for (_, c) in &ranked[1..] {
            assert!((c - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_disconnected_all_zero() {
        let g = build(&["alone", "solo", "single"]);
        assert_eq!(g.edge_count(), 0);
        assert!(degree_centrality(&g).iter().all(|(_, c)| *c == 0.0));
    }

    #[test]
    fn test_single_node_is_zero() {
        let g = build(&["echo echo"]);
        assert_eq!(degree_centrality(&g), vec![("echo".to_string(), 0.0)]);
    }

    #[test]
    fn test_rank_truncates() {
        let input: Vec<(String, f64)> = (0..15).map(|i| (format!("w{i}"), i as f64)).collect();
        let ranked = rank(input, 10);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].0, "w14");
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }
}
