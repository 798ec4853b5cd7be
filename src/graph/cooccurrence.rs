// Word co-occurrence graph over the most frequent tokens.
//
// Nodes are the N most frequent alphabetic tokens of the corpus. Two nodes
// share an edge when they appear in the same record; the edge weight counts
// the records in which that happens. A token repeated inside one record
// still counts that record once, and a token never pairs with itself.
//
// Pair accumulation is the expensive part (quadratic in the number of node
// tokens per record), so the deadline is checked once per record and an
// optional cap limits how many distinct tokens a record contributes.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::deadline::Deadline;
use crate::error::AnalysisError;

/// Lower-case, split on whitespace, keep purely alphabetic tokens.
pub fn alphabetic_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|t| t.chars().all(char::is_alphabetic))
        .map(str::to_string)
        .collect()
}

/// The `n` most frequent tokens, most frequent first.
///
/// Ties go to the token seen first in the corpus.
pub fn most_frequent_tokens(token_lists: &[Vec<String>], n: usize) -> Vec<String> {
    // token -> (count, first position)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut position = 0usize;
    for tokens in token_lists {
        for token in tokens {
            counts.entry(token.as_str()).or_insert((0, position)).0 += 1;
            position += 1;
        }
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked
        .into_iter()
        .take(n)
        .map(|(t, _)| t.to_string())
        .collect()
}

/// JSON shape of a node for client-side rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: String,
}

/// JSON shape of an edge for client-side rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub source: String,
    pub target: String,
    pub weight: u32,
}

/// Full node and edge lists of the co-occurrence graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkData {
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
}

/// Undirected weighted co-occurrence graph.
#[derive(Debug, Clone)]
pub struct CooccurrenceGraph {
    graph: UnGraph<String, u32>,
}

impl CooccurrenceGraph {
    /// Build the graph from raw records.
    pub fn build(
        records: &[String],
        max_nodes: usize,
        max_tokens_per_record: Option<usize>,
        deadline: &Deadline,
    ) -> Result<Self, AnalysisError> {
        let token_lists: Vec<Vec<String>> = records.iter().map(|r| alphabetic_tokens(r)).collect();
        Self::from_token_lists(&token_lists, max_nodes, max_tokens_per_record, deadline)
    }

    /// Build the graph from already tokenised records.
    pub fn from_token_lists(
        token_lists: &[Vec<String>],
        max_nodes: usize,
        max_tokens_per_record: Option<usize>,
        deadline: &Deadline,
    ) -> Result<Self, AnalysisError> {
        let mut graph: UnGraph<String, u32> = UnGraph::new_undirected();
        let mut node_of: HashMap<String, NodeIndex> = HashMap::new();
        for token in most_frequent_tokens(token_lists, max_nodes) {
            let idx = graph.add_node(token.clone());
            node_of.insert(token, idx);
        }

        // Canonical (lower index, higher index) key so (a,b) and (b,a) are one edge
        let mut edge_of: HashMap<(NodeIndex, NodeIndex), EdgeIndex> = HashMap::new();

        for tokens in token_lists {
            deadline.check("co-occurrence graph")?;

            let mut seen: HashSet<NodeIndex> = HashSet::new();
            let mut present: Vec<NodeIndex> = tokens
                .iter()
                .filter_map(|t| node_of.get(t).copied())
                .filter(|idx| seen.insert(*idx))
                .collect();
            if let Some(cap) = max_tokens_per_record {
                present.truncate(cap);
            }

            for i in 0..present.len() {
                for j in (i + 1)..present.len() {
                    let key = if present[i] < present[j] {
                        (present[i], present[j])
                    } else {
                        (present[j], present[i])
                    };
                    match edge_of.get(&key) {
                        Some(&e) => graph[e] += 1,
                        None => {
                            let e = graph.add_edge(key.0, key.1, 1);
                            edge_of.insert(key, e);
                        }
                    }
                }
            }
        }

        info!(
            records = token_lists.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built co-occurrence graph"
        );

        Ok(Self { graph })
    }

    pub fn graph(&self) -> &UnGraph<String, u32> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node labels in node order (most frequent token first).
    pub fn nodes(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|i| self.graph[i].as_str())
            .collect()
    }

    /// Edges as (source, target, weight) in insertion order.
    pub fn edges(&self) -> Vec<(&str, &str, u32)> {
        self.graph
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = self.graph.edge_endpoints(e)?;
                Some((self.graph[a].as_str(), self.graph[b].as_str(), self.graph[e]))
            })
            .collect()
    }

    /// Weight of the edge between two tokens, if they ever co-occur.
    pub fn weight(&self, a: &str, b: &str) -> Option<u32> {
        let find = |t: &str| self.graph.node_indices().find(|&i| self.graph[i] == t);
        let e = self.graph.find_edge(find(a)?, find(b)?)?;
        Some(self.graph[e])
    }

    /// Serializable node and edge lists.
    pub fn network_data(&self) -> NetworkData {
        NetworkData {
            nodes: self
                .nodes()
                .into_iter()
                .map(|id| NetworkNode { id: id.to_string() })
                .collect(),
            edges: self
                .edges()
                .into_iter()
                .map(|(s, t, w)| NetworkEdge {
                    source: s.to_string(),
                    target: t.to_string(),
                    weight: w,
                })
                .collect(),
        }
    }
}
