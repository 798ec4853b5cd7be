// Force-directed (Fruchterman-Reingold) spring layout.
//
// Every pair of nodes repels with k^2 / d, connected pairs attract with
// w * d^2 / k. Positions start uniformly random in the unit square from a
// seeded generator; a cooling temperature caps each step. The final layout
// is centred on the origin and scaled so the largest coordinate is 1.

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
pub struct SpringLayout {
    /// Optimal distance between nodes
    pub k: f64,
    pub iterations: usize,
    pub seed: u64,
    /// Stop early once the mean step length falls below this
    pub threshold: f64,
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self {
            k: 0.5,
            iterations: 50,
            seed: 42,
            threshold: 1e-4,
        }
    }
}

impl SpringLayout {
    /// Layout positions in [-1, 1]^2, indexed like the graph's nodes.
    pub fn positions<N>(&self, graph: &UnGraph<N, u32>) -> Vec<(f64, f64)> {
        let n = graph.node_count();
        match n {
            0 => return Vec::new(),
            1 => return vec![(0.0, 0.0)],
            _ => {}
        }

        // Dense weighted adjacency
        let mut adjacency = vec![vec![0.0f64; n]; n];
        for edge in graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            let w = *edge.weight() as f64;
            adjacency[a][b] += w;
            adjacency[b][a] += w;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut pos: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.random::<f64>(), rng.random::<f64>()))
            .collect();

        let span = |axis: fn(&(f64, f64)) -> f64, pos: &[(f64, f64)]| {
            let (lo, hi) = pos.iter().map(axis).fold((f64::MAX, f64::MIN), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
            hi - lo
        };
        let mut t = span(|p| p.0, &pos).max(span(|p| p.1, &pos)) * 0.1;
        let dt = t / (self.iterations as f64 + 1.0);
        let k2 = self.k * self.k;

        for _ in 0..self.iterations {
            let mut step_total = 0.0;
            let mut deltas = vec![(0.0f64, 0.0f64); n];

            for i in 0..n {
                let (mut dx, mut dy) = (0.0, 0.0);
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let ex = pos[i].0 - pos[j].0;
                    let ey = pos[i].1 - pos[j].1;
                    let d = (ex * ex + ey * ey).sqrt().max(0.01);
                    let f = k2 / (d * d) - adjacency[i][j] * d / self.k;
                    dx += ex * f;
                    dy += ey * f;
                }
                let mut length = (dx * dx + dy * dy).sqrt();
                if length < 0.01 {
                    length = 0.1;
                }
                deltas[i] = (dx * t / length, dy * t / length);
            }

            for (p, d) in pos.iter_mut().zip(&deltas) {
                p.0 += d.0;
                p.1 += d.1;
                step_total += d.0 * d.0 + d.1 * d.1;
            }
            t -= dt;

            if step_total.sqrt() / (n as f64) < self.threshold {
                break;
            }
        }

        rescale(&mut pos);
        pos
    }
}

/// Centre on the origin and scale so the largest |coordinate| is 1.
fn rescale(pos: &mut [(f64, f64)]) {
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p.0).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p.1).sum::<f64>() / n;
    let mut lim = 0.0f64;
    for p in pos.iter_mut() {
        p.0 -= cx;
        p.1 -= cy;
        lim = lim.max(p.0.abs()).max(p.1.abs());
    }
    if lim > 0.0 {
        for p in pos.iter_mut() {
            p.0 /= lim;
            p.1 /= lim;
        }
    }
}
