// Co-occurrence graph image.
//
// Spring layout positions are mapped into the canvas (y grows upward, as on a
// plot). Edges go down first with stroke width proportional to weight, then
// uniform light-blue nodes, then the labels centred on their node. No title,
// no axes.

use image::RgbImage;

use super::canvas::{colors, text_extent, Canvas};
use crate::graph::layout::SpringLayout;
use crate::graph::CooccurrenceGraph;

pub struct NetworkImage {
    pub width: u32,
    pub height: u32,
    /// Blank border around the plotted area
    pub margin: u32,
    pub node_radius: u32,
    /// Stroke width in pixels per unit of edge weight (at least 1 px is drawn)
    pub edge_width_per_weight: f64,
    pub layout: SpringLayout,
}

impl Default for NetworkImage {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            margin: 60,
            node_radius: 14,
            edge_width_per_weight: 0.5,
            layout: SpringLayout::default(),
        }
    }
}

impl NetworkImage {
    pub fn render(&self, g: &CooccurrenceGraph) -> RgbImage {
        let mut canvas = Canvas::new(self.width, self.height, colors::WHITE);
        let graph = g.graph();
        let positions = self.layout.positions(graph);

        let plot_w = self.width.saturating_sub(2 * self.margin) as f64;
        let plot_h = self.height.saturating_sub(2 * self.margin) as f64;
        let to_pixel = |(x, y): (f64, f64)| -> (i64, i64) {
            let px = self.margin as f64 + (x + 1.0) / 2.0 * plot_w;
            let py = self.margin as f64 + (1.0 - (y + 1.0) / 2.0) * plot_h;
            (px.round() as i64, py.round() as i64)
        };
        let pixels: Vec<(i64, i64)> = positions.into_iter().map(to_pixel).collect();

        for e in graph.edge_indices() {
            let Some((a, b)) = graph.edge_endpoints(e) else {
                continue;
            };
            let (x0, y0) = pixels[a.index()];
            let (x1, y1) = pixels[b.index()];
            let width = (graph[e] as f64 * self.edge_width_per_weight).max(1.0);
            canvas.draw_line(x0, y0, x1, y1, width, colors::EDGE_GRAY);
        }

        for &(x, y) in &pixels {
            canvas.fill_circle(x, y, self.node_radius as i64, colors::LIGHT_BLUE);
        }

        for idx in graph.node_indices() {
            let label = graph[idx].as_str();
            let (w, h) = text_extent(label, 1, false);
            let (x, y) = pixels[idx.index()];
            canvas.draw_text(
                x - (w / 2) as i64,
                y - (h / 2) as i64,
                label,
                1,
                false,
                colors::BLACK,
            );
        }

        canvas.into_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadline::Deadline;

    #[test]
    fn test_render_draws_nodes() {
        let records = vec!["apple banana".to_string(), "banana cherry".to_string()];
        let g = CooccurrenceGraph::build(&records, 100, None, &Deadline::unbounded()).unwrap();
        let img = NetworkImage::default().render(&g);
        assert_eq!(img.dimensions(), (1000, 800));
        assert!(img.pixels().any(|p| *p == colors::LIGHT_BLUE));
        assert!(img.pixels().any(|p| *p == colors::EDGE_GRAY));
    }

    #[test]
    fn test_empty_graph_is_blank() {
        let g = CooccurrenceGraph::build(&[], 100, None, &Deadline::unbounded()).unwrap();
        let img = NetworkImage::default().render(&g);
        assert!(img.pixels().all(|p| *p == colors::WHITE));
    }
}
