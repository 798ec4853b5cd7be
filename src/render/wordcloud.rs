// Word cloud rendering.
//
// Words are drawn largest first. Each word's glyph scale follows its
// frequency relative to the most frequent word. A summed-area table over the
// occupied pixels answers "is this rectangle free?" in constant time; the
// word goes to a random free position, the other orientation is tried if
// none exists, and the scale shrinks until something fits or the word is
// dropped.

use std::collections::{HashMap, HashSet};

use image::RgbImage;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use super::canvas::{colors, text_extent, Canvas};
use crate::topics::tfidf::english_stop_words;

/// Word cloud settings.
pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    /// Distinct words drawn at most
    pub max_words: usize,
    /// Glyph scale of the most frequent word
    pub max_scale: u32,
    /// Share of words drawn horizontally
    pub prefer_horizontal: f64,
    /// Free pixels kept around every word
    pub margin: u32,
    pub seed: u64,
    stop_words: HashSet<String>,
}

impl Default for WordCloud {
    fn default() -> Self {
        Self::new(800, 400, 200, 42)
    }
}

impl WordCloud {
    pub fn new(width: u32, height: u32, max_words: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            max_words,
            max_scale: 8,
            prefer_horizontal: 0.9,
            margin: 2,
            seed,
            stop_words: english_stop_words(),
        }
    }

    /// Word counts without stop words, most frequent first (ties: first seen).
    pub fn frequencies(&self, tokens: &[String]) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (pos, token) in tokens.iter().enumerate() {
            if self.stop_words.contains(token) {
                continue;
            }
            counts.entry(token.as_str()).or_insert((0, pos)).0 += 1;
        }

        let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
        ranked
            .into_iter()
            .take(self.max_words)
            .map(|(w, (c, _))| (w.to_string(), c))
            .collect()
    }

    /// Render the cloud for a token multiset. No words gives a blank canvas.
    pub fn render(&self, tokens: &[String]) -> RgbImage {
        let mut canvas = Canvas::new(self.width, self.height, colors::WHITE);
        let words = self.frequencies(tokens);
        if words.is_empty() {
            warn!("No words for the word cloud; rendering a blank canvas");
            return canvas.into_image();
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut occupancy = Occupancy::new(self.width, self.height);
        let top = words[0].1 as f64;
        let mut placed = 0usize;

        for (word, count) in &words {
            let ratio = *count as f64 / top;
            let mut scale = ((self.max_scale as f64) * (0.5 + 0.5 * ratio)).round().max(1.0) as u32;
            let vertical_first = rng.random::<f64>() >= self.prefer_horizontal;

            let spot = loop {
                let found = [vertical_first, !vertical_first].into_iter().find_map(|vertical| {
                    let (w, h) = text_extent(word, scale, vertical);
                    let (bw, bh) = (w + 2 * self.margin, h + 2 * self.margin);
                    occupancy
                        .random_free(bw, bh, &mut rng)
                        .map(|(x, y)| (x, y, vertical, bw, bh))
                });
                match found {
                    Some(spot) => break Some(spot),
                    None if scale > 1 => scale -= 1,
                    None => break None,
                }
            };

            let Some((x, y, vertical, bw, bh)) = spot else {
                debug!(word = word.as_str(), "No room left in word cloud");
                continue;
            };

            let color = colors::PALETTE[rng.random_range(0..colors::PALETTE.len())];
            canvas.draw_text(
                (x + self.margin) as i64,
                (y + self.margin) as i64,
                word,
                scale,
                vertical,
                color,
            );
            occupancy.mark(x, y, bw, bh);
            placed += 1;
        }

        debug!(words = words.len(), placed, "Rendered word cloud");
        canvas.into_image()
    }
}

/// Occupied-pixel map with a summed-area table for rectangle queries.
struct Occupancy {
    width: u32,
    height: u32,
    used: Vec<bool>,
    /// (width + 1) x (height + 1) prefix sums of `used`
    integral: Vec<u32>,
}

impl Occupancy {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            used: vec![false; (width * height) as usize],
            integral: vec![0; ((width + 1) * (height + 1)) as usize],
        }
    }

    fn sum(&self, x: u32, y: u32) -> u32 {
        self.integral[(y * (self.width + 1) + x) as usize]
    }

    fn is_free(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        let total = self.sum(x + w, y + h) + self.sum(x, y) - self.sum(x + w, y) - self.sum(x, y + h);
        total == 0
    }

    /// A uniformly chosen top-left corner where a w x h box is free.
    fn random_free(&self, w: u32, h: u32, rng: &mut ChaCha8Rng) -> Option<(u32, u32)> {
        if w > self.width || h > self.height {
            return None;
        }
        let mut candidates = Vec::new();
        for y in (0..=self.height - h).step_by(2) {
            for x in (0..=self.width - w).step_by(2) {
                if self.is_free(x, y, w, h) {
                    candidates.push((x, y));
                }
            }
        }
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.random_range(0..candidates.len())])
    }

    fn mark(&mut self, x: u32, y: u32, w: u32, h: u32) {
        for yy in y..(y + h).min(self.height) {
            for xx in x..(x + w).min(self.width) {
                self.used[(yy * self.width + xx) as usize] = true;
            }
        }
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let stride = (self.width + 1) as usize;
        for y in 0..self.height as usize {
            let mut row = 0u32;
            for x in 0..self.width as usize {
                row += self.used[y * self.width as usize + x] as u32;
                self.integral[(y + 1) * stride + x + 1] = self.integral[y * stride + x + 1] + row;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_frequencies_skip_stop_words() {
        let cloud = WordCloud::default();
        let freqs = cloud.frequencies(&tokens("the rust the rust crab"));
        assert_eq!(freqs, vec![("rust".to_string(), 2), ("crab".to_string(), 1)]);
    }

    #[test]
    fn test_frequencies_capped() {
        let cloud = WordCloud::new(800, 400, 2, 42);
        let freqs = cloud.frequencies(&tokens("kiwi mango papaya kiwi"));
        assert_eq!(freqs.len(), 2);
        assert_eq!(freqs[0].0, "kiwi");
    }

    #[test]
    fn test_render_dimensions_and_ink() {
        let cloud = WordCloud::default();
        let img = cloud.render(&tokens("rust crab ferris rust compiler"));
        assert_eq!(img.dimensions(), (800, 400));
        assert!(img.pixels().any(|p| *p != colors::WHITE));
    }

    #[test]
    fn test_blank_when_no_words() {
        let img = WordCloud::default().render(&[]);
        assert_eq!(img.dimensions(), (800, 400));
        assert!(img.pixels().all(|p| *p == colors::WHITE));
    }

    #[test]
    fn test_render_is_deterministic() {
        let cloud = WordCloud::default();
        let t = tokens("alpha beta gamma alpha delta beta alpha");
        assert_eq!(cloud.render(&t), cloud.render(&t));
    }

    #[test]
    fn test_occupancy_queries() {
        let mut occ = Occupancy::new(20, 10);
        assert!(occ.is_free(0, 0, 20, 10));
        occ.mark(5, 5, 2, 2);
        assert!(!occ.is_free(0, 0, 20, 10));
        assert!(occ.is_free(0, 0, 5, 10));
        assert!(!occ.is_free(6, 6, 1, 1));
    }
}
