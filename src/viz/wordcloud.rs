// Word clouds for topics, rendered as SVG.
//
// Layout: words are sized linearly by weight relative to the heaviest word,
// then placed largest-first along an archimedean spiral from the centre of
// the canvas. A word that finds no free spot is retried at a smaller size.
// Layout stops at the first word that still does not fit at the minimum font
// size; it and all lighter words are dropped. All words are horizontal.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::path::Path;

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};

/// Named colours whose name starts with "dark" (CSS / X11 colour names).
pub const DARK_COLORS: [&str; 19] = [
    "darkblue",
    "darkcyan",
    "darkgoldenrod",
    "darkgray",
    "darkgreen",
    "darkgrey",
    "darkkhaki",
    "darkmagenta",
    "darkolivegreen",
    "darkorange",
    "darkorchid",
    "darkred",
    "darksalmon",
    "darkseagreen",
    "darkslateblue",
    "darkslategray",
    "darkslategrey",
    "darkturquoise",
    "darkviolet",
];

/// Panels per row in a multi-topic grid.
pub const GRID_COLUMNS: usize = 4;

const GRID_PANEL_HEIGHT: u32 = 300;
const GRID_TITLE_HEIGHT: u32 = 28;
const GRID_SUPTITLE_HEIGHT: u32 = 40;

/// Rough glyph advance as a fraction of font size for a sans-serif face.
const GLYPH_WIDTH: f64 = 0.6;
const SPIRAL_STEP: f64 = 0.1;
const SPIRAL_MAX_STEPS: usize = 4000;
const SHRINK_FACTOR: f64 = 0.9;
/// Smallest font size tried, whatever `min_font_size` says.
const MIN_FONT_FLOOR: f64 = 1.0;

/// A topic's words with their weights.
pub type TopicWeights = Vec<(String, f64)>;

/// What a cloud is built from.
#[derive(Debug, Clone, Copy)]
pub enum CloudInput<'a> {
    /// Words with precomputed scores.
    Weights(&'a [(String, f64)]),
    /// Raw text; words are counted after lowercasing and stopword removal.
    Text(&'a str),
}

#[derive(Debug, Clone)]
pub struct WordCloudOptions {
    pub width: u32,
    pub height: u32,
    /// Pick a random dark colour; overrides `color`.
    pub random_color: bool,
    /// Colour used when `random_color` is off. Falls back to black.
    pub color: Option<String>,
    pub background: String,
    pub max_words: usize,
    pub min_font_size: f64,
    /// Defaults to a quarter of the height when unset.
    pub max_font_size: Option<f64>,
    /// Only used for [`CloudInput::Text`].
    pub stop_words: HashSet<String>,
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            random_color: true,
            color: None,
            background: "white".to_string(),
            max_words: 200,
            min_font_size: 6.0,
            max_font_size: None,
            stop_words: HashSet::new(),
        }
    }
}

impl WordCloudOptions {
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.random_color = false;
        self.color = Some(color.to_string());
        self
    }

    /// Resolve the colour every word in the cloud is drawn in.
    pub fn pick_color<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        if self.random_color {
            DARK_COLORS.choose(rng).copied().unwrap_or("black").to_string()
        } else {
            self.color.clone().unwrap_or_else(|| "black".to_string())
        }
    }
}

/// A word with its final size and top-left position on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub font_size: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlacedWord {
    fn overlaps(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        x < self.x + self.width
            && self.x < x + width
            && y < self.y + self.height
            && self.y < y + height
    }
}

#[derive(Debug, Clone)]
pub struct WordCloud {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub color: String,
    pub words: Vec<PlacedWord>,
}

/// Build a cloud using the thread RNG for colour choice.
pub fn create_wordcloud(input: CloudInput<'_>, options: &WordCloudOptions) -> WordCloud {
    create_wordcloud_with_rng(input, options, &mut rand::rng())
}

pub fn create_wordcloud_with_rng<R: Rng + ?Sized>(
    input: CloudInput<'_>,
    options: &WordCloudOptions,
    rng: &mut R,
) -> WordCloud {
    let color = options.pick_color(rng);
    let mut cloud = WordCloud {
        width: options.width,
        height: options.height,
        background: options.background.clone(),
        color,
        words: Vec::new(),
    };
    match input {
        CloudInput::Weights(weights) => cloud.fit_words(weights, options),
        CloudInput::Text(text) => cloud.generate(text, options),
    }
    cloud
}

impl WordCloud {
    /// Lay out words from precomputed weights. Non-positive weights are ignored.
    pub fn fit_words(&mut self, weights: &[(String, f64)], options: &WordCloudOptions) {
        let mut ranked: Vec<(&str, f64)> = weights
            .iter()
            .filter(|(word, weight)| *weight > 0.0 && !word.trim().is_empty())
            .map(|(word, weight)| (word.as_str(), *weight))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(options.max_words);

        self.words.clear();
        let Some(&(_, top_weight)) = ranked.first() else {
            return;
        };

        let min_font = options.min_font_size.max(MIN_FONT_FLOOR);
        let max_font = options
            .max_font_size
            .unwrap_or(self.height as f64 / 4.0)
            .max(min_font);
        let total = ranked.len();

        for (word, weight) in ranked {
            let relative = weight / top_weight;
            let mut font_size = min_font + (max_font - min_font) * relative;

            let placed = loop {
                if let Some(candidate) = self.place(word, font_size) {
                    break Some(candidate);
                }
                font_size *= SHRINK_FACTOR;
                if font_size < min_font {
                    break None;
                }
            };

            // Lighter words start no larger, so the canvas is treated as full.
            let Some(placed) = placed else {
                debug!(
                    dropped = total - self.words.len(),
                    placed = self.words.len(),
                    "Words did not fit the canvas"
                );
                break;
            };
            self.words.push(placed);
        }
    }

    /// Count words in `text` and lay them out by frequency.
    pub fn generate(&mut self, text: &str, options: &WordCloudOptions) {
        let mut counts: HashMap<String, f64> = HashMap::new();
        let mut order: Vec<String> = Vec::new();
        for token in text
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .map(|t| t.trim_matches('\'').to_lowercase())
            .filter(|t| !t.is_empty() && !options.stop_words.contains(t))
        {
            let count = counts.entry(token.clone()).or_insert(0.0);
            if *count == 0.0 {
                order.push(token);
            }
            *count += 1.0;
        }

        // First-seen order keeps ties stable under the weight sort.
        let weights: TopicWeights = order
            .into_iter()
            .map(|word| {
                let count = counts.get(&word).copied().unwrap_or(0.0);
                (word, count)
            })
            .collect();
        self.fit_words(&weights, options);
    }

    fn place(&self, text: &str, font_size: f64) -> Option<PlacedWord> {
        let width = text.chars().count() as f64 * font_size * GLYPH_WIDTH;
        let height = font_size;
        let (canvas_w, canvas_h) = (self.width as f64, self.height as f64);
        if width > canvas_w || height > canvas_h {
            return None;
        }

        let (cx, cy) = (canvas_w / 2.0, canvas_h / 2.0);
        for step in 0..SPIRAL_MAX_STEPS {
            let t = step as f64 * SPIRAL_STEP;
            let r = 2.0 * t;
            let x = cx + r * t.cos() - width / 2.0;
            let y = cy + r * t.sin() - height / 2.0;

            if x < 0.0 || y < 0.0 || x + width > canvas_w || y + height > canvas_h {
                continue;
            }
            if self.words.iter().any(|w| w.overlaps(x, y, width, height)) {
                continue;
            }
            return Some(PlacedWord {
                text: text.to_string(),
                font_size,
                x,
                y,
                width,
                height,
            });
        }
        None
    }

    /// Render as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        self.write_body(&mut out);
        out.push_str("</svg>\n");
        out
    }

    fn write_body(&self, out: &mut String) {
        let _ = writeln!(
            out,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            escape_xml(&self.background)
        );
        for word in &self.words {
            let _ = writeln!(
                out,
                r#"<text x="{:.1}" y="{:.1}" font-size="{:.1}" font-family="sans-serif" dominant-baseline="hanging" fill="{}">{}</text>"#,
                word.x,
                word.y,
                word.font_size,
                escape_xml(&self.color),
                escape_xml(&word.text)
            );
        }
    }
}

/// Weights for a ranked word list: the word at rank `r` gets `1 / (r + 1)`.
pub fn rank_weights(words: &[String]) -> TopicWeights {
    words
        .iter()
        .enumerate()
        .map(|(rank, word)| (word.clone(), 1.0 / (rank as f64 + 1.0)))
        .collect()
}

/// Render one cloud with a title above it.
pub fn render_wordcloud(topic: &[(String, f64)], title: &str) -> String {
    let cloud = create_wordcloud(CloudInput::Weights(topic), &WordCloudOptions::default());
    let total_height = cloud.height + GRID_SUPTITLE_HEIGHT;

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = cloud.width,
        h = total_height
    );
    write_title(&mut out, cloud.width as f64 / 2.0, 26.0, 20, title);
    let _ = writeln!(
        out,
        r#"<svg y="{GRID_SUPTITLE_HEIGHT}" width="{}" height="{}">"#,
        cloud.width, cloud.height
    );
    cloud.write_body(&mut out);
    out.push_str("</svg>\n</svg>\n");
    out
}

/// Render the first `num_topics` topics as a grid of clouds, four per row,
/// each panel titled `Topic #<index>`, under a shared title.
pub fn render_n_wordclouds(topics: &[TopicWeights], title: &str, num_topics: usize) -> String {
    let count = if num_topics > topics.len() {
        warn!(
            requested = num_topics,
            available = topics.len(),
            "Fewer topics than requested"
        );
        topics.len()
    } else {
        num_topics
    };

    let options = WordCloudOptions::default().with_height(GRID_PANEL_HEIGHT);
    let rows = count.div_ceil(GRID_COLUMNS);
    let panel_w = options.width;
    let panel_h = options.height + GRID_TITLE_HEIGHT;
    let total_w = panel_w * GRID_COLUMNS as u32;
    let total_h = GRID_SUPTITLE_HEIGHT + panel_h * rows as u32;

    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = total_w,
        h = total_h
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#);
    write_title(&mut out, total_w as f64 / 2.0, 28.0, 22, title);

    let mut rng = rand::rng();
    for (t, topic) in topics.iter().take(count).enumerate() {
        let x = (t % GRID_COLUMNS) as u32 * panel_w;
        let y = GRID_SUPTITLE_HEIGHT + (t / GRID_COLUMNS) as u32 * panel_h;
        let cloud = create_wordcloud_with_rng(CloudInput::Weights(topic), &options, &mut rng);

        write_title(
            &mut out,
            (x + panel_w / 2) as f64,
            (y + GRID_TITLE_HEIGHT - 8) as f64,
            14,
            &format!("Topic #{t}"),
        );
        let _ = writeln!(
            out,
            r#"<svg x="{x}" y="{}" width="{}" height="{}">"#,
            y + GRID_TITLE_HEIGHT,
            cloud.width,
            cloud.height
        );
        cloud.write_body(&mut out);
        out.push_str("</svg>\n");
    }

    out.push_str("</svg>\n");
    out
}

/// Write a single titled cloud to `path`.
pub fn display_wordcloud(topic: &[(String, f64)], title: &str, path: &Path) -> Result<()> {
    write_svg(path, &render_wordcloud(topic, title))
}

/// Write a grid of topic clouds to `path`.
pub fn display_n_wordclouds(
    topics: &[TopicWeights],
    title: &str,
    num_topics: usize,
    path: &Path,
) -> Result<()> {
    write_svg(path, &render_n_wordclouds(topics, title, num_topics))
}

fn write_svg(path: &Path, svg: &str) -> Result<()> {
    std::fs::write(path, svg).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "Wrote word cloud");
    Ok(())
}

fn write_title(out: &mut String, x: f64, y: f64, size: u32, text: &str) {
    let _ = writeln!(
        out,
        r#"<text x="{x:.1}" y="{y:.1}" font-size="{size}" font-family="sans-serif" text-anchor="middle">{}</text>"#,
        escape_xml(text)
    );
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
