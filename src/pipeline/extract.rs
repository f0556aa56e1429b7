use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;
use kmeans_colors::get_kmeans_hamerly;
use palette::Srgb;

use crate::color::Color;

use super::decode::MAX_DIMENSION;

/// A color extracted from the image with its cluster weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedColor {
    pub color: Color,
    /// Fraction of sampled pixels in this cluster. Padding entries carry 0.
    pub weight: f32,
}

/// Cluster indices are stored as `u8` by the k-means implementation.
pub const MAX_CLUSTERS: usize = 256;

/// Pixels drawn by [`ExtractMethod::Sample`].
pub const SAMPLE_SIZE: usize = 1000;

/// How the dominant colors are found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExtractMethod {
    /// K-means clustering (Hamerly's algorithm, K-means++ init).
    #[default]
    #[value(name = "kmeans", alias = "k-means")]
    KMeans,
    /// Recursive median split along the widest channel.
    #[value(alias = "median_cut")]
    MedianCut,
    /// Most frequent colors of a seeded random pixel sample.
    #[value(alias = "simple")]
    Sample,
}

impl fmt::Display for ExtractMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExtractMethod::KMeans => "kmeans",
            ExtractMethod::MedianCut => "median-cut",
            ExtractMethod::Sample => "sample",
        })
    }
}

/// Clustering parameters. Passed explicitly so extraction is reproducible.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    pub method: ExtractMethod,
    /// Number of colors to return.
    pub k: usize,
    pub max_iterations: usize,
    /// Score delta below which k-means stops early (channels scaled to 0..1).
    pub converge: f32,
    pub seed: u64,
    /// Downsampling bound used by the decoder.
    pub max_dimension: u32,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            method: ExtractMethod::default(),
            k: 16,
            max_iterations: 20,
            converge: 0.0025,
            seed: 42,
            max_dimension: MAX_DIMENSION,
        }
    }
}

impl ExtractConfig {
    /// `k` clamped to what the clusterer supports.
    pub fn clusters(&self) -> usize {
        self.k.clamp(1, MAX_CLUSTERS)
    }
}

/// Find the `k` dominant colors of a pixel set.
///
/// Every method returns exactly `config.clusters()` entries sorted by weight,
/// heaviest first. When the image has fewer distinct colors than `k`, the
/// ranked colors are repeated (with zero weight) to fill the list.
pub fn extract_colors(pixels: &[Color], config: &ExtractConfig) -> Vec<ExtractedColor> {
    let k = config.clusters();
    if pixels.is_empty() {
        log::warn!("no pixels to cluster, returning {k} black entries");
        return vec![
            ExtractedColor {
                color: Color::BLACK,
                weight: 0.0,
            };
            k
        ];
    }

    let total = pixels.len() as f32;
    let mut distinct: BTreeMap<Color, u32> = BTreeMap::new();
    for &pixel in pixels {
        *distinct.entry(pixel).or_insert(0) += 1;
    }

    let mut colors: Vec<ExtractedColor> = if distinct.len() <= k {
        // Every distinct color is its own cluster; k-means could only
        // reproduce this partition.
        distinct
            .into_iter()
            .map(|(color, count)| ExtractedColor {
                color,
                weight: count as f32 / total,
            })
            .collect()
    } else {
        match config.method {
            ExtractMethod::KMeans => cluster(pixels, k, config),
            ExtractMethod::MedianCut => median_cut(pixels, k),
            ExtractMethod::Sample => sample(pixels, k, config.seed),
        }
    };

    merge_duplicates(&mut colors);
    // Stable sort: equal weights keep cluster order.
    colors.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    log::debug!(
        "{} extracted {} distinct colors from {} pixels (k = {k})",
        config.method,
        colors.len(),
        pixels.len()
    );

    pad(&mut colors, k);
    colors
}

/// Run K-means in RGB space (Hamerly's algorithm, K-means++ init).
fn cluster(pixels: &[Color], k: usize, config: &ExtractConfig) -> Vec<ExtractedColor> {
    let buf: Vec<Srgb<f32>> = pixels.iter().map(|c| c.to_srgb_f32()).collect();
    let result = get_kmeans_hamerly(
        k,
        config.max_iterations,
        config.converge,
        false,
        &buf,
        config.seed,
    );

    let total = pixels.len() as f32;
    let mut counts = vec![0u32; result.centroids.len()];
    for &idx in &result.indices {
        if let Some(count) = counts.get_mut(idx as usize) {
            *count += 1;
        }
    }

    result
        .centroids
        .iter()
        .zip(&counts)
        .filter(|&(_, &count)| count > 0)
        .map(|(centroid, &count)| ExtractedColor {
            color: Color::from_srgb_f32(*centroid),
            weight: count as f32 / total,
        })
        .collect()
}

/// Split the pixel set into `k` boxes, each time halving the box with the
/// widest channel range at its median, and average each box.
fn median_cut(pixels: &[Color], k: usize) -> Vec<ExtractedColor> {
    let total = pixels.len() as f32;
    let mut boxes: Vec<Vec<Color>> = vec![pixels.to_vec()];
    while boxes.len() < k {
        // widest box first; ties go to the earliest box
        let widest = boxes
            .iter()
            .enumerate()
            .map(|(index, pixels)| (index, widest_channel(pixels)))
            .filter(|&(_, (_, range))| range > 0)
            .max_by_key(|&(index, (_, range))| (range, Reverse(index)));
        let Some((index, (channel, _))) = widest else {
            break;
        };

        let mut lower = std::mem::take(&mut boxes[index]);
        lower.sort_unstable_by_key(|&c| (channel_value(c, channel), c));
        let upper = lower.split_off(lower.len() / 2);
        boxes[index] = lower;
        boxes.push(upper);
    }

    boxes
        .iter()
        .map(|pixels| ExtractedColor {
            color: average(pixels),
            weight: pixels.len() as f32 / total,
        })
        .collect()
}

/// Channel index (0 red, 1 green, 2 blue) with the largest spread, and the spread.
fn widest_channel(pixels: &[Color]) -> (usize, u8) {
    (0..3)
        .map(|channel| {
            let values = pixels.iter().map(|&c| channel_value(c, channel));
            let min = values.clone().min().unwrap_or(0);
            let max = values.max().unwrap_or(0);
            (channel, max - min)
        })
        .max_by_key(|&(channel, range)| (range, Reverse(channel)))
        .unwrap_or((0, 0))
}

fn channel_value(color: Color, channel: usize) -> u8 {
    match channel {
        0 => color.r,
        1 => color.g,
        _ => color.b,
    }
}

fn average(pixels: &[Color]) -> Color {
    let n = pixels.len().max(1) as u32;
    let (r, g, b) = pixels.iter().fold((0u32, 0u32, 0u32), |(r, g, b), c| {
        (r + u32::from(c.r), g + u32::from(c.g), b + u32::from(c.b))
    });
    let mean = |sum: u32| ((sum + n / 2) / n) as u8;
    Color::new(mean(r), mean(g), mean(b))
}

/// Draw up to [`SAMPLE_SIZE`] pixels without replacement (seeded partial
/// Fisher-Yates) and keep the `k` most frequent colors of the sample.
fn sample(pixels: &[Color], k: usize, seed: u64) -> Vec<ExtractedColor> {
    let size = pixels.len().min(SAMPLE_SIZE);
    let mut indices: Vec<usize> = (0..pixels.len()).collect();
    // xorshift64 never leaves a zero state, so force a nonzero seed
    let mut state = seed | 1;
    for i in 0..size {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let j = i + (state % (pixels.len() - i) as u64) as usize;
        indices.swap(i, j);
    }

    let mut counts: BTreeMap<Color, u32> = BTreeMap::new();
    for &index in &indices[..size] {
        *counts.entry(pixels[index]).or_insert(0) += 1;
    }
    let mut ranked: Vec<(Color, u32)> = counts.into_iter().collect();
    // stable: equal counts stay in color order
    ranked.sort_by_key(|&(_, count)| Reverse(count));
    ranked.truncate(k);
    ranked
        .into_iter()
        .map(|(color, count)| ExtractedColor {
            color,
            weight: count as f32 / size as f32,
        })
        .collect()
}

/// Merge clusters whose rounded centroids coincide, keeping the first and
/// accumulating the weight.
fn merge_duplicates(colors: &mut Vec<ExtractedColor>) {
    let mut merged: Vec<ExtractedColor> = Vec::with_capacity(colors.len());
    for entry in colors.drain(..) {
        match merged.iter_mut().find(|m| m.color == entry.color) {
            Some(existing) => existing.weight += entry.weight,
            None => merged.push(entry),
        }
    }
    *colors = merged;
}

/// Repeat ranked colors cyclically, with zero weight, until there are `k`.
fn pad(colors: &mut Vec<ExtractedColor>, k: usize) {
    let real = colors.len();
    if real == 0 {
        return;
    }
    let mut i = 0;
    while colors.len() < k {
        let color = colors[i % real].color;
        colors.push(ExtractedColor { color, weight: 0.0 });
        i += 1;
    }
}
