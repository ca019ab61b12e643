mod pipeline;

use std::collections::HashMap;

use image::Rgba;
use swatchbook_application::{ApplicationError, ColorExtractor};
use swatchbook_domain::ExtractedColor;
use tracing::debug;

pub use pipeline::BackgroundExtractionPipeline;

const MAX_CHANNEL_DISTANCE: f32 = 441.672_96; // 255 * sqrt(3)

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionSettings {
    /// Upper bound on pixels sampled per image.
    pub max_pixels: usize,
    /// Colors closer than this (0..1, RGB space) are merged.
    pub distance: f32,
    pub max_colors: usize,
    /// Pixels with alpha at or below this are ignored.
    pub alpha_threshold: u8,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            max_pixels: 64_000,
            distance: 0.22,
            max_colors: 12,
            alpha_threshold: 250,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    key: u16,
    red: u64,
    green: u64,
    blue: u64,
    count: u64,
}

#[derive(Debug, Clone, Copy)]
struct Cluster {
    red: f32,
    green: f32,
    blue: f32,
    count: u64,
}

impl Cluster {
    fn distance_to(&self, other: &Cluster) -> f32 {
        let dr = self.red - other.red;
        let dg = self.green - other.green;
        let db = self.blue - other.blue;
        (dr * dr + dg * dg + db * db).sqrt() / MAX_CHANNEL_DISTANCE
    }

    fn absorb(&mut self, other: &Cluster) {
        let total = (self.count + other.count) as f32;
        let own = self.count as f32 / total;
        let theirs = other.count as f32 / total;
        self.red = self.red * own + other.red * theirs;
        self.green = self.green * own + other.green * theirs;
        self.blue = self.blue * own + other.blue * theirs;
        self.count += other.count;
    }
}

#[derive(Debug, Default, Clone)]
pub struct ImageCrateExtractor {
    settings: ExtractionSettings,
}

impl ImageCrateExtractor {
    pub fn new(settings: ExtractionSettings) -> Self {
        Self { settings }
    }
}

impl ColorExtractor for ImageCrateExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Vec<ExtractedColor>, ApplicationError> {
        let image = image::load_from_memory(bytes)
            .map_err(|error| ApplicationError::Decode(error.to_string()))?
            .to_rgba8();
        let pixel_count = (image.width() as usize) * (image.height() as usize);
        if pixel_count == 0 {
            return Err(ApplicationError::Decode("image has no pixels".to_string()));
        }

        let step = pixel_count.div_ceil(self.settings.max_pixels.max(1)).max(1);
        let (buckets, sampled) =
            bucket_pixels(image.pixels().step_by(step), self.settings.alpha_threshold);
        let clusters = merge_buckets(buckets, self.settings.distance);
        debug!(
            width = image.width(),
            height = image.height(),
            sampled,
            clusters = clusters.len(),
            "palette extracted"
        );

        Ok(clusters
            .into_iter()
            .take(self.settings.max_colors)
            .map(|cluster| {
                ExtractedColor::from_rgb(
                    channel(cluster.red),
                    channel(cluster.green),
                    channel(cluster.blue),
                    cluster.count as f32 / sampled as f32,
                )
            })
            .collect())
    }
}

/// Groups opaque pixels by their top four bits per channel. Returns buckets
/// ordered by population and the number of pixels looked at.
fn bucket_pixels<'a>(
    pixels: impl Iterator<Item = &'a Rgba<u8>>,
    alpha_threshold: u8,
) -> (Vec<Bucket>, usize) {
    let mut buckets: HashMap<u16, Bucket> = HashMap::new();
    let mut sampled = 0_usize;

    for pixel in pixels {
        sampled += 1;
        let [red, green, blue, alpha] = pixel.0;
        if alpha <= alpha_threshold {
            continue;
        }
        let key = (u16::from(red >> 4) << 8) | (u16::from(green >> 4) << 4) | u16::from(blue >> 4);
        let bucket = buckets.entry(key).or_insert_with(|| Bucket {
            key,
            ..Bucket::default()
        });
        bucket.red += u64::from(red);
        bucket.green += u64::from(green);
        bucket.blue += u64::from(blue);
        bucket.count += 1;
    }

    let mut ordered: Vec<Bucket> = buckets.into_values().collect();
    ordered.sort_unstable_by(|a, b| b.count.cmp(&a.count).then(a.key.cmp(&b.key)));
    (ordered, sampled)
}

fn merge_buckets(buckets: Vec<Bucket>, distance: f32) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();
    for bucket in buckets {
        let count = bucket.count as f32;
        let candidate = Cluster {
            red: bucket.red as f32 / count,
            green: bucket.green as f32 / count,
            blue: bucket.blue as f32 / count,
            count: bucket.count,
        };
        match clusters
            .iter_mut()
            .find(|cluster| cluster.distance_to(&candidate) < distance)
        {
            Some(cluster) => cluster.absorb(&candidate),
            None => clusters.push(candidate),
        }
    }
    clusters.sort_by(|a, b| b.count.cmp(&a.count));
    clusters
}

fn channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};

    use super::*;

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, ImageFormat::Png)
            .expect("encode png");
        bytes.into_inner()
    }

    #[test]
    fn extracts_colors_ordered_by_area() {
        let image = ImageBuffer::from_fn(10, 10, |_x, y| {
            if y < 7 {
                Rgb([255_u8, 0, 0])
            } else {
                Rgb([0_u8, 0, 255])
            }
        });
        let bytes = encode_png(DynamicImage::ImageRgb8(image));

        let colors = ImageCrateExtractor::default()
            .extract(&bytes)
            .expect("extract");
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].hex.as_str(), "#ff0000");
        assert!((colors[0].area - 0.7).abs() < 1e-6);
        assert_eq!(colors[1].hex.as_str(), "#0000ff");
        assert!((colors[1].area - 0.3).abs() < 1e-6);
    }

    #[test]
    fn near_colors_are_merged() {
        let image = ImageBuffer::from_fn(4, 4, |x, _y| {
            if x < 2 {
                Rgb([255_u8, 0, 0])
            } else {
                Rgb([235_u8, 20, 20])
            }
        });
        let bytes = encode_png(DynamicImage::ImageRgb8(image));

        let colors = ImageCrateExtractor::default()
            .extract(&bytes)
            .expect("extract");
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].hex.as_str(), "#f50a0a");
        assert!((colors[0].area - 1.0).abs() < 1e-6);
    }

    #[test]
    fn translucent_pixels_are_skipped_and_areas_stay_unnormalized() {
        let image = ImageBuffer::from_fn(10, 1, |x, _y| {
            if x < 4 {
                Rgba([0_u8, 128, 0, 255])
            } else {
                Rgba([0_u8, 0, 0, 0])
            }
        });
        let bytes = encode_png(DynamicImage::ImageRgba8(image));

        let colors = ImageCrateExtractor::default()
            .extract(&bytes)
            .expect("extract");
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].hex.as_str(), "#008000");
        assert!((colors[0].area - 0.4).abs() < 1e-6);
    }

    #[test]
    fn large_images_are_sampled() {
        let image = ImageBuffer::from_pixel(100, 100, Rgb([10_u8, 20, 30]));
        let bytes = encode_png(DynamicImage::ImageRgb8(image));
        let extractor = ImageCrateExtractor::new(ExtractionSettings {
            max_pixels: 1_000,
            ..ExtractionSettings::default()
        });

        let colors = extractor.extract(&bytes).expect("extract");
        assert_eq!(colors.len(), 1);
        assert!((colors[0].area - 1.0).abs() < 1e-6);
    }

    #[test]
    fn palette_is_capped() {
        let image = ImageBuffer::from_fn(16, 1, |x, _y| {
            Rgb([(x * 16) as u8, 255 - (x * 16) as u8, 0])
        });
        let bytes = encode_png(DynamicImage::ImageRgb8(image));
        let extractor = ImageCrateExtractor::new(ExtractionSettings {
            distance: 0.0,
            max_colors: 3,
            ..ExtractionSettings::default()
        });

        assert_eq!(extractor.extract(&bytes).expect("extract").len(), 3);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let result = ImageCrateExtractor::default().extract(b"definitely not an image");
        assert!(matches!(result, Err(ApplicationError::Decode(_))));
    }
}
