use image::{GrayImage, Luma};
use tracing::debug;

use crate::config::PipelineConfig;

const BACKGROUND: Luma<u8> = Luma([255]);

/// Reset isolated near-black pixels to background, in place.
///
/// A pixel survives only with at least two near-black 8-neighbors;
/// out-of-bounds neighbors count as background. Real glyph strokes always
/// have connected neighbors, compression speckle does not. Neighbor counts
/// are taken against a snapshot so removals do not cascade within a pass.
pub fn despeckle(image: &mut GrayImage, config: &PipelineConfig) {
    let (w, h) = image.dimensions();
    let snapshot = image.clone();
    let mut removed = 0usize;

    for y in 0..h {
        for x in 0..w {
            if snapshot.get_pixel(x, y)[0] > config.black_max {
                continue;
            }
            if ink_neighbors(&snapshot, x, y, config.black_max) <= 1 {
                image.put_pixel(x, y, BACKGROUND);
                removed += 1;
            }
        }
    }

    if removed > 0 {
        debug!(removed, "despeckled band");
    }
}

fn ink_neighbors(image: &GrayImage, x: u32, y: u32, black_max: u8) -> u32 {
    let (w, h) = image.dimensions();
    let mut count = 0;
    for dy in -1i64..=1 {
        for dx in -1i64..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                continue;
            }
            if image.get_pixel(nx as u32, ny as u32)[0] <= black_max {
                count += 1;
            }
        }
    }
    count
}
