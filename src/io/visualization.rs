//! Frame capture and GIF generation for the collapse order

use crate::algorithm::executor::Collapse;
use crate::io::configuration::{MAX_GIF_FRAMES, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{AlgorithmError, Result};
use image::{Delay, Frame, Rgba, RgbaImage};
use std::path::Path;

/// Records collapses so the generation can be replayed as an animation
pub struct VisualizationCapture {
    pub(crate) collapses: Vec<Collapse>,
    dimensions: (usize, usize),
    tile_pixels: u32,
    color_mapping: Vec<[u8; 4]>,
    empty_color: [u8; 4],
}

impl VisualizationCapture {
    /// The average of all tile colors is used for open cells
    pub fn new(
        width: usize,
        height: usize,
        tile_pixels: u32,
        color_mapping: Vec<[u8; 4]>,
    ) -> Self {
        let empty_color = if color_mapping.is_empty() {
            [128, 128, 128, 255]
        } else {
            let mut sums = [0u32; 4];
            for color in &color_mapping {
                for (sum, &channel) in sums.iter_mut().zip(color) {
                    *sum += u32::from(channel);
                }
            }
            let count = color_mapping.len() as u32;
            sums.map(|sum| (sum / count) as u8)
        };

        Self {
            collapses: Vec::with_capacity(width * height),
            dimensions: (width, height),
            tile_pixels: tile_pixels.max(1),
            color_mapping,
            empty_color,
        }
    }

    /// Record one committed cell
    pub fn record(&mut self, collapse: Collapse) {
        self.collapses.push(collapse);
    }

    /// Record every commit of a run in order
    pub fn record_all(&mut self, collapses: &[Collapse]) {
        self.collapses.extend_from_slice(collapses);
    }

    /// Returns all recorded collapses
    pub fn collapses(&self) -> &[Collapse] {
        &self.collapses
    }

    /// Returns the number of recorded collapses
    pub const fn collapse_count(&self) -> usize {
        self.collapses.len()
    }

    /// Frame delay and number of collapses per frame for an export
    ///
    /// Delays shorter than viewers reliably support are raised to that minimum
    /// and collapses are grouped to keep the apparent speed. Large runs are
    /// grouped further so an export never exceeds [`MAX_GIF_FRAMES`].
    pub fn frame_plan(&self, frame_delay_ms: u32) -> (u32, usize) {
        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let speed_skip = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };
        // Blank first frame and held last frame
        let budget = MAX_GIF_FRAMES.saturating_sub(2).max(1);
        let size_skip = self.collapses.len().div_ceil(budget).max(1);
        (effective_delay_ms, speed_skip.max(size_skip))
    }

    /// Number of frames an export with `frame_delay_ms` would encode
    pub fn frame_count(&self, frame_delay_ms: u32) -> usize {
        let (_, skip_factor) = self.frame_plan(frame_delay_ms);
        self.collapses.len().div_ceil(skip_factor) + 2
    }

    /// Export the captured collapses as a GIF with automatic frame skipping
    ///
    /// Timing follows [`VisualizationCapture::frame_plan`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No collapses were captured
    /// - A tile has no color in the mapping
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.collapses.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "No collapses captured for visualization".to_string(),
            });
        }

        let (effective_delay_ms, skip_factor) = self.frame_plan(frame_delay_ms);
        let frames = self.generate_frames(effective_delay_ms, skip_factor)?;

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Result<Vec<Frame>> {
        let (width, height) = self.dimensions;
        let mut canvas = RgbaImage::from_pixel(
            width as u32 * self.tile_pixels,
            height as u32 * self.tile_pixels,
            Rgba(self.empty_color),
        );
        let delay = Delay::from_numer_denom_ms(delay_ms, 1);
        let mut frames = vec![Frame::from_parts(canvas.clone(), 0, 0, delay)];

        for (count, collapse) in self.collapses.iter().enumerate() {
            let color = self
                .color_mapping
                .get(collapse.tile.index())
                .copied()
                .ok_or(AlgorithmError::InvalidTileIndex {
                    index: collapse.tile.index(),
                    max_tiles: self.color_mapping.len(),
                })?;
            self.paint(&mut canvas, collapse.position, color);

            if (count + 1) % skip_factor == 0 {
                frames.push(Frame::from_parts(canvas.clone(), 0, 0, delay));
            }
        }

        if self.collapses.len() % skip_factor != 0 {
            frames.push(Frame::from_parts(canvas.clone(), 0, 0, delay));
        }

        // Final frame displays longer for better visibility
        let final_delay = Delay::from_numer_denom_ms(delay_ms * 25, 1);
        frames.push(Frame::from_parts(canvas, 0, 0, final_delay));

        Ok(frames)
    }

    fn paint(&self, canvas: &mut RgbaImage, position: (usize, usize), color: [u8; 4]) {
        let left = position.0 as u32 * self.tile_pixels;
        let top = position.1 as u32 * self.tile_pixels;
        for dy in 0..self.tile_pixels {
            for dx in 0..self.tile_pixels {
                if let Some(pixel) = canvas.get_pixel_mut_checked(left + dx, top + dy) {
                    *pixel = Rgba(color);
                }
            }
        }
    }
}
