//! Classifier input types: raw image frames and precomputed feature vectors.

/// A raw RGB image frame, interleaved row-major, channel values in `[0, 255]`.
///
/// This is the decoded-pixel contract the backbone adapter consumes — how the
/// pixels were obtained (webcam, file, canvas) is outside this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFrame {
    pixels: Vec<f32>,
    width: usize,
    height: usize,
}

impl ImageFrame {
    /// Create a frame from interleaved RGB pixels.
    ///
    /// # Panics
    /// Panics if `pixels.len() != width * height * 3`.
    pub fn new(pixels: Vec<f32>, width: usize, height: usize) -> Self {
        assert_eq!(
            pixels.len(),
            width * height * 3,
            "expected {} RGB values for a {width}x{height} frame, got {}",
            width * height * 3,
            pixels.len()
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    /// Center-crop to a `size` x `size` square.
    ///
    /// Frames smaller than `size` in either dimension are returned unchanged
    /// (scaling is the caller's concern).
    pub fn center_crop(&self, size: usize) -> ImageFrame {
        if self.width < size || self.height < size {
            return self.clone();
        }
        let x0 = (self.width - size) / 2;
        let y0 = (self.height - size) / 2;

        let mut pixels = Vec::with_capacity(size * size * 3);
        for y in y0..y0 + size {
            let row_start = (y * self.width + x0) * 3;
            pixels.extend_from_slice(&self.pixels[row_start..row_start + size * 3]);
        }
        ImageFrame::new(pixels, size, size)
    }

    /// Normalize pixels from `[0, 255]` into `[-1, 1]` for the backbone.
    ///
    /// With `grayscale` set, RGB triplets collapse to a single luma channel
    /// (ITU-R BT.601 weights), so the output has one value per pixel instead
    /// of three.
    pub fn normalized(&self, grayscale: bool) -> Vec<f32> {
        if grayscale {
            self.pixels
                .chunks_exact(3)
                .map(|rgb| {
                    let luma = 0.299 * rgb[0] + 0.587 * rgb[1] + 0.114 * rgb[2];
                    luma / 127.5 - 1.0
                })
                .collect()
        } else {
            self.pixels.iter().map(|v| v / 127.5 - 1.0).collect()
        }
    }
}

/// Input to classification or example collection.
///
/// An explicit tagged variant: callers say whether they are handing over raw
/// pixels for the backbone to embed, or a feature vector that was already
/// computed (the pose pipeline, or a cached activation). No runtime type
/// probing.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierInput {
    /// A raw image frame to run through the frozen backbone.
    Frame(ImageFrame),
    /// An already-extracted feature vector, passed through unchanged.
    Features(Vec<f32>),
}
