mod compare;
mod raster;
mod scene;

pub use compare::{compare_images, generate_diff_image, CompareResult};
pub use raster::Rasterizer;
pub use scene::{Scene, Step};

use image::RgbaImage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualTestError {
    #[error("Failed to compare images: {0}")]
    Compare(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VisualTestError>;

/// Result of a visual test
pub struct VisualTestResult {
    /// Whether the test passed (similarity >= threshold)
    pub passed: bool,
    /// The similarity score (0.0 to 1.0)
    pub similarity: f64,
    /// Pixels that differ beyond the per-channel tolerance
    pub differing_pixels: usize,
    /// Path to diff image (if generated on failure)
    pub diff_path: Option<PathBuf>,
}

/// Get the path to the output directory for test artifacts
pub fn output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("output")
}

/// Get the path to a diff image
pub fn diff_path(name: &str) -> PathBuf {
    output_dir().join(format!("{}_diff.png", name))
}

/// Compare two renders of the same size. On failure both renders and a diff
/// image are written to the output directory.
pub fn compare_renders(
    name: &str,
    expected: &RgbaImage,
    actual: &RgbaImage,
    similarity_threshold: f64,
) -> Result<VisualTestResult> {
    let result = compare_images(expected, actual)?;
    let passed = result.similarity >= similarity_threshold;

    let diff = if !passed {
        std::fs::create_dir_all(output_dir())?;
        expected.save(output_dir().join(format!("{}_expected.png", name)))?;
        actual.save(output_dir().join(format!("{}_actual.png", name)))?;

        let diff_file = diff_path(name);
        generate_diff_image(expected, actual)?.save(&diff_file)?;
        log::warn!(
            "Visual mismatch for '{}': similarity {:.4}, diff at {}",
            name,
            result.similarity,
            diff_file.display()
        );
        Some(diff_file)
    } else {
        None
    };

    Ok(VisualTestResult {
        passed,
        similarity: result.similarity,
        differing_pixels: result.differing_pixels,
        diff_path: diff,
    })
}
