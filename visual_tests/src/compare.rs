use crate::{Result, VisualTestError};
use image::{Rgba, RgbaImage};
use image_compare::Algorithm;

/// Channel difference below which two pixels count as equal
const PIXEL_TOLERANCE: u8 = 10;

/// Result of comparing two images
#[derive(Debug, Clone, Copy)]
pub struct CompareResult {
    /// Similarity score from 0.0 to 1.0
    pub similarity: f64,
    /// Pixels whose channels differ by more than the tolerance
    pub differing_pixels: usize,
}

/// Compare two images using SSIM algorithm
pub fn compare_images(reference: &RgbaImage, captured: &RgbaImage) -> Result<CompareResult> {
    check_dimensions(reference, captured)?;

    // Convert to RGB for comparison (SSIM works on grayscale or RGB)
    let ref_rgb = image::DynamicImage::ImageRgba8(reference.clone()).to_rgb8();
    let cap_rgb = image::DynamicImage::ImageRgba8(captured.clone()).to_rgb8();

    let result =
        image_compare::rgb_similarity_structure(&Algorithm::MSSIMSimple, &ref_rgb, &cap_rgb)
            .map_err(|e| VisualTestError::Compare(format!("SSIM comparison failed: {}", e)))?;

    let differing_pixels = reference
        .pixels()
        .zip(captured.pixels())
        .filter(|(a, b)| pixel_difference(a, b) > PIXEL_TOLERANCE)
        .count();

    Ok(CompareResult {
        similarity: result.score,
        differing_pixels,
    })
}

/// Generate a diff image highlighting differences between two images
pub fn generate_diff_image(reference: &RgbaImage, captured: &RgbaImage) -> Result<RgbaImage> {
    check_dimensions(reference, captured)?;

    let (width, height) = reference.dimensions();
    let mut diff_img = RgbaImage::new(width, height);

    for (x, y, pixel) in diff_img.enumerate_pixels_mut() {
        let ref_pixel = reference.get_pixel(x, y);
        let cap_pixel = captured.get_pixel(x, y);
        let diff = pixel_difference(ref_pixel, cap_pixel);

        *pixel = if diff > PIXEL_TOLERANCE {
            // Highlight differences in red
            let intensity = (diff as f32 / 255.0 * 200.0 + 55.0) as u8;
            Rgba([intensity, 0, 0, 255])
        } else {
            // Show original with reduced opacity
            Rgba([cap_pixel[0] / 3, cap_pixel[1] / 3, cap_pixel[2] / 3, 255])
        };
    }

    Ok(diff_img)
}

fn check_dimensions(reference: &RgbaImage, captured: &RgbaImage) -> Result<()> {
    if reference.dimensions() != captured.dimensions() {
        return Err(VisualTestError::Compare(format!(
            "Image dimensions don't match: reference {:?} vs captured {:?}",
            reference.dimensions(),
            captured.dimensions()
        )));
    }
    Ok(())
}

/// Calculate the maximum channel difference between two pixels
fn pixel_difference(a: &Rgba<u8>, b: &Rgba<u8>) -> u8 {
    let dr = a[0].abs_diff(b[0]);
    let dg = a[1].abs_diff(b[1]);
    let db = a[2].abs_diff(b[2]);
    dr.max(dg).max(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_images() {
        let image = RgbaImage::from_pixel(32, 32, Rgba([40, 80, 120, 255]));
        let result = compare_images(&image, &image).unwrap();
        assert!(result.similarity > 0.999);
        assert_eq!(result.differing_pixels, 0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = RgbaImage::new(8, 8);
        let b = RgbaImage::new(8, 9);
        assert!(matches!(
            compare_images(&a, &b),
            Err(VisualTestError::Compare(_))
        ));
    }

    #[test]
    fn test_diff_marks_changed_pixels() {
        let a = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let mut b = a.clone();
        b.put_pixel(2, 1, Rgba([0, 0, 0, 255]));

        let diff = generate_diff_image(&a, &b).unwrap();
        assert_eq!(*diff.get_pixel(2, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*diff.get_pixel(0, 0), Rgba([85, 85, 85, 255]));
    }
}
