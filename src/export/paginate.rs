//! Page geometry and pagination of a single tall canvas.

use super::raster::Raster;

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Page size used for export, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width (A4 width)
    pub width_mm: f32,
    /// Page height
    pub height_mm: f32,
}

impl PageGeometry {
    /// 210mm × 295mm.
    pub const A4_EXPORT: PageGeometry = PageGeometry {
        width_mm: 210.0,
        height_mm: 295.0,
    };

    /// Height of the canvas once scaled to the page width.
    pub fn image_height_mm(&self, raster: &Raster) -> f32 {
        raster.height * self.width_mm / raster.width
    }

    /// Page width in points.
    pub fn width_pt(&self) -> f32 {
        self.width_mm * PT_PER_MM
    }

    /// Page height in points.
    pub fn height_pt(&self) -> f32 {
        self.height_mm * PT_PER_MM
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4_EXPORT
    }
}

/// Vertical offsets (top of image relative to top of page) for each page.
///
/// The first page shows the image at 0; every following page shifts it up
/// by one more page height, for as long as image height remains.
pub fn page_offsets(image_height: f32, page_height: f32) -> Vec<f32> {
    let mut offsets = vec![0.0];
    if page_height.is_nan() || page_height <= 0.0 {
        return offsets;
    }

    let mut remaining = image_height - page_height;
    let mut position = 0.0;
    while remaining > 0.0 {
        position -= page_height;
        offsets.push(position);
        remaining -= page_height;
    }
    offsets
}
