// src/ui/components/bitmap.rs
//! Static monochrome image

use embedded_graphics::geometry::OriginDimensions;
use embedded_graphics::pixelcolor::BinaryColor;

use crate::ui::core::{Canvas, DirtyRegion, RawImage, Widget, WidgetBase};
use crate::ui::geometry::{Alignment, Point, Size};

/// Image drawn aligned within its area on forced renders.
///
/// If the area is too small for the image, a frame with both diagonals is
/// drawn instead so the layout problem is visible on screen.
///
/// # Examples
/// ```ignore
/// static LOGO: [u8; 32] = [/* 16x16, one bit per pixel, MSB first */];
/// let logo = shared(Bitmap::new(ImageRaw::new(&LOGO, 16)).with_alignment(Alignment::TopLeft));
/// ```
pub struct Bitmap {
    base: WidgetBase,
    image: RawImage,
    alignment: Alignment,
}

impl Bitmap {
    pub fn new(image: RawImage) -> Self {
        Self {
            base: WidgetBase::new(),
            image,
            alignment: Alignment::Center,
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    fn image_size(&self) -> Size {
        let size = self.image.size();
        Size::new(
            size.width.min(u16::MAX as u32) as u16,
            size.height.min(u16::MAX as u32) as u16,
        )
    }
}

impl Widget for Bitmap {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn compute_preferred_size(&mut self, _canvas: &mut dyn Canvas) -> Size {
        self.image_size()
    }

    fn render(&mut self, canvas: &mut dyn Canvas, force: bool) -> DirtyRegion {
        let area = self.base.area();
        if !force || area.is_empty() {
            return DirtyRegion::Clean;
        }
        self.base.clip(canvas);
        self.base.clear_full(canvas);

        let image = self.image_size();
        let available = area.size();
        if available.width >= image.width && available.height >= image.height {
            let top_left = area.aligned_top_left(self.alignment, image);
            canvas.draw_bitmap(top_left, &self.image);
        } else {
            let right = area.right - 1;
            let bottom = area.bottom - 1;
            canvas.draw_frame(area, BinaryColor::On);
            canvas.draw_line(area.top_left(), Point::new(right, bottom), BinaryColor::On);
            canvas.draw_line(Point::new(area.left, bottom), Point::new(right, area.top), BinaryColor::On);
        }
        DirtyRegion::new(area)
    }
}
