//! Software drawing surfaces.
//!
//! [`Pixmap`] is a CPU-side RGBA8 image buffer. [`PixmapView`] is a
//! clipped view into one: drawing through a view uses the same absolute
//! coordinates as the underlying pixmap but silently discards anything
//! outside the view region. The draw pass uses a view to restrict
//! painting to the damaged region.
//!
//! [`Canvas`] abstracts over both so paint code does not care whether it
//! is drawing to the destination surface, a clipped view of it, or an
//! offscreen compositing buffer.

use crate::error::{RenderError, RenderResult};
use crate::types::{Color, Rect, Size};

/// A drawing target.
///
/// Coordinates are absolute logical units; fractional rectangles are
/// expanded outward to whole pixels (over-painting is acceptable,
/// under-painting is not).
pub trait Canvas {
    /// The size of the underlying surface, independent of any clip.
    fn size(&self) -> Size;

    /// Fill a rectangle with a color, blending by the color's alpha.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Composite another surface of the same size over this one, with the
    /// source alpha additionally scaled by `alpha`.
    fn composite(&mut self, src: &Pixmap, alpha: f32);
}

/// A CPU-side RGBA8 image buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixmap {
    /// Create a transparent pixmap.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::ZeroSizedSurface { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read one pixel as RGBA8.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    // Byte offset of a pixel. Computed in usize so surfaces whose byte
    // length exceeds u32::MAX still address correctly.
    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Overwrite every pixel with a color (no blending).
    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// A clipped view of a sub-region. The region is clamped to the
    /// surface bounds; an out-of-bounds region yields an empty view.
    pub fn view(&mut self, region: Rect) -> PixmapView<'_> {
        let bounds = Rect::from_size(Size::new(self.width as f32, self.height as f32));
        let clip = region.intersect(&bounds).unwrap_or(Rect::ZERO);
        PixmapView { target: self, clip }
    }

    fn blend_span(&mut self, rect: Rect, clip: Rect, src: [u8; 4], alpha: f32) {
        let Some(r) = rect.intersect(&clip) else {
            return;
        };
        let x0 = r.left().floor().max(0.0) as u32;
        let y0 = r.top().floor().max(0.0) as u32;
        let x1 = (r.right().ceil() as u32).min(self.width);
        let y1 = (r.bottom().ceil() as u32).min(self.height);

        let a16 = ((src[3] as f32 * alpha.clamp(0.0, 1.0)).round() as u16).min(255);
        if a16 == 0 {
            return;
        }
        for y in y0..y1 {
            for x in x0..x1 {
                let i = self.index(x, y);
                if a16 == 255 {
                    self.data[i..i + 4].copy_from_slice(&src);
                } else {
                    for c in 0..3 {
                        let d = self.data[i + c] as u16;
                        let s = src[c] as u16;
                        self.data[i + c] = ((s * a16 + d * (255 - a16)) / 255) as u8;
                    }
                    let da = self.data[i + 3] as u16;
                    self.data[i + 3] = (a16 + da * (255 - a16) / 255).min(255) as u8;
                }
            }
        }
    }

    fn composite_clipped(&mut self, src: &Pixmap, alpha: f32, clip: Rect) {
        let x0 = clip.left().floor().max(0.0) as u32;
        let y0 = clip.top().floor().max(0.0) as u32;
        let x1 = (clip.right().ceil() as u32)
            .min(self.width)
            .min(src.width);
        let y1 = (clip.bottom().ceil() as u32)
            .min(self.height)
            .min(src.height);

        let alpha = alpha.clamp(0.0, 1.0);
        if alpha == 0.0 {
            return;
        }
        for y in y0..y1 {
            for x in x0..x1 {
                let si = src.index(x, y);
                let sa = src.data[si + 3];
                if sa == 0 {
                    continue;
                }
                let a16 = ((sa as f32 * alpha).round() as u16).min(255);
                let di = self.index(x, y);
                if a16 == 255 {
                    self.data[di..di + 4].copy_from_slice(&src.data[si..si + 4]);
                } else {
                    for c in 0..3 {
                        let d = self.data[di + c] as u16;
                        let s = src.data[si + c] as u16;
                        self.data[di + c] = ((s * a16 + d * (255 - a16)) / 255) as u8;
                    }
                    let da = self.data[di + 3] as u16;
                    self.data[di + 3] = (a16 + da * (255 - a16) / 255).min(255) as u8;
                }
            }
        }
    }

    fn full_clip(&self) -> Rect {
        Rect::from_size(Size::new(self.width as f32, self.height as f32))
    }
}

impl Canvas for Pixmap {
    fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let clip = self.full_clip();
        self.blend_span(rect, clip, color.to_rgba8(), 1.0);
    }

    fn composite(&mut self, src: &Pixmap, alpha: f32) {
        let clip = self.full_clip();
        self.composite_clipped(src, alpha, clip);
    }
}

/// A clipped view into a [`Pixmap`].
///
/// The view does not translate coordinates; it only restricts which
/// pixels drawing may touch.
#[derive(Debug)]
pub struct PixmapView<'a> {
    target: &'a mut Pixmap,
    clip: Rect,
}

impl PixmapView<'_> {
    /// The clip region of this view, in surface coordinates.
    pub fn clip(&self) -> Rect {
        self.clip
    }
}

impl Canvas for PixmapView<'_> {
    fn size(&self) -> Size {
        Canvas::size(self.target)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.target.blend_span(rect, self.clip, color.to_rgba8(), 1.0);
    }

    fn composite(&mut self, src: &Pixmap, alpha: f32) {
        self.target.composite_clipped(src, alpha, self.clip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_rejected() {
        assert!(Pixmap::new(0, 10).is_err());
        assert!(Pixmap::new(10, 0).is_err());
    }

    #[test]
    fn test_fill_opaque() {
        let mut pm = Pixmap::new(4, 4).unwrap();
        pm.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Color::RED);

        assert_eq!(pm.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(pm.pixel(1, 1), [255, 0, 0, 255]);
        assert_eq!(pm.pixel(2, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn test_view_clips_drawing() {
        let mut pm = Pixmap::new(8, 8).unwrap();
        {
            let mut view = pm.view(Rect::new(2.0, 2.0, 2.0, 2.0));
            view.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Color::WHITE);
        }
        assert_eq!(pm.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(pm.pixel(2, 2), [255, 255, 255, 255]);
        assert_eq!(pm.pixel(3, 3), [255, 255, 255, 255]);
        assert_eq!(pm.pixel(4, 4), [0, 0, 0, 0]);
    }

    #[test]
    fn test_rectangular_surface_addressing() {
        let mut pm = Pixmap::new(1024, 3).unwrap();
        assert_eq!(pm.data().len(), 1024 * 3 * 4);

        pm.fill_rect(Rect::new(1023.0, 2.0, 1.0, 1.0), Color::GREEN);
        assert_eq!(pm.pixel(1023, 2), [0, 255, 0, 255]);
        assert_eq!(pm.pixel(1022, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn test_composite_half_alpha() {
        let mut dst = Pixmap::new(2, 2).unwrap();
        let mut src = Pixmap::new(2, 2).unwrap();
        src.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Color::WHITE);

        dst.composite(&src, 0.5);

        // a16 = round(255 * 0.5) = 128; (255 * 128) / 255 = 128.
        let [r, g, b, _] = dst.pixel(0, 0);
        assert_eq!((r, g, b), (128, 128, 128));
    }

    #[test]
    fn test_composite_full_alpha_overwrites() {
        let mut dst = Pixmap::new(2, 2).unwrap();
        dst.clear(Color::BLUE);
        let mut src = Pixmap::new(2, 2).unwrap();
        src.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Color::RED);

        dst.composite(&src, 1.0);
        assert_eq!(dst.pixel(1, 1), [255, 0, 0, 255]);
    }
}
