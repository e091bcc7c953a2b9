//! Offscreen buffers for opacity compositing.
//!
//! A widget painted with opacity < 1 renders into a persistent offscreen
//! buffer sized to the current draw target; after its subtree has
//! painted, the buffer is composited onto the destination with the
//! widget's opacity as alpha. Each buffer is exclusively owned by the
//! widget that allocated it and is resized lazily, never shared.

use tracing::trace;

use crate::surface::Pixmap;
use crate::types::{Color, Size};

/// A lazily allocated, lazily resized compositing buffer.
#[derive(Debug, Clone, Default)]
pub struct OffscreenBuffer {
    pixmap: Option<Pixmap>,
}

impl OffscreenBuffer {
    /// Create an empty buffer; no pixels are allocated until
    /// [`OffscreenBuffer::prepare`] is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure the buffer matches `size` and clear it to transparent.
    ///
    /// Reuses the existing allocation when the size is unchanged.
    /// Returns `None` for an empty size.
    pub fn prepare(&mut self, size: Size) -> Option<&mut Pixmap> {
        if size.is_empty() {
            return None;
        }
        let width = size.width.ceil() as u32;
        let height = size.height.ceil() as u32;

        let needs_alloc = !matches!(
            &self.pixmap,
            Some(pm) if pm.width() == width && pm.height() == height
        );
        if needs_alloc {
            trace!(width, height, "allocating offscreen buffer");
            self.pixmap = Pixmap::new(width, height).ok();
        }
        let pm = self.pixmap.as_mut()?;
        pm.clear(Color::TRANSPARENT);
        Some(pm)
    }

    /// The backing pixmap, if one has been allocated.
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_allocation() {
        let mut buf = OffscreenBuffer::new();
        assert!(buf.pixmap().is_none());

        buf.prepare(Size::new(16.0, 16.0)).unwrap();
        let pm = buf.pixmap().unwrap();
        assert_eq!((pm.width(), pm.height()), (16, 16));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut buf = OffscreenBuffer::new();
        buf.prepare(Size::new(16.0, 16.0)).unwrap();
        buf.prepare(Size::new(32.0, 8.0)).unwrap();

        let pm = buf.pixmap().unwrap();
        assert_eq!((pm.width(), pm.height()), (32, 8));
    }

    #[test]
    fn test_empty_size_rejected() {
        let mut buf = OffscreenBuffer::new();
        assert!(buf.prepare(Size::ZERO).is_none());
    }
}
