//! Per-frame context: scales and color mode.
//!
//! The [`Context`] carries the frame parameters every widget callback can
//! read: the monitor's device pixel scale, the user-chosen application
//! scale, and the light/dark color mode. The color mode can be overridden
//! per context and reset back to the process-wide default, which is seeded
//! once from the `TRELLIS_COLOR_MODE` environment variable at startup.

use std::sync::Once;

use parking_lot::RwLock;
use tracing::warn;

/// The environment variable consulted for the default color mode.
///
/// Accepted values are `light` and `dark` (case-insensitive). Anything
/// else is logged and ignored.
pub const COLOR_MODE_ENV: &str = "TRELLIS_COLOR_MODE";

/// Light or dark rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Light backgrounds, dark content.
    #[default]
    Light,
    /// Dark backgrounds, light content.
    Dark,
}

static DEFAULT_COLOR_MODE: RwLock<ColorMode> = RwLock::new(ColorMode::Light);
static ENV_INIT: Once = Once::new();

fn init_from_env() {
    ENV_INIT.call_once(|| {
        let Ok(value) = std::env::var(COLOR_MODE_ENV) else {
            return;
        };
        match value.to_ascii_lowercase().as_str() {
            "light" => *DEFAULT_COLOR_MODE.write() = ColorMode::Light,
            "dark" => *DEFAULT_COLOR_MODE.write() = ColorMode::Dark,
            other => {
                // External configuration, not a contract violation: warn and
                // keep the light default.
                warn!(
                    target: crate::logging::targets::CONTEXT,
                    value = other,
                    "unrecognized {COLOR_MODE_ENV} value, defaulting to light"
                );
            }
        }
    });
}

/// Get the process-wide default color mode.
pub fn default_color_mode() -> ColorMode {
    init_from_env();
    *DEFAULT_COLOR_MODE.read()
}

/// Set the process-wide default color mode.
///
/// Contexts without an explicit override pick this up on their next
/// [`Context::color_mode`] call.
pub fn set_default_color_mode(mode: ColorMode) {
    init_from_env();
    *DEFAULT_COLOR_MODE.write() = mode;
}

/// Frame parameters shared by every widget callback.
///
/// A `Context` is owned by the app driver and handed by reference into
/// layout, input, update, and draw. It is cheap to snapshot for
/// change detection across a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    device_scale: f32,
    app_scale: f32,
    color_mode_override: Option<ColorMode>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a context with scale 1 and no color mode override.
    pub fn new() -> Self {
        Self {
            device_scale: 1.0,
            app_scale: 1.0,
            color_mode_override: None,
        }
    }

    /// The monitor's device pixel scale factor.
    #[inline]
    pub fn device_scale(&self) -> f32 {
        self.device_scale
    }

    /// Set the device pixel scale factor. Called by the app driver when the
    /// window reports a monitor change.
    pub fn set_device_scale(&mut self, scale: f32) {
        debug_assert!(scale > 0.0);
        self.device_scale = scale;
    }

    /// The user-chosen application scale.
    #[inline]
    pub fn app_scale(&self) -> f32 {
        self.app_scale
    }

    /// Set the application scale. Taking effect forces a full redraw on the
    /// next frame (the app driver detects the change after update).
    pub fn set_app_scale(&mut self, scale: f32) {
        debug_assert!(scale > 0.0);
        self.app_scale = scale;
    }

    /// The combined scale from logical units to physical pixels.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.device_scale * self.app_scale
    }

    /// The effective color mode: the override if set, otherwise the
    /// process-wide default.
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode_override.unwrap_or_else(default_color_mode)
    }

    /// Override the color mode for this context.
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color_mode_override = Some(mode);
    }

    /// Drop the override and fall back to the process-wide default.
    pub fn reset_color_mode(&mut self) {
        self.color_mode_override = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_defaults() {
        let ctx = Context::new();
        assert_eq!(ctx.device_scale(), 1.0);
        assert_eq!(ctx.app_scale(), 1.0);
        assert_eq!(ctx.scale(), 1.0);
    }

    #[test]
    fn test_scale_combines() {
        let mut ctx = Context::new();
        ctx.set_device_scale(2.0);
        ctx.set_app_scale(1.5);
        assert_eq!(ctx.scale(), 3.0);
    }

    #[test]
    fn test_color_mode_override_and_reset() {
        let mut ctx = Context::new();
        let default = ctx.color_mode();

        ctx.set_color_mode(ColorMode::Dark);
        assert_eq!(ctx.color_mode(), ColorMode::Dark);

        ctx.reset_color_mode();
        assert_eq!(ctx.color_mode(), default);
    }
}
