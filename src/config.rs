//! Configuration and error types for the binarization pipeline.
//!
//! [`BinarizeConfig`] carries the user-facing knobs: window size overrides,
//! the sensitivity parameter `k`, the thresholding method, and the dynamic
//! range used by Sauvola. Window sizes left unset are derived from the image
//! dimensions at run time.

use std::fmt;

/// Default sensitivity parameter.
pub const DEFAULT_K: f64 = 0.5;
/// Default dynamic range of standard deviation (Sauvola only).
pub const DEFAULT_DYNAMIC_RANGE: f64 = 128.0;
/// Largest derived window width before falling back to [`FALLBACK_WINDOW`].
pub const MAX_DERIVED_WINDOW: usize = 100;
/// Fixed window size used when the derived one exceeds [`MAX_DERIVED_WINDOW`].
/// A derived window that large means the input is a full document page
/// rather than a single text line.
pub const FALLBACK_WINDOW: usize = 40;

/// Local thresholding method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Niblack (1986): `th = mean + k * std`. Expects white text on a
    /// black background.
    Niblack,
    /// Sauvola et al. (1997): `th = mean * (1 + k * (std / dR - 1))`.
    /// Expects black text on a white background.
    Sauvola,
    /// Wolf and Jolion (2001):
    /// `th = mean + k * (std / max_std - 1) * (mean - min_intensity)`.
    /// Expects black text on a white background.
    WolfJolion,
}

impl Method {
    /// Parse a method token. Accepts the full lowercase names and the
    /// single-letter shorthands `n`, `s`, `w`.
    pub fn parse(token: &str) -> Result<Self, BinarizeError> {
        match token {
            "n" | "niblack" => Ok(Method::Niblack),
            "s" | "sauvola" => Ok(Method::Sauvola),
            "w" | "wolfjolion" => Ok(Method::WolfJolion),
            other => Err(BinarizeError::UnknownMethod(other.to_string())),
        }
    }
}

impl std::str::FromStr for Method {
    type Err = BinarizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::parse(s)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Niblack => "niblack",
            Method::Sauvola => "sauvola",
            Method::WolfJolion => "wolfjolion",
        };
        f.write_str(name)
    }
}

/// Binarization parameters.
///
/// `window_width`/`window_height` left as `None` are derived from the image
/// dimensions when the pipeline runs; see [`BinarizeConfig::resolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinarizeConfig {
    /// Sliding window width in pixels, or `None` to derive from the image.
    pub window_width: Option<usize>,
    /// Sliding window height in pixels, or `None` to derive from the image.
    pub window_height: Option<usize>,
    /// Sensitivity parameter of the threshold formulas (default: 0.5).
    pub k: f64,
    /// Thresholding method (default: Wolf-Jolion).
    pub method: Method,
    /// Dynamic range of standard deviation, used only by Sauvola
    /// (default: 128).
    pub dynamic_range: f64,
}

impl Default for BinarizeConfig {
    fn default() -> Self {
        Self {
            window_width: None,
            window_height: None,
            k: DEFAULT_K,
            method: Method::WolfJolion,
            dynamic_range: DEFAULT_DYNAMIC_RANGE,
        }
    }
}

impl BinarizeConfig {
    /// Shorthand for a default config with a specific method.
    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Resolve window sizes against concrete image dimensions and validate.
    ///
    /// If either window dimension is unset, both are derived:
    /// `winy = (2 * height - 1) / 3`, `winx = min(width - 1, winy)`, each
    /// clamped to at least 1. A derived width above [`MAX_DERIVED_WINDOW`]
    /// switches both to the [`FALLBACK_WINDOW`] constant.
    pub fn resolve(&self, width: usize, height: usize) -> Result<ResolvedConfig, BinarizeError> {
        if width == 0 || height == 0 {
            return Err(BinarizeError::EmptyImage);
        }

        let (window_width, window_height) = match (self.window_width, self.window_height) {
            (Some(wx), Some(wy)) => {
                if wx == 0 || wy == 0 {
                    return Err(BinarizeError::WindowZero);
                }
                (wx, wy)
            }
            _ => derive_window(width, height),
        };

        if window_width > width || window_height > height {
            return Err(BinarizeError::WindowTooLarge {
                window: (window_width, window_height),
                image: (width, height),
            });
        }

        Ok(ResolvedConfig {
            window_width,
            window_height,
            k: self.k,
            method: self.method,
            dynamic_range: self.dynamic_range,
        })
    }
}

/// Per-run parameters after window derivation and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedConfig {
    /// Sliding window width in pixels.
    pub window_width: usize,
    /// Sliding window height in pixels.
    pub window_height: usize,
    /// Sensitivity parameter.
    pub k: f64,
    /// Thresholding method.
    pub method: Method,
    /// Dynamic range of standard deviation (Sauvola only).
    pub dynamic_range: f64,
}

fn derive_window(width: usize, height: usize) -> (usize, usize) {
    let window_height = ((2 * height).saturating_sub(1) / 3).max(1);
    let window_width = window_height.min(width.saturating_sub(1)).max(1);
    if window_width > MAX_DERIVED_WINDOW {
        (FALLBACK_WINDOW, FALLBACK_WINDOW)
    } else {
        (window_width, window_height)
    }
}

/// Errors surfaced before any computation starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinarizeError {
    /// Method token did not match any known method.
    UnknownMethod(String),
    /// A window dimension was explicitly set to zero.
    WindowZero,
    /// The window exceeds the image in at least one axis.
    WindowTooLarge {
        /// Requested window size (width, height).
        window: (usize, usize),
        /// Image size (width, height).
        image: (usize, usize),
    },
    /// The image has zero area.
    EmptyImage,
    /// The pixel buffer length does not match the stated dimensions.
    BufferSize {
        /// Expected buffer length (`width * height`).
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },
}

impl fmt::Display for BinarizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinarizeError::UnknownMethod(token) => {
                write!(f, "unknown thresholding method: '{}'", token)
            }
            BinarizeError::WindowZero => write!(f, "window dimensions must be at least 1"),
            BinarizeError::WindowTooLarge { window, image } => write!(
                f,
                "window {}x{} exceeds image {}x{}",
                window.0, window.1, image.0, image.1
            ),
            BinarizeError::EmptyImage => write!(f, "image has zero area"),
            BinarizeError::BufferSize { expected, actual } => write!(
                f,
                "pixel buffer length {} does not match dimensions (expected {})",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for BinarizeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method_tokens() {
        assert_eq!(Method::parse("n").unwrap(), Method::Niblack);
        assert_eq!(Method::parse("niblack").unwrap(), Method::Niblack);
        assert_eq!(Method::parse("s").unwrap(), Method::Sauvola);
        assert_eq!(Method::parse("sauvola").unwrap(), Method::Sauvola);
        assert_eq!(Method::parse("w").unwrap(), Method::WolfJolion);
        assert_eq!(Method::parse("wolfjolion").unwrap(), Method::WolfJolion);

        assert!(matches!(
            Method::parse("otsu"),
            Err(BinarizeError::UnknownMethod(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let config = BinarizeConfig::default();
        assert_eq!(config.method, Method::WolfJolion);
        assert_eq!(config.k, 0.5);
        assert_eq!(config.dynamic_range, 128.0);
        assert!(config.window_width.is_none());
    }

    #[test]
    fn test_resolve_explicit_window() {
        let config = BinarizeConfig {
            window_width: Some(9),
            window_height: Some(7),
            ..Default::default()
        };
        let resolved = config.resolve(100, 50).unwrap();
        assert_eq!(resolved.window_width, 9);
        assert_eq!(resolved.window_height, 7);
    }

    #[test]
    fn test_resolve_derives_window_from_small_image() {
        // 60x30: winy = (2*30 - 1) / 3 = 19, winx = min(59, 19) = 19
        let resolved = BinarizeConfig::default().resolve(60, 30).unwrap();
        assert_eq!(resolved.window_height, 19);
        assert_eq!(resolved.window_width, 19);
    }

    #[test]
    fn test_resolve_narrow_image_caps_window_width() {
        // winy = (2*300 - 1) / 3 = 199 > 100 triggers the page fallback,
        // but a 10-wide image first caps winx at width - 1 = 9
        let resolved = BinarizeConfig::default().resolve(10, 300).unwrap();
        assert_eq!(resolved.window_width, 9);
        assert_eq!(resolved.window_height, 199);
    }

    #[test]
    fn test_resolve_page_fallback() {
        // Both derived dimensions above 100: assume a document page
        let resolved = BinarizeConfig::default().resolve(2000, 3000).unwrap();
        assert_eq!(resolved.window_width, FALLBACK_WINDOW);
        assert_eq!(resolved.window_height, FALLBACK_WINDOW);
    }

    #[test]
    fn test_resolve_one_pixel_image() {
        let resolved = BinarizeConfig::default().resolve(1, 1).unwrap();
        assert_eq!(resolved.window_width, 1);
        assert_eq!(resolved.window_height, 1);
    }

    #[test]
    fn test_resolve_rejects_zero_window() {
        let config = BinarizeConfig {
            window_width: Some(0),
            window_height: Some(3),
            ..Default::default()
        };
        assert_eq!(config.resolve(10, 10), Err(BinarizeError::WindowZero));
    }

    #[test]
    fn test_resolve_rejects_oversized_window() {
        let config = BinarizeConfig {
            window_width: Some(11),
            window_height: Some(3),
            ..Default::default()
        };
        assert!(matches!(
            config.resolve(10, 10),
            Err(BinarizeError::WindowTooLarge { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_empty_image() {
        assert_eq!(
            BinarizeConfig::default().resolve(0, 10),
            Err(BinarizeError::EmptyImage)
        );
    }
}
