use crate::error::{Error, Result};

/// Height compensation for monospaced glyphs being taller than wide
pub const DEFAULT_ASPECT_RATIO: f32 = 0.5;

/// Strategy used to binarize the buffer when dithering is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherMode {
    /// Hard cut at the midpoint: below 128 becomes 0, the rest 255
    #[default]
    Threshold,
    /// Floyd-Steinberg error diffusion
    FloydSteinberg,
}

/// Configuration for one image or frame conversion
///
/// An immutable value consumed once per conversion. The multipliers use
/// 1.0 as the identity transform; `target_width`/`target_height` of 0 are
/// clamped to 1 when the output dimensions are computed.
#[derive(Debug, Clone)]
pub struct ProcessingParams {
    pub contrast: f32,           // > 0, default 1.0
    pub brightness: f32,         // > 0, default 1.0
    pub sharpness: f32,          // > 0, default 1.0

    /// Output grid size in characters, before aspect compensation
    pub target_width: u32,       // >= 1, 0 clamped to 1
    pub target_height: u32,      // >= 1, 0 clamped to 1
    pub aspect_ratio: f32,       // applied to height, default 0.5

    pub edge_detection: bool,    // default false
    pub dithering: bool,         // default false
    pub dither_mode: DitherMode, // default Threshold
}

impl Default for ProcessingParams {
    fn default() -> Self {
        Self {
            contrast: 1.0,
            brightness: 1.0,
            sharpness: 1.0,
            target_width: 80,
            target_height: 80,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            edge_detection: false,
            dithering: false,
            dither_mode: DitherMode::default(),
        }
    }
}

impl ProcessingParams {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("contrast", self.contrast),
            ("brightness", self.brightness),
            ("sharpness", self.sharpness),
            ("aspect_ratio", self.aspect_ratio),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Final buffer dimensions after aspect-ratio compensation
    ///
    /// Width is the clamped target width; height is the clamped target
    /// height scaled by `aspect_ratio`, rounded, and clamped back to 1 so
    /// no parameter combination yields a zero-pixel buffer.
    pub fn output_dimensions(&self) -> (u32, u32) {
        let width = self.target_width.max(1);
        let scaled = self.target_height.max(1) as f32 * self.aspect_ratio;
        let height = (scaled.round() as u32).max(1);
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_valid() {
        let params = ProcessingParams::default();
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_non_positive_multiplier_rejected() {
        let mut params = ProcessingParams::default();
        params.contrast = 0.0;
        assert!(params.validate().is_err());

        params.contrast = 1.0;
        params.brightness = -0.5;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_nan_multiplier_rejected() {
        let mut params = ProcessingParams::default();
        params.sharpness = f32::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_output_dimensions_apply_aspect_ratio() {
        let params = ProcessingParams {
            target_width: 100,
            target_height: 60,
            aspect_ratio: 0.5,
            ..Default::default()
        };
        assert_eq!(params.output_dimensions(), (100, 30));
    }

    #[test]
    fn test_output_dimensions_clamp_zero_targets() {
        let params = ProcessingParams {
            target_width: 0,
            target_height: 0,
            ..Default::default()
        };
        assert_eq!(params.output_dimensions(), (1, 1));
    }

    #[test]
    fn test_output_dimensions_never_zero_height() {
        let params = ProcessingParams {
            target_width: 10,
            target_height: 1,
            aspect_ratio: 0.5,
            ..Default::default()
        };
        // 1 * 0.5 rounds to 0 or 1 depending on the rule; must stay >= 1
        assert_eq!(params.output_dimensions(), (10, 1));
    }

    #[test]
    fn test_output_dimensions_round_half_away_from_zero() {
        let params = ProcessingParams {
            target_width: 10,
            target_height: 5,
            aspect_ratio: 0.5,
            ..Default::default()
        };
        // 5 * 0.5 = 2.5 rounds to 3
        assert_eq!(params.output_dimensions(), (10, 3));
    }
}
