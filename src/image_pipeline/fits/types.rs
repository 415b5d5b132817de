//! FITS conversion configuration types

/// Configuration for RAW to FITS conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Whether to debayer the image to RGB (true) or output the grayscale Bayer mosaic (false)
    pub debayer: bool,
    /// Whether to validate image dimensions before conversion
    pub validate_dimensions: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            debayer: true,
            validate_dimensions: true,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    debayer: Option<bool>,
    validate_dimensions: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn debayer(mut self, enable: bool) -> Self {
        self.debayer = Some(enable);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            debayer: self.debayer.unwrap_or(default.debayer),
            validate_dimensions: self
                .validate_dimensions
                .unwrap_or(default.validate_dimensions),
        }
    }
}
