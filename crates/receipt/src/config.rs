//! Configuration: provider identity, receipt wording and raster settings

use crate::{ReceiptError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Smallest device scale used when capturing a receipt
pub const MIN_SCALE: f32 = 2.0;

/// The service provider printed on every receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderProfile {
    /// Full name, also printed under the signature
    pub name: String,
    /// Tax ID (CPF)
    pub tax_id: String,
    /// Professional registration (COREN)
    pub registration_id: String,
    pub phone: String,
    pub email: String,
}

impl Default for ProviderProfile {
    fn default() -> Self {
        Self {
            name: "Nome do Prestador".to_string(),
            tax_id: "000.000.000-00".to_string(),
            registration_id: "000000".to_string(),
            phone: "(21) 90000-0000".to_string(),
            email: "prestador@example.com".to_string(),
        }
    }
}

/// Static receipt wording and file locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptSettings {
    /// City printed before the date
    pub city: String,
    /// What the payment refers to ("referente à ...")
    pub service: String,
    /// Signature image (PNG or JPEG)
    pub signature: PathBuf,
    /// JSON file holding the next receipt number
    pub counter_store: PathBuf,
    /// Directory receiving exported PDFs
    pub output_dir: PathBuf,
}

impl Default for ReceiptSettings {
    fn default() -> Self {
        Self {
            city: "Rio de Janeiro".to_string(),
            service: "instrumentação cirúrgica".to_string(),
            signature: PathBuf::from("assets/assinatura.png"),
            counter_store: PathBuf::from("recibo-state.json"),
            output_dir: PathBuf::from("."),
        }
    }
}

/// How the receipt is captured as an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterSettings {
    /// Layout width in CSS pixels
    pub width: u32,
    /// Device pixel ratio; values below `MIN_SCALE` are raised to it
    pub scale: f32,
    pub font_regular: PathBuf,
    pub font_bold: PathBuf,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            width: 800,
            scale: MIN_SCALE,
            font_regular: PathBuf::from("fonts/DejaVuSans.ttf"),
            font_bold: PathBuf::from("fonts/DejaVuSans-Bold.ttf"),
        }
    }
}

impl RasterSettings {
    /// Scale actually used for capture
    pub fn effective_scale(&self) -> f32 {
        self.scale.max(MIN_SCALE)
    }
}

/// Root configuration, usually read from `recibo.toml`
///
/// Every section and key is optional; missing values fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    pub provider: ProviderProfile,
    pub receipt: ReceiptSettings,
    pub raster: RasterSettings,
}

impl ReceiptConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ReceiptError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ReceiptError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Read configuration from a TOML file, or use defaults when it does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!("config {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Check values that would make a receipt unusable
    pub fn validate(&self) -> Result<()> {
        if self.provider.name.trim().is_empty() {
            return Err(ReceiptError::ConfigError(
                "provider.name must not be empty".to_string(),
            ));
        }
        if self.raster.width == 0 {
            return Err(ReceiptError::ConfigError(
                "raster.width must be positive".to_string(),
            ));
        }
        if !(self.raster.scale.is_finite() && self.raster.scale > 0.0) {
            return Err(ReceiptError::ConfigError(format!(
                "raster.scale must be a positive number, got {}",
                self.raster.scale
            )));
        }
        Ok(())
    }
}
