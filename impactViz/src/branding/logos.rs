use std::io::Cursor;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::imageops::FilterType;
use image::ImageFormat;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::dashboard_config::DashboardConfig;

/// Why a logo could not be shown. Every kind is recovered by showing a message.
#[derive(Debug, Error)]
pub enum BrandingError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not decode image from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },
}

impl BrandingError {
    /// Inline message shown in place of the logos
    pub fn user_message(&self) -> String {
        match self {
            BrandingError::Transport { .. } | BrandingError::Status { .. } => format!(
                "Error al cargar los logos desde las URLs. Por favor, verifica los enlaces: {}",
                self
            ),
            BrandingError::Decode { .. } => format!(
                "Error inesperado al procesar las imágenes de los logos: {}",
                self
            ),
        }
    }
}

/// A decoded logo, resized to display width and re-encoded as PNG
#[derive(Debug, Clone, PartialEq)]
pub struct Logo {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl Logo {
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", BASE64.encode(&self.png))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrandingOutcome {
    Loaded(Vec<Logo>),
    Failed(String),
}

/// Decode raw bytes into a display-ready logo
pub fn decode_logo(url: &str, bytes: &[u8], display_width: u32) -> Result<Logo, BrandingError> {
    let decode_error = |source| BrandingError::Decode { url: url.to_string(), source };

    let image = image::load_from_memory(bytes).map_err(decode_error)?;
    let resized = image.resize(display_width, u32::MAX, FilterType::Triangle);

    let mut png = Vec::new();
    resized
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(decode_error)?;

    Ok(Logo {
        url: url.to_string(),
        width: resized.width(),
        height: resized.height(),
        png,
    })
}

pub struct LogoFetcher {
    client: reqwest::Client,
    urls: Vec<String>,
    display_width: u32,
}

impl LogoFetcher {
    pub fn new(config: &DashboardConfig) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            urls: config.logo_urls.clone(),
            display_width: config.logo_width,
        })
    }

    pub async fn fetch_logo(&self, url: &str) -> Result<Logo, BrandingError> {
        let transport_error = |source| BrandingError::Transport { url: url.to_string(), source };

        let response = self.client.get(url).send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(BrandingError::Status { url: url.to_string(), status });
        }
        let bytes = response.bytes().await.map_err(transport_error)?;
        debug!(url, bytes = bytes.len(), "fetched logo");

        decode_logo(url, &bytes, self.display_width)
    }

    /// Fetch every logo in order. The first failure replaces them all with a message.
    pub async fn fetch_all(&self) -> BrandingOutcome {
        let mut logos = Vec::with_capacity(self.urls.len());
        for url in &self.urls {
            match self.fetch_logo(url).await {
                Ok(logo) => logos.push(logo),
                Err(e) => {
                    warn!(error = %e, "logo fetch failed");
                    return BrandingOutcome::Failed(e.user_message());
                }
            }
        }
        BrandingOutcome::Loaded(logos)
    }
}
