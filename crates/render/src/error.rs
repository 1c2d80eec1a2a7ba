use pickscene_assets::AssetError;

/// Errors that abort a frame or pick.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("asset lookup failed: {0}")]
    AssetNotFound(#[from] AssetError),
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: u32, height: u32 },
    #[error("draw backend error: {0}")]
    Backend(String),
}
