use pickscene_common::Rgba;
use pickscene_input::HeadlessSurface;
use serde::{Deserialize, Serialize};

/// Engine and surface configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Initial surface width in pixels.
    pub width: u32,
    /// Initial surface height in pixels.
    pub height: u32,
    pub title: String,
    /// Color the frame is cleared to before drawing.
    pub clear_color: Rgba,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "pickscene".into(),
            clear_color: Rgba::BLACK,
        }
    }
}

impl EngineConfig {
    pub fn headless_surface(&self) -> HeadlessSurface {
        HeadlessSurface::new(self.width, self.height, self.title.clone())
    }
}
