use std::fmt;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::RenderConfig;
use crate::context::SceneContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostVersion(pub u32, pub u32, pub u32);

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderEngine {
    #[serde(rename = "BLENDER_EEVEE")]
    Eevee,
    #[serde(rename = "BLENDER_EEVEE_NEXT")]
    EeveeNext,
}

impl RenderEngine {
    /// The rasterizing engine was renamed in 4.2.
    pub fn realtime_for(version: HostVersion) -> Self {
        if version >= HostVersion(4, 2, 0) {
            RenderEngine::EeveeNext
        } else {
            RenderEngine::Eevee
        }
    }

    pub fn identifier(self) -> &'static str {
        match self {
            RenderEngine::Eevee => "BLENDER_EEVEE",
            RenderEngine::EeveeNext => "BLENDER_EEVEE_NEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileFormat {
    Png,
    Ffmpeg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoContainer {
    Mpeg4,
    Matroska,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoCodec {
    H264,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstantRateFactor {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSettings {
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub resolution_percentage: u32,
    pub fps: u32,
    pub file_format: FileFormat,
    pub container: VideoContainer,
    pub codec: VideoCodec,
    pub constant_rate_factor: ConstantRateFactor,
    pub filepath: PathBuf,
    pub engine: RenderEngine,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            resolution_x: 1920,
            resolution_y: 1080,
            resolution_percentage: 100,
            fps: 24,
            file_format: FileFormat::Png,
            container: VideoContainer::Matroska,
            codec: VideoCodec::H264,
            constant_rate_factor: ConstantRateFactor::Medium,
            filepath: PathBuf::from("/tmp/"),
            engine: RenderEngine::EeveeNext,
        }
    }
}

/// Configures H.264/MPEG-4 video output next to the input assets.
pub fn setup_render_settings<C: SceneContext>(
    ctx: &mut C,
    config: &RenderConfig,
    asset_folder: &Path,
) -> RenderSettings {
    let settings = RenderSettings {
        resolution_x: config.resolution_x,
        resolution_y: config.resolution_y,
        resolution_percentage: config.resolution_percentage,
        fps: config.fps,
        file_format: FileFormat::Ffmpeg,
        container: VideoContainer::Mpeg4,
        codec: VideoCodec::H264,
        constant_rate_factor: ConstantRateFactor::High,
        filepath: asset_folder.join(&config.output_file),
        engine: RenderEngine::realtime_for(ctx.host_version()),
    };

    ctx.set_render_settings(settings.clone());
    info!("Render engine: {}", settings.engine.identifier());
    info!("Output video: {}", settings.filepath.display());

    settings
}
