//! Run configuration
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. An optional TOML file
//! 3. Environment variables (`ASSEMBLY_KEY`, nested keys split on `__`,
//!    e.g. `ASSEMBLY_RENDER__FPS=25`)

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render_settings::HostVersion;
use crate::scene_graph::easing::{Easing, Interpolation};

/// Direction used for components past the end of `explode_directions`.
pub const DEFAULT_EXPLODE_DIRECTION: [f32; 3] = [0.0, 0.0, 1.0];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Folder holding the part files; the video is written here as well
    pub asset_folder: PathBuf,
    /// Part files in assembly order
    pub components: Vec<ComponentEntry>,
    /// Explode direction per component, by position in `components`
    pub explode_directions: Vec<[f32; 3]>,
    /// How far parts start from their assembled position, in model units
    pub explode_distance: f32,
    /// Length of each part's fly-in
    pub frames_per_component: i32,
    /// Gap after each fly-in
    pub pause_between: i32,
    pub interpolation: Interpolation,
    pub easing: Easing,
    /// Convert imported glTF (Y-up) to the Z-up scene
    pub convert_y_up: bool,
    /// Host version used to pick the render engine
    pub host_version: HostVersion,
    /// File name of the JSON scene manifest, written into `asset_folder`;
    /// empty turns the export off
    pub scene_manifest: Option<String>,
    #[serde(default)]
    pub render: RenderConfig,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            asset_folder: PathBuf::from("assets"),
            components: [
                "70000001.glb",
                "70000002.glb",
                "70000003.glb",
                "70000004.glb",
                "70000006.glb",
                "70000008.glb",
                "70000010.glb",
            ]
            .into_iter()
            .map(ComponentEntry::from)
            .collect(),
            explode_directions: vec![
                [0.0, 0.0, -1.0],
                [-1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
                [0.0, -1.0, 0.0],
            ],
            explode_distance: 500.0,
            frames_per_component: 30,
            pause_between: 10,
            interpolation: Interpolation::Bezier,
            easing: Easing::EaseInOut,
            convert_y_up: true,
            host_version: HostVersion(4, 2, 0),
            scene_manifest: Some("assembly_scene.json".to_string()),
            render: RenderConfig::default(),
        }
    }
}

impl AssemblyConfig {
    /// Load configuration, layering an optional TOML file and the environment
    /// over the defaults
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(AssemblyConfig::default()));

        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("ASSEMBLY_").split("__"));

        let config: AssemblyConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_at_least("frames_per_component", self.frames_per_component, 1)?;
        check_at_least("pause_between", self.pause_between, 0)
    }

    /// Explode direction for the component at `index`
    pub fn direction_for(&self, index: usize) -> [f32; 3] {
        self.explode_directions
            .get(index)
            .copied()
            .unwrap_or(DEFAULT_EXPLODE_DIRECTION)
    }

    pub fn asset_path(&self, component: &ComponentEntry) -> PathBuf {
        self.asset_folder.join(component.file())
    }

    pub fn manifest_path(&self) -> Option<PathBuf> {
        self.scene_manifest
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|name| self.asset_folder.join(name))
    }
}

/// A part file, either as a bare file name or with per-part settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentEntry {
    File(String),
    Detailed {
        file: String,
        /// Display name used in logs
        name: Option<String>,
        /// Overrides `explode_distance` for this part
        explode_distance: Option<f32>,
    },
}

impl ComponentEntry {
    pub fn file(&self) -> &str {
        match self {
            ComponentEntry::File(file) | ComponentEntry::Detailed { file, .. } => file,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            ComponentEntry::Detailed {
                name: Some(name), ..
            } => name,
            _ => self.file(),
        }
    }

    pub fn explode_distance(&self) -> Option<f32> {
        match self {
            ComponentEntry::Detailed {
                explode_distance, ..
            } => *explode_distance,
            ComponentEntry::File(_) => None,
        }
    }
}

impl From<&str> for ComponentEntry {
    fn from(file: &str) -> Self {
        ComponentEntry::File(file.to_string())
    }
}

/// Video output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub resolution_percentage: u32,
    pub fps: u32,
    /// Video file name, written into `asset_folder`
    pub output_file: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            resolution_x: 1920,
            resolution_y: 1080,
            resolution_percentage: 100,
            fps: 30,
            output_file: "assembly_animation.mp4".to_string(),
        }
    }
}

fn check_at_least(key: &'static str, value: i32, min: i32) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::OutOfRange { key, value, min });
    }
    Ok(())
}

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Invalid(#[from] figment::Error),

    #[error("{key} must be at least {min}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: i32,
        min: i32,
    },
}
