use crate::perception::PerceptionParams;
use crate::world::Pose;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct PerceptionToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(default)]
    pub rover: RoverConfig,
    #[serde(default)]
    pub params: PerceptionParams,
    /// Number of times the same frame is fed through the pipeline.
    #[serde(default = "default_repeat")]
    pub repeat: usize,
    pub output: OutputConfig,
}

fn default_repeat() -> usize {
    1
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RoverConfig {
    pub pose: Pose,
    pub world_size: usize,
    pub samples_pos: Vec<[f32; 2]>,
}

impl Default for RoverConfig {
    fn default() -> Self {
        Self {
            pose: Pose::default(),
            world_size: 200,
            samples_pos: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(rename = "vision_image")]
    pub vision_image: PathBuf,
    #[serde(rename = "world_map_image")]
    pub world_map_image: PathBuf,
    #[serde(rename = "report_json")]
    pub report_json: PathBuf,
    /// Optional directory receiving the rectified frame and class masks.
    #[serde(default)]
    pub debug_dir: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<PerceptionToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<PerceptionToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}
