use serde::Deserialize;

use crate::render::RenderMode;
use crate::view::BACKGROUND;

pub const DEFAULT_CONFIG_PATH: &str = "data/tileview.ron";

/// Startup parameters. Every field is optional in the RON file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub world_width: usize,
    pub world_height: usize,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub edge: u32,
    pub start_x: i64,
    pub start_y: i64,
    /// Pan distance per key press, in tile edges.
    pub pan_step: i64,
    /// Fixed RNG seed. None seeds from the clock.
    pub seed: Option<u64>,
    pub background: u32,
    pub cull: bool,
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world_width: 100,
            world_height: 100,
            viewport_width: 840,
            viewport_height: 640,
            edge: 25,
            start_x: 0,
            start_y: 0,
            pan_step: 1,
            seed: None,
            background: BACKGROUND,
            cull: false,
            title: "tileview".into(),
        }
    }
}

impl Config {
    pub fn render_mode(&self) -> RenderMode {
        if self.cull {
            RenderMode::Culled
        } else {
            RenderMode::Full
        }
    }

    /// Parse RON text. Missing fields take their defaults; `edge` is raised
    /// to at least one.
    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        let mut config: Config = ron::from_str(text)?;
        config.edge = config.edge.max(1);
        Ok(config)
    }
}

/// Load a config file. Logs a warning and returns defaults on failure.
pub fn load_config(path: &str) -> Config {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("failed to read {}: {}, using default config", path, e);
            return Config::default();
        }
    };
    match Config::from_ron(&content) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("failed to parse RON {}: {}, using default config", path, e);
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_setup() {
        let c = Config::default();
        assert_eq!((c.world_width, c.world_height), (100, 100));
        assert_eq!((c.viewport_width, c.viewport_height), (840, 640));
        assert_eq!(c.edge, 25);
        assert_eq!(c.render_mode(), RenderMode::Full);
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let c = Config::from_ron("(edge: 8, seed: Some(42), cull: true)").expect("parse");
        assert_eq!(c.edge, 8);
        assert_eq!(c.seed, Some(42));
        assert_eq!(c.render_mode(), RenderMode::Culled);
        assert_eq!(c.world_width, 100);
        assert_eq!(c.title, "tileview");
    }

    #[test]
    fn zero_edge_is_raised() {
        let c = Config::from_ron("(edge: 0)").expect("parse");
        assert_eq!(c.edge, 1);
    }

    #[test]
    fn malformed_ron_is_an_error() {
        assert!(Config::from_ron("(edge: \"big\")").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let c = load_config("does/not/exist.ron");
        assert_eq!(c, Config::default());
    }
}
