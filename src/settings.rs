//! Simulation tuning
//!
//! Every gameplay constant lives here so hosts can override values without
//! rebuilding. Loaded from LocalStorage on the web, from a JSON file natively.

use anyhow::{Context, ensure};
use serde::Deserialize;

use crate::consts::*;

/// How points are awarded while obstacles are live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Exact alignment check plus one point per non-colliding obstacle per tick
    #[default]
    Legacy,
    /// One point per obstacle, awarded once its trailing edge clears the avatar
    PassOnce,
}

impl ScoringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringMode::Legacy => "legacy",
            ScoringMode::PassOnce => "pass_once",
        }
    }
}

/// Simulation constants
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Avatar ===
    pub gravity: f32,
    pub jump_strength: f32,
    pub avatar_x: f32,
    pub avatar_size: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_gap: f32,
    pub obstacle_speed: f32,
    pub gap_margin: f32,
    pub spawn_interval_ms: u32,

    // === Rules ===
    pub scoring: ScoringMode,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,
            avatar_x: AVATAR_X,
            avatar_size: AVATAR_SIZE,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_gap: OBSTACLE_GAP,
            obstacle_speed: OBSTACLE_SPEED,
            gap_margin: GAP_MARGIN,
            spawn_interval_ms: SPAWN_INTERVAL_MS,

            scoring: ScoringMode::Legacy,
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_gates_tuning";

    /// Environment variable naming a tuning file (native only)
    pub const ENV_VAR: &'static str = "FLAPPY_GATES_TUNING";

    /// Parse and validate tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let tuning: Tuning = serde_json::from_str(json).context("malformed tuning JSON")?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let magnitudes = [
            ("gravity", self.gravity),
            ("jump_strength", self.jump_strength),
            ("avatar_size", self.avatar_size),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_gap", self.obstacle_gap),
            ("obstacle_speed", self.obstacle_speed),
        ];
        for (name, value) in magnitudes {
            ensure!(
                value.is_finite() && value > 0.0,
                "{name} must be positive, got {value}"
            );
        }
        ensure!(
            self.avatar_x.is_finite() && self.avatar_x >= 0.0,
            "avatar_x must be non-negative, got {}",
            self.avatar_x
        );
        ensure!(
            self.gap_margin.is_finite() && self.gap_margin >= 0.0,
            "gap_margin must be non-negative, got {}",
            self.gap_margin
        );
        ensure!(self.spawn_interval_ms > 0, "spawn_interval_ms must be non-zero");
        Ok(())
    }

    /// Horizontal position at which the legacy alignment check awards a point
    #[inline]
    pub fn alignment_x(&self) -> f32 {
        self.avatar_x - self.obstacle_width / 2.0
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {e:#}"),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Load tuning from the file named by `FLAPPY_GATES_TUNING` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default tuning");
            return Self::default();
        };

        let loaded = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {path}"))
            .and_then(|json| Self::from_json(&json));
        match loaded {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::warn!("Falling back to default tuning: {e:#}");
                Self::default()
            }
        }
    }
}
