//! Command line options and on-disk locations.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use crate::core::ClockConfig;
use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, CELL_SIZE, FALL_CADENCE_MS, SOFT_DROP_CADENCE_MS, STRIDE_RATIO,
};

/// Overrides the config directory.
pub const DIR_ENV: &str = "BLOCKFALL_DIR";

pub const BINDINGS_FILE: &str = "bindings.toml";
pub const LOG_FILE: &str = "blockfall.log";

#[derive(Debug, Clone, Parser)]
#[command(name = "blockfall")]
#[command(about = "Falling-block puzzle in the terminal", long_about = None)]
pub struct Cli {
    /// Board width in cells
    #[arg(long, default_value_t = BOARD_WIDTH, value_parser = clap::value_parser!(u16).range(4..=64))]
    pub board_width: u16,

    /// Board height in cells
    #[arg(long, default_value_t = BOARD_HEIGHT, value_parser = clap::value_parser!(u16).range(4..=64))]
    pub board_height: u16,

    /// Cell size in canvas pixels (two pixels per terminal row)
    #[arg(long, default_value_t = CELL_SIZE, value_parser = clap::value_parser!(u16).range(1..=8))]
    pub cell_size: u16,

    /// Fall cadence in milliseconds
    #[arg(long, default_value_t = FALL_CADENCE_MS)]
    pub fall_ms: u64,

    /// Fall cadence while soft drop is held
    #[arg(long, default_value_t = SOFT_DROP_CADENCE_MS)]
    pub soft_drop_ms: u64,

    /// Stride threshold as a fraction of the fall cadence, in (0, 1]
    #[arg(long, default_value_t = STRIDE_RATIO)]
    pub stride_ratio: f64,

    /// Piece sequence seed (default: time based)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Key bindings file (default: <config dir>/bindings.toml)
    /// The config dir can also be set via the BLOCKFALL_DIR environment variable
    #[arg(long, value_name = "FILE")]
    pub bindings: Option<PathBuf>,

    /// Log file (default: <config dir>/blockfall.log)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Keep key bindings for this session only
    #[arg(long, conflicts_with = "bindings")]
    pub no_persist: bool,
}

impl Cli {
    pub fn clock_config(&self) -> ClockConfig {
        ClockConfig {
            fall_ms: self.fall_ms,
            soft_drop_ms: self.soft_drop_ms,
            stride_ratio: self.stride_ratio,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }

    /// Where bindings are persisted, or `None` for session-only bindings.
    pub fn bindings_path(&self) -> Option<PathBuf> {
        if self.no_persist {
            return None;
        }
        if let Some(path) = &self.bindings {
            return Some(path.clone());
        }
        match config_dir() {
            Ok(dir) => Some(dir.join(BINDINGS_FILE)),
            Err(e) => {
                tracing::warn!(error = ?e, "no config directory, bindings will not be saved");
                None
            }
        }
    }

    pub fn log_path(&self) -> PathBuf {
        if let Some(path) = &self.log_file {
            return path.clone();
        }
        config_dir()
            .map(|dir| dir.join(LOG_FILE))
            .unwrap_or_else(|_| PathBuf::from(LOG_FILE))
    }
}

/// `$BLOCKFALL_DIR`, else the platform config directory plus `blockfall`.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(custom_dir) = std::env::var(DIR_ENV) {
        return Ok(PathBuf::from(custom_dir));
    }
    let base = dirs::config_dir().context("could not find config directory")?;
    Ok(base.join("blockfall"))
}
