//! Application configuration, loaded from TOML.

use crate::cli::Cli;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tictac_canvas::{
    Player, PointerPosition, SURFACE_HEIGHT, SURFACE_WIDTH, SurfaceGeometry, Theme,
};
use tracing::{debug, info, instrument, warn};

/// Screen pixels covered by one terminal cell.
///
/// Terminals report the mouse in cells, so the host defines its own pixel
/// grid: cell `(column, row)` spans `cell_width x cell_height` screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalScale {
    /// Screen pixels per terminal column.
    cell_width: u32,
    /// Screen pixels per terminal row. Split into an upper and lower half.
    cell_height: u32,
}

impl TerminalScale {
    /// Creates a scale.
    pub fn new(cell_width: u32, cell_height: u32) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }

    /// Screen position reported for a mouse event at `(column, row)`: the
    /// center of that cell's pixel block.
    pub fn to_screen(&self, column: u16, row: u16) -> PointerPosition {
        let (w, h) = (f64::from(self.cell_width), f64::from(self.cell_height));
        PointerPosition::new(
            f64::from(column) * w + w / 2.0,
            f64::from(row) * h + h / 2.0,
        )
    }

    /// Screen geometry of a surface whose top-left terminal cell is
    /// `(column, row)`.
    pub fn surface_at(&self, column: u16, row: u16) -> SurfaceGeometry {
        SurfaceGeometry::at(
            f64::from(column) * f64::from(self.cell_width),
            f64::from(row) * f64::from(self.cell_height),
        )
    }

    /// Terminal columns and rows needed to show the whole surface.
    pub fn surface_cells(&self) -> (u16, u16) {
        let cols = SURFACE_WIDTH.div_ceil(self.cell_width.max(1));
        let rows = SURFACE_HEIGHT.div_ceil(self.cell_height.max(1));
        (
            u16::try_from(cols).unwrap_or(u16::MAX),
            u16::try_from(rows).unwrap_or(u16::MAX),
        )
    }
}

impl Default for TerminalScale {
    fn default() -> Self {
        Self::new(10, 20)
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct AppConfig {
    /// Team selected at startup.
    initial_player: Player,
    /// Log file path. Logs go to a file so they do not corrupt the screen.
    log_file: PathBuf,
    /// Default tracing filter, used when `RUST_LOG` is unset.
    log_filter: String,
    /// Board colors.
    theme: Theme,
    /// Terminal cell to screen pixel scale.
    terminal: TerminalScale,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_player: Player::X,
            log_file: PathBuf::from("tictac_canvas.log"),
            log_filter: "info".to_string(),
            theme: Theme::default(),
            terminal: TerminalScale::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(initial_player = %config.initial_player, "Config loaded successfully");
        Ok(config)
    }

    /// Loads configuration, falling back to defaults if the file does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            warn!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides. Flags that were not given keep the
    /// configured value.
    #[instrument(skip_all)]
    pub fn apply_cli(self, cli: &Cli) -> Self {
        let mut config = self;
        if let Some(player) = cli.player {
            debug!(%player, "Initial player overridden");
            config = config.with_initial_player(player);
        }
        if let Some(log_file) = &cli.log_file {
            debug!(log_file = %log_file.display(), "Log file overridden");
            config = config.with_log_file(log_file.clone());
        }
        config
    }

    /// Validates configuration values.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.terminal.cell_width == 0 {
            return Err(ConfigError::new(
                "terminal.cell_width must be > 0".to_string(),
            ));
        }
        if self.terminal.cell_height < 2 {
            return Err(ConfigError::new(
                "terminal.cell_height must be >= 2".to_string(),
            ));
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::new("log_filter must not be empty".to_string()));
        }
        Ok(())
    }

    /// A TOML document holding every default value.
    pub fn default_toml() -> Result<String, ConfigError> {
        toml::to_string_pretty(&Self::default())
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tictac_canvas::Rgb;

    #[test]
    fn test_default_config_is_valid() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r##"
initial_player = "O"

[theme]
foreground = "#102030"
"##,
        )
        .unwrap();
        assert_eq!(*config.initial_player(), Player::O);
        assert_eq!(*config.theme().foreground(), Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(*config.theme().background(), Rgb::WHITE);
        assert_eq!(*config.terminal(), TerminalScale::default());
    }

    #[test]
    fn test_bad_color_rejected() {
        let result: Result<AppConfig, _> = toml::from_str(
            r##"
[theme]
background = "white"
"##,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_zero_width() {
        let config = AppConfig::default().with_terminal(TerminalScale::new(0, 20));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_short_cells() {
        let config = AppConfig::default().with_terminal(TerminalScale::new(10, 1));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_filter() {
        let config = AppConfig::default().with_log_filter("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default("does_not_exist.toml").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tictac.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
log_filter = "debug"

[terminal]
cell_width = 8
cell_height = 16
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.log_filter(), "debug");
        assert_eq!(*config.terminal(), TerminalScale::new(8, 16));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tictac.toml");
        std::fs::write(&path, "[terminal]\ncell_height = 0\n").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        assert!(err.message.contains("cell_height"));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let text = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_scale_mapping() {
        let scale = TerminalScale::default();
        assert_eq!(scale.to_screen(0, 0), PointerPosition::new(5.0, 10.0));
        assert_eq!(scale.to_screen(3, 2), PointerPosition::new(35.0, 50.0));
        assert_eq!(scale.surface_at(2, 2), SurfaceGeometry::at(20.0, 40.0));
        assert_eq!(scale.surface_cells(), (48, 24));
        assert_eq!(TerminalScale::new(7, 20).surface_cells(), (69, 24));
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let config = AppConfig::default()
            .with_initial_player(Player::X)
            .with_log_file(PathBuf::from("from_file.log"));
        let cli = Cli::parse_from([
            "tictac_canvas",
            "--player",
            "o",
            "--log-file",
            "from_cli.log",
        ]);

        let merged = config.apply_cli(&cli);
        assert_eq!(*merged.initial_player(), Player::O);
        assert_eq!(merged.log_file(), &PathBuf::from("from_cli.log"));
    }

    #[test]
    fn test_absent_flags_keep_file_values() {
        let config = AppConfig::default()
            .with_initial_player(Player::O)
            .with_log_file(PathBuf::from("from_file.log"))
            .with_log_filter("debug".to_string());
        let cli = Cli::parse_from(["tictac_canvas"]);

        let merged = config.clone().apply_cli(&cli);
        assert_eq!(merged, config);
    }

    #[test]
    fn test_player_override_alone() {
        let config = AppConfig::default().with_log_file(PathBuf::from("from_file.log"));
        let cli = Cli::parse_from(["tictac_canvas", "-p", "O"]);

        let merged = config.apply_cli(&cli);
        assert_eq!(*merged.initial_player(), Player::O);
        assert_eq!(merged.log_file(), &PathBuf::from("from_file.log"));
    }
}
