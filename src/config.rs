use std::time::Duration;

use clap::Parser;

use crate::error::SnakeError;

pub const MIN_MAP_SIZE: u16 = 10;
pub const MAX_MAP_SIZE: u16 = 100;
pub const MAX_LEVEL: u8 = 10;

const DEFAULT_MAP_SIZE: u16 = 30;
const DEFAULT_LEVEL: u8 = 1;
const DEFAULT_SCREEN_LEVEL: u8 = 5;

const BASE_TICK_MS: u64 = 525;
const LEVEL_TICK_STEP_MS: u64 = 50;

/// Command line flags.
#[derive(Debug, Clone, Parser)]
#[command(name = "termsnake", version, about = "Snake in the terminal")]
pub struct GameConfig {
    /// Size of the map
    #[arg(long)]
    pub size: Option<u16>,

    /// Game difficulty 1 to 10
    #[arg(long)]
    pub level: Option<u8>,

    /// Debug mode (through wall)
    #[arg(long)]
    pub debug: bool,

    /// Fill the whole terminal instead of a fixed square map
    #[arg(long)]
    pub screen: bool,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), SnakeError> {
        if let Some(size) = self.size {
            if !(MIN_MAP_SIZE..=MAX_MAP_SIZE).contains(&size) {
                return Err(SnakeError::InvalidConfig(format!(
                    "map size must be between {} and {}, got {}",
                    MIN_MAP_SIZE, MAX_MAP_SIZE, size
                )));
            }
        }
        if let Some(level) = self.level {
            if !(1..=MAX_LEVEL).contains(&level) {
                return Err(SnakeError::InvalidConfig(format!(
                    "level must be between 1 and {}, got {}",
                    MAX_LEVEL, level
                )));
            }
        }
        Ok(())
    }

    /// Difficulty in effect at startup. The full screen game starts
    /// faster when no level is given.
    pub fn starting_level(&self) -> u8 {
        self.level.unwrap_or(if self.screen {
            DEFAULT_SCREEN_LEVEL
        } else {
            DEFAULT_LEVEL
        })
    }

    /// Side of the square map used outside full screen mode.
    pub fn map_size(&self) -> u16 {
        self.size.unwrap_or(DEFAULT_MAP_SIZE)
    }
}

/// Pace for a difficulty level. Level 1 is a relaxed 475ms per tick,
/// level 10 bottoms out at 25ms.
pub fn tick_interval(level: u8) -> Duration {
    Duration::from_millis(BASE_TICK_MS - LEVEL_TICK_STEP_MS * u64::from(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> GameConfig {
        GameConfig {
            size: None,
            level: None,
            debug: false,
            screen: false,
        }
    }

    #[test]
    fn interval_shrinks_with_level() {
        assert_eq!(tick_interval(1), Duration::from_millis(475));
        assert_eq!(tick_interval(5), Duration::from_millis(275));
        assert_eq!(tick_interval(MAX_LEVEL), Duration::from_millis(25));
    }

    #[test]
    fn level_defaults_depend_on_the_surface() {
        let mut conf = defaults();
        assert_eq!(conf.starting_level(), 1);

        conf.screen = true;
        assert_eq!(conf.starting_level(), 5);

        conf.level = Some(8);
        assert_eq!(conf.starting_level(), 8);
    }

    #[test]
    fn map_size_defaults_to_30() {
        let mut conf = defaults();
        assert_eq!(conf.map_size(), 30);

        conf.size = Some(42);
        assert_eq!(conf.map_size(), 42);
    }

    #[test]
    fn validate_rejects_out_of_range_flags() {
        let mut conf = defaults();
        assert!(conf.validate().is_ok());

        conf.size = Some(9);
        assert!(conf.validate().is_err());
        conf.size = Some(101);
        assert!(conf.validate().is_err());
        conf.size = Some(100);
        assert!(conf.validate().is_ok());

        conf.level = Some(0);
        assert!(conf.validate().is_err());
        conf.level = Some(11);
        assert!(conf.validate().is_err());
        conf.level = Some(10);
        assert!(conf.validate().is_ok());
    }

    #[test]
    fn flags_parse() {
        let conf = GameConfig::try_parse_from([
            "termsnake", "--size", "40", "--level", "3", "--debug",
        ])
        .unwrap();
        assert_eq!(conf.size, Some(40));
        assert_eq!(conf.level, Some(3));
        assert!(conf.debug);
        assert!(!conf.screen);

        let bare = GameConfig::try_parse_from(["termsnake"]).unwrap();
        assert_eq!(bare.size, None);
        assert_eq!(bare.level, None);
    }
}
