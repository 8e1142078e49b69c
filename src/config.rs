//! Game configuration
//!
//! Every field has a default, so a JSON file only needs to name the values it
//! overrides. Validation happens once, before a game is built; a bad config
//! never reaches the rules.

use crate::core::{Layout, Size, Suit};
use crate::{Result, SolitaireError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How many cards one click on the stock turns over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DealCount {
    #[default]
    One,
    Three,
}

impl DealCount {
    pub fn count(&self) -> usize {
        match self {
            DealCount::One => 1,
            DealCount::Three => 3,
        }
    }
}

impl TryFrom<u8> for DealCount {
    type Error = SolitaireError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(DealCount::One),
            3 => Ok(DealCount::Three),
            other => Err(SolitaireError::InvalidConfig(format!(
                "deal count must be 1 or 3, got {other}"
            ))),
        }
    }
}

impl From<DealCount> for u8 {
    fn from(deal: DealCount) -> u8 {
        deal.count() as u8
    }
}

/// Tuning for the post-win card scatter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    /// Seconds between launches, drawn uniformly from `[min, max]`
    pub pop_interval: (f32, f32),
    /// Pull applied to every launched card, in pixels per second squared
    pub acceleration: f32,
    /// Launch speed magnitude is drawn from `1..=max_launch_speed`
    pub max_launch_speed: i32,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        CelebrationConfig {
            pop_interval: (0.1, 0.4),
            acceleration: 10.0,
            max_launch_speed: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub deal_count: DealCount,
    /// Highest rank in the deck (13 for a standard deck)
    pub max_rank: u8,
    pub tableau_piles: u8,
    pub pixel_scale: i32,
    pub window: Size,
    pub celebration: CelebrationConfig,
    /// Shuffle seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            deal_count: DealCount::One,
            max_rank: 13,
            tableau_piles: 7,
            pixel_scale: 3,
            window: Size::new(800, 500),
            celebration: CelebrationConfig::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_deal_count(mut self, deal_count: DealCount) -> Self {
        self.deal_count = deal_count;
        self
    }

    /// Load a config from a JSON file and validate it
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: GameConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn layout(&self) -> Layout {
        Layout::from_pixel_scale(self.pixel_scale)
    }

    /// Number of cards in the deck
    pub fn deck_size(&self) -> usize {
        Suit::ALL.len() * self.max_rank as usize
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=13).contains(&self.max_rank) {
            return Err(SolitaireError::InvalidConfig(format!(
                "max_rank must be between 1 and 13, got {}",
                self.max_rank
            )));
        }

        let piles = self.tableau_piles as usize;
        if piles == 0 {
            return Err(SolitaireError::InvalidConfig(
                "at least one tableau pile is required".to_string(),
            ));
        }
        let dealt = piles * (piles + 1) / 2;
        if dealt > self.deck_size() {
            return Err(SolitaireError::InvalidConfig(format!(
                "{piles} tableau piles need {dealt} cards but the deck has {}",
                self.deck_size()
            )));
        }

        if self.pixel_scale <= 0 {
            return Err(SolitaireError::InvalidConfig(format!(
                "pixel_scale must be positive, got {}",
                self.pixel_scale
            )));
        }

        if self.window.width <= 0 || self.window.height <= 0 {
            return Err(SolitaireError::InvalidConfig(format!(
                "window must have a positive size, got {}x{}",
                self.window.width, self.window.height
            )));
        }

        let (min, max) = self.celebration.pop_interval;
        if !(0.0 <= min && min <= max) {
            return Err(SolitaireError::InvalidConfig(format!(
                "pop_interval must satisfy 0 <= min <= max, got ({min}, {max})"
            )));
        }
        if self.celebration.max_launch_speed < 1 {
            return Err(SolitaireError::InvalidConfig(
                "max_launch_speed must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.deck_size(), 52);
        assert_eq!(config.deal_count.count(), 1);
    }

    #[test]
    fn test_deal_count_rejects_other_values() {
        assert!(DealCount::try_from(1).is_ok());
        assert!(DealCount::try_from(3).is_ok());
        assert!(DealCount::try_from(2).is_err());

        let err = serde_json::from_str::<GameConfig>(r#"{"deal_count": 2}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"deal_count": 3, "seed": 7}"#).unwrap();
        assert_eq!(config.deal_count, DealCount::Three);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_rank, 13);
        assert_eq!(config.tableau_piles, 7);
    }

    #[test]
    fn test_too_many_tableau_piles() {
        let config = GameConfig {
            max_rank: 2,
            ..GameConfig::default()
        };
        // 7 piles need 28 cards, a 2-rank deck only has 8
        assert!(matches!(config.validate(), Err(SolitaireError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_rank_range() {
        let config = GameConfig {
            max_rank: 14,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            max_rank: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_pop_interval() {
        let mut config = GameConfig::default();
        config.celebration.pop_interval = (0.5, 0.1);
        assert!(config.validate().is_err());
    }
}
