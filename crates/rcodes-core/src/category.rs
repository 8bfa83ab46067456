//! # Device Category: Single Source of Truth
//!
//! Defines the `Category` enum with every device category a codes file may
//! declare in `info.category`. The schema enumeration is built from
//! [`Category::all`], so adding a variant here is the only change needed to
//! accept a new category.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// Device category declared in a codes file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Air conditioning unit.
    AirConditioner,
    /// CD/streaming audio player.
    AudioPlayer,
    /// Audio/video receiver or amplifier.
    AvReceiver,
    /// Fan.
    Fan,
    /// Light or dimmer.
    Light,
    /// Video projector.
    Projector,
    /// Set-top box (cable, satellite, IPTV).
    Settopbox,
    /// Powered speaker or soundbar.
    Speaker,
    /// Switchable outlet or relay.
    Switch,
    /// Radio tuner.
    Tuner,
    /// Television.
    Tv,
    /// DVD/Blu-ray/media player.
    VideoPlayer,
}

/// Total number of device categories.
pub const CATEGORY_COUNT: usize = 12;

impl Category {
    /// Returns all categories in canonical (alphabetical) order.
    pub fn all() -> &'static [Category] {
        &[
            Self::AirConditioner,
            Self::AudioPlayer,
            Self::AvReceiver,
            Self::Fan,
            Self::Light,
            Self::Projector,
            Self::Settopbox,
            Self::Speaker,
            Self::Switch,
            Self::Tuner,
            Self::Tv,
            Self::VideoPlayer,
        ]
    }

    /// Returns the snake_case identifier, as written in codes files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AirConditioner => "air_conditioner",
            Self::AudioPlayer => "audio_player",
            Self::AvReceiver => "av_receiver",
            Self::Fan => "fan",
            Self::Light => "light",
            Self::Projector => "projector",
            Self::Settopbox => "settopbox",
            Self::Speaker => "speaker",
            Self::Switch => "switch",
            Self::Tuner => "tuner",
            Self::Tv => "tv",
            Self::VideoPlayer => "video_player",
        }
    }

    /// All snake_case identifiers in canonical order.
    pub fn names() -> Vec<&'static str> {
        Self::all().iter().map(Category::as_str).collect()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    /// Case-sensitive: codes files must spell categories in lowercase.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::UnknownCategory {
                value: s.to_string(),
            })
    }
}
