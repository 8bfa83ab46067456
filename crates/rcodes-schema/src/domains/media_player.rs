//! # `media_player` Domain
//!
//! Seven independently optional sub-sections. Paired commands are modelled
//! as inclusive groups: defining `power_on` obliges `power_off` and so on.

use crate::common::named_commands;
use crate::constraint::{MapSchema, MinLength, Schema};

/// Keys of the `numbers` sub-section.
pub const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

fn command() -> Schema {
    Schema::Command
}

/// `power`: on/off pair and/or toggle.
pub fn power_schema() -> Schema {
    MapSchema::new()
        .inclusive("power", &["power_on", "power_off"], command)
        .optional("power_toggle", command())
        .min_len_msg(1, "must have either toggle or on/off")
        .build()
}

/// `volume`: level pair, mute pair, mute toggle.
pub fn volume_schema() -> Schema {
    MapSchema::new()
        .inclusive("level", &["up", "down"], command)
        .inclusive("mute", &["mute_on", "mute_off"], command)
        .optional("mute_toggle", command())
        .build()
}

/// `sources`: input name to command.
pub fn sources_schema() -> Schema {
    named_commands(MinLength::with_message(1, "must have at least one source"))
}

/// `sound_modes`: sound mode name to command.
pub fn sound_modes_schema() -> Schema {
    named_commands(MinLength::with_message(1, "must have at least one sound mode"))
}

/// `numbers`: every digit key is required.
pub fn numbers_schema() -> Schema {
    DIGITS
        .iter()
        .fold(MapSchema::new(), |schema, digit| schema.required(digit, command()))
        .build()
}

/// `media`: transport controls.
pub fn media_schema() -> Schema {
    MapSchema::new()
        .optional("play", command())
        .optional("pause", command())
        .optional("play_pause", command())
        .optional("stop", command())
        .optional("record", command())
        .inclusive("track", &["next", "prev"], command)
        .inclusive("seek", &["fast_forward", "rewind"], command)
        .min_len(1)
        .build()
}

/// `navigate`: directional pad and menu keys.
pub fn navigate_schema() -> Schema {
    MapSchema::new()
        .inclusive("direction", &["up", "down", "left", "right"], command)
        .optional("ok", command())
        .optional("back", command())
        .optional("menu", command())
        .optional("home", command())
        .optional("exit", command())
        .min_len(1)
        .build()
}

/// The whole `media_player` section.
pub fn media_player_schema() -> Schema {
    MapSchema::new()
        .optional("power", power_schema())
        .optional("volume", volume_schema())
        .optional("sources", sources_schema())
        .optional("sound_modes", sound_modes_schema())
        .optional("numbers", numbers_schema())
        .optional("media", media_schema())
        .optional("navigate", navigate_schema())
        .min_len(1)
        .build()
}
