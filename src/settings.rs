//! Settings-screen catalogs and the sound mixer.

/// Selectable avatars. Index -1 in a profile means the default avatar.
pub const AVATARS: [&str; 4] = ["Sprout", "Pebble", "Moss", "Breeze"];
pub const DEFAULT_AVATAR: &str = "Default";

/// Selectable backgrounds. Index -1 in a profile means the default background.
pub const BACKGROUNDS: [&str; 9] = [
    "Meadow", "Sunrise", "Lagoon", "Bamboo", "Dunes", "Aurora", "Blossom", "Harbor", "Nebula",
];
pub const DEFAULT_BACKGROUND: &str = "Classic";

/// Name for a catalog index, falling back to `default` for -1 or anything out of range.
pub fn catalog_name(catalog: &[&'static str], index: i32, default: &'static str) -> &'static str {
    usize::try_from(index)
        .ok()
        .and_then(|i| catalog.get(i).copied())
        .unwrap_or(default)
}

/// Step through `-1, 0, 1, .., len - 1` and wrap back to -1.
pub fn cycle_index(index: i32, len: usize) -> i32 {
    let next = index + 1;
    if next < 0 || next as usize >= len { -1 } else { next }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundChannel {
    Music,
    Sound,
    PetSound,
    Notification,
}

impl SoundChannel {
    pub fn label(self) -> &'static str {
        match self {
            SoundChannel::Music => "Music",
            SoundChannel::Sound => "Sound",
            SoundChannel::PetSound => "Pet Sound",
            SoundChannel::Notification => "Notification",
        }
    }
}

pub const MAX_VOLUME: u8 = 100;
const DEFAULT_VOLUME: u8 = 50;

/// Volume sliders. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundLevels {
    pub music: u8,
    pub sound: u8,
    pub pet_sound: u8,
    pub notification: u8,
}

impl Default for SoundLevels {
    fn default() -> Self {
        Self {
            music: DEFAULT_VOLUME,
            sound: DEFAULT_VOLUME,
            pet_sound: DEFAULT_VOLUME,
            notification: DEFAULT_VOLUME,
        }
    }
}

impl SoundLevels {
    pub fn get(&self, channel: SoundChannel) -> u8 {
        match channel {
            SoundChannel::Music => self.music,
            SoundChannel::Sound => self.sound,
            SoundChannel::PetSound => self.pet_sound,
            SoundChannel::Notification => self.notification,
        }
    }

    /// Move a slider by `delta`, clamped to `0..=MAX_VOLUME`. Returns the new level.
    pub fn adjust(&mut self, channel: SoundChannel, delta: i16) -> u8 {
        let slot = match channel {
            SoundChannel::Music => &mut self.music,
            SoundChannel::Sound => &mut self.sound,
            SoundChannel::PetSound => &mut self.pet_sound,
            SoundChannel::Notification => &mut self.notification,
        };
        let level = (i16::from(*slot) + delta).clamp(0, i16::from(MAX_VOLUME));
        *slot = level as u8;
        *slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_name_falls_back_for_default_and_out_of_range() {
        assert_eq!(catalog_name(&AVATARS, -1, DEFAULT_AVATAR), "Default");
        assert_eq!(catalog_name(&AVATARS, 1, DEFAULT_AVATAR), "Pebble");
        assert_eq!(catalog_name(&AVATARS, 99, DEFAULT_AVATAR), "Default");
    }

    #[test]
    fn cycle_wraps_through_default() {
        assert_eq!(cycle_index(-1, 4), 0);
        assert_eq!(cycle_index(2, 4), 3);
        assert_eq!(cycle_index(3, 4), -1);
    }

    #[test]
    fn volume_is_clamped() {
        let mut levels = SoundLevels::default();
        assert_eq!(levels.adjust(SoundChannel::Music, 80), 100);
        assert_eq!(levels.adjust(SoundChannel::PetSound, -70), 0);
        assert_eq!(levels.get(SoundChannel::Sound), 50);
    }
}
