use std::fmt;
use std::fmt::Formatter;

use log::debug;

pub use color::Color;
pub use store::{FileStore, PreferenceStore};

pub mod codec;
mod color;
mod store;
mod test_store_serialization;

const START_COLOR_KEY: &str = "startColorData";
const END_COLOR_KEY: &str = "endColorData";

/// The two colors of a background gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub start: Color,
    pub end: Color,
}

impl Default for Gradient {
    /// The gradient shown when nothing was ever saved or the saved pair
    /// can't be restored.
    fn default() -> Self {
        Gradient {
            start: Color::from_hex("#6a85b6"),
            end: Color::from_hex("#bac8e0"),
        }
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

pub struct Preset {
    pub name: &'static str,
    pub gradient: Gradient,
}

/// The gradients the user can pick from, addressed by their index.
pub fn presets() -> [Preset; 4] {
    let preset = |name, start, end| Preset {
        name,
        gradient: Gradient {
            start: Color::from_hex(start),
            end: Color::from_hex(end),
        },
    };

    [
        preset("pink", "#ff9a9e", "#fad0c4"),
        preset("deep purple", "#a18cd1", "#fbc2eb"),
        preset("orange", "#f6d365", "#fda085"),
        preset("pink-purple", "#fbc2eb", "#a6c1ee"),
    ]
}

/// Reads the saved gradient back out of the store.
///
/// All or nothing: if either key is missing, or either color does not
/// decode, the whole restore is abandoned and `None` is returned, so the
/// caller keeps its default. A half-restored gradient is never produced.
pub fn restore(store: &impl PreferenceStore) -> Option<Gradient> {
    let start_data = store.get(START_COLOR_KEY)?;
    let end_data = store.get(END_COLOR_KEY)?;

    let start = match codec::decode(&start_data) {
        Ok(color) => color,
        Err(e) => {
            debug!("Saved start color is unreadable, keeping the default: {}", e);
            return None;
        }
    };
    let end = match codec::decode(&end_data) {
        Ok(color) => color,
        Err(e) => {
            debug!("Saved end color is unreadable, keeping the default: {}", e);
            return None;
        }
    };

    Some(Gradient { start, end })
}

/// Saves the gradient under the two fixed keys.
///
/// Both colors are encoded before anything is written. If either encode
/// fails, neither key is touched, so the store never holds a half-updated
/// pair. There is no error channel, a skipped save only shows up in the
/// debug log.
pub fn save(store: &mut impl PreferenceStore, gradient: &Gradient) {
    let (start_data, end_data) = match (codec::encode(&gradient.start), codec::encode(&gradient.end))
    {
        (Ok(start_data), Ok(end_data)) => (start_data, end_data),
        (Err(e), _) | (_, Err(e)) => {
            debug!("Gradient not saved: {}", e);
            return;
        }
    };

    store.set(START_COLOR_KEY, start_data);
    store.set(END_COLOR_KEY, end_data);
}

#[cfg(test)]
mod test {
    use super::store::MemoryStore;
    use super::{presets, restore, save, Color, Gradient, PreferenceStore};
    use super::{END_COLOR_KEY, START_COLOR_KEY};

    #[test]
    fn restore_from_an_empty_store_yields_nothing() {
        let store = MemoryStore::new();

        assert_eq!(restore(&store), None);
    }

    #[test]
    fn restore_with_one_key_missing_yields_nothing() {
        let mut store = MemoryStore::new();
        store.set(
            START_COLOR_KEY,
            super::codec::encode(&Color::from_hex("#ff9a9e")).unwrap(),
        );

        assert_eq!(restore(&store), None);
    }

    #[test]
    fn restore_with_one_unreadable_color_yields_nothing() {
        let mut store = MemoryStore::new();
        save(&mut store, &Gradient::default());
        store.set(END_COLOR_KEY, b"scribbled over".to_vec());

        assert_eq!(restore(&store), None);
    }

    #[test]
    fn save_then_restore_round_trips() {
        let mut store = MemoryStore::new();
        let gradient = presets()[2].gradient;

        save(&mut store, &gradient);

        assert_eq!(restore(&store), Some(gradient));
    }

    #[test]
    fn save_writes_both_keys_independently_decodable() {
        let mut store = MemoryStore::new();
        let gradient = presets()[0].gradient;

        save(&mut store, &gradient);

        let start = super::codec::decode(&store.get(START_COLOR_KEY).unwrap()).unwrap();
        let end = super::codec::decode(&store.get(END_COLOR_KEY).unwrap()).unwrap();
        assert_eq!(start, gradient.start);
        assert_eq!(end, gradient.end);
    }

    #[test]
    fn save_overwrites_a_previous_gradient() {
        let mut store = MemoryStore::new();

        save(&mut store, &presets()[0].gradient);
        save(&mut store, &presets()[3].gradient);

        assert_eq!(restore(&store), Some(presets()[3].gradient));
    }

    #[test]
    fn there_are_four_presets_and_none_are_black() {
        let black = Color::new(0.0, 0.0, 0.0, 1.0);

        let presets = presets();

        assert_eq!(presets.len(), 4);
        for preset in presets.iter() {
            // A black channel pair would mean a preset hex string no longer parses.
            assert_ne!(preset.gradient.start, black, "preset '{}'", preset.name);
            assert_ne!(preset.gradient.end, black, "preset '{}'", preset.name);
        }
    }
}
