use loupe_types::Key;
use serde::{Deserialize, Serialize};

fn default_move_threshold() -> u32 {
    6
}

fn default_min_region_size() -> u32 {
    18
}

fn default_modifiers() -> Vec<Key> {
    vec![Key::Ctrl, Key::Alt]
}

fn default_quit_key() -> Key {
    Key::F8
}

fn default_close_key() -> Key {
    Key::Escape
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GestureConfig {
    /// Manhattan distance (px) the pointer must travel before a press becomes a drag
    #[serde(default = "default_move_threshold")]
    pub move_threshold: u32,
    /// Smallest width and height (px) worth capturing
    #[serde(default = "default_min_region_size")]
    pub min_region_size: u32,
    /// Keys that must all be held to arm the selection
    #[serde(default = "default_modifiers")]
    pub modifiers: Vec<Key>,
    #[serde(default = "default_quit_key")]
    pub quit_key: Key,
    #[serde(default = "default_close_key")]
    pub close_key: Key,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            move_threshold: default_move_threshold(),
            min_region_size: default_min_region_size(),
            modifiers: default_modifiers(),
            quit_key: default_quit_key(),
            close_key: default_close_key(),
        }
    }
}
