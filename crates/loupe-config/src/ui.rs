use serde::{Deserialize, Serialize};

fn default_panel_width() -> u32 {
    540
}

fn default_panel_height() -> u32 {
    240
}

fn default_margin_right() -> i32 {
    30
}

fn default_margin_top() -> i32 {
    40
}

fn default_discard_stale() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_panel_width")]
    pub panel_width: u32,
    #[serde(default = "default_panel_height")]
    pub panel_height: u32,
    /// Gap between the panel and the right edge of the primary screen
    #[serde(default = "default_margin_right")]
    pub margin_right: i32,
    #[serde(default = "default_margin_top")]
    pub margin_top: i32,
    /// Drop results of gestures older than the one already on screen
    #[serde(default = "default_discard_stale")]
    pub discard_stale_results: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            panel_width: default_panel_width(),
            panel_height: default_panel_height(),
            margin_right: default_margin_right(),
            margin_top: default_margin_top(),
            discard_stale_results: default_discard_stale(),
        }
    }
}
