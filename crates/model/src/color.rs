use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Display color of a processed line and its order labels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum DisplayColor {
    Red,
    Blue,
    Green,
    Orange,
    Purple,
    Brown,
}

impl DisplayColor {
    /// Colors in the order they are handed out to processed lines.
    pub const PALETTE: [DisplayColor; 6] = [
        DisplayColor::Red,
        DisplayColor::Blue,
        DisplayColor::Green,
        DisplayColor::Orange,
        DisplayColor::Purple,
        DisplayColor::Brown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DisplayColor::Red => "red",
            DisplayColor::Blue => "blue",
            DisplayColor::Green => "green",
            DisplayColor::Orange => "orange",
            DisplayColor::Purple => "purple",
            DisplayColor::Brown => "brown",
        }
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
