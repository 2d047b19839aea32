//! Severity → color table.

use crate::console::{Attribute, Color};
use crate::log::severity::Severity;

/// One color per severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Color; 6],
}

impl Palette {
    pub fn get(&self, severity: Severity) -> &Color {
        &self.colors[severity.index()]
    }

    pub fn set(&mut self, severity: Severity, color: Color) {
        self.colors[severity.index()] = color;
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, severity: Severity, color: Color) -> Self {
        self.set(severity, color);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Severity, &Color)> {
        Severity::ALL.into_iter().zip(self.colors.iter())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [
                Color::from(Attribute::FG_MAGENTA),
                Color::from(Attribute::FG_CYAN),
                Color::from(Attribute::FG_WHITE),
                Color::from(Attribute::FG_YELLOW),
                Color::from(Attribute::FG_RED),
                Color::from(Attribute::FG_INTENSE_RED),
            ],
        }
    }
}
