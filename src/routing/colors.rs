//! Downstream host colour assignment.
//!
//! # Design Decisions
//! - Hosts are compared lower-cased
//! - Colours are handed out in order of first appearance
//! - The palette wraps; with more hosts than colours, colours repeat

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Fill colour of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Magenta,
    Aqua,
    Beige,
    Brown,
    /// Used for nodes whose host is filtered out.
    Transparent,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Magenta => "magenta",
            Color::Aqua => "aqua",
            Color::Beige => "beige",
            Color::Brown => "brown",
            Color::Transparent => "transparent",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_PALETTE: [Color; 8] = [
    Color::Red,
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Aqua,
    Color::Beige,
    Color::Brown,
];

/// Mapping from downstream host to its palette colour.
#[derive(Debug, Clone)]
pub struct HostColorTable {
    palette: Vec<Color>,
    index: HashMap<String, usize>,
    /// Hosts with their colours, in first-appearance order.
    entries: Vec<(String, Color)>,
}

impl Default for HostColorTable {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.to_vec())
    }
}

impl HostColorTable {
    /// Create an empty table over `palette`.
    ///
    /// An empty palette falls back to the default one.
    pub fn new(palette: Vec<Color>) -> Self {
        let palette = if palette.is_empty() {
            DEFAULT_PALETTE.to_vec()
        } else {
            palette
        };
        Self {
            palette,
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Colour for `host`, assigning the next palette entry on first sight.
    pub fn color_for(&mut self, host: &str) -> Color {
        let host = host.to_lowercase();
        if let Some(&position) = self.index.get(&host) {
            return self.entries[position].1;
        }

        let color = self.palette[self.entries.len() % self.palette.len()];
        self.index.insert(host.clone(), self.entries.len());
        tracing::trace!(host = %host, color = %color, "Assigned host colour");
        self.entries.push((host, color));
        color
    }

    /// Colour already assigned to `host`, if any.
    pub fn get(&self, host: &str) -> Option<Color> {
        self.index
            .get(&host.to_lowercase())
            .map(|&position| self.entries[position].1)
    }

    /// Hosts in order of first appearance.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(host, _)| host.as_str())
    }

    /// Host/colour pairs in order of first appearance.
    pub fn entries(&self) -> &[(String, Color)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
