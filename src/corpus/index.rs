// ProductIndex — title <-> matrix position mapping.
//
// Titles are keyed case-insensitively. Positions are append-only: a new title
// takes the next row, a known title keeps its row, and rows are never removed
// or compacted.

use std::collections::HashMap;

/// Bidirectional mapping between product titles and matrix rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductIndex {
    /// Display titles in row order
    titles: Vec<String>,
    /// Lower-cased title -> row
    positions: HashMap<String, usize>,
}

/// Where an inserted title ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Title was new and got the next row
    Appended(usize),
    /// Title was already indexed; its row is reused
    Replaced(usize),
}

impl Slot {
    pub fn position(self) -> usize {
        match self {
            Slot::Appended(i) | Slot::Replaced(i) => i,
        }
    }
}

impl ProductIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a title, appending a row if it isn't indexed yet.
    ///
    /// A re-inserted title keeps its row but takes the new display spelling.
    pub fn insert(&mut self, title: &str) -> Slot {
        let key = title.to_lowercase();
        match self.positions.get(&key) {
            Some(&row) => {
                self.titles[row] = title.to_string();
                Slot::Replaced(row)
            }
            None => {
                let row = self.titles.len();
                self.titles.push(title.to_string());
                self.positions.insert(key, row);
                Slot::Appended(row)
            }
        }
    }

    /// Row for a title, matched case-insensitively.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.positions.get(&title.to_lowercase()).copied()
    }

    /// Display title at a row.
    pub fn title_at(&self, row: usize) -> Option<&str> {
        self.titles.get(row).map(String::as_str)
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
