// Deck model - the static document structure the interaction layer runs on
//
// A deck is an ordered list of sections, each carrying cards, KPI labels and
// timeline entries. Decks load from a TOML file; without one, the embedded
// default deck is used. The ordered section ids become the navigator's known
// set and never change after load.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Default deck shipped in the binary
const EMBEDDED_DECK: &str = include_str!("deck/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Deck {
    /// Deck title shown in the title bar
    pub title: String,

    #[serde(rename = "section")]
    pub sections: Vec<Section>,
}

/// One top-level content panel, addressable by id
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    /// Unique identifier, also the deep-link target
    pub id: String,
    pub title: String,

    /// Optional lead-in paragraph
    #[serde(default)]
    pub intro: Option<String>,

    #[serde(default, rename = "kpi")]
    pub kpis: Vec<Kpi>,

    #[serde(default, rename = "card")]
    pub cards: Vec<Card>,

    #[serde(default, rename = "timeline")]
    pub timeline: Vec<TimelineEntry>,
}

/// A numeric headline figure; the label text drives the counter animation
#[derive(Debug, Clone, Deserialize)]
pub struct Kpi {
    /// Display text, e.g. "85%", "+12%", "1,234"
    pub label: String,
    pub caption: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub title: String,
    pub body: String,
}

/// A timeline row; detail is shown only when expanded
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineEntry {
    pub phase: String,
    pub window: String,
    pub detail: String,
}

impl Deck {
    /// Load and validate a deck from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read deck file {}", path.display()))?;
        let deck: Deck = toml::from_str(&text)
            .with_context(|| format!("failed to parse deck file {}", path.display()))?;
        deck.validate()?;
        Ok(deck)
    }

    /// The deck compiled into the binary
    pub fn embedded() -> Self {
        let deck: Deck = toml::from_str(EMBEDDED_DECK).expect("embedded deck parses");
        deck.validate().expect("embedded deck is valid");
        deck
    }

    /// Ordered section ids, the navigator's known set
    pub fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            bail!("deck has no sections");
        }
        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.id.is_empty() {
                bail!("section {:?} has an empty id", section.title);
            }
            if !seen.insert(section.id.as_str()) {
                bail!("duplicate section id {:?}", section.id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_deck_parses_and_validates() {
        let deck = Deck::embedded();
        assert!(!deck.sections.is_empty());
        assert!(deck.section_ids().contains(&"project-proposals".to_string()));
    }

    #[test]
    fn embedded_deck_has_animatable_kpis() {
        let deck = Deck::embedded();
        let kpis: Vec<_> = deck.sections.iter().flat_map(|s| &s.kpis).collect();
        assert!(!kpis.is_empty());
        // Every KPI label in the default deck should carry a numeric target
        for kpi in kpis {
            assert!(
                crate::reveal::parse_label(&kpi.label).is_some(),
                "KPI label {:?} has no numeric target",
                kpi.label
            );
        }
    }

    #[test]
    fn duplicate_section_ids_are_rejected() {
        let toml = r#"
            title = "t"
            [[section]]
            id = "a"
            title = "A"
            [[section]]
            id = "a"
            title = "A again"
        "#;
        let deck: Deck = toml::from_str(toml).unwrap();
        assert!(deck.validate().is_err());
    }

    #[test]
    fn empty_deck_is_rejected() {
        let deck: Deck = toml::from_str("title = \"t\"\nsection = []").unwrap();
        assert!(deck.validate().is_err());
    }

    #[test]
    fn section_lookup_by_id() {
        let deck = Deck::embedded();
        let first = &deck.sections[0];
        assert_eq!(deck.section(&first.id).unwrap().title, first.title);
        assert!(deck.section("nope").is_none());
    }
}
