// Section navigator - owns the "current section" state
//
// The navigator is deliberately headless: navigate() is a pure transition
// that returns a list of commands describing what the UI must do (select
// exactly one tab, show exactly one panel, update the location fragment,
// announce the change). The TUI applies the commands; tests inspect them.

use chrono::{DateTime, Utc};

/// Notification emitted on every accepted navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavChanged {
    pub section_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Side effects of an accepted navigation, in application order
///
/// Select/Show commands are emitted for every known section, not just the
/// target. A UI with duplicate controls bound to one section id applies the
/// same command to all of them, so duplicates stay consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    /// Mark the navigation control(s) for `section` as selected or not
    SelectControl { section: String, selected: bool },
    /// Mark the panel(s) for `section` as visible or not
    ShowPanel { section: String, visible: bool },
    /// Write the addressable location fragment
    SetFragment(String),
    /// Notify listeners that navigation happened
    Announce(NavChanged),
}

/// Storage for the addressable location fragment
///
/// Seeded from the CLI deep link and displayed in the title bar. Behind a
/// trait so the navigator tests run without any UI.
pub trait FragmentStore {
    fn get(&self) -> Option<String>;
    fn set(&mut self, id: &str);
}

/// Simple in-memory fragment store
#[derive(Debug, Default, Clone)]
pub struct Fragment(Option<String>);

impl Fragment {
    pub fn seeded(value: Option<String>) -> Self {
        Self(value)
    }
}

impl FragmentStore for Fragment {
    fn get(&self) -> Option<String> {
        self.0.clone()
    }

    fn set(&mut self, id: &str) {
        self.0 = Some(id.to_string());
    }
}

/// Owns the ordered set of known sections and the current pointer
///
/// The known set is fixed at construction; only `current` ever changes.
pub struct Navigator {
    known: Vec<String>,
    current: String,
}

impl Navigator {
    /// Build a navigator over an ordered, non-empty set of section ids
    ///
    /// The initial section is the first of the set.
    pub fn new(known: Vec<String>) -> Option<Self> {
        let current = known.first()?.clone();
        Some(Self { known, current })
    }

    /// Current section id
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Ordered known section ids
    pub fn sections(&self) -> &[String] {
        &self.known
    }

    /// Index of the current section within the known set
    pub fn current_index(&self) -> usize {
        self.known
            .iter()
            .position(|s| s == &self.current)
            .unwrap_or(0)
    }

    pub fn is_known(&self, id: &str) -> bool {
        self.known.iter().any(|s| s == id)
    }

    /// Navigate to a section
    ///
    /// Unknown ids are tolerated silently: the state is unchanged and no
    /// commands are produced. For a known id the command list marks the
    /// target's control selected and panel visible, every other control
    /// deselected and panel hidden, then updates the fragment and announces
    /// the change. Calling twice with the same id produces the same commands
    /// (idempotent).
    pub fn navigate(&mut self, id: &str) -> Vec<NavCommand> {
        if !self.is_known(id) {
            tracing::debug!(section = id, "ignoring navigation to unknown section");
            return Vec::new();
        }

        self.current = id.to_string();

        let mut commands = Vec::with_capacity(self.known.len() * 2 + 2);
        for section in &self.known {
            commands.push(NavCommand::SelectControl {
                section: section.clone(),
                selected: section == id,
            });
        }
        for section in &self.known {
            commands.push(NavCommand::ShowPanel {
                section: section.clone(),
                visible: section == id,
            });
        }
        commands.push(NavCommand::SetFragment(id.to_string()));
        commands.push(NavCommand::Announce(NavChanged {
            section_id: id.to_string(),
            timestamp: Utc::now(),
        }));

        commands
    }

    /// Boundary entry point for externally supplied ids (deep links,
    /// fragment changes). Identical to `navigate`; the name marks where
    /// unvalidated input enters.
    pub fn navigate_if_known(&mut self, id: &str) -> Vec<NavCommand> {
        self.navigate(id)
    }

    /// Sync with the fragment store at startup: a known fragment deep-links
    /// to that section, anything else leaves the default in place.
    pub fn init_from_fragment(&mut self, fragment: &dyn FragmentStore) -> Vec<NavCommand> {
        match fragment.get() {
            Some(id) if id != self.current => self.navigate_if_known(&id),
            _ => Vec::new(),
        }
    }

    /// Navigate to the next section in order, wrapping around
    pub fn navigate_next(&mut self) -> Vec<NavCommand> {
        let idx = (self.current_index() + 1) % self.known.len();
        let id = self.known[idx].clone();
        self.navigate(&id)
    }

    /// Navigate to the previous section in order, wrapping around
    pub fn navigate_prev(&mut self) -> Vec<NavCommand> {
        let len = self.known.len();
        let idx = (self.current_index() + len - 1) % len;
        let id = self.known[idx].clone();
        self.navigate(&id)
    }
}
