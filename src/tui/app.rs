// TUI application state
//
// App is the wiring layer: it owns the navigator, the reveal animator and
// handles to the interaction log, applies the command lists the core
// components produce, and tracks the render-side state (scroll offsets,
// selection, expanded timeline entries, animated label text).

use super::input::InputHandler;
use super::theme::{Theme, ThemeKind};
use crate::config::Config;
use crate::deck::Deck;
use crate::logging::LogBuffer;
use crate::nav::{Fragment, FragmentStore, NavChanged, NavCommand, Navigator};
use crate::record::InteractionLog;
use crate::reveal::{RevealAnimator, RevealCommand};
use crate::viewport::{visible_ratio, Extent};
use anyhow::{Context, Result};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// How long toasts stay on screen
const TOAST_DURATION: Duration = Duration::from_secs(2);

/// What kind of one-shot animation an element participates in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchKind {
    Entrance,
    Counter,
}

/// Row extent of one watched element, recorded by the renderer each draw
#[derive(Debug, Clone)]
pub struct WatchedExtent {
    pub id: String,
    pub kind: WatchKind,
    pub extent: Extent,
}

/// Which bottom panel is open, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BottomPanel {
    #[default]
    None,
    Events,
    Logs,
}

pub fn card_id(section: &str, index: usize) -> String {
    format!("{section}/card/{index}")
}

pub fn kpi_id(section: &str, index: usize) -> String {
    format!("{section}/kpi/{index}")
}

pub fn timeline_id(section: &str, index: usize) -> String {
    format!("{section}/timeline/{index}")
}

/// Main application state for the TUI
pub struct App {
    pub deck: Deck,
    pub navigator: Navigator,
    pub fragment: Fragment,
    pub log: InteractionLog,
    pub log_buffer: LogBuffer,
    animator: RevealAnimator,
    nav_tx: mpsc::Sender<NavChanged>,

    /// Controls currently marked selected (exactly one after any navigation)
    pub selected_controls: HashSet<String>,
    /// Panels currently marked visible (exactly one after any navigation)
    pub visible_panels: HashSet<String>,

    /// Elements that have played their entrance reveal
    pub revealed: HashSet<String>,
    /// Animated label text overriding the deck's KPI labels
    pub labels: HashMap<String, String>,
    /// Expanded timeline entries
    pub expanded: HashSet<String>,

    /// Per-section scroll offset in content rows
    scroll: HashMap<String, usize>,
    /// Per-section selected activatable element (cards, then timeline)
    selected: HashMap<String, usize>,

    /// Watched element extents for the section drawn last frame
    pub layout: Vec<WatchedExtent>,
    /// Total content rows of the section drawn last frame
    pub content_rows: usize,
    /// Content area height in rows
    pub viewport_rows: usize,

    pub bottom_panel: BottomPanel,
    pub show_help: bool,
    pub theme_kind: ThemeKind,
    pub theme: Theme,
    pub should_quit: bool,
    pub start_time: Instant,
    pub toast: Option<(String, Instant)>,

    input: InputHandler,
    reveal_lead_rows: usize,
}

impl App {
    pub fn new(
        deck: Deck,
        config: &Config,
        log: InteractionLog,
        log_buffer: LogBuffer,
        nav_tx: mpsc::Sender<NavChanged>,
        deep_link: Option<String>,
        theme_kind: ThemeKind,
    ) -> Result<Self> {
        let navigator = Navigator::new(deck.section_ids()).context("deck has no sections")?;

        let mut animator = RevealAnimator::new(config.counter_duration());
        for section in &deck.sections {
            for (i, _) in section.cards.iter().enumerate() {
                animator.watch_entrance(&card_id(&section.id, i));
            }
            for (i, kpi) in section.kpis.iter().enumerate() {
                animator.watch_counter(&kpi_id(&section.id, i), &kpi.label);
            }
        }

        let initial = navigator.current().to_string();
        let mut app = Self {
            deck,
            navigator,
            fragment: Fragment::seeded(deep_link),
            log,
            log_buffer,
            animator,
            nav_tx,
            selected_controls: HashSet::from([initial.clone()]),
            visible_panels: HashSet::from([initial]),
            revealed: HashSet::new(),
            labels: HashMap::new(),
            expanded: HashSet::new(),
            scroll: HashMap::new(),
            selected: HashMap::new(),
            layout: Vec::new(),
            content_rows: 0,
            viewport_rows: 0,
            bottom_panel: BottomPanel::default(),
            show_help: false,
            theme_kind,
            theme: theme_kind.theme(),
            should_quit: false,
            start_time: Instant::now(),
            toast: None,
            input: InputHandler::new(),
            reveal_lead_rows: config.reveal_lead_rows,
        };

        // A known deep link navigates before any user input
        let fragment = app.fragment.clone();
        let commands = app.navigator.init_from_fragment(&fragment);
        app.apply_nav_commands(commands);

        Ok(app)
    }

    // ── Navigation ──────────────────────────────────────────────────────

    fn apply_nav_commands(&mut self, commands: Vec<NavCommand>) {
        if commands.is_empty() {
            return;
        }
        // Layout extents belong to the previous panel
        self.layout.clear();

        for command in commands {
            match command {
                NavCommand::SelectControl { section, selected } => {
                    if selected {
                        self.selected_controls.insert(section);
                    } else {
                        self.selected_controls.remove(&section);
                    }
                }
                NavCommand::ShowPanel { section, visible } => {
                    if visible {
                        self.visible_panels.insert(section);
                    } else {
                        self.visible_panels.remove(&section);
                    }
                }
                NavCommand::SetFragment(id) => self.fragment.set(&id),
                NavCommand::Announce(changed) => {
                    tracing::info!(section = %changed.section_id, "section changed");
                    let _ = self.nav_tx.try_send(changed);
                }
            }
        }
    }

    pub fn navigate_to(&mut self, id: &str) {
        let commands = self.navigator.navigate(id);
        self.apply_nav_commands(commands);
    }

    pub fn next_section(&mut self) {
        let commands = self.navigator.navigate_next();
        self.apply_nav_commands(commands);
    }

    pub fn prev_section(&mut self) {
        let commands = self.navigator.navigate_prev();
        self.apply_nav_commands(commands);
    }

    /// Jump to a section by tab index (number keys)
    pub fn select_section(&mut self, index: usize) {
        if let Some(id) = self.navigator.sections().get(index).cloned() {
            self.navigate_to(&id);
        }
    }

    // ── Scrolling and selection ─────────────────────────────────────────

    pub fn current_scroll(&self) -> usize {
        *self.scroll.get(self.navigator.current()).unwrap_or(&0)
    }

    fn max_scroll(&self) -> usize {
        self.content_rows.saturating_sub(self.viewport_rows)
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let current = self.navigator.current().to_string();
        let max = self.max_scroll();
        let offset = self.scroll.entry(current).or_insert(0);
        *offset = offset.saturating_add_signed(delta).min(max);
    }

    /// Jump to the top of the current panel (the skip-to-content affordance)
    pub fn scroll_top(&mut self) {
        self.scroll.insert(self.navigator.current().to_string(), 0);
    }

    pub fn scroll_bottom(&mut self) {
        let max = self.max_scroll();
        self.scroll.insert(self.navigator.current().to_string(), max);
    }

    /// Number of elements the selection can land on in the current section
    fn activatable_count(&self) -> usize {
        self.deck
            .section(self.navigator.current())
            .map(|s| s.cards.len() + s.timeline.len())
            .unwrap_or(0)
    }

    pub fn selected_index(&self) -> usize {
        let count = self.activatable_count();
        if count == 0 {
            return 0;
        }
        (*self.selected.get(self.navigator.current()).unwrap_or(&0)).min(count - 1)
    }

    pub fn select_next(&mut self) {
        let count = self.activatable_count();
        if count == 0 {
            return;
        }
        let idx = (self.selected_index() + 1).min(count - 1);
        self.selected.insert(self.navigator.current().to_string(), idx);
    }

    pub fn select_prev(&mut self) {
        let idx = self.selected_index().saturating_sub(1);
        self.selected.insert(self.navigator.current().to_string(), idx);
    }

    /// Activate the selected element: cards record a click, timeline
    /// entries toggle expanded/collapsed
    pub fn activate(&mut self) {
        let section_id = self.navigator.current().to_string();
        let Some(section) = self.deck.section(&section_id).cloned() else {
            return;
        };
        if section.cards.len() + section.timeline.len() == 0 {
            return;
        }

        let idx = self.selected_index();
        if idx < section.cards.len() {
            let title = &section.cards[idx].title;
            self.log.append("card_click", json!({ "card_title": title }));
            self.show_toast(&format!("Recorded card_click: {title}"));
        } else {
            let t_idx = idx - section.cards.len();
            let id = timeline_id(&section_id, t_idx);
            let expanded = if self.expanded.contains(&id) {
                self.expanded.remove(&id);
                false
            } else {
                self.expanded.insert(id);
                true
            };
            self.log.append(
                "timeline_toggle",
                json!({ "phase": section.timeline[t_idx].phase, "expanded": expanded }),
            );
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }

    /// Current display text for a KPI label: animated override or the
    /// deck's original text
    pub fn label_text<'a>(&'a self, id: &str, original: &'a str) -> &'a str {
        self.labels.get(id).map(String::as_str).unwrap_or(original)
    }

    // ── Animation tick ──────────────────────────────────────────────────

    /// Advance animations: feed visibility from the last recorded layout,
    /// then run one frame for all running counters
    pub fn tick(&mut self, now: Instant) {
        if let Some((_, shown)) = &self.toast {
            if shown.elapsed() > TOAST_DURATION {
                self.toast = None;
            }
        }

        let scroll = self.current_scroll();
        let viewport = self.viewport_rows;

        let mut commands = Vec::new();
        for watched in &self.layout {
            let lead = match watched.kind {
                WatchKind::Entrance => self.reveal_lead_rows,
                WatchKind::Counter => 0,
            };
            let ratio = visible_ratio(watched.extent, scroll, viewport, lead);
            commands.extend(self.animator.on_intersect(&watched.id, ratio, now));
        }
        commands.extend(self.animator.on_frame(now));

        for command in commands {
            match command {
                RevealCommand::Reveal { id } => {
                    self.revealed.insert(id);
                }
                RevealCommand::SetLabel { id, text } => {
                    self.labels.insert(id, text);
                }
            }
        }
    }

    // ── Chrome ──────────────────────────────────────────────────────────

    pub fn toggle_bottom_panel(&mut self, panel: BottomPanel) {
        self.bottom_panel = if self.bottom_panel == panel {
            BottomPanel::None
        } else {
            panel
        };
    }

    pub fn next_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
    }

    pub fn show_toast(&mut self, message: &str) {
        self.toast = Some((message.to_string(), Instant::now()));
    }

    pub fn copy_log_to_clipboard(&mut self) {
        if self.log.is_empty() {
            self.show_toast("No interactions recorded yet");
            return;
        }
        match super::clipboard::copy_to_clipboard(&self.log.to_jsonl()) {
            Ok(()) => self.show_toast("Copied interaction log"),
            Err(_) => self.show_toast("Clipboard unavailable"),
        }
    }

    /// Uptime as HH:MM:SS for the status bar
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }

    pub fn key_pressed(&mut self, key: crossterm::event::KeyCode) -> bool {
        self.input.key_pressed(key)
    }

    pub fn key_released(&mut self, key: crossterm::event::KeyCode) {
        self.input.key_released(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::Extent;

    fn test_app(deep_link: Option<String>) -> (App, mpsc::Receiver<NavChanged>) {
        let (tx, rx) = mpsc::channel(16);
        let app = App::new(
            Deck::embedded(),
            &Config::default(),
            InteractionLog::new(),
            LogBuffer::new(),
            tx,
            deep_link,
            ThemeKind::Dark,
        )
        .unwrap();
        (app, rx)
    }

    #[test]
    fn exactly_one_panel_visible_after_navigation() {
        let (mut app, _rx) = test_app(None);
        app.navigate_to("project-proposals");

        assert_eq!(app.visible_panels.len(), 1);
        assert!(app.visible_panels.contains("project-proposals"));
        assert_eq!(app.selected_controls.len(), 1);
        assert!(app.selected_controls.contains("project-proposals"));
    }

    #[test]
    fn navigation_updates_fragment_and_announces() {
        let (mut app, mut rx) = test_app(None);
        app.navigate_to("project-proposals");

        assert_eq!(app.fragment.get().as_deref(), Some("project-proposals"));
        let changed = rx.try_recv().unwrap();
        assert_eq!(changed.section_id, "project-proposals");
    }

    #[test]
    fn known_deep_link_navigates_on_startup() {
        let (app, mut rx) = test_app(Some("project-proposals".to_string()));
        assert_eq!(app.navigator.current(), "project-proposals");
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn unknown_deep_link_keeps_default_section() {
        let (app, mut rx) = test_app(Some("bogus".to_string()));
        assert_eq!(app.navigator.current(), app.navigator.sections()[0]);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn activating_a_card_records_a_click() {
        let (mut app, _rx) = test_app(None);
        app.activate();

        let snap = app.log.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].kind, "card_click");
        assert!(snap[0].data["card_title"].is_string());
    }

    #[test]
    fn activating_a_timeline_entry_toggles_expansion() {
        let (mut app, _rx) = test_app(None);
        app.navigate_to("project-proposals");

        let section = app.deck.section("project-proposals").unwrap().clone();
        assert!(!section.timeline.is_empty());
        // Move selection past the cards onto the first timeline entry
        for _ in 0..section.cards.len() {
            app.select_next();
        }

        let id = timeline_id("project-proposals", 0);
        app.activate();
        assert!(app.is_expanded(&id));
        app.activate();
        assert!(!app.is_expanded(&id));

        let kinds: Vec<_> = app.log.snapshot().iter().map(|r| r.kind.clone()).collect();
        assert!(kinds.iter().all(|k| k == "timeline_toggle"));
    }

    #[test]
    fn tick_reveals_visible_cards_and_animates_counters() {
        let (mut app, _rx) = test_app(None);
        let section = app.navigator.current().to_string();

        app.viewport_rows = 20;
        app.content_rows = 40;
        app.layout = vec![
            WatchedExtent {
                id: card_id(&section, 0),
                kind: WatchKind::Entrance,
                extent: Extent::new(2, 4),
            },
            WatchedExtent {
                id: kpi_id(&section, 0),
                kind: WatchKind::Counter,
                extent: Extent::new(8, 2),
            },
        ];

        let start = Instant::now();
        app.tick(start);
        assert!(app.is_revealed(&card_id(&section, 0)));
        // Counter started from zero
        assert_eq!(app.labels.get(&kpi_id(&section, 0)).unwrap(), "0");

        app.tick(start + Duration::from_millis(1500));
        assert_eq!(app.labels.get(&kpi_id(&section, 0)).unwrap(), "1,234");
    }

    #[test]
    fn offscreen_elements_do_not_reveal() {
        let (mut app, _rx) = test_app(None);
        let section = app.navigator.current().to_string();

        app.viewport_rows = 20;
        app.layout = vec![WatchedExtent {
            id: card_id(&section, 0),
            kind: WatchKind::Entrance,
            extent: Extent::new(100, 4),
        }];

        app.tick(Instant::now());
        assert!(!app.is_revealed(&card_id(&section, 0)));
    }

    #[test]
    fn scroll_is_clamped_and_per_section() {
        let (mut app, _rx) = test_app(None);
        app.viewport_rows = 10;
        app.content_rows = 25;

        app.scroll_by(100);
        assert_eq!(app.current_scroll(), 15);

        app.next_section();
        assert_eq!(app.current_scroll(), 0);

        app.prev_section();
        assert_eq!(app.current_scroll(), 15);

        app.scroll_top();
        assert_eq!(app.current_scroll(), 0);
    }
}
