// Visibility-triggered one-shot animations
//
// Two uses of the same mechanism:
// - Entrance reveal: once an element has been sufficiently visible it is
//   permanently marked revealed. Scrolling it back out changes nothing.
// - Counter reveal: a numeric label counts up from 0 to its displayed value
//   over a fixed duration with an ease-out-quart curve, then stops for good.
//
// The animator is headless. Callers feed it visibility ratios (from
// viewport::visible_ratio) and frame instants; it answers with commands
// describing what text to write where. Time always comes in as a parameter
// so tests can drive the clock.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Minimum visible fraction before an entrance reveal fires
pub const ENTRANCE_THRESHOLD: f64 = 0.10;

/// Minimum visible fraction before a counter starts counting
pub const COUNTER_THRESHOLD: f64 = 0.50;

/// Rows shaved off the viewport bottom for entrance reveals, so elements
/// reveal shortly after crossing the fold rather than at the very edge
pub const ENTRANCE_LEAD_ROWS: usize = 2;

/// Default count-up duration
pub const COUNTER_DURATION: Duration = Duration::from_millis(1500);

/// Ease-out quartic: fast start, decelerating into the endpoint
///
/// Defined for t in [0, 1]; 0 maps to 0, 1 maps to 1, monotonically
/// increasing in between.
pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

/// How a counter label renders its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterStyle {
    /// Grouped integer, e.g. "1,234"
    Plain,
    /// "85%"
    Percentage,
    /// "+12%"
    SignedPercentage,
}

fn digit_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"))
}

/// Extract the animation target and style from a label's display text
///
/// All digit runs are concatenated, so grouped values like "1,234" parse as
/// 1234. A leading '+' means signed-percentage, a '%' anywhere means
/// percentage. Labels with no digits (or values too large for u64) yield
/// None and are skipped by the animator.
pub fn parse_label(text: &str) -> Option<(u64, CounterStyle)> {
    let digits: String = digit_runs()
        .find_iter(text)
        .map(|m| m.as_str())
        .collect();
    if digits.is_empty() {
        return None;
    }
    let target: u64 = digits.parse().ok()?;

    let style = if text.trim_start().starts_with('+') {
        CounterStyle::SignedPercentage
    } else if text.contains('%') {
        CounterStyle::Percentage
    } else {
        CounterStyle::Plain
    };

    Some((target, style))
}

/// Group an integer with thousands separators
pub fn format_grouped(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (count, ch) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, ch);
    }
    result
}

/// Render a counter value in its detected style
pub fn format_value(value: u64, style: CounterStyle) -> String {
    match style {
        CounterStyle::Plain => format_grouped(value),
        CounterStyle::Percentage => format!("{value}%"),
        CounterStyle::SignedPercentage => format!("+{value}%"),
    }
}

/// What the UI must do in response to visibility or frame input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealCommand {
    /// Apply the persistent revealed state to an element
    Reveal { id: String },
    /// Write new display text to a counter label
    SetLabel { id: String, text: String },
}

/// An armed counter waiting for its element to become visible
#[derive(Debug)]
struct ArmedCounter {
    target: u64,
    style: CounterStyle,
}

/// A counter animation in flight
#[derive(Debug)]
struct RunningCounter {
    id: String,
    target: u64,
    style: CounterStyle,
    started: Instant,
}

/// One-shot reveal and counter animation scheduler
pub struct RevealAnimator {
    duration: Duration,
    /// Entrance targets not yet revealed
    pending: HashSet<String>,
    /// Entrance targets that already fired
    revealed: HashSet<String>,
    /// Counters waiting for visibility; removed permanently once triggered
    armed: HashMap<String, ArmedCounter>,
    running: Vec<RunningCounter>,
}

impl RevealAnimator {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            pending: HashSet::new(),
            revealed: HashSet::new(),
            armed: HashMap::new(),
            running: Vec::new(),
        }
    }

    /// Watch an element for the entrance reveal
    pub fn watch_entrance(&mut self, id: &str) {
        if !self.revealed.contains(id) {
            self.pending.insert(id.to_string());
        }
    }

    /// Watch a numeric label for the counter reveal
    ///
    /// Labels whose text yields no parsable target are skipped silently.
    pub fn watch_counter(&mut self, id: &str, label_text: &str) {
        match parse_label(label_text) {
            Some((target, style)) => {
                self.armed.insert(id.to_string(), ArmedCounter { target, style });
            }
            None => {
                tracing::debug!(id, label_text, "label has no numeric target, skipping");
            }
        }
    }

    /// Feed one visibility observation for a watched element
    ///
    /// Entrance targets fire at ENTRANCE_THRESHOLD, counters at
    /// COUNTER_THRESHOLD. Both are one-shot: once fired, later observations
    /// for the same id do nothing.
    pub fn on_intersect(&mut self, id: &str, ratio: f64, now: Instant) -> Vec<RevealCommand> {
        let mut commands = Vec::new();

        if ratio >= ENTRANCE_THRESHOLD && self.pending.remove(id) {
            self.revealed.insert(id.to_string());
            commands.push(RevealCommand::Reveal { id: id.to_string() });
        }

        if ratio >= COUNTER_THRESHOLD {
            // Removing the entry is the "unobserve": re-entry cannot re-arm
            if let Some(counter) = self.armed.remove(id) {
                commands.push(RevealCommand::SetLabel {
                    id: id.to_string(),
                    text: format_value(0, counter.style),
                });
                self.running.push(RunningCounter {
                    id: id.to_string(),
                    target: counter.target,
                    style: counter.style,
                    started: now,
                });
            }
        }

        commands
    }

    /// Advance all running counters to `now`
    ///
    /// Each running counter yields one label write; counters that reach full
    /// progress emit their final value and stop scheduling.
    pub fn on_frame(&mut self, now: Instant) -> Vec<RevealCommand> {
        let duration = self.duration;
        let mut commands = Vec::with_capacity(self.running.len());
        let mut still_running = Vec::new();

        for counter in self.running.drain(..) {
            let elapsed = now.saturating_duration_since(counter.started);
            let progress = (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0);
            let value = (counter.target as f64 * ease_out_quart(progress)).round() as u64;

            commands.push(RevealCommand::SetLabel {
                id: counter.id.clone(),
                text: format_value(value, counter.style),
            });

            if progress < 1.0 {
                still_running.push(counter);
            }
        }

        self.running = still_running;
        commands
    }

    /// Whether any counter still wants frame callbacks
    pub fn needs_frame(&self) -> bool {
        !self.running.is_empty()
    }

    /// Whether an entrance target has fired
    pub fn is_revealed(&self, id: &str) -> bool {
        self.revealed.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_label_text(commands: &[RevealCommand]) -> Option<String> {
        commands.iter().find_map(|c| match c {
            RevealCommand::SetLabel { text, .. } => Some(text.clone()),
            _ => None,
        })
    }

    #[test]
    fn ease_out_quart_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
    }

    #[test]
    fn ease_out_quart_is_monotonic() {
        let mut prev = ease_out_quart(0.0);
        for i in 1..=100 {
            let t = i as f64 / 100.0;
            let v = ease_out_quart(t);
            assert!(v >= prev, "not monotonic at t={t}");
            prev = v;
        }
    }

    #[test]
    fn parses_grouped_integer_label() {
        assert_eq!(parse_label("1,234"), Some((1234, CounterStyle::Plain)));
    }

    #[test]
    fn parses_percentage_label() {
        assert_eq!(parse_label("85%"), Some((85, CounterStyle::Percentage)));
    }

    #[test]
    fn parses_signed_percentage_label() {
        assert_eq!(
            parse_label("+12%"),
            Some((12, CounterStyle::SignedPercentage))
        );
    }

    #[test]
    fn label_without_digits_is_unparsable() {
        assert_eq!(parse_label("n/a"), None);
        assert_eq!(parse_label(""), None);
    }

    #[test]
    fn grouping_inserts_thousands_separators() {
        assert_eq!(format_grouped(42), "42");
        assert_eq!(format_grouped(1234), "1,234");
        assert_eq!(format_grouped(1234567), "1,234,567");
    }

    #[test]
    fn entrance_reveal_fires_once_at_threshold() {
        let mut animator = RevealAnimator::new(COUNTER_DURATION);
        animator.watch_entrance("s/card/0");
        let now = Instant::now();

        assert!(animator.on_intersect("s/card/0", 0.05, now).is_empty());
        assert!(!animator.is_revealed("s/card/0"));

        let commands = animator.on_intersect("s/card/0", 0.10, now);
        assert_eq!(
            commands,
            vec![RevealCommand::Reveal {
                id: "s/card/0".to_string()
            }]
        );
        assert!(animator.is_revealed("s/card/0"));

        // No un-reveal, no second fire
        assert!(animator.on_intersect("s/card/0", 1.0, now).is_empty());
        assert!(animator.is_revealed("s/card/0"));
    }

    #[test]
    fn counter_waits_for_half_visibility() {
        let mut animator = RevealAnimator::new(COUNTER_DURATION);
        animator.watch_counter("s/kpi/0", "85%");
        let now = Instant::now();

        assert!(animator.on_intersect("s/kpi/0", 0.4, now).is_empty());
        assert!(!animator.needs_frame());

        let commands = animator.on_intersect("s/kpi/0", 0.5, now);
        assert_eq!(set_label_text(&commands), Some("0%".to_string()));
        assert!(animator.needs_frame());
    }

    #[test]
    fn counter_reaches_final_value_and_stops() {
        let mut animator = RevealAnimator::new(COUNTER_DURATION);
        animator.watch_counter("s/kpi/0", "1,234");
        let start = Instant::now();
        animator.on_intersect("s/kpi/0", 1.0, start);

        // Midway: some value strictly between 0 and the target
        let mid = animator.on_frame(start + Duration::from_millis(750));
        let mid_text = set_label_text(&mid).unwrap();
        assert_ne!(mid_text, "0");
        assert_ne!(mid_text, "1,234");

        let done = animator.on_frame(start + COUNTER_DURATION);
        assert_eq!(set_label_text(&done), Some("1,234".to_string()));
        assert!(!animator.needs_frame());

        // Self-terminated: further frames yield nothing
        assert!(animator
            .on_frame(start + COUNTER_DURATION + Duration::from_secs(1))
            .is_empty());
    }

    #[test]
    fn signed_percentage_renders_with_plus_throughout() {
        let mut animator = RevealAnimator::new(COUNTER_DURATION);
        animator.watch_counter("s/kpi/1", "+12%");
        let start = Instant::now();

        let initial = animator.on_intersect("s/kpi/1", 0.9, start);
        assert_eq!(set_label_text(&initial), Some("+0%".to_string()));

        let done = animator.on_frame(start + COUNTER_DURATION);
        assert_eq!(set_label_text(&done), Some("+12%".to_string()));
    }

    #[test]
    fn counter_does_not_rearm_after_firing() {
        let mut animator = RevealAnimator::new(Duration::from_millis(100));
        animator.watch_counter("s/kpi/0", "85%");
        let start = Instant::now();

        animator.on_intersect("s/kpi/0", 1.0, start);
        animator.on_frame(start + Duration::from_millis(100));
        assert!(!animator.needs_frame());

        // Element scrolls out and back in: nothing happens
        let commands = animator.on_intersect("s/kpi/0", 1.0, start + Duration::from_secs(2));
        assert!(commands.is_empty());
        assert!(!animator.needs_frame());
    }

    #[test]
    fn unparsable_label_is_never_animated() {
        let mut animator = RevealAnimator::new(COUNTER_DURATION);
        animator.watch_counter("s/kpi/0", "TBD");
        let commands = animator.on_intersect("s/kpi/0", 1.0, Instant::now());
        assert!(commands.is_empty());
        assert!(!animator.needs_frame());
    }

    #[test]
    fn counter_values_never_decrease() {
        let mut animator = RevealAnimator::new(COUNTER_DURATION);
        animator.watch_counter("s/kpi/0", "1,234");
        let start = Instant::now();
        animator.on_intersect("s/kpi/0", 1.0, start);

        let mut prev = 0u64;
        for ms in (0..=1500).step_by(100) {
            let commands = animator.on_frame(start + Duration::from_millis(ms));
            if let Some(text) = set_label_text(&commands) {
                let value: u64 = text.replace(',', "").parse().unwrap();
                assert!(value >= prev, "value decreased at {ms}ms");
                prev = value;
            }
        }
        assert_eq!(prev, 1234);
    }
}
