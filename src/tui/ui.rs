// UI rendering logic
//
// Renders the deck chrome (title bar, section tabs, status bar), the current
// section panel and the optional bottom panels. The section renderer also
// records the row extent of every watched element into App so the animation
// tick can compute visibility; text is pre-wrapped so extents stay exact.

use super::app::{card_id, kpi_id, timeline_id, App, BottomPanel, WatchKind, WatchedExtent};
use super::format::{truncate, wrap};
use super::theme::Theme;
use crate::nav::FragmentStore;
use crate::viewport::Extent;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

/// Render the whole frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let theme = app.theme.clone();

    let mut constraints = vec![
        Constraint::Length(1), // title bar
        Constraint::Length(3), // section tabs
        Constraint::Min(5),    // section content
    ];
    if app.bottom_panel != BottomPanel::None {
        constraints.push(Constraint::Length(9));
    }
    constraints.push(Constraint::Length(1)); // status bar

    let chunks = Layout::vertical(constraints).split(f.area());

    draw_title_bar(f, chunks[0], app, &theme);
    draw_tabs(f, chunks[1], app, &theme);
    draw_section(f, chunks[2], app, &theme);

    let status_area = if app.bottom_panel != BottomPanel::None {
        match app.bottom_panel {
            BottomPanel::Events => draw_events_panel(f, chunks[3], app, &theme),
            BottomPanel::Logs => draw_logs_panel(f, chunks[3], app, &theme),
            BottomPanel::None => unreachable!(),
        }
        chunks[4]
    } else {
        chunks[3]
    };
    draw_status_bar(f, status_area, app, &theme);

    if let Some((message, _)) = app.toast.clone() {
        draw_toast(f, &message, &theme);
    }
    if app.show_help {
        draw_help(f, &theme);
    }
}

fn draw_title_bar(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let fragment = app
        .fragment
        .get()
        .unwrap_or_else(|| app.navigator.current().to_string());
    let title = Line::from(vec![
        Span::styled(format!(" {} ", app.deck.title), theme.title_style()),
        Span::styled(format!("#{fragment}"), Style::default().fg(theme.fragment)),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_tabs(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let titles: Vec<Line> = app
        .deck
        .sections
        .iter()
        .map(|s| {
            // Selection state comes from the applied navigation commands,
            // not directly from the navigator
            let style = if app.selected_controls.contains(&s.id) {
                Style::default()
                    .fg(theme.tab_active)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.tab_inactive)
            };
            Line::from(Span::styled(s.title.clone(), style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.navigator.current_index())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        )
        .divider("│");
    f.render_widget(tabs, area);
}

/// Render the visible section and record watched element extents
fn draw_section(f: &mut Frame, area: Rect, app: &mut App, theme: &Theme) {
    let Some(section) = app
        .deck
        .sections
        .iter()
        .find(|s| app.visible_panels.contains(&s.id))
        .cloned()
    else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(Span::styled(format!(" {} ", section.title), theme.title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width as usize;
    let selected = app.selected_index();
    let mut lines: Vec<Line> = Vec::new();
    let mut watched: Vec<WatchedExtent> = Vec::new();

    if let Some(intro) = &section.intro {
        for text in wrap(intro, width) {
            lines.push(Line::from(Span::styled(
                text,
                Style::default().fg(theme.intro),
            )));
        }
        lines.push(Line::default());
    }

    // KPI row: value plus caption, two rows per element
    for (i, kpi) in section.kpis.iter().enumerate() {
        let id = kpi_id(&section.id, i);
        let top = lines.len();
        let value = app.label_text(&id, &kpi.label).to_string();
        lines.push(Line::from(Span::styled(
            format!("  {value}"),
            Style::default()
                .fg(theme.kpi_value)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", kpi.caption),
            Style::default().fg(theme.kpi_caption),
        )));
        watched.push(WatchedExtent {
            id,
            kind: WatchKind::Counter,
            extent: Extent::new(top, 2),
        });
        lines.push(Line::default());
    }

    // Cards: dim until their entrance reveal has fired
    for (i, card) in section.cards.iter().enumerate() {
        let id = card_id(&section.id, i);
        let top = lines.len();
        let revealed = app.is_revealed(&id);
        let is_selected = i == selected;

        let marker = if is_selected { "❯ " } else { "▎ " };
        let title_style = if is_selected {
            theme.selected_style()
        } else if revealed {
            Style::default()
                .fg(theme.card_title)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.card_unrevealed)
        };
        let body_style = if revealed {
            theme.base_style()
        } else {
            Style::default().fg(theme.card_unrevealed)
        };

        lines.push(Line::from(Span::styled(
            format!("{marker}{}", card.title),
            title_style,
        )));
        for text in wrap(&card.body, width.saturating_sub(2)) {
            lines.push(Line::from(Span::styled(format!("  {text}"), body_style)));
        }

        let height = lines.len() - top;
        watched.push(WatchedExtent {
            id,
            kind: WatchKind::Entrance,
            extent: Extent::new(top, height),
        });
        lines.push(Line::default());
    }

    // Timeline: collapsed rows expand to show detail
    for (i, entry) in section.timeline.iter().enumerate() {
        let id = timeline_id(&section.id, i);
        let is_selected = section.cards.len() + i == selected;
        let expanded = app.is_expanded(&id);

        let arrow = if expanded { "▾" } else { "▸" };
        let style = if is_selected {
            theme.selected_style()
        } else {
            Style::default().fg(theme.timeline)
        };
        lines.push(Line::from(Span::styled(
            format!("{arrow} {} ({})", entry.phase, entry.window),
            style,
        )));
        if expanded {
            for text in wrap(&entry.detail, width.saturating_sub(2)) {
                lines.push(Line::from(Span::styled(
                    format!("  {text}"),
                    theme.base_style(),
                )));
            }
        }
        lines.push(Line::default());
    }

    app.content_rows = lines.len();
    app.viewport_rows = inner.height as usize;
    app.layout = watched;

    let max_scroll = app.content_rows.saturating_sub(app.viewport_rows);
    let scroll = app.current_scroll().min(max_scroll);
    f.render_widget(
        Paragraph::new(lines).scroll((scroll as u16, 0)),
        inner,
    );
}

fn draw_events_panel(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(Span::styled(" Interactions ", theme.title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let records = app.log.snapshot();
    let rows = inner.height as usize;
    let width = inner.width as usize;

    let lines: Vec<Line> = records
        .iter()
        .rev()
        .take(rows)
        .rev()
        .map(|record| {
            let data = serde_json::to_string(&record.data).unwrap_or_default();
            Line::from(vec![
                Span::styled(
                    record.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(theme.kpi_caption),
                ),
                Span::styled(
                    format!("{:<20}", record.kind),
                    Style::default().fg(theme.event_kind),
                ),
                Span::styled(
                    truncate(&data, width.saturating_sub(29)),
                    theme.base_style(),
                ),
            ])
        })
        .collect();

    let content = if lines.is_empty() {
        Paragraph::new(Span::styled(
            "No interactions recorded yet",
            Style::default().fg(theme.kpi_caption),
        ))
    } else {
        Paragraph::new(lines)
    };
    f.render_widget(content, inner);
}

fn draw_logs_panel(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(Span::styled(" Logs ", theme.title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let entries = app.log_buffer.entries();
    let rows = inner.height as usize;
    let width = inner.width as usize;

    let lines: Vec<Line> = entries
        .iter()
        .rev()
        .take(rows)
        .rev()
        .map(|entry| {
            let level_color = match entry.level {
                crate::logging::LogLevel::Error => theme.log_error,
                crate::logging::LogLevel::Warn => theme.log_warn,
                crate::logging::LogLevel::Info => theme.log_info,
                _ => theme.log_debug,
            };
            Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(theme.kpi_caption),
                ),
                Span::styled(
                    format!("{:<6}", entry.level.as_str()),
                    Style::default().fg(level_color),
                ),
                Span::styled(
                    truncate(&entry.message, width.saturating_sub(15)),
                    theme.base_style(),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_status_bar(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let status = format!(
        " {} │ section {}/{} │ {} events │ {} │ ←/→ sections · ↑/↓ scroll · j/k select · ↵ activate · e/g panels · y copy · t theme · ? help · q quit",
        app.uptime(),
        app.navigator.current_index() + 1,
        app.navigator.sections().len(),
        app.log.len(),
        app.theme_kind.name(),
    );
    f.render_widget(
        Paragraph::new(truncate(&status, area.width as usize)).style(theme.status_style()),
        area,
    );
}

fn draw_toast(f: &mut Frame, message: &str, theme: &Theme) {
    let area = f.area();
    let width = (message.len() as u16 + 4).min(area.width);
    let rect = Rect {
        x: area.width.saturating_sub(width + 1),
        y: 1,
        width,
        height: 3,
    };
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style()),
            )
            .style(theme.selected_style()),
        rect,
    );
}

fn draw_help(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let width = 46.min(area.width);
    let height = 15.min(area.height);
    let rect = Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let lines = vec![
        Line::from(""),
        Line::from("  ←/→, Tab     switch section"),
        Line::from("  1-9          jump to section"),
        Line::from("  ↑/↓, PgUp/Dn scroll panel"),
        Line::from("  Home/End     top / bottom"),
        Line::from("  j/k          move selection"),
        Line::from("  Enter        activate card / timeline"),
        Line::from("  e            interactions panel"),
        Line::from("  g            log panel"),
        Line::from("  y            copy interactions (JSONL)"),
        Line::from("  t            cycle theme"),
        Line::from("  ?            toggle this help"),
        Line::from("  q            quit"),
    ];

    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style())
                    .title(Span::styled(" Keys ", theme.title_style())),
            )
            .style(theme.base_style()),
        rect,
    );
}
