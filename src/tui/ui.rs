// UI rendering logic
//
// One draw function lays out the gallery: the copy row on top, the
// port-forward table and accordion on the left, the smaller inputs and
// indicators on the right, then status, logs and footer. Overlays (hover
// card, toast) are drawn last so they sit above everything else.

use super::app::{App, Focus};
use super::traits::{Component, RenderContext};
use crate::clipboard::{ClipboardWriter, Clock};
use crate::logging::{LogEntry, LogLevel};
use crate::shell::DesktopShell;
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Height of the log strip, borders included
const LOG_HEIGHT: u16 = 6;

/// Main UI render function - called on every frame
pub fn draw<W, S, C>(f: &mut Frame, app: &mut App<W, S, C>)
where
    W: ClipboardWriter,
    S: DesktopShell + 'static,
    C: Clock,
{
    let [title, copy_row, main, status, logs, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(1),
        Constraint::Length(LOG_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_title(f, title, &app.theme);
    render_copy_row(f, copy_row, app);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(58), Constraint::Percentage(42)]).areas(main);
    render_left_column(f, left, app);
    let hover_target = render_right_column(f, right, app);

    render_status(f, status, app);
    render_logs(f, logs, app);

    let hint = app.focus_hint();
    app.footer.set_context_hint(hint);
    let ctx = RenderContext::new(&app.theme, app.animation_frame);
    app.footer.render(f, footer, &ctx);

    // Overlays
    let ctx = ctx.with_focus(app.is_focused(Focus::HoverCard));
    app.hover_card.render(f, hover_target, &ctx);
    if let Some((toast, _)) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}

fn render_title(f: &mut Frame, area: Rect, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(
            " kftray-ui ",
            Style::default()
                .fg(theme.background)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" component gallery", Style::default().fg(theme.subtext)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_copy_row<W, S, C>(f: &mut Frame, area: Rect, app: &mut App<W, S, C>)
where
    W: ClipboardWriter,
    S: DesktopShell + 'static,
    C: Clock,
{
    let focused_row = matches!(app.focus, Focus::Copy(_));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(app.theme.focus_border(focused_row))
        .title(" Copy to clipboard ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Each control gets its own width plus a gap
    let constraints: Vec<Constraint> = app
        .copies
        .iter()
        .map(|control| Constraint::Length(control.width() + 2))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let cells = Layout::horizontal(constraints).split(inner);

    let theme = &app.theme;
    for (i, control) in app.copies.iter_mut().enumerate() {
        control.render(f, cells[i], app.focus == Focus::Copy(i), theme);
    }
}

fn render_left_column<W, S, C>(f: &mut Frame, area: Rect, app: &mut App<W, S, C>)
where
    W: ClipboardWriter,
    S: DesktopShell + 'static,
    C: Clock,
{
    let table_height = app.table.desired_height(area.width);
    let [table_area, address_area, accordion_area] = Layout::vertical([
        Constraint::Max(table_height),
        Constraint::Length(1),
        Constraint::Min(3),
    ])
    .areas(area);

    let ctx = RenderContext::new(&app.theme, app.animation_frame);
    app.table
        .render(f, table_area, &ctx.with_focus(app.focus == Focus::Table));

    // Selected row's address with its copy icon
    let address = app.address_copy.controller().value().to_string();
    let label = if address.is_empty() {
        " no forward selected".to_string()
    } else {
        format!(" {address} ")
    };
    let label_width = (label.chars().count() as u16).min(address_area.width);
    let [label_area, icon_area] =
        Layout::horizontal([Constraint::Length(label_width), Constraint::Min(0)])
            .areas(address_area);
    f.render_widget(
        Paragraph::new(Span::styled(label, Style::default().fg(app.theme.subtext))),
        label_area,
    );
    let theme = &app.theme;
    app.address_copy.render(f, icon_area, false, theme);

    app.accordion.render(
        f,
        accordion_area,
        &ctx.with_focus(app.focus == Focus::Accordion),
    );
}

/// Returns the row the hover card target sits on, drawn later as an overlay
fn render_right_column<W, S, C>(f: &mut Frame, area: Rect, app: &mut App<W, S, C>) -> Rect
where
    W: ClipboardWriter,
    S: DesktopShell + 'static,
    C: Clock,
{
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(" Components ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let quote_height = app.blockquote.desired_height(inner.width);
    let skeleton_height = app.skeleton.desired_height(inner.width);
    let [hover, quote, numeric, pin, progress, circle, skeleton] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(quote_height + 1),
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Min(skeleton_height),
    ])
    .areas(inner);

    let theme = &app.theme;
    let ctx = RenderContext::new(theme, app.animation_frame);
    let focus = app.focus;

    let hover_target = labelled(f, hover, "Hover card", theme);
    app.blockquote.render(f, first_rows(quote, quote_height), &ctx);

    let numeric_area = labelled(f, numeric, "Numeric input", theme);
    app.numeric.render(
        f,
        numeric_area,
        &ctx.with_focus(focus == Focus::NumericInput),
    );

    let pin_area = labelled(f, pin, "Pin input", theme);
    app.pin
        .render(f, pin_area, &ctx.with_focus(focus == Focus::PinInput));

    let progress_area = labelled(f, progress, "Running forwards", theme);
    app.progress.render(f, progress_area, &ctx);
    let circle_area = labelled(f, circle, "Progress circle", theme);
    app.circle.render(f, circle_area, &ctx);

    let skeleton_area = labelled(f, skeleton, "About", theme);
    app.skeleton.render(f, skeleton_area, &ctx);

    hover_target
}

/// Draw a caption on the first row; returns the rows below it
fn labelled(f: &mut Frame, area: Rect, caption: &str, theme: &Theme) -> Rect {
    if area.height == 0 {
        return area;
    }
    f.render_widget(
        Paragraph::new(Span::styled(
            caption.to_string(),
            Style::default().fg(theme.muted),
        )),
        Rect::new(area.x, area.y, area.width, 1),
    );
    Rect::new(
        area.x,
        area.y + 1,
        area.width,
        area.height.saturating_sub(1),
    )
}

fn first_rows(area: Rect, rows: u16) -> Rect {
    Rect::new(area.x, area.y, area.width, rows.min(area.height))
}

fn render_status<W, S, C>(f: &mut Frame, area: Rect, app: &App<W, S, C>)
where
    W: ClipboardWriter,
    S: DesktopShell + 'static,
    C: Clock,
{
    let text = app.announcement().unwrap_or_default();
    f.render_widget(
        Paragraph::new(Span::styled(
            format!(" {text}"),
            Style::default().fg(app.theme.subtext),
        )),
        area,
    );
}

fn render_logs<W, S, C>(f: &mut Frame, area: Rect, app: &App<W, S, C>)
where
    W: ClipboardWriter,
    S: DesktopShell + 'static,
    C: Clock,
{
    let height = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .log_buffer
        .recent(height)
        .iter()
        .map(|entry| ListItem::new(format_log_entry(entry)).style(log_level_style(entry.level, &app.theme)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border))
            .title(" Logs "),
    );
    f.render_widget(list, area);
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn log_level_style(level: LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.danger)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.warning),
        LogLevel::Info => Style::default().fg(theme.accent),
        LogLevel::Debug => Style::default().fg(theme.subtext),
        LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::testing::FakeClipboard;
    use crate::clipboard::ManualClock;
    use crate::config::Config;
    use crate::logging::LogBuffer;
    use crate::shell::NativeShell;
    use crate::tui::app::sample_records;
    use crate::tui::components::Toast;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_gallery_draws_every_section() {
        let (tx, _rx) = mpsc::channel(4);
        let (notify_tx, _notify_rx) = mpsc::channel(4);
        let mut app = App::new(
            &Config::default(),
            FakeClipboard::default(),
            Arc::new(NativeShell::with_version("0.0.1", notify_tx)),
            tx,
            LogBuffer::new(),
            sample_records(),
            ManualClock::new(),
        );
        app.show_toast(Toast::success("Saved"));

        let mut terminal = Terminal::new(TestBackend::new(120, 48)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let text = screen(&terminal);

        assert!(text.contains("component gallery"));
        assert!(text.contains("Copy to clipboard"));
        assert!(text.contains("api-gateway"));
        assert!(text.contains("127.0.0.1:8080"));
        assert!(text.contains("Accordion"));
        assert!(text.contains("Numeric input"));
        assert!(text.contains("Logs"));
        assert!(text.contains("Saved"));
        assert!(text.contains("Button: Copy"));
    }
}
