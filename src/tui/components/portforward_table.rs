// Port-forward table
//
// Lists configured port forwards with their running state and exposes the
// start/stop/delete/edit actions. The table never performs an action itself:
// it reports a `TableAction` and the owner decides what to do. Start and Stop
// are gated on the in-flight flags the owner passes in.

use crate::tui::traits::{Component, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Data
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ForwardStatus {
    Running,
    #[default]
    Stopped,
}

impl ForwardStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}

/// One configured port forward, as exported by kftray
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortForwardRecord {
    pub id: i64,
    pub service: String,
    pub context: String,
    pub namespace: String,
    pub local_port: u16,
    #[serde(default)]
    pub status: ForwardStatus,
}

impl PortForwardRecord {
    /// Address a client connects to
    pub fn local_address(&self) -> String {
        format!("127.0.0.1:{}", self.local_port)
    }

    pub fn is_running(&self) -> bool {
        self.status == ForwardStatus::Running
    }
}

/// Parse a JSON array of records
pub fn parse_records(json: &str) -> serde_json::Result<Vec<PortForwardRecord>> {
    serde_json::from_str(json)
}

/// Action requested from the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    Start,
    Stop,
    Delete(i64),
    Edit(i64),
}

/// In-flight flags owned by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ForwardingFlags {
    pub is_initiating: bool,
    pub is_stopping: bool,
    pub is_port_forwarding: bool,
}

impl ForwardingFlags {
    pub fn can_start(&self) -> bool {
        !self.is_initiating && !self.is_port_forwarding
    }

    pub fn can_stop(&self) -> bool {
        !self.is_stopping && self.is_port_forwarding
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Component
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortForwardTableProps {
    pub title: String,
}

impl Default for PortForwardTableProps {
    fn default() -> Self {
        Self {
            title: "Port Forwards".to_string(),
        }
    }
}

pub struct PortForwardTable {
    props: PortForwardTableProps,
    records: Vec<PortForwardRecord>,
    flags: ForwardingFlags,
    state: TableState,
}

impl PortForwardTable {
    pub fn new(records: Vec<PortForwardRecord>, props: PortForwardTableProps) -> Self {
        let mut state = TableState::default();
        if !records.is_empty() {
            state.select(Some(0));
        }
        Self {
            props,
            records,
            flags: ForwardingFlags::default(),
            state,
        }
    }

    pub fn records(&self) -> &[PortForwardRecord] {
        &self.records
    }

    pub fn set_records(&mut self, records: Vec<PortForwardRecord>) {
        self.records = records;
        let selected = match self.state.selected() {
            _ if self.records.is_empty() => None,
            Some(i) => Some(i.min(self.records.len() - 1)),
            None => Some(0),
        };
        self.state.select(selected);
    }

    pub fn flags(&self) -> ForwardingFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: ForwardingFlags) {
        self.flags = flags;
    }

    pub fn selected(&self) -> Option<&PortForwardRecord> {
        self.state.selected().and_then(|i| self.records.get(i))
    }

    /// Map a key to an action, honoring the enabled state
    pub fn action_for_key(&self, key: &KeyEvent) -> Option<TableAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('s') if self.flags.can_start() => Some(TableAction::Start),
            KeyCode::Char('x') if self.flags.can_stop() => Some(TableAction::Stop),
            KeyCode::Char('d') | KeyCode::Delete => {
                self.selected().map(|r| TableAction::Delete(r.id))
            }
            KeyCode::Char('e') => self.selected().map(|r| TableAction::Edit(r.id)),
            _ => None,
        }
    }

    /// Mark every record with the given status
    pub fn set_all_status(&mut self, status: ForwardStatus) {
        for record in &mut self.records {
            record.status = status;
        }
    }

    /// Change one record's local port; false when the id is unknown
    pub fn set_local_port(&mut self, id: i64, port: u16) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.local_port = port;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: i64) -> Option<PortForwardRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        let removed = self.records.remove(index);
        let records = std::mem::take(&mut self.records);
        self.set_records(records);
        Some(removed)
    }

    fn select_offset(&mut self, delta: isize) {
        if self.records.is_empty() {
            return;
        }
        let current = self.state.selected().unwrap_or(0) as isize;
        let last = self.records.len() as isize - 1;
        self.state.select(Some((current + delta).clamp(0, last) as usize));
    }

    fn action_bar(&self, ctx: &RenderContext) -> Line<'static> {
        let theme = ctx.theme;
        let button = |key: &str, label: &str, enabled: bool| -> Vec<Span<'static>> {
            let (key_style, label_style) = if enabled {
                (
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    Style::default().fg(theme.text),
                )
            } else {
                (
                    Style::default().fg(theme.muted),
                    Style::default().fg(theme.muted).add_modifier(Modifier::CROSSED_OUT),
                )
            };
            vec![
                Span::styled(format!("[{key}]"), key_style),
                Span::styled(format!(" {label}  "), label_style),
            ]
        };

        let has_selection = self.selected().is_some();
        let mut spans = Vec::new();
        spans.extend(button("s", "Start", self.flags.can_start()));
        spans.extend(button("x", "Stop", self.flags.can_stop()));
        spans.extend(button("d", "Delete", has_selection));
        spans.extend(button("e", "Edit", has_selection));

        if self.flags.is_initiating {
            spans.push(Span::styled(
                format!("{} starting…", ctx.spinner_char()),
                Style::default().fg(theme.warning),
            ));
        } else if self.flags.is_stopping {
            spans.push(Span::styled(
                format!("{} stopping…", ctx.spinner_char()),
                Style::default().fg(theme.warning),
            ));
        }
        Line::from(spans)
    }
}

impl Component for PortForwardTable {
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let [table_area, bar_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

        let rows: Vec<Row> = self
            .records
            .iter()
            .map(|record| {
                let style = if record.is_running() {
                    Style::default().fg(theme.success)
                } else {
                    Style::default().fg(theme.danger)
                };
                Row::new(vec![
                    Cell::from(record.service.clone()),
                    Cell::from(record.context.clone()),
                    Cell::from(record.namespace.clone()),
                    Cell::from(record.local_port.to_string()),
                    Cell::from(record.status.as_str()),
                ])
                .style(style)
            })
            .collect();

        let title = format!(" {} ({}) ", self.props.title, self.records.len());
        let table = Table::new(
            rows,
            [
                Constraint::Percentage(25),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(15),
                Constraint::Percentage(20),
            ],
        )
        .header(
            Row::new(vec!["Service", "Context", "Namespace", "Local Port", "Status"])
                .style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(theme.focus_border(ctx.focused))
                .title(Span::styled(title, Style::default().fg(theme.accent))),
        )
        .row_highlight_style(Style::default().bg(theme.surface).fg(theme.text));

        f.render_stateful_widget(table, table_area, &mut self.state);
        f.render_widget(Paragraph::new(self.action_bar(ctx)), bar_area);
    }

    fn desired_height(&self, _width: u16) -> u16 {
        // header + borders + action bar
        self.records.len() as u16 + 4
    }
}

impl Interactive for PortForwardTable {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if key.kind != KeyEventKind::Press {
            return Handled::No;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_offset(-1);
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_offset(1);
                Handled::Yes
            }
            KeyCode::Home => {
                self.select_offset(isize::MIN / 2);
                Handled::Yes
            }
            KeyCode::End => {
                self.select_offset(isize::MAX / 2);
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:select  s:start  x:stop  d:delete  e:edit  c:copy address")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn record(id: i64, service: &str, port: u16, status: ForwardStatus) -> PortForwardRecord {
        PortForwardRecord {
            id,
            service: service.to_string(),
            context: "kind-local".to_string(),
            namespace: "default".to_string(),
            local_port: port,
            status,
        }
    }

    fn table() -> PortForwardTable {
        PortForwardTable::new(
            vec![
                record(1, "api", 8080, ForwardStatus::Running),
                record(2, "db", 5432, ForwardStatus::Stopped),
            ],
            PortForwardTableProps::default(),
        )
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_parse_camel_case_records() {
        let json = r#"[
            {"id": 7, "service": "grafana", "context": "prod", "namespace": "monitoring",
             "localPort": 3000, "status": "running"},
            {"id": 8, "service": "redis", "context": "prod", "namespace": "cache",
             "localPort": 6379}
        ]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].local_port, 3000);
        assert!(records[0].is_running());
        assert_eq!(records[1].status, ForwardStatus::Stopped);

        let out = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(out["localPort"], 3000);
    }

    #[test]
    fn test_start_disabled_while_initiating_or_forwarding() {
        let mut table = table();
        assert_eq!(table.action_for_key(&key('s')), Some(TableAction::Start));

        table.set_flags(ForwardingFlags {
            is_initiating: true,
            ..Default::default()
        });
        assert_eq!(table.action_for_key(&key('s')), None);

        table.set_flags(ForwardingFlags {
            is_port_forwarding: true,
            ..Default::default()
        });
        assert_eq!(table.action_for_key(&key('s')), None);
    }

    #[test]
    fn test_stop_requires_forwarding_and_not_stopping() {
        let mut table = table();
        assert_eq!(table.action_for_key(&key('x')), None);

        table.set_flags(ForwardingFlags {
            is_port_forwarding: true,
            ..Default::default()
        });
        assert_eq!(table.action_for_key(&key('x')), Some(TableAction::Stop));

        table.set_flags(ForwardingFlags {
            is_port_forwarding: true,
            is_stopping: true,
            ..Default::default()
        });
        assert_eq!(table.action_for_key(&key('x')), None);
    }

    #[test]
    fn test_row_actions_target_selection() {
        let mut table = table();
        table.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(table.action_for_key(&key('d')), Some(TableAction::Delete(2)));
        assert_eq!(table.action_for_key(&key('e')), Some(TableAction::Edit(2)));

        table.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(table.selected().map(|r| r.id), Some(2));
    }

    #[test]
    fn test_remove_keeps_selection_in_bounds() {
        let mut table = table();
        table.handle_key(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        assert!(table.remove(2).is_some());
        assert_eq!(table.selected().map(|r| r.id), Some(1));
        assert!(table.remove(1).is_some());
        assert!(table.selected().is_none());
        assert_eq!(table.action_for_key(&key('d')), None);
        assert!(table.remove(42).is_none());
    }

    #[test]
    fn test_set_local_port_updates_address() {
        let mut table = table();
        assert!(table.set_local_port(1, 9090));
        assert_eq!(
            table.selected().map(|r| r.local_address()),
            Some("127.0.0.1:9090".to_string())
        );
        assert!(!table.set_local_port(7, 1));
    }

    #[test]
    fn test_render_colors_rows_by_status() {
        let mut table = table();
        let theme = Theme::auto();
        let mut terminal = Terminal::new(TestBackend::new(60, 7)).unwrap();
        terminal
            .draw(|f| table.render(f, f.area(), &RenderContext::new(&theme, 0)))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String {
            (0..60).map(|x| buffer[(x, y)].symbol().to_string()).collect()
        };
        assert!(row(0).contains("Port Forwards (2)"));
        assert!(row(1).contains("Service"));
        assert!(row(2).contains("api"));
        assert!(row(3).contains("db"));
        assert!(row(6).starts_with("[s] Start"));
        assert_eq!(buffer[(1, 3)].fg, theme.danger);
    }
}
