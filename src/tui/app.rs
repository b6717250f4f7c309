// App state for the component gallery
//
// Owns every mounted component, the timer arena and the sender that
// background tasks (clipboard writes, shell calls) report back through.
// All state changes happen on the event-loop task; spawned work only ever
// sends an `AppMessage`.

use crate::clipboard::{
    ClipboardController, ClipboardError, ClipboardWriter, Clock, ControllerId, CopyControl,
    CopyRequest, CopyTrigger, IndicatorProps, IndicatorView, LabelVisibility, ResetCopied,
    Scheduler, SystemClock, TimerHandle, TriggerProps, TriggerShape,
};
use crate::config::{Config, APP_NAME};
use crate::logging::LogBuffer;
use crate::shell::{
    DesktopShell, FileFilter, Notification, OpenDialogOptions, SaveDialogOptions, ShellError,
};
use crate::theme::Theme;
use crate::tui::components::{
    parse_records, Accordion, AccordionItem, Blockquote, BlockquoteProps, Footer, FooterProps,
    ForwardStatus, HoverCard, HoverCardProps, NumericInput, NumericInputProps, PinInput,
    PortForwardRecord, PortForwardTable, PortForwardTableProps, ProgressBar, ProgressCircle,
    ProgressCircleProps, Skeleton, TableAction, Toast, TOAST_DURATION,
};
use crate::tui::traits::{Handled, Interactive};
use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Simulated time for a port-forward start or stop to settle
pub const FORWARD_SETTLE: Duration = Duration::from_millis(800);

/// Shapes in the copy row, in focus order
const COPY_SLOTS: [(&str, TriggerShape); 4] = [
    ("Button", TriggerShape::Button),
    ("Link", TriggerShape::Link),
    ("Icon", TriggerShape::Icon),
    ("Hidden label", TriggerShape::Button),
];

// ─────────────────────────────────────────────────────────────────────────────
// Timers and messages
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardOp {
    Start,
    Stop,
}

/// Everything the gallery schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTimer {
    ResetCopied(ResetCopied),
    ExpireToast,
    ForwardingSettled(ForwardOp),
}

impl From<ResetCopied> for UiTimer {
    fn from(reset: ResetCopied) -> Self {
        Self::ResetCopied(reset)
    }
}

/// Results reported back by background tasks
#[derive(Debug)]
pub enum AppMessage {
    CopyFinished {
        target: ControllerId,
        result: Result<(), ClipboardError>,
    },
    Version(Result<String, ShellError>),
    /// `None` when the dialog was cancelled
    RecordsImported(anyhow::Result<Option<Vec<PortForwardRecord>>>),
    RecordsExported(anyhow::Result<Option<PathBuf>>),
}

/// Which component receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Index into the copy row
    Copy(usize),
    Table,
    Accordion,
    HoverCard,
    NumericInput,
    PinInput,
}

const FOCUS_TAIL: [Focus; 5] = [
    Focus::Table,
    Focus::Accordion,
    Focus::HoverCard,
    Focus::NumericInput,
    Focus::PinInput,
];

/// Records shown when nothing was loaded with `--configs`
pub fn sample_records() -> Vec<PortForwardRecord> {
    [
        (1, "api-gateway", "staging", 8080),
        (2, "postgres", "data", 5432),
        (3, "grafana", "monitoring", 3000),
    ]
    .into_iter()
    .map(|(id, service, namespace, local_port)| PortForwardRecord {
        id,
        service: service.to_string(),
        context: "kind-local".to_string(),
        namespace: namespace.to_string(),
        local_port,
        status: ForwardStatus::Stopped,
    })
    .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// App
// ─────────────────────────────────────────────────────────────────────────────

pub struct App<W: ClipboardWriter, S: DesktopShell + 'static, C: Clock = SystemClock> {
    pub theme: Theme,
    pub timers: Scheduler<UiTimer, C>,
    tx: mpsc::Sender<AppMessage>,
    shell: Arc<S>,
    writer: W,
    reset_after: Duration,

    pub focus: Focus,
    /// Copy row, one control per `COPY_SLOTS` entry
    pub copies: Vec<CopyControl<W>>,
    /// Copies the selected row's local address
    pub address_copy: CopyControl<W>,
    pub table: PortForwardTable,
    pub accordion: Accordion,
    pub hover_card: HoverCard,
    pub blockquote: Blockquote,
    pub numeric: NumericInput,
    pub pin: PinInput,
    pub progress: ProgressBar,
    pub circle: ProgressCircle,
    pub skeleton: Skeleton,
    pub footer: Footer,

    pub toast: Option<(Toast, TimerHandle)>,
    pub log_buffer: LogBuffer,
    pub animation_frame: usize,
    pending_forward: Option<TimerHandle>,
    /// Copies waiting for the in-flight write, oldest first
    copy_queue: VecDeque<CopyRequest>,
    copy_in_flight: bool,
    torn_down: bool,
    /// Record whose port the numeric input is editing
    editing: Option<i64>,
    pub should_quit: bool,
}

impl<W: ClipboardWriter, S: DesktopShell + 'static, C: Clock> App<W, S, C> {
    pub fn new(
        config: &Config,
        writer: W,
        shell: Arc<S>,
        tx: mpsc::Sender<AppMessage>,
        log_buffer: LogBuffer,
        records: Vec<PortForwardRecord>,
        clock: C,
    ) -> Self {
        let defaults = &config.components;
        let reset_after = config.copy_reset_after();

        let copies = COPY_SLOTS
            .iter()
            .enumerate()
            .map(|(i, (_, shape))| {
                let visibility = match i {
                    2 => LabelVisibility::IconOnly,
                    3 => LabelVisibility::ScreenReaderOnly,
                    _ => config.clipboard.label_visibility,
                };
                let indicator = IndicatorProps {
                    visibility,
                    ..config.clipboard.indicator_props()
                };
                copy_control(
                    &writer,
                    "kubectl port-forward svc/api-gateway 8080:80",
                    reset_after,
                    defaults.trigger_props(*shape),
                    indicator,
                )
            })
            .collect();

        let address_copy = copy_control(
            &writer,
            "",
            reset_after,
            TriggerProps {
                hotkey: Some('c'),
                ..defaults.trigger_props(TriggerShape::Icon)
            },
            IndicatorProps {
                visibility: LabelVisibility::IconOnly,
                ..config.clipboard.indicator_props()
            },
        );

        let first_port = records.first().map_or(8080.0, |r| f64::from(r.local_port));
        let numeric = NumericInput::new(NumericInputProps {
            label: "Local port".to_string(),
            min: Some(1.0),
            max: Some(f64::from(u16::MAX)),
            precision: 0,
            default_value: first_port,
            ..defaults.numeric_props()
        });

        let hover_card = HoverCard::new(HoverCardProps {
            target: "kind-local".to_string(),
            title: Some("Cluster context".to_string()),
            lines: vec![
                "server: https://127.0.0.1:6443".to_string(),
                "user: kind-local".to_string(),
                "namespace: default".to_string(),
            ],
            width: defaults.hover_card_width,
        });

        let accordion = Accordion::new(
            vec![
                AccordionItem::new(
                    "What is a port forward?",
                    "A local port tunnelled to a pod or service through the Kubernetes API.",
                ),
                AccordionItem::new(
                    "Why does Start stay disabled?",
                    "Start is disabled while forwards are starting or already running.",
                ),
                AccordionItem::new(
                    "Where are configs stored?",
                    "Export writes them as JSON; import reads the same format back.",
                ),
            ],
            defaults.accordion_props(),
        );

        let blockquote = Blockquote::new(BlockquoteProps {
            text: "Copy a local address and paste it straight into your client.".to_string(),
            cite: Some("kftray docs".to_string()),
            icon: Some("»".to_string()),
            color: None,
        });

        let mut app = Self {
            theme: Theme::by_name(&config.theme),
            timers: Scheduler::with_clock(clock),
            tx,
            shell,
            writer,
            reset_after,
            focus: Focus::Copy(0),
            copies,
            address_copy,
            table: PortForwardTable::new(records, PortForwardTableProps::default()),
            accordion,
            hover_card,
            blockquote,
            numeric,
            pin: PinInput::new(defaults.pin_props()),
            progress: ProgressBar::new(defaults.progress_props()),
            circle: ProgressCircle::new(ProgressCircleProps {
                label: Some("running".to_string()),
                ..Default::default()
            }),
            skeleton: Skeleton::new(defaults.skeleton_props()),
            footer: Footer::new(FooterProps {
                app_name: APP_NAME.to_string(),
                ..Default::default()
            }),
            toast: None,
            log_buffer,
            animation_frame: 0,
            pending_forward: None,
            copy_queue: VecDeque::new(),
            copy_in_flight: false,
            torn_down: false,
            editing: None,
            should_quit: false,
        };
        app.sync_address();
        app.update_progress();
        app
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Focus
    // ─────────────────────────────────────────────────────────────────────────

    fn focus_ring(&self) -> Vec<Focus> {
        (0..self.copies.len())
            .map(Focus::Copy)
            .chain(FOCUS_TAIL)
            .collect()
    }

    fn cycle_focus(&mut self, forward: bool) {
        let ring = self.focus_ring();
        let current = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % ring.len()
        } else {
            (current + ring.len() - 1) % ring.len()
        };
        self.set_focus(ring[next]);
    }

    pub fn set_focus(&mut self, focus: Focus) {
        if self.focus == focus {
            return;
        }
        match self.focus {
            Focus::NumericInput => {
                self.numeric.commit();
                self.commit_port_edit();
            }
            Focus::HoverCard => self.hover_card.dismiss(),
            _ => {}
        }
        self.focus = focus;
    }

    pub fn is_focused(&self, focus: Focus) -> bool {
        self.focus == focus
    }

    /// Key hints for the focused component
    pub fn focus_hint(&self) -> Option<&'static str> {
        match self.focus {
            Focus::Copy(_) => Some("Enter/Space:copy"),
            Focus::Table => self.table.focus_hint(),
            Focus::Accordion => self.accordion.focus_hint(),
            Focus::HoverCard => self.hover_card.focus_hint(),
            Focus::NumericInput => self.numeric.focus_hint(),
            Focus::PinInput => self.pin.focus_hint(),
        }
    }

    /// Accessible state of the focused copy control
    ///
    /// This is how the hidden-label variant still tells the user it worked.
    pub fn announcement(&self) -> Option<String> {
        let Focus::Copy(i) = self.focus else {
            return None;
        };
        let control = self.copies.get(i)?;
        Some(format!("{}: {}", COPY_SLOTS[i].0, control.announcement()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────

    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Layer 1: global chords
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('s') => {
                    self.export_records();
                    return;
                }
                KeyCode::Char('o') => {
                    self.import_records();
                    return;
                }
                _ => {}
            }
        }

        // Layer 2: focus movement
        match key.code {
            KeyCode::Tab => return self.cycle_focus(true),
            KeyCode::BackTab => return self.cycle_focus(false),
            _ => {}
        }

        // Layer 3: focused component
        if self.dispatch_focused(key).was_handled() {
            return;
        }

        // Layer 4: copy hotkeys fire without focus
        let request = self
            .copies
            .iter()
            .chain(std::iter::once(&self.address_copy))
            .find_map(|control| control.handle_key(&key, false));
        if let Some(request) = request {
            self.request_copy(request);
            return;
        }

        if key.code == KeyCode::Char('q') {
            self.should_quit = true;
        }
    }

    fn dispatch_focused(&mut self, key: KeyEvent) -> Handled {
        match self.focus {
            Focus::Copy(i) => {
                let request = self
                    .copies
                    .get(i)
                    .and_then(|control| control.handle_key(&key, true));
                match request {
                    Some(request) => {
                        self.request_copy(request);
                        Handled::Yes
                    }
                    None => Handled::No,
                }
            }
            Focus::Table => {
                if let Some(action) = self.table.action_for_key(&key) {
                    self.apply_table_action(action);
                    return Handled::Yes;
                }
                let handled = self.table.handle_key(key);
                if handled.was_handled() {
                    self.sync_address();
                }
                handled
            }
            Focus::Accordion => self.accordion.handle_key(key),
            Focus::HoverCard => self.hover_card.handle_key(key),
            Focus::NumericInput => {
                let handled = self.numeric.handle_key(key);
                if key.code == KeyCode::Enter {
                    self.commit_port_edit();
                }
                handled
            }
            Focus::PinInput => {
                let was_complete = self.pin.is_complete();
                let handled = self.pin.handle_key(key);
                if !was_complete && self.pin.is_complete() {
                    let length = self.pin.value().chars().count();
                    tracing::info!("Pin entered ({} digits)", length);
                    self.show_toast(Toast::success(format!("Code accepted ({length} digits)")));
                }
                handled
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        self.hover_card.handle_mouse(&mouse);
        let request = self
            .copies
            .iter()
            .chain(std::iter::once(&self.address_copy))
            .find_map(|control| control.handle_mouse(&mouse));
        if let Some(request) = request {
            self.request_copy(request);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Side effects
    // ─────────────────────────────────────────────────────────────────────────

    /// Queue a clipboard write. Writes run one at a time in request order,
    /// each result coming back as `CopyFinished`.
    pub fn request_copy(&mut self, request: CopyRequest) {
        if self.torn_down {
            return;
        }
        self.copy_queue.push_back(request);
        self.start_next_copy();
    }

    /// Copies accepted but not yet handed to the clipboard
    pub fn queued_copies(&self) -> usize {
        self.copy_queue.len()
    }

    fn start_next_copy(&mut self) {
        if self.copy_in_flight {
            return;
        }
        let Some(request) = self.copy_queue.pop_front() else {
            return;
        };
        self.copy_in_flight = true;
        let writer = self.writer.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = writer.write_text(&request.value).await;
            let _ = tx
                .send(AppMessage::CopyFinished {
                    target: request.target,
                    result,
                })
                .await;
        });
    }

    pub fn request_version(&self) {
        let shell = self.shell.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let version = shell.get_app_version().await;
            let _ = tx.send(AppMessage::Version(version)).await;
        });
    }

    pub fn export_records(&self) {
        let shell = self.shell.clone();
        let tx = self.tx.clone();
        let records = self.table.records().to_vec();
        tokio::spawn(async move {
            let result = export_records(shell.as_ref(), &records).await;
            let _ = tx.send(AppMessage::RecordsExported(result)).await;
        });
    }

    pub fn import_records(&self) {
        let shell = self.shell.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = import_records(shell.as_ref()).await;
            let _ = tx.send(AppMessage::RecordsImported(result)).await;
        });
    }

    pub fn show_toast(&mut self, toast: Toast) {
        if let Some((_, previous)) = self.toast.take() {
            self.timers.cancel(previous);
        }
        let handle = self.timers.schedule_in(TOAST_DURATION, UiTimer::ExpireToast);
        self.toast = Some((toast, handle));
    }

    pub fn show_notification(&mut self, notification: Notification) {
        let mut toast = Toast::new(notification.body).with_title(notification.title);
        if let Some(icon) = notification.icon {
            toast = toast.with_icon(icon);
        }
        self.show_toast(toast);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Results
    // ─────────────────────────────────────────────────────────────────────────

    pub fn handle_message(&mut self, message: AppMessage) {
        if self.torn_down {
            tracing::debug!("Dropping {:?} after teardown", message);
            return;
        }
        match message {
            AppMessage::CopyFinished { target, result } => {
                self.copy_in_flight = false;
                self.start_next_copy();
                let timers = &mut self.timers;
                let outcome =
                    match find_control(&mut self.copies, &mut self.address_copy, target) {
                        Some(control) => control.controller_mut().complete(result, timers),
                        None => {
                            tracing::debug!("Copy finished for unmounted control {:?}", target);
                            return;
                        }
                    };
                if let Err(e) = outcome {
                    self.show_toast(Toast::error(format!("Copy failed: {e}")));
                }
            }
            AppMessage::Version(Ok(version)) => {
                self.skeleton.set_content(vec![
                    format!("{APP_NAME} {version}"),
                    format!("{} port forwards configured", self.table.records().len()),
                    format!("Copy feedback lasts {}ms", self.reset_after.as_millis()),
                ]);
                self.footer.set_version(version);
            }
            AppMessage::Version(Err(e)) => {
                tracing::warn!("Failed to read app version: {}", e);
                self.skeleton
                    .set_content(vec!["Version unavailable".to_string()]);
            }
            AppMessage::RecordsImported(Ok(Some(records))) => {
                let count = records.len();
                tracing::info!("Imported {} port forwards", count);
                self.editing = None;
                self.table.set_records(records);
                self.sync_address();
                self.update_progress();
                self.show_toast(Toast::success(format!("Imported {count} port forwards")));
            }
            AppMessage::RecordsExported(Ok(Some(path))) => {
                tracing::info!("Exported port forwards to {}", path.display());
            }
            AppMessage::RecordsImported(Ok(None)) | AppMessage::RecordsExported(Ok(None)) => {
                tracing::debug!("File dialog cancelled");
            }
            AppMessage::RecordsImported(Err(e)) => {
                tracing::warn!("Import failed: {:#}", e);
                self.show_toast(Toast::error(format!("Import failed: {e:#}")));
            }
            AppMessage::RecordsExported(Err(e)) => {
                tracing::warn!("Export failed: {:#}", e);
                self.show_toast(Toast::error(format!("Export failed: {e:#}")));
            }
        }
    }

    /// Dispatch every timer whose deadline has passed
    pub fn fire_timers(&mut self) {
        for (handle, timer) in self.timers.fire_due() {
            match timer {
                UiTimer::ResetCopied(ResetCopied(id)) => {
                    if let Some(control) =
                        find_control(&mut self.copies, &mut self.address_copy, id)
                    {
                        control.controller_mut().on_reset();
                    }
                }
                UiTimer::ExpireToast => {
                    if self.toast.as_ref().is_some_and(|(_, h)| *h == handle) {
                        self.toast = None;
                    }
                }
                UiTimer::ForwardingSettled(op) => self.settle_forward(op),
            }
        }
    }

    /// Cancel every pending timer; call before dropping the app
    pub fn teardown(&mut self) {
        let timers = &mut self.timers;
        for control in self
            .copies
            .iter_mut()
            .chain(std::iter::once(&mut self.address_copy))
        {
            control.controller_mut().teardown(timers);
        }
        self.toast = None;
        self.pending_forward = None;
        self.copy_queue.clear();
        self.torn_down = true;
        self.timers.clear();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Port forwards
    // ─────────────────────────────────────────────────────────────────────────

    fn apply_table_action(&mut self, action: TableAction) {
        match action {
            TableAction::Start => {
                let mut flags = self.table.flags();
                flags.is_initiating = true;
                self.table.set_flags(flags);
                tracing::info!("Starting {} port forwards", self.table.records().len());
                self.schedule_forward(ForwardOp::Start);
            }
            TableAction::Stop => {
                let mut flags = self.table.flags();
                flags.is_stopping = true;
                self.table.set_flags(flags);
                tracing::info!("Stopping port forwards");
                self.schedule_forward(ForwardOp::Stop);
            }
            TableAction::Delete(id) => {
                if let Some(record) = self.table.remove(id) {
                    if self.editing == Some(id) {
                        self.editing = None;
                    }
                    tracing::info!("Deleted port forward {} ({})", id, record.service);
                    self.sync_address();
                    self.update_progress();
                    self.show_toast(Toast::new(format!("Deleted {}", record.service)));
                }
            }
            TableAction::Edit(id) => {
                let Some(record) = self.table.records().iter().find(|r| r.id == id) else {
                    return;
                };
                let (port, service) = (record.local_port, record.service.clone());
                self.numeric.set_value(f64::from(port));
                self.editing = Some(id);
                self.set_focus(Focus::NumericInput);
                self.show_toast(Toast::new(format!("Editing local port of {service}")));
            }
        }
    }

    fn schedule_forward(&mut self, op: ForwardOp) {
        if let Some(previous) = self.pending_forward.take() {
            self.timers.cancel(previous);
        }
        self.pending_forward = Some(
            self.timers
                .schedule_in(FORWARD_SETTLE, UiTimer::ForwardingSettled(op)),
        );
    }

    fn settle_forward(&mut self, op: ForwardOp) {
        self.pending_forward = None;
        let mut flags = self.table.flags();
        match op {
            ForwardOp::Start => {
                flags.is_initiating = false;
                flags.is_port_forwarding = true;
                self.table.set_all_status(ForwardStatus::Running);
            }
            ForwardOp::Stop => {
                flags.is_stopping = false;
                flags.is_port_forwarding = false;
                self.table.set_all_status(ForwardStatus::Stopped);
            }
        }
        self.table.set_flags(flags);
        self.update_progress();
    }

    fn commit_port_edit(&mut self) {
        let Some(id) = self.editing.take() else {
            return;
        };
        // Bounded to 1..=65535 by the input's props
        let port = self.numeric.value() as u16;
        if self.table.set_local_port(id, port) {
            tracing::info!("Port forward {} now listens on {}", id, port);
            self.sync_address();
            self.show_toast(Toast::success(format!("Local port set to {port}")));
        }
    }

    /// Point the address copy at the selected row
    fn sync_address(&mut self) {
        let address = self.table.selected().map(PortForwardRecord::local_address);
        self.address_copy.set_disabled(address.is_none());
        self.address_copy
            .controller_mut()
            .set_value(address.unwrap_or_default());
    }

    fn update_progress(&mut self) {
        let records = self.table.records();
        let percent = if records.is_empty() {
            0.0
        } else {
            let running = records.iter().filter(|r| r.is_running()).count();
            running as f64 * 100.0 / records.len() as f64
        };
        self.progress.set_value(percent);
        self.circle.set_value(percent);
    }
}

fn copy_control<W: ClipboardWriter>(
    writer: &W,
    value: &str,
    reset_after: Duration,
    trigger: TriggerProps,
    indicator: IndicatorProps,
) -> CopyControl<W> {
    CopyControl::new(
        ClipboardController::with_reset_after(writer.clone(), value, reset_after),
        CopyTrigger::new(trigger),
        IndicatorView::new(indicator),
    )
}

fn find_control<'a, W: ClipboardWriter>(
    copies: &'a mut [CopyControl<W>],
    address: &'a mut CopyControl<W>,
    id: ControllerId,
) -> Option<&'a mut CopyControl<W>> {
    copies
        .iter_mut()
        .chain(std::iter::once(address))
        .find(|control| control.id() == id)
}

fn json_filter() -> Vec<FileFilter> {
    vec![FileFilter::new("JSON", &["json"])]
}

async fn export_records<S: DesktopShell>(
    shell: &S,
    records: &[PortForwardRecord],
) -> anyhow::Result<Option<PathBuf>> {
    let options = SaveDialogOptions {
        title: Some("Export port forwards".to_string()),
        default_file_name: Some("kftray-configs.json".to_string()),
        filters: json_filter(),
        ..Default::default()
    };
    let Some(path) = shell.save_file_dialog(options).await? else {
        return Ok(None);
    };

    let json =
        serde_json::to_string_pretty(records).context("Failed to serialize port forwards")?;
    shell.write_text_file(&path, &json).await?;

    let mut notification = Notification::new(
        "Export complete",
        format!("Saved {} port forwards to {}", records.len(), path.display()),
    );
    notification.icon = Some("✓".to_string());
    shell.send_notification(notification).await?;
    Ok(Some(path))
}

async fn import_records<S: DesktopShell>(
    shell: &S,
) -> anyhow::Result<Option<Vec<PortForwardRecord>>> {
    let options = OpenDialogOptions {
        title: Some("Import port forwards".to_string()),
        filters: json_filter(),
        ..Default::default()
    };
    let Some(path) = shell.open_file_dialog(options).await?.into_iter().next() else {
        return Ok(None);
    };

    let json = shell.read_text_file(&path).await?;
    let records = parse_records(&json)
        .with_context(|| format!("Invalid port forward file {}", path.display()))?;
    Ok(Some(records))
}
