//! Alignment session controller.
//!
//! The controller owns the virtual screen and, while a session is running,
//! one [`AlignModel`]/[`AlignWidget`] pair per monitor plus the shared
//! [`AlignViewModel`]:
//!
//! ```text
//!                         Controller
//!             ┌────────  modifies models  <──────────┐
//!             │                                      │ option changes
//!         ViewModel ──┬──> Model ──> Widget ─────────┤ and input events
//!         (session    ├──> Model ──> Widget ─────────┤
//!          options)   └──> Model ──> Widget ─────────┘
//! ```
//!
//! Sessions move idle → active → (confirming) → idle. Applying commits every
//! pending offset, then waits for the user to confirm; declining or letting
//! the timeout run out restores the previous layout.

use crate::config::Settings;
use crate::dialog::{DialogAnswer, PendingConfirmation, RollbackDialog};
use crate::error::{Error, Result};
use crate::event::{InputEvent, Propagation};
use crate::items::ControlAction;
use crate::keycode::Key;
use crate::model::AlignModel;
use crate::view_model::{AlignViewModel, ViewOption};
use crate::vscreen::VScreen;
use crate::widget::AlignWidget;
use std::time::{Duration, Instant};

/// A monitor's model together with the overlay showing it.
#[derive(Debug)]
pub struct AlignPair {
    pub model: AlignModel,
    pub widget: AlignWidget,
}

/// How an apply finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The user confirmed the new layout.
    Kept,
    /// The previous layout was restored.
    RolledBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Active,
    Confirming(PendingConfirmation),
}

#[derive(Debug)]
struct Session {
    view_model: AlignViewModel,
    pairs: Vec<AlignPair>,
    phase: Phase,
}

impl Session {
    fn pair_mut(&mut self, device_name: &str) -> Option<&mut AlignPair> {
        self.pairs
            .iter_mut()
            .find(|pair| pair.model.device_name() == device_name)
    }

    fn close_all(&mut self) {
        for pair in &mut self.pairs {
            pair.widget.close(&mut self.view_model);
        }
    }
}

/// Drives alignment sessions for every monitor of a virtual screen.
#[derive(Debug)]
pub struct AlignController {
    vscreen: VScreen,
    settings: Settings,
    session: Option<Session>,
}

impl AlignController {
    pub fn new(vscreen: VScreen, settings: Settings) -> Self {
        Self {
            vscreen,
            settings,
            session: None,
        }
    }

    pub fn vscreen(&self) -> &VScreen {
        &self.vscreen
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether a session is running (including while awaiting confirmation).
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The pending confirmation, if an apply is waiting for an answer.
    pub fn pending_confirmation(&self) -> Option<PendingConfirmation> {
        match self.session.as_ref()?.phase {
            Phase::Confirming(pending) => Some(pending),
            Phase::Active => None,
        }
    }

    /// Model/widget pairs in monitor order; empty when idle.
    pub fn pairs(&self) -> &[AlignPair] {
        self.session
            .as_ref()
            .map(|session| session.pairs.as_slice())
            .unwrap_or_default()
    }

    pub fn pair(&self, device_name: &str) -> Option<&AlignPair> {
        self.pairs()
            .iter()
            .find(|pair| pair.model.device_name() == device_name)
    }

    /// Session view options; `None` when idle.
    pub fn view_model(&self) -> Option<&AlignViewModel> {
        self.session.as_ref().map(|session| &session.view_model)
    }

    /// Create the view model and one shown overlay per monitor.
    pub fn start(&mut self) {
        if self.session.is_some() {
            log::warn!("alignment session already running");
            return;
        }

        let (_, normalize_y) = self.vscreen.normalize_offset();
        let mut view_model = AlignViewModel::new(self.settings.view);
        let pairs = self
            .vscreen
            .monitors()
            .iter()
            .map(|monitor| {
                let model = AlignModel::new(monitor);
                let mut widget = AlignWidget::new(
                    &model,
                    &mut view_model,
                    normalize_y,
                    self.settings.line_spacing,
                );
                widget.show_full_screen();
                AlignPair { model, widget }
            })
            .collect::<Vec<_>>();

        log::info!("alignment session started on {} monitor(s)", pairs.len());
        self.session = Some(Session {
            view_model,
            pairs,
            phase: Phase::Active,
        });
    }

    /// Close every overlay, discard pending offsets and end the session.
    ///
    /// Stopping while a confirmation is pending restores the previous layout.
    pub fn stop(&mut self) {
        if self.pending_confirmation().is_some() {
            if let Err(e) = self.finish_apply(DialogAnswer::No) {
                log::error!("restoring the previous layout failed: {e}");
            }
            return;
        }
        let Some(mut session) = self.session.take() else {
            return;
        };
        for pair in &mut session.pairs {
            pair.widget.close(&mut session.view_model);
            pair.model.rollback();
        }
        log::info!("alignment session stopped");
    }

    /// Route an input event received by `device_name`'s overlay.
    pub fn handle_event(&mut self, device_name: &str, event: InputEvent) -> Propagation {
        match self.session.as_ref().map(|session| session.phase) {
            Some(Phase::Active) => {}
            Some(Phase::Confirming(_)) | None => return Propagation::Unhandled,
        }
        match event {
            InputEvent::KeyPress(key) => self.key_pressed(device_name, key),
            InputEvent::MouseMove { x, y } => self.mouse_moved(device_name, x, y),
            InputEvent::MouseDrag { dx, dy } => self.mouse_dragged(device_name, dx, dy),
            InputEvent::MouseLeave => self.mouse_left(device_name),
            InputEvent::Wheel(_) => Propagation::Unhandled,
        }
    }

    fn key_pressed(&mut self, device_name: &str, key: Key) -> Propagation {
        if key == Key::Escape {
            self.stop();
            return Propagation::Consumed;
        }
        let Some(nudge) = key.nudge() else {
            return Propagation::Unhandled;
        };
        let step = if nudge.coarse {
            self.settings.page_step
        } else {
            self.settings.nudge_step
        };
        self.move_monitor(device_name, nudge.dx * step, nudge.dy * step)
    }

    fn mouse_moved(&mut self, device_name: &str, x: i32, y: i32) -> Propagation {
        if let Some(session) = self.session.as_mut() {
            let show = session.view_model.get(ViewOption::CursorPosition);
            if let Some(pair) = session.pair_mut(device_name) {
                if show {
                    pair.widget.show_tooltip(x, y);
                } else {
                    pair.widget.hide_tooltip();
                }
            }
        }
        Propagation::Consumed
    }

    fn mouse_left(&mut self, device_name: &str) -> Propagation {
        if let Some(pair) = self
            .session
            .as_mut()
            .and_then(|session| session.pair_mut(device_name))
        {
            pair.widget.hide_tooltip();
        }
        Propagation::Consumed
    }

    /// Dragging pulls the content along with the pointer.
    fn mouse_dragged(&mut self, device_name: &str, dx: i32, dy: i32) -> Propagation {
        self.move_monitor(device_name, -dx, -dy)
    }

    fn move_monitor(&mut self, device_name: &str, dx: i32, dy: i32) -> Propagation {
        let Some(pair) = self
            .session
            .as_mut()
            .and_then(|session| session.pair_mut(device_name))
        else {
            log::warn!("input for unknown monitor {device_name}");
            return Propagation::Unhandled;
        };
        if pair.model.is_primary() {
            return Propagation::Unhandled;
        }
        if pair.model.nudge(dx, dy) {
            pair.widget.refresh(&pair.model);
        }
        Propagation::Consumed
    }

    /// Apply every offset and block on `dialog` for confirmation.
    ///
    /// Whatever the answer, every overlay is closed and the session ends.
    pub fn button_apply(&mut self, dialog: &mut dyn RollbackDialog) -> Result<ApplyOutcome> {
        let timeout = self.begin_apply(Instant::now())?;
        let answer = dialog.exec(timeout);
        self.finish_apply(answer)
    }

    /// Commit every pending offset and start waiting for confirmation.
    ///
    /// Returns the confirmation timeout. If the OS rejects the layout, the
    /// previous positions are restored on a best-effort basis, the session
    /// stays active and the error is returned.
    pub fn begin_apply(&mut self, now: Instant) -> Result<Duration> {
        let Some(session) = self.session.as_mut() else {
            return Err(Error::NoSession);
        };
        if let Phase::Confirming(pending) = session.phase {
            log::warn!("apply requested while already awaiting confirmation");
            return Ok(pending.remaining(now));
        }

        for pair in &session.pairs {
            pair.model.apply_offset(&mut self.vscreen)?;
        }
        if let Err(e) = self.vscreen.apply_changes() {
            log::error!("applying layout failed: {e}");
            for pair in &session.pairs {
                let original = pair.model.original();
                self.vscreen
                    .set_position(pair.model.device_name(), original.x, original.y)?;
            }
            if let Err(restore) = self.vscreen.apply_changes() {
                log::error!("restoring the previous layout failed: {restore}");
            }
            return Err(e);
        }

        let timeout = self.settings.confirm_timeout();
        session.phase = Phase::Confirming(PendingConfirmation::new(now, timeout));
        log::info!("layout applied, waiting {}s for confirmation", timeout.as_secs());
        Ok(timeout)
    }

    /// Resolve a pending confirmation and end the session.
    pub fn finish_apply(&mut self, answer: DialogAnswer) -> Result<ApplyOutcome> {
        let Some(session) = self.session.as_mut() else {
            return Err(Error::NoSession);
        };
        if session.phase == Phase::Active {
            return Err(Error::InvalidState("no layout is awaiting confirmation".into()));
        }

        let result = match answer {
            DialogAnswer::Yes => {
                log::info!("new layout confirmed");
                // The OS may have translated the layout while committing it.
                if let Err(e) = self.vscreen.reload() {
                    log::warn!("re-reading the applied layout failed: {e}");
                }
                Ok(ApplyOutcome::Kept)
            }
            DialogAnswer::No => {
                log::info!("new layout declined, rolling back");
                let mut restored = Ok(());
                for pair in &mut session.pairs {
                    pair.model.rollback();
                    if let Err(e) = pair.model.apply_offset(&mut self.vscreen) {
                        restored = Err(e);
                    }
                }
                restored
                    .and_then(|()| self.vscreen.apply_changes())
                    .map(|()| ApplyOutcome::RolledBack)
            }
        };

        session.close_all();
        self.session = None;
        result
    }

    /// Treat an expired confirmation as declined.
    pub fn poll_confirmation(&mut self, now: Instant) -> Result<Option<ApplyOutcome>> {
        match self.pending_confirmation() {
            Some(pending) if pending.is_expired(now) => {
                log::info!("confirmation timed out");
                self.finish_apply(DialogAnswer::No).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// End the session; ignored while a layout awaits confirmation.
    pub fn button_close(&mut self) {
        if self.pending_confirmation().is_some() {
            log::warn!("close ignored while awaiting confirmation");
            return;
        }
        self.stop();
    }

    /// Discard every pending offset and keep the session running.
    pub fn button_reset(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.phase != Phase::Active {
            log::warn!("reset ignored while awaiting confirmation");
            return;
        }
        for pair in &mut session.pairs {
            pair.model.rollback();
            pair.widget.refresh(&pair.model);
        }
        log::debug!("offsets reset");
    }

    /// Change a session option; returns whether the value changed.
    pub fn set_view_option(&mut self, option: ViewOption, value: bool) -> bool {
        self.session
            .as_mut()
            .is_some_and(|session| session.view_model.set(option, value))
    }

    /// Run a control box action.
    ///
    /// Apply does not block: it commits the layout and leaves the session
    /// awaiting [`finish_apply`](Self::finish_apply) or
    /// [`poll_confirmation`](Self::poll_confirmation).
    pub fn trigger(&mut self, action: ControlAction, now: Instant) -> Result<()> {
        match action {
            ControlAction::Apply => self.begin_apply(now).map(|_| ()),
            ControlAction::Close => {
                self.button_close();
                Ok(())
            }
            ControlAction::Reset => {
                self.button_reset();
                Ok(())
            }
            ControlAction::Toggle(option) => {
                if let Some(session) = self.session.as_mut() {
                    session.view_model.toggle(option);
                }
                Ok(())
            }
        }
    }
}
