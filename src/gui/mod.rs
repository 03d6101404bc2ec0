//! egui front end.
//!
//! The root viewport covers the primary monitor and hosts the control box,
//! the confirmation prompt and notifications. Every other monitor gets an
//! immediate viewport of its own. All viewports run on the UI thread and
//! share one [`AlignController`].

mod input;
mod paint;

pub use input::{collect_events, map_key, to_global, translate};

use crate::controller::{AlignController, ApplyOutcome};
use crate::dialog::DialogAnswer;
use crate::display::Rect;
use crate::error::{Error, Result};
use crate::event::InputEvent;
use crate::items::ControlAction;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::time::{Duration, Instant};

const TOAST_SECONDS: f64 = 6.0;

/// Where one overlay window goes.
#[derive(Debug, Clone)]
struct OverlaySlot {
    device_name: String,
    geometry: Rect,
    scale_factor: f64,
    primary: bool,
}

impl OverlaySlot {
    fn builder(&self) -> egui::ViewportBuilder {
        let scale = self.scale_factor.max(1.0) as f32;
        egui::ViewportBuilder::default()
            .with_title(format!("monalign - {}", self.device_name))
            .with_position([self.geometry.x as f32 / scale, self.geometry.y as f32 / scale])
            .with_inner_size([
                self.geometry.width as f32 / scale,
                self.geometry.height as f32 / scale,
            ])
            .with_decorations(false)
            .with_always_on_top()
            .with_taskbar(false)
    }
}

/// eframe application driving an alignment session.
pub struct AlignApp {
    controller: AlignController,
    toasts: Toasts,
    /// Keeps the app open until the last notification has been shown.
    linger_until: Option<Instant>,
}

/// The app may exit once the session is over and no notification is pending.
fn may_exit(active: bool, linger_until: Option<Instant>, now: Instant) -> bool {
    !active && linger_until.is_none_or(|deadline| now >= deadline)
}

impl AlignApp {
    /// Start a session on `controller` and wrap it.
    pub fn new(mut controller: AlignController) -> Self {
        controller.start();
        Self {
            controller,
            toasts: Toasts::new()
                .anchor(egui::Align2::RIGHT_TOP, [10.0, 10.0])
                .direction(egui::Direction::TopDown),
            linger_until: None,
        }
    }

    fn notify(&mut self, kind: ToastKind, text: String) {
        self.toasts.add(Toast {
            text: text.into(),
            kind,
            options: ToastOptions::default().duration_in_seconds(TOAST_SECONDS),
        });
        self.linger_until = Some(Instant::now() + Duration::from_secs_f64(TOAST_SECONDS));
    }

    fn slots(&self) -> Vec<OverlaySlot> {
        self.controller
            .pairs()
            .iter()
            .map(|pair| OverlaySlot {
                device_name: pair.model.device_name().to_string(),
                geometry: pair.widget.geometry(),
                scale_factor: pair.model.monitor().scale_factor,
                primary: pair.widget.is_primary(),
            })
            .collect()
    }

    /// Handle input and paint one overlay.
    fn overlay(&mut self, ctx: &egui::Context, slot: &OverlaySlot) {
        let events = ctx.input(|input| collect_events(input, slot.geometry));
        for event in events {
            let handled = self.controller.handle_event(&slot.device_name, event);
            if let InputEvent::KeyPress(key) = event {
                if !handled.is_consumed() {
                    log::trace!("{key:?} on {} not handled", slot.device_name);
                }
            }
            if !self.controller.is_active() {
                return;
            }
        }
        if ctx.input(|input| input.viewport().close_requested()) {
            self.controller.stop();
            return;
        }

        let actions = match (
            self.controller.pair(&slot.device_name),
            self.controller.view_model(),
        ) {
            (Some(pair), Some(view_model)) => paint::overlay(ctx, &pair.widget, view_model),
            _ => return,
        };
        for action in actions {
            self.run_action(action);
        }
    }

    fn run_action(&mut self, action: ControlAction) {
        match self.controller.trigger(action, Instant::now()) {
            Ok(()) => {}
            Err(Error::ApplyFailed(reason)) => {
                self.notify(ToastKind::Error, format!("Layout rejected: {reason}"));
            }
            Err(e) => {
                log::error!("{action:?} failed: {e}");
                self.notify(ToastKind::Error, e.to_string());
            }
        }
    }

    fn finished(&mut self, result: Result<ApplyOutcome>) {
        match result {
            Ok(ApplyOutcome::Kept) => log::info!("display layout kept"),
            Ok(ApplyOutcome::RolledBack) => log::info!("display layout reverted"),
            Err(e) => {
                log::error!("finishing apply failed: {e}");
                self.notify(ToastKind::Error, e.to_string());
            }
        }
    }

    /// Countdown prompt shown while an applied layout awaits confirmation.
    fn confirmation(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        match self.controller.poll_confirmation(now) {
            Ok(Some(outcome)) => {
                self.finished(Ok(outcome));
                return;
            }
            Ok(None) => {}
            Err(e) => {
                self.finished(Err(e));
                return;
            }
        }
        let Some(pending) = self.controller.pending_confirmation() else {
            return;
        };

        let seconds = pending.remaining(now).as_secs_f32().ceil() as u64;
        let mut answer = None;
        egui::Window::new("Keep display settings?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("Reverting to the previous layout in {seconds} s."));
                ui.horizontal(|ui| {
                    if ui.button("Keep").clicked() {
                        answer = Some(DialogAnswer::Yes);
                    }
                    if ui.button("Revert").clicked() {
                        answer = Some(DialogAnswer::No);
                    }
                });
            });

        if let Some(answer) = answer {
            let result = self.controller.finish_apply(answer);
            self.finished(result);
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

impl eframe::App for AlignApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let slots = self.slots();

        for slot in slots.iter().filter(|slot| !slot.primary) {
            ctx.show_viewport_immediate(
                egui::ViewportId::from_hash_of(&slot.device_name),
                slot.builder(),
                |ctx, _class| self.overlay(ctx, slot),
            );
        }
        if let Some(primary) = slots.iter().find(|slot| slot.primary) {
            self.overlay(ctx, primary);
        }

        self.confirmation(ctx);
        self.toasts.show(ctx);

        let now = Instant::now();
        if may_exit(self.controller.is_active(), self.linger_until, now) {
            log::debug!("session ended, closing overlays");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        } else if let Some(deadline) = self.linger_until {
            if !self.controller.is_active() {
                ctx.request_repaint_after(deadline.saturating_duration_since(now));
            }
        }
    }
}

/// Run an alignment session until the user applies or closes it.
pub fn run(controller: AlignController) -> Result<()> {
    let slot = {
        let primary = controller.vscreen().primary();
        OverlaySlot {
            device_name: primary.device_name.clone(),
            geometry: primary.rect(),
            scale_factor: primary.scale_factor,
            primary: true,
        }
    };
    let native_options = eframe::NativeOptions {
        viewport: slot.builder(),
        ..Default::default()
    };

    eframe::run_native(
        "monalign",
        native_options,
        Box::new(move |_cc| Box::new(AlignApp::new(controller))),
    )
    .map_err(|e| Error::Platform(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_waits_for_notification() {
        let now = Instant::now();
        let deadline = now + Duration::from_secs(6);

        assert!(!may_exit(true, None, now));
        assert!(may_exit(false, None, now));
        assert!(!may_exit(false, Some(deadline), now));
        assert!(may_exit(false, Some(deadline), deadline));
    }
}
