//! Modal notice/confirmation dialog shared by the list and the editor.
//!
//! A dialog carries an optional follow-up effect of type `A`, chosen by the
//! component that opened it. Confirming hands the effect back to the component
//! together with a [`Ticket`]; the component runs the effect and then closes
//! the dialog with the ticket. Closing is a no-op if the effect already opened
//! a newer dialog.

use eframe::egui;

/// Presentation variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// One acknowledge button.
    Error,
    /// One acknowledge button; may run a follow-up effect.
    Success,
    /// Cancel and confirm buttons; confirm runs the effect.
    Confirm,
}

/// Fixed user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ConfirmApply,
    ConfirmDelete,
    Saved,
    SaveFailed,
    Applied,
    ApplyFailed,
    CannotApplyEmpty,
    Deleted,
    DeleteFailed,
    CannotDeleteActive,
    DuplicateName(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::ConfirmApply => "Apply this hosts file to the system?".to_string(),
            Notice::ConfirmDelete => "Delete this hosts file?".to_string(),
            Notice::Saved => "The file was saved.".to_string(),
            Notice::SaveFailed => "Failed to save the file.".to_string(),
            Notice::Applied => "Applied!".to_string(),
            Notice::ApplyFailed => "Failed to apply the hosts file.".to_string(),
            Notice::CannotApplyEmpty => {
                "An unsaved or empty hosts file cannot be applied.".to_string()
            }
            Notice::Deleted => "The file was deleted.".to_string(),
            Notice::DeleteFailed => "Failed to delete the file.".to_string(),
            Notice::CannotDeleteActive => {
                "The hosts file currently applied cannot be deleted.".to_string()
            }
            Notice::DuplicateName(name) => {
                format!("Another hosts file is already named \"{name}\"; saving will overwrite it.")
            }
        }
    }
}

#[derive(Debug)]
pub struct Dialog<A> {
    pub kind: DialogKind,
    pub notice: Notice,
    on_confirm: Option<A>,
    generation: u64,
    /// Frame the dialog was first drawn on; keys pressed then belong to the
    /// gesture that opened it.
    first_frame: Option<u64>,
}

/// Proof that a dialog was resolved; closes exactly that dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Ticket(u64);

/// Button pressed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    Confirm,
    Cancel,
}

/// Holder for the at most one dialog a component shows.
#[derive(Debug)]
pub struct DialogSlot<A> {
    current: Option<Dialog<A>>,
    generation: u64,
}

impl<A> Default for DialogSlot<A> {
    fn default() -> Self {
        Self {
            current: None,
            generation: 0,
        }
    }
}

impl<A> DialogSlot<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, kind: DialogKind, notice: Notice, on_confirm: Option<A>) {
        self.generation += 1;
        tracing::debug!(?kind, ?notice, "dialog opened");
        self.current = Some(Dialog {
            kind,
            notice,
            on_confirm,
            generation: self.generation,
            first_frame: None,
        });
    }

    pub fn error(&mut self, notice: Notice) {
        self.open(DialogKind::Error, notice, None);
    }

    pub fn success(&mut self, notice: Notice, then: Option<A>) {
        self.open(DialogKind::Success, notice, then);
    }

    pub fn confirm(&mut self, notice: Notice, effect: A) {
        self.open(DialogKind::Confirm, notice, Some(effect));
    }

    pub fn current(&self) -> Option<&Dialog<A>> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Take the dialog's effect for the given choice. The dialog stays
    /// visible until [`DialogSlot::close`] is called with the ticket.
    /// The effect is handed out at most once.
    pub fn resolve(&mut self, choice: DialogChoice) -> Option<(Ticket, Option<A>)> {
        let dialog = self.current.as_mut()?;
        let effect = match choice {
            DialogChoice::Confirm => dialog.on_confirm.take(),
            DialogChoice::Cancel => {
                dialog.on_confirm = None;
                None
            }
        };
        Some((Ticket(dialog.generation), effect))
    }

    /// Hide the dialog the ticket was issued for.
    pub fn close(&mut self, ticket: Ticket) {
        if self.current.as_ref().is_some_and(|d| d.generation == ticket.0) {
            self.current = None;
        }
    }

    /// Render the dialog, if any, and report the button pressed.
    /// Enter and Escape are ignored on the frame the dialog first appears.
    pub fn show(&mut self, ctx: &egui::Context, id: &str) -> Option<DialogChoice> {
        let dialog = self.current.as_mut()?;
        let frame = ctx.cumulative_frame_nr();
        let keys_armed = *dialog.first_frame.get_or_insert(frame) < frame;
        let dialog = &*dialog;
        let mut choice = None;

        let title = match dialog.kind {
            DialogKind::Error => "Error",
            DialogKind::Success => "Done",
            DialogKind::Confirm => "Confirm",
        };

        egui::Window::new(title)
            .id(egui::Id::new(id))
            .collapsible(false)
            .resizable(false)
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.add_space(6.0);
                let text = egui::RichText::new(dialog.notice.message());
                let text = if dialog.kind == DialogKind::Error {
                    text.color(egui::Color32::from_rgb(220, 80, 80))
                } else {
                    text
                };
                ui.label(text);
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if dialog.kind == DialogKind::Confirm && ui.button("Cancel").clicked() {
                        choice = Some(DialogChoice::Cancel);
                    }
                    if ui.button("OK").clicked() {
                        choice = Some(DialogChoice::Confirm);
                    }
                });
            });

        if choice.is_none() && keys_armed {
            ctx.input(|i| {
                if i.key_pressed(egui::Key::Escape) {
                    // Acknowledge-only dialogs have nothing to cancel.
                    choice = Some(match dialog.kind {
                        DialogKind::Confirm => DialogChoice::Cancel,
                        _ => DialogChoice::Confirm,
                    });
                } else if i.key_pressed(egui::Key::Enter) {
                    choice = Some(DialogChoice::Confirm);
                }
            });
        }

        choice
    }
}
