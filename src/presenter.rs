use gtk4::prelude::*;
use gtk4::{Button, CheckButton, Label, ListBox, Orientation};
use chrono::NaiveDate;
use gtk4::Box as GtkBox;
use libadwaita::{Toast, ToastOverlay};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::debug;

use crate::habit::{self, Habit, HabitId, HabitStore};
use crate::theme::Theme;

/// Store operation bound to one row's controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    SetDone(HabitId, bool),
    Delete(HabitId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Updated,
    Removed(Habit),
}

/// Runs a row action against the store. `None` when the habit is gone.
pub fn apply_row_action(
    store: &mut HabitStore,
    action: RowAction,
    today: NaiveDate,
) -> Option<RowOutcome> {
    match action {
        RowAction::SetDone(habit_id, done) => store
            .set_done(habit_id, done, today)
            .map(|_| RowOutcome::Updated),
        RowAction::Delete(habit_id) => store.remove(habit_id).map(RowOutcome::Removed),
    }
}

fn get_streak_emoji(streak: u32) -> &'static str {
    match streak {
        0..=2 => "😞",
        3..=6 => "😊",
        _ => "🔥",
    }
}

pub fn habit_summary(habit: &Habit) -> String {
    format!(
        "{} – {} (Date: {}) | Streak: {}",
        habit.name,
        habit.progress_note,
        habit.created_date.format("%Y-%m-%d"),
        habit.streak
    )
}

/// Renders the whole store into a `ListBox` and routes row callbacks back
/// into the store. Every mutation re-renders from scratch.
#[derive(Clone)]
pub struct HabitListPresenter {
    habit_list: ListBox,
    store: Rc<RefCell<HabitStore>>,
    theme: Rc<Cell<Theme>>,
    toast_overlay: ToastOverlay,
}

impl HabitListPresenter {
    pub fn new(
        store: Rc<RefCell<HabitStore>>,
        theme: Rc<Cell<Theme>>,
        toast_overlay: ToastOverlay,
    ) -> Self {
        let habit_list = ListBox::new();
        habit_list.set_selection_mode(gtk4::SelectionMode::None);
        habit_list.add_css_class("habit-list");

        Self {
            habit_list,
            store,
            theme,
            toast_overlay,
        }
    }

    pub fn widget(&self) -> &ListBox {
        &self.habit_list
    }

    pub fn render(&self) {
        while let Some(child) = self.habit_list.first_child() {
            self.habit_list.remove(&child);
        }

        let theme = self.theme.get();
        let store = self.store.borrow();
        if store.is_empty() {
            debug!("no habits to render");
            return;
        }
        for habit in store.habits() {
            let row = self.build_row(habit, theme);
            self.habit_list.append(&row);
        }
        debug!(count = store.len(), ?theme, "habit list rendered");
    }

    fn build_row(&self, habit: &Habit, theme: Theme) -> GtkBox {
        let row = GtkBox::new(Orientation::Horizontal, 10);
        row.add_css_class("habit-container");
        row.set_margin_top(5);
        row.set_margin_bottom(5);

        // Seed the state before connecting so building the row doesn't fire a toggle.
        let done_check = CheckButton::new();
        done_check.set_active(habit.done);
        done_check.set_tooltip_text(Some("Mark as done today"));
        done_check.set_valign(gtk4::Align::Center);

        let streak_label = Label::new(Some(get_streak_emoji(habit.streak)));
        streak_label.add_css_class("streak-icon");

        let summary = Label::new(Some(&habit_summary(habit)));
        summary.add_css_class("habit-label");
        summary.add_css_class(theme.css_class());
        if habit.streak >= 7 {
            summary.add_css_class("high-streak");
        }
        summary.set_wrap(true);
        summary.set_xalign(0.0);
        summary.set_hexpand(true);

        let delete_button = Button::with_label("Delete");
        delete_button.set_tooltip_text(Some("Delete this habit"));
        delete_button.add_css_class("destructive-action");
        delete_button.add_css_class("compact-button");
        delete_button.set_valign(gtk4::Align::Center);

        let habit_id = habit.id;

        let presenter = self.clone();
        done_check.connect_toggled(move |check| {
            presenter.handle(RowAction::SetDone(habit_id, check.is_active()));
        });

        let presenter = self.clone();
        delete_button.connect_clicked(move |_| {
            presenter.handle(RowAction::Delete(habit_id));
        });

        row.append(&done_check);
        row.append(&streak_label);
        row.append(&summary);
        row.append(&delete_button);
        row
    }

    fn handle(&self, action: RowAction) {
        let outcome = apply_row_action(&mut self.store.borrow_mut(), action, habit::today());

        match outcome {
            Some(RowOutcome::Updated) => self.render(),
            Some(RowOutcome::Removed(habit)) => {
                let toast = Toast::new(&format!("Removed habit: {}", habit.name));
                self.toast_overlay.add_toast(toast);
                self.render();
            }
            None => debug!(?action, "row action for a habit that is gone"),
        }
    }
}
