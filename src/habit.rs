use std::fmt;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::error::HabitError;

/// Store-assigned handle for a habit. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HabitId(u64);

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "habit_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub progress_note: String,
    pub created_date: NaiveDate,
    pub done: bool,
    pub streak: u32,
    pub last_checked_date: NaiveDate,
}

/// What a completion check did to the streak counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    Extended,
    Reset,
    Unchanged,
}

/// The local calendar date, used as "today" by the UI.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl Habit {
    fn new(id: HabitId, name: String, progress_note: String, today: NaiveDate) -> Self {
        Self {
            id,
            name,
            progress_note,
            created_date: today,
            done: false,
            streak: 1,
            last_checked_date: today,
        }
    }

    /// Whole calendar days between the last completion and `today`.
    pub fn day_delta(&self, today: NaiveDate) -> i64 {
        (today - self.last_checked_date).num_days()
    }

    /// Records a completion on `today` and advances the streak.
    ///
    /// Yesterday's completion extends the streak, a longer gap restarts it at 1,
    /// and a second check on the same day leaves it alone. A last-checked date
    /// in the future is treated like a same-day check.
    pub fn check(&mut self, today: NaiveDate) -> StreakChange {
        let delta = self.day_delta(today);
        let change = match delta {
            1 => {
                self.streak += 1;
                StreakChange::Extended
            }
            d if d > 1 => {
                self.streak = 1;
                StreakChange::Reset
            }
            0 => StreakChange::Unchanged,
            _ => {
                warn!(
                    habit = %self.id,
                    last_checked = %self.last_checked_date,
                    %today,
                    "last checked date is in the future; keeping streak"
                );
                StreakChange::Unchanged
            }
        };
        self.last_checked_date = today;
        change
    }
}

/// In-memory, insertion-ordered collection of habits.
#[derive(Debug, Default)]
pub struct HabitStore {
    habits: Vec<Habit>,
    next_id: u64,
}

impl HabitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        name: &str,
        progress_note: &str,
        today: NaiveDate,
    ) -> Result<&Habit, HabitError> {
        let name = name.trim();
        let progress_note = progress_note.trim();

        if name.is_empty() {
            return Err(HabitError::EmptyInput { field: "name" });
        }
        if progress_note.is_empty() {
            return Err(HabitError::EmptyInput { field: "progress note" });
        }

        let id = HabitId(self.next_id);
        self.next_id += 1;

        let habit = Habit::new(id, name.to_string(), progress_note.to_string(), today);
        info!(habit = %id, name = %habit.name, created = %today, "habit added");
        self.habits.push(habit);

        Ok(&self.habits[self.habits.len() - 1])
    }

    pub fn remove(&mut self, habit_id: HabitId) -> Option<Habit> {
        let index = self.habits.iter().position(|h| h.id == habit_id)?;
        let removed = self.habits.remove(index);
        info!(habit = %habit_id, name = %removed.name, "habit removed");
        Some(removed)
    }

    /// Sets the done flag. Checking runs the streak rule; unchecking only
    /// clears the flag. Unknown ids are ignored.
    pub fn set_done(
        &mut self,
        habit_id: HabitId,
        done: bool,
        today: NaiveDate,
    ) -> Option<&Habit> {
        let habit = self.get_mut(habit_id)?;

        if done {
            let change = habit.check(today);
            debug!(habit = %habit_id, ?change, streak = habit.streak, "habit checked");
        } else {
            debug!(habit = %habit_id, streak = habit.streak, "habit unchecked");
        }
        habit.done = done;

        Some(&*habit)
    }

    #[cfg(test)]
    pub fn get(&self, habit_id: HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == habit_id)
    }

    fn get_mut(&mut self, habit_id: HabitId) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|h| h.id == habit_id)
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, n).unwrap()
    }

    fn store_with_habit(created: NaiveDate) -> (HabitStore, HabitId) {
        let mut store = HabitStore::new();
        let id = store.add("Read", "10 pages", created).unwrap().id;
        (store, id)
    }

    #[test]
    fn add_creates_fresh_habit() {
        init_test_logging();
        let mut store = HabitStore::new();
        let habit = store.add("  Run ", " 5km  ", day(1)).unwrap().clone();

        assert_eq!(store.len(), 1);
        assert_eq!(habit.name, "Run");
        assert_eq!(habit.progress_note, "5km");
        assert_eq!(habit.streak, 1);
        assert!(!habit.done);
        assert_eq!(habit.created_date, day(1));
        assert_eq!(habit.last_checked_date, day(1));
    }

    #[test]
    fn add_rejects_blank_fields() {
        init_test_logging();
        let mut store = HabitStore::new();

        assert_eq!(
            store.add("", "note", day(1)).unwrap_err(),
            HabitError::EmptyInput { field: "name" }
        );
        assert_eq!(
            store.add("Run", "   \t", day(1)).unwrap_err(),
            HabitError::EmptyInput { field: "progress note" }
        );
        assert!(store.add("  ", "  ", day(1)).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn add_keeps_insertion_order_and_unique_ids() {
        let mut store = HabitStore::new();
        let a = store.add("A", "a", day(1)).unwrap().id;
        let b = store.add("B", "b", day(1)).unwrap().id;
        store.remove(a);
        let c = store.add("C", "c", day(1)).unwrap().id;

        assert_ne!(a, c);
        assert_ne!(b, c);
        let names: Vec<_> = store.habits().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["B", "C"]);
    }

    #[test]
    fn check_next_day_extends_streak() {
        init_test_logging();
        let (mut store, id) = store_with_habit(day(1));

        let habit = store.set_done(id, true, day(2)).unwrap();
        assert_eq!(habit.streak, 2);
        assert_eq!(habit.last_checked_date, day(2));
        assert!(habit.done);
    }

    #[test]
    fn check_after_gap_resets_streak() {
        let (mut store, id) = store_with_habit(day(1));
        store.set_done(id, true, day(2));
        store.set_done(id, false, day(2));
        store.set_done(id, true, day(3));
        assert_eq!(store.get(id).unwrap().streak, 3);

        let habit = store.set_done(id, true, day(7)).unwrap();
        assert_eq!(habit.streak, 1);
        assert_eq!(habit.last_checked_date, day(7));
    }

    #[test]
    fn check_same_day_keeps_streak() {
        let (mut store, id) = store_with_habit(day(1));

        let habit = store.set_done(id, true, day(1)).unwrap();
        assert_eq!(habit.streak, 1);
        assert_eq!(habit.last_checked_date, day(1));
    }

    #[test]
    fn uncheck_only_clears_done() {
        let (mut store, id) = store_with_habit(day(1));
        store.set_done(id, true, day(2));
        let before = store.get(id).unwrap().clone();

        let habit = store.set_done(id, false, day(9)).unwrap();
        assert!(!habit.done);
        assert_eq!(habit.streak, before.streak);
        assert_eq!(habit.last_checked_date, before.last_checked_date);
    }

    #[test]
    fn future_last_checked_keeps_streak() {
        init_test_logging();
        let (mut store, id) = store_with_habit(day(10));
        store.set_done(id, true, day(11));

        let habit = store.set_done(id, true, day(5)).unwrap();
        assert_eq!(habit.streak, 2);
        assert_eq!(habit.last_checked_date, day(5));
    }

    #[test]
    fn removed_habit_ignores_further_operations() {
        let (mut store, id) = store_with_habit(day(1));

        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert!(store.set_done(id, true, day(2)).is_none());
        assert!(store.get(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn streak_walkthrough() {
        let (mut store, id) = store_with_habit(day(1));
        assert_eq!(store.get(id).unwrap().streak, 1);

        assert_eq!(store.set_done(id, true, day(2)).unwrap().streak, 2);
        assert_eq!(store.set_done(id, false, day(2)).unwrap().streak, 2);
        assert_eq!(store.set_done(id, true, day(2)).unwrap().streak, 2);
        assert_eq!(store.set_done(id, true, day(5)).unwrap().streak, 1);
    }

    #[test]
    fn day_delta_spans_month_boundary() {
        let mut habit = Habit::new(
            HabitId(0),
            "Walk".into(),
            "ok".into(),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
        );
        let march_first = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        assert_eq!(habit.day_delta(march_first), 1);
        assert_eq!(habit.check(march_first), StreakChange::Extended);
        assert_eq!(habit.check(march_first), StreakChange::Unchanged);
    }
}
