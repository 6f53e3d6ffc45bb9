//! XP and daily streak bookkeeping.
//!
//! Stats are loaded once, reconciled against today, and written through to
//! the store after every mutation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clock::SharedClock;
use crate::storage::{keys, load_or_default, save_best_effort, RewardsConfig, SharedStore};

/// Persisted progress counters.
///
/// Field names match the stored JSON layout (`completedToday`,
/// `lastCompleteDate`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressStats {
    pub xp: u64,
    pub completed_today: u32,
    pub streak: u32,
    #[serde(with = "completion_date")]
    pub last_complete_date: Option<NaiveDate>,
}

/// Outcome of [`ProgressTracker::reconcile_daily`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Reconciliation {
    /// Nothing has ever been completed.
    NoHistory,
    /// Last completion was today.
    Current,
    /// Last completion was yesterday; the streak is preserved.
    Preserved,
    /// Gap of two or more days, a date ahead of today, or a stored date
    /// that could not be read; streak zeroed.
    Broken { previous_streak: u32 },
}

pub struct ProgressTracker {
    stats: ProgressStats,
    rewards: RewardsConfig,
    store: SharedStore,
    clock: SharedClock,
    /// Stored `lastCompleteDate` was present but unparseable.
    unreadable_date: bool,
}

impl ProgressTracker {
    /// Load stats from the store. Missing or unreadable stats start at zero.
    ///
    /// An unreadable completion date only drops the date; the counters are
    /// kept and the next [`reconcile_daily`](Self::reconcile_daily) breaks
    /// the streak.
    pub fn load(store: SharedStore, clock: SharedClock, rewards: RewardsConfig) -> Self {
        let raw: Value = load_or_default(&*store, keys::STATS);
        let unreadable_date = raw
            .get("lastCompleteDate")
            .and_then(Value::as_str)
            .is_some_and(|s| completion_date::parse(s).is_none());
        let stats = if raw.is_null() {
            ProgressStats::default()
        } else {
            serde_json::from_value(raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stored stats have unexpected shape, starting fresh");
                ProgressStats::default()
            })
        };
        Self {
            stats,
            rewards,
            store,
            clock,
            unreadable_date,
        }
    }

    pub fn stats(&self) -> &ProgressStats {
        &self.stats
    }

    pub fn rewards(&self) -> &RewardsConfig {
        &self.rewards
    }

    /// Award a task completion. Call once per incomplete→complete transition.
    ///
    /// Returns the XP awarded.
    pub fn on_task_completed(&mut self, has_goal: bool) -> u64 {
        let reward = if has_goal {
            self.rewards.goal_task
        } else {
            self.rewards.task
        };
        self.stats.xp = self.stats.xp.saturating_add(reward);
        self.stats.completed_today = self.stats.completed_today.saturating_add(1);
        self.stats.last_complete_date = Some(self.clock.today());
        tracing::info!(reward, has_goal, xp = self.stats.xp, "task completed");
        self.persist();
        reward
    }

    /// Award a finished work round. Returns the XP awarded.
    pub fn on_timer_round_completed(&mut self) -> u64 {
        let reward = self.rewards.round;
        self.stats.xp = self.stats.xp.saturating_add(reward);
        tracing::info!(reward, xp = self.stats.xp, "work round completed");
        self.persist();
        reward
    }

    /// Adjust the streak for days elapsed since the last completion.
    ///
    /// Run once per load, before any other mutation. Only a broken streak
    /// changes state.
    pub fn reconcile_daily(&mut self) -> Reconciliation {
        let today = self.clock.today();
        if std::mem::take(&mut self.unreadable_date) {
            let outcome = self.break_streak();
            tracing::warn!(%today, ?outcome, "last completion date unreadable, streak reset");
            return outcome;
        }
        let Some(last) = self.stats.last_complete_date else {
            return Reconciliation::NoHistory;
        };

        let outcome = if last == today {
            Reconciliation::Current
        } else if today.pred_opt() == Some(last) {
            Reconciliation::Preserved
        } else {
            self.break_streak()
        };
        tracing::info!(%last, %today, ?outcome, "daily reconciliation");
        outcome
    }

    fn break_streak(&mut self) -> Reconciliation {
        let previous_streak = self.stats.streak;
        self.stats.streak = 0;
        self.persist();
        Reconciliation::Broken { previous_streak }
    }

    /// Zero every counter and forget the last completion date.
    pub fn reset_all(&mut self) {
        self.stats = ProgressStats::default();
        tracing::info!("progress reset");
        self.persist();
    }

    fn persist(&self) {
        save_best_effort(&*self.store, keys::STATS, &self.stats);
    }
}

/// `YYYY-MM-DD` on write. On read, also accepts the `Sat Oct 17 2026` form
/// older stats blobs were saved with; anything else reads as unset.
mod completion_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const ISO: &str = "%Y-%m-%d";
    const LEGACY: &str = "%a %b %d %Y";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_some(&d.format(ISO).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, ISO)
            .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY))
            .ok()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let date = parse(&raw);
        if date.is_none() {
            tracing::warn!(raw = %raw, "unreadable completion date, ignoring");
        }
        Ok(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::{KvStore, MemoryStore};
    use serde_json::json;
    use std::rc::Rc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 10, 17)
    }

    fn tracker_with(stats: ProgressStats) -> (ProgressTracker, Rc<MemoryStore>) {
        let store = Rc::new(MemoryStore::new());
        store
            .set(keys::STATS, &serde_json::to_value(&stats).unwrap())
            .unwrap();
        let clock = Rc::new(FixedClock::on(today()));
        let tracker = ProgressTracker::load(store.clone(), clock, RewardsConfig::default());
        (tracker, store)
    }

    fn stored(store: &MemoryStore) -> ProgressStats {
        serde_json::from_value(store.get(keys::STATS).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn goal_task_awards_fifteen() {
        let (mut t, store) = tracker_with(ProgressStats::default());
        assert_eq!(t.on_task_completed(true), 15);
        assert_eq!(t.stats().xp, 15);
        assert_eq!(t.stats().completed_today, 1);
        assert_eq!(t.stats().last_complete_date, Some(today()));
        assert_eq!(stored(&store), *t.stats());
    }

    #[test]
    fn plain_task_awards_eight() {
        let (mut t, _) = tracker_with(ProgressStats::default());
        t.on_task_completed(false);
        t.on_task_completed(false);
        assert_eq!(t.stats().xp, 16);
        assert_eq!(t.stats().completed_today, 2);
    }

    #[test]
    fn task_completion_leaves_streak_alone() {
        let (mut t, _) = tracker_with(ProgressStats {
            streak: 4,
            ..Default::default()
        });
        t.on_task_completed(true);
        assert_eq!(t.stats().streak, 4);
    }

    #[test]
    fn round_awards_five_only() {
        let (mut t, store) = tracker_with(ProgressStats::default());
        assert_eq!(t.on_timer_round_completed(), 5);
        assert_eq!(
            *t.stats(),
            ProgressStats {
                xp: 5,
                ..Default::default()
            }
        );
        assert_eq!(stored(&store).xp, 5);
    }

    #[test]
    fn reconcile_without_history_changes_nothing() {
        let (mut t, _) = tracker_with(ProgressStats {
            streak: 2,
            ..Default::default()
        });
        assert_eq!(t.reconcile_daily(), Reconciliation::NoHistory);
        assert_eq!(t.stats().streak, 2);
    }

    #[test]
    fn reconcile_today_and_yesterday_keep_streak() {
        for (last, expected) in [
            (today(), Reconciliation::Current),
            (date(2026, 10, 16), Reconciliation::Preserved),
        ] {
            let (mut t, _) = tracker_with(ProgressStats {
                streak: 6,
                last_complete_date: Some(last),
                ..Default::default()
            });
            assert_eq!(t.reconcile_daily(), expected);
            assert_eq!(t.stats().streak, 6);
        }
    }

    #[test]
    fn reconcile_after_gap_breaks_streak_and_persists() {
        let (mut t, store) = tracker_with(ProgressStats {
            xp: 40,
            streak: 6,
            last_complete_date: Some(date(2026, 10, 14)),
            ..Default::default()
        });
        assert_eq!(
            t.reconcile_daily(),
            Reconciliation::Broken { previous_streak: 6 }
        );
        assert_eq!(t.stats().streak, 0);
        assert_eq!(t.stats().xp, 40);
        assert_eq!(stored(&store).streak, 0);
    }

    #[test]
    fn reconcile_across_month_boundary_uses_calendar_days() {
        let store = Rc::new(MemoryStore::new());
        let stats = ProgressStats {
            streak: 3,
            last_complete_date: Some(date(2026, 2, 28)),
            ..Default::default()
        };
        store
            .set(keys::STATS, &serde_json::to_value(&stats).unwrap())
            .unwrap();
        let clock = Rc::new(FixedClock::on(date(2026, 3, 1)));
        let mut t = ProgressTracker::load(store, clock, RewardsConfig::default());
        assert_eq!(t.reconcile_daily(), Reconciliation::Preserved);
    }

    #[test]
    fn reconcile_future_date_breaks_streak() {
        let (mut t, _) = tracker_with(ProgressStats {
            streak: 2,
            last_complete_date: Some(date(2026, 10, 20)),
            ..Default::default()
        });
        assert!(matches!(t.reconcile_daily(), Reconciliation::Broken { .. }));
        assert_eq!(t.stats().streak, 0);
    }

    #[test]
    fn reset_all_zeroes_everything() {
        let (mut t, store) = tracker_with(ProgressStats {
            xp: 99,
            completed_today: 3,
            streak: 5,
            last_complete_date: Some(today()),
        });
        t.reset_all();
        assert_eq!(*t.stats(), ProgressStats::default());
        assert_eq!(stored(&store), ProgressStats::default());
    }

    #[test]
    fn stats_json_uses_stored_field_names() {
        let stats = ProgressStats {
            xp: 23,
            completed_today: 2,
            streak: 1,
            last_complete_date: Some(today()),
        };
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            json!({
                "xp": 23,
                "completedToday": 2,
                "streak": 1,
                "lastCompleteDate": "2026-10-17"
            })
        );
    }

    #[test]
    fn legacy_date_strings_still_load() {
        let stats: ProgressStats = serde_json::from_value(json!({
            "xp": 8,
            "completedToday": 1,
            "streak": 0,
            "lastCompleteDate": "Sat Oct 17 2026"
        }))
        .unwrap();
        assert_eq!(stats.last_complete_date, Some(today()));
    }

    #[test]
    fn unreadable_date_reads_as_unset() {
        let stats: ProgressStats = serde_json::from_value(json!({
            "xp": 120,
            "lastCompleteDate": "Invalid Date"
        }))
        .unwrap();
        assert_eq!(stats.xp, 120);
        assert_eq!(stats.last_complete_date, None);
    }

    #[test]
    fn unreadable_date_keeps_xp_and_breaks_streak() {
        let store = Rc::new(MemoryStore::new());
        store
            .set(
                keys::STATS,
                &json!({
                    "xp": 120,
                    "completedToday": 4,
                    "streak": 9,
                    "lastCompleteDate": "Invalid Date"
                }),
            )
            .unwrap();
        let clock = Rc::new(FixedClock::on(today()));
        let mut t = ProgressTracker::load(store.clone(), clock, RewardsConfig::default());
        assert_eq!(t.stats().xp, 120);

        assert_eq!(
            t.reconcile_daily(),
            Reconciliation::Broken { previous_streak: 9 }
        );
        assert_eq!(t.stats().streak, 0);
        assert_eq!(t.stats().xp, 120);
        assert_eq!(stored(&store).streak, 0);
        assert_eq!(stored(&store).xp, 120);

        t.on_task_completed(false);
        assert_eq!(stored(&store).xp, 128);
        assert_eq!(stored(&store).completed_today, 5);
        assert_eq!(t.reconcile_daily(), Reconciliation::Current);
    }

    #[test]
    fn partial_blob_fills_missing_fields() {
        let stats: ProgressStats =
            serde_json::from_value(json!({ "xp": 12, "lastCompleteDate": null })).unwrap();
        assert_eq!(stats.xp, 12);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.last_complete_date, None);
    }
}
