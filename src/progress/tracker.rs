use std::rc::Rc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use log::{info, warn};

use crate::models::{ProfileId, ProgressSnapshot, SessionRecord};
use crate::store::{BlobStore, StoreKey};

use super::streak;

const MAX_SESSION_RECORDS: usize = 100;
const MAX_ACCURACY_SAMPLES: usize = 50;

#[derive(Debug)]
struct PendingSession {
    skill: String,
    started_at: DateTime<Utc>,
}

/// Per-profile time, completion, accuracy and streak bookkeeping. Every
/// game screen reports into one shared tracker; the pending session is
/// ephemeral and never persisted. With no active profile the tracker still
/// works, but nothing is written to the store.
pub struct ProgressTracker {
    store: Rc<dyn BlobStore>,
    profile_id: Option<ProfileId>,
    snapshot: ProgressSnapshot,
    pending: Option<PendingSession>,
}

impl ProgressTracker {
    pub fn new(store: Rc<dyn BlobStore>, profile_id: Option<ProfileId>) -> Self {
        let snapshot = load_snapshot(store.as_ref(), profile_id.as_deref());
        Self {
            store,
            profile_id,
            snapshot,
            pending: None,
        }
    }

    pub fn profile_id(&self) -> Option<&str> {
        self.profile_id.as_deref()
    }

    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snapshot
    }

    pub fn has_pending_session(&self) -> bool {
        self.pending.is_some()
    }

    /// Swap to another profile's snapshot. An in-flight session belongs to
    /// the previous profile and is dropped uncredited.
    pub fn switch_profile(&mut self, profile_id: Option<ProfileId>) {
        if let Some(pending) = self.pending.take() {
            info!(
                "Discarding pending '{}' session on profile switch",
                pending.skill
            );
        }
        self.snapshot = load_snapshot(self.store.as_ref(), profile_id.as_deref());
        self.profile_id = profile_id;
    }

    pub fn start_session(&mut self, skill: &str) {
        self.start_session_at(skill, Utc::now(), Local::now().date_naive());
    }

    /// Clock-injected variant of `start_session`; `today` is the local
    /// calendar date the streak is anchored on.
    pub fn start_session_at(&mut self, skill: &str, now: DateTime<Utc>, today: NaiveDate) {
        if let Some(previous) = self.pending.take() {
            // Unfinished session is replaced without crediting it.
            info!("Replacing unfinished '{}' session", previous.skill);
        }
        self.pending = Some(PendingSession {
            skill: skill.to_string(),
            started_at: now,
        });
        streak::advance(&mut self.snapshot.streak, today);
        self.persist();
    }

    pub fn end_session(&mut self) {
        self.end_session_at(Utc::now());
    }

    /// Close the pending session, crediting its rounded duration. Safe to
    /// call from teardown paths: with nothing pending it is a no-op.
    pub fn end_session_at(&mut self, now: DateTime<Utc>) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        let elapsed_ms = (now - pending.started_at).num_milliseconds().max(0) as u64;
        let duration_seconds = (elapsed_ms + 500) / 1000;

        *self
            .snapshot
            .time_spent
            .entry(pending.skill.clone())
            .or_insert(0) += duration_seconds;

        self.snapshot.sessions.push(SessionRecord {
            skill: pending.skill,
            duration_seconds,
            timestamp: now,
        });
        if self.snapshot.sessions.len() > MAX_SESSION_RECORDS {
            let excess = self.snapshot.sessions.len() - MAX_SESSION_RECORDS;
            self.snapshot.sessions.drain(..excess);
        }

        self.persist();
    }

    /// Direct time credit outside the session start/end pattern.
    pub fn add_time_spent(&mut self, skill: &str, seconds: u64) {
        *self
            .snapshot
            .time_spent
            .entry(skill.to_string())
            .or_insert(0) += seconds;
        self.persist();
    }

    pub fn complete_exercise(&mut self, exercise: &str) {
        *self
            .snapshot
            .exercises_completed
            .entry(exercise.to_string())
            .or_insert(0) += 1;
        self.persist();
    }

    /// Record an accuracy sample. Out-of-range input is clamped to 0-100
    /// rather than rejected; a crash mid-game would be worse than a
    /// slightly wrong statistic.
    pub fn record_accuracy(&mut self, category: &str, percent: i64) {
        let percent = percent.clamp(0, 100) as u8;
        let samples = self
            .snapshot
            .accuracy
            .entry(category.to_string())
            .or_default();
        samples.push(percent);
        if samples.len() > MAX_ACCURACY_SAMPLES {
            let excess = samples.len() - MAX_ACCURACY_SAMPLES;
            samples.drain(..excess);
        }
        self.persist();
    }

    pub fn get_average_accuracy(&self, category: &str) -> u8 {
        self.snapshot.average_accuracy(category)
    }

    pub fn get_total_time_spent(&self) -> u64 {
        self.snapshot.total_time_spent()
    }

    pub fn get_total_exercises(&self) -> u64 {
        self.snapshot.total_exercises()
    }

    /// Replace the active profile's snapshot with the all-zero default.
    /// Irreversible.
    pub fn reset_progress(&mut self) {
        self.snapshot = ProgressSnapshot::default();
        self.persist();
    }

    fn persist(&self) {
        // With no active profile the state is session-local only.
        let Some(profile_id) = &self.profile_id else {
            return;
        };
        let key = StoreKey::Progress(profile_id.clone());
        let blob = match serde_json::to_string(&self.snapshot) {
            Ok(blob) => blob,
            Err(err) => {
                warn!("Failed to serialize progress for {profile_id}: {err}");
                return;
            }
        };
        // Best effort: a failed write must not disturb the game screen.
        if let Err(err) = self.store.save(&key, &blob) {
            warn!("Failed to persist progress for {profile_id}: {err:#}");
        }
    }
}

fn load_snapshot(store: &dyn BlobStore, profile_id: Option<&str>) -> ProgressSnapshot {
    let Some(profile_id) = profile_id else {
        return ProgressSnapshot::default();
    };
    match store.load(&StoreKey::Progress(profile_id.to_string())) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!("Corrupt progress blob for {profile_id}, using defaults: {err}");
            ProgressSnapshot::default()
        }),
        Ok(None) => ProgressSnapshot::default(),
        Err(err) => {
            warn!("Failed to load progress for {profile_id}, using defaults: {err:#}");
            ProgressSnapshot::default()
        }
    }
}
