//! Debounced draft saving.
//!
//! [`Autosave`] owns a background task holding at most one pending snapshot.
//! Every [`Autosave::notify`] replaces the snapshot and restarts the timer;
//! when the timer fires the snapshot is written to local storage.
//! [`Autosave::flush`] writes immediately, and dropping the handle cancels
//! whatever is still pending.

use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use jiff::Timestamp;
use log::{debug, warn};
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
    time::{self, Instant},
};

use crate::{
    db,
    error::{PlanningError, Result},
    models::{DraftSnapshot, WizardContext},
    wizard::WizardState,
};

/// Default debounce delay between the last edit and the save.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_secs(10);

struct Pending {
    generation: u64,
    context: WizardContext,
    snapshot: DraftSnapshot,
}

enum Command {
    Schedule(Box<Pending>),
    Flush(oneshot::Sender<Result<bool>>),
}

/// Generation and time of the most recent successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Saved {
    generation: u64,
    at: Timestamp,
}

/// Handle to a running autosave task.
pub struct Autosave {
    commands: mpsc::UnboundedSender<Command>,
    saved: watch::Receiver<Option<Saved>>,
    generation: AtomicU64,
    task: JoinHandle<()>,
}

impl Autosave {
    /// Starts the autosave task writing to the store at `db_path`.
    pub fn spawn(db_path: impl AsRef<Path>, delay: Duration) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        let (saved_tx, saved) = watch::channel(None);
        let task = tokio::spawn(run(db_path.as_ref().to_path_buf(), delay, receiver, saved_tx));

        Self {
            commands,
            saved,
            generation: AtomicU64::new(0),
            task,
        }
    }

    /// Schedules a save of `state` and restarts the timer.
    ///
    /// Returns `false` without scheduling anything when the state is clean
    /// or has no event name yet.
    pub fn notify(&self, state: &WizardState) -> bool {
        if !state.should_autosave() {
            return false;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let pending = Pending {
            generation,
            context: state.context.clone(),
            snapshot: state.to_draft(Timestamp::now()),
        };
        self.commands
            .send(Command::Schedule(Box::new(pending)))
            .is_ok()
    }

    /// Writes the pending snapshot now. Returns whether anything was saved.
    pub async fn flush(&self) -> Result<bool> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Flush(reply))
            .map_err(|_| autosave_stopped())?;
        response.await.map_err(|_| autosave_stopped())?
    }

    /// Time of the most recent successful save.
    pub fn last_saved(&self) -> Option<Timestamp> {
        self.saved.borrow().map(|saved| saved.at)
    }

    /// Clears the dirty flag of `state` when its latest notified snapshot
    /// has been written. Returns whether the state was updated.
    pub fn sync_state(&self, state: &mut WizardState) -> bool {
        let latest = self.generation.load(Ordering::SeqCst);
        match *self.saved.borrow() {
            Some(saved) if saved.generation == latest && state.is_dirty => {
                state.mark_saved(saved.at);
                true
            }
            _ => false,
        }
    }
}

impl Drop for Autosave {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn autosave_stopped() -> PlanningError {
    PlanningError::Configuration {
        message: "Autosave task is no longer running".to_string(),
    }
}

async fn run(
    db_path: PathBuf,
    delay: Duration,
    mut commands: mpsc::UnboundedReceiver<Command>,
    saved: watch::Sender<Option<Saved>>,
) {
    let mut pending: Option<Pending> = None;
    let timer = time::sleep(delay);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Schedule(next)) => {
                    pending = Some(*next);
                    timer.as_mut().reset(Instant::now() + delay);
                }
                Some(Command::Flush(reply)) => {
                    let result = save(&db_path, pending.take(), &saved).await;
                    let _ = reply.send(result);
                }
                None => break,
            },
            () = &mut timer, if pending.is_some() => {
                if let Err(e) = save(&db_path, pending.take(), &saved).await {
                    warn!("Autosave failed: {e}");
                }
            }
        }
    }
}

async fn save(
    db_path: &Path,
    pending: Option<Pending>,
    saved: &watch::Sender<Option<Saved>>,
) -> Result<bool> {
    let Some(Pending {
        generation,
        context,
        mut snapshot,
    }) = pending
    else {
        return Ok(false);
    };

    let now = Timestamp::now();
    snapshot.timestamp = now.as_millisecond();
    db::blocking(db_path, move |storage| storage.save_draft(&context, &snapshot)).await?;

    saved.send_replace(Some(Saved { generation, at: now }));
    debug!("Autosaved draft generation {generation}");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::db::{DraftLoad, LocalStorage};

    fn named_state(name: &str) -> WizardState {
        let mut state = WizardState::new(WizardContext::new("social", "birthday", None));
        state.edit_form(|form| form.event_name = name.to_string());
        state
    }

    fn stored_name(db_path: &Path, context: &WizardContext) -> Option<String> {
        let mut storage = LocalStorage::new(db_path).unwrap();
        match storage.load_draft(context, Timestamp::now()).unwrap() {
            DraftLoad::Restored(snapshot) => Some(snapshot.form_data.event_name),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_clean_or_unnamed_state_is_ignored() {
        let dir = TempDir::new().unwrap();
        let autosave = Autosave::spawn(dir.path().join("local.db"), Duration::from_millis(20));

        let clean = WizardState::new(WizardContext::new("social", "birthday", None));
        assert!(!autosave.notify(&clean));

        let mut unnamed = clean.clone();
        unnamed.edit_form(|form| form.city = "Goa".to_string());
        assert!(!autosave.notify(&unnamed));
    }

    #[tokio::test]
    async fn test_saves_after_debounce_with_latest_snapshot() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("local.db");
        let autosave = Autosave::spawn(&db_path, Duration::from_millis(100));

        let mut state = named_state("First name");
        assert!(autosave.notify(&state));
        time::sleep(Duration::from_millis(20)).await;
        state.edit_form(|form| form.event_name = "Second name".to_string());
        assert!(autosave.notify(&state));

        time::sleep(Duration::from_millis(40)).await;
        assert_eq!(stored_name(&db_path, &state.context), None);

        time::sleep(Duration::from_millis(400)).await;
        assert_eq!(
            stored_name(&db_path, &state.context).as_deref(),
            Some("Second name")
        );
        assert!(autosave.last_saved().is_some());
        assert!(autosave.sync_state(&mut state));
        assert!(!state.is_dirty);
    }

    #[tokio::test]
    async fn test_flush_saves_immediately() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("local.db");
        let autosave = Autosave::spawn(&db_path, Duration::from_secs(60));

        let state = named_state("Unload save");
        assert!(autosave.notify(&state));
        assert!(autosave.flush().await.unwrap());
        assert_eq!(
            stored_name(&db_path, &state.context).as_deref(),
            Some("Unload save")
        );
        assert!(!autosave.flush().await.unwrap());
    }

    #[tokio::test]
    async fn test_drop_cancels_pending_save() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("local.db");
        let state = named_state("Never written");
        {
            let autosave = Autosave::spawn(&db_path, Duration::from_millis(50));
            assert!(autosave.notify(&state));
        }
        time::sleep(Duration::from_millis(250)).await;
        assert_eq!(stored_name(&db_path, &state.context), None);
    }

    #[tokio::test]
    async fn test_sync_state_ignores_newer_edits() {
        let dir = TempDir::new().unwrap();
        let autosave = Autosave::spawn(dir.path().join("local.db"), Duration::from_secs(60));

        let mut state = named_state("Saved");
        autosave.notify(&state);
        autosave.flush().await.unwrap();

        state.edit_form(|form| form.city = "Kochi".to_string());
        autosave.notify(&state);
        assert!(!autosave.sync_state(&mut state));
        assert!(state.is_dirty);
    }
}
