//! Debounced draft persistence.
//!
//! Every edit reschedules the save: the pending task is aborted and a new one
//! sleeps for the quiet period before writing. Only the last edit of a burst
//! reaches the store.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::snapshot::FormSnapshot;
use crate::store::Store;

pub struct DraftAutosave {
    store: Store,
    key: String,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl DraftAutosave {
    pub fn new(store: Store, key: impl Into<String>, delay: Duration) -> Self {
        Self {
            store,
            key: key.into(),
            delay,
            pending: None,
        }
    }

    /// Replace any pending save with one writing `snapshot` after the quiet
    /// period. Outside a tokio runtime nothing is scheduled.
    pub fn schedule(&mut self, snapshot: FormSnapshot) {
        self.cancel();

        let Ok(handle) = Handle::try_current() else {
            log::warn!("[autosave] no async runtime, draft not scheduled");
            return;
        };

        let store = self.store.clone();
        let key = self.key.clone();
        let delay = self.delay;
        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            match store.set(&key, &snapshot).await {
                Ok(()) => log::debug!("[autosave] draft saved under {}", key),
                Err(e) => log::warn!("[autosave] failed to save draft: {}", e),
            }
        }));
    }

    /// Drop the pending save, if any.
    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }

    /// Whether a save is waiting for its quiet period to end.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// The stored draft. Read failures are logged and treated as no draft.
    pub async fn load(&self) -> Option<FormSnapshot> {
        match self.store.get(&self.key).await {
            Ok(draft) => draft,
            Err(e) => {
                log::warn!("[autosave] failed to load draft: {}", e);
                None
            }
        }
    }

    /// Cancel the pending save and delete the stored draft.
    pub async fn discard(&mut self) {
        self.cancel();
        if let Err(e) = self.store.delete(&self.key).await {
            log::warn!("[autosave] failed to delete draft: {}", e);
        }
    }
}

impl Drop for DraftAutosave {
    fn drop(&mut self) {
        self.cancel();
    }
}
