//! File-chooser delegation
//!
//! The page asks for files; the host runs its picker and reports back
//! later. Only one chooser is outstanding at a time.

use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Slot holding the page's pending file request
#[derive(Debug, Default)]
pub struct FileChooser {
    pending: Option<oneshot::Sender<Vec<String>>>,
}

impl FileChooser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new file request
    ///
    /// A request that is still pending is resolved with an empty selection.
    pub fn open(&mut self) -> oneshot::Receiver<Vec<String>> {
        if let Some(previous) = self.pending.take() {
            debug!("Replacing pending file chooser");
            let _ = previous.send(Vec::new());
        }

        let (tx, rx) = oneshot::channel();
        self.pending = Some(tx);
        rx
    }

    /// Deliver the picked URIs to the pending request
    ///
    /// Returns false when nothing was waiting.
    pub fn complete(&mut self, uris: Vec<String>) -> bool {
        match self.pending.take() {
            Some(tx) => {
                debug!(count = uris.len(), "Delivering chosen files");
                // The page may have gone away in the meantime.
                let _ = tx.send(uris);
                true
            }
            None => {
                warn!("File chooser result arrived with no pending request");
                false
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_complete_delivers_selection() {
        let mut chooser = FileChooser::new();
        let rx = chooser.open();
        assert!(chooser.is_pending());

        assert!(chooser.complete(vec!["content://media/1".into(), "content://media/2".into()]));
        assert_eq!(rx.await.unwrap().len(), 2);
        assert!(!chooser.is_pending());
    }

    #[tokio::test]
    async fn test_reopen_resolves_previous_empty() {
        let mut chooser = FileChooser::new();
        let first = chooser.open();
        let second = chooser.open();

        assert!(first.await.unwrap().is_empty());
        chooser.complete(vec!["file:///tmp/a.png".into()]);
        assert_eq!(second.await.unwrap(), vec!["file:///tmp/a.png".to_string()]);
    }

    #[test]
    fn test_complete_without_request() {
        let mut chooser = FileChooser::new();
        assert!(!chooser.complete(vec!["x".into()]));
    }
}
