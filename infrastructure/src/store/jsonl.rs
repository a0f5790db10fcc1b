//! JSONL file-backed vote store.
//!
//! Each [`Ballot`] is serialized as a single JSON line and appended via a
//! buffered writer, flushed per write — JSONL is append-only, so a crash
//! loses at most the line being written. On open the file is replayed to
//! rebuild the dedup index, which keeps vote history (and tallies for old
//! session ids) available across restarts.

use async_trait::async_trait;
use pitchpoll_application::{RecordOutcome, VoteStore, VoteStoreError};
use pitchpoll_domain::{Ballot, ParticipantId, SessionId, Tally, VoteChoice};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

struct Inner {
    writer: BufWriter<File>,
    index: HashMap<(SessionId, ParticipantId), VoteChoice>,
}

/// Durable ballot store writing one JSON object per line.
///
/// Thread-safe via `Mutex<Inner>`: the lock covers the existence check,
/// the append, and the index update, so concurrent casts for the same key
/// serialize. Flushes on `Drop`.
pub struct JsonlVoteStore {
    inner: Mutex<Inner>,
    path: PathBuf,
}

impl JsonlVoteStore {
    /// Open (or create) a ballot log at the given path.
    ///
    /// Creates parent directories if needed and replays any existing lines
    /// into the dedup index. A torn or corrupt line (e.g., from a crash
    /// mid-write) is skipped with a warning rather than poisoning the
    /// whole log.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VoteStoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| VoteStoreError::Unavailable(e.to_string()))?;
        }

        let mut index = HashMap::new();
        if path.exists() {
            let file = File::open(path).map_err(|e| VoteStoreError::Unavailable(e.to_string()))?;
            for (lineno, line) in BufReader::new(file).lines().enumerate() {
                let line = line.map_err(|e| VoteStoreError::Unavailable(e.to_string()))?;
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<Ballot>(&line) {
                    Ok(ballot) => {
                        // First write wins, matching record()'s insert-if-absent
                        index.entry(ballot.key()).or_insert(ballot.choice);
                    }
                    Err(e) => {
                        warn!(
                            "Skipping unreadable ballot at {}:{}: {}",
                            path.display(),
                            lineno + 1,
                            e
                        );
                    }
                }
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| VoteStoreError::Unavailable(e.to_string()))?;

        Ok(Self {
            inner: Mutex::new(Inner {
                writer: BufWriter::new(file),
                index,
            }),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the ballot log.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl VoteStore for JsonlVoteStore {
    async fn record(&self, ballot: Ballot) -> Result<RecordOutcome, VoteStoreError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| VoteStoreError::Unavailable("ballot log poisoned".into()))?;

        let key = ballot.key();
        if inner.index.contains_key(&key) {
            return Ok(RecordOutcome::AlreadyVoted);
        }

        let line = serde_json::to_string(&ballot)
            .map_err(|e| VoteStoreError::Unavailable(e.to_string()))?;
        writeln!(inner.writer, "{}", line)
            .map_err(|e| VoteStoreError::Unavailable(e.to_string()))?;
        inner
            .writer
            .flush()
            .map_err(|e| VoteStoreError::Unavailable(e.to_string()))?;

        // Only index after the line is durably appended, so a failed write
        // leaves the key free for a retry
        inner.index.insert(key, ballot.choice);
        Ok(RecordOutcome::Recorded)
    }

    async fn tally(&self, session_id: &SessionId) -> Result<Tally, VoteStoreError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| VoteStoreError::Unavailable("ballot log poisoned".into()))?;
        Ok(Tally::from_choices(
            inner
                .index
                .iter()
                .filter(|((session, _), _)| session == session_id)
                .map(|(_, choice)| *choice),
        ))
    }
}

impl Drop for JsonlVoteStore {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            let _ = inner.writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ballot(session: &SessionId, participant: &str, choice: VoteChoice) -> Ballot {
        Ballot::new(
            session.clone(),
            ParticipantId::new(participant),
            choice,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_record_and_tally() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlVoteStore::open(dir.path().join("votes.jsonl")).unwrap();
        let session = SessionId::generate();

        assert_eq!(
            store
                .record(ballot(&session, "p1", VoteChoice::Yes))
                .await
                .unwrap(),
            RecordOutcome::Recorded
        );
        assert_eq!(
            store
                .record(ballot(&session, "p1", VoteChoice::No))
                .await
                .unwrap(),
            RecordOutcome::AlreadyVoted
        );
        assert_eq!(
            store
                .record(ballot(&session, "p2", VoteChoice::No))
                .await
                .unwrap(),
            RecordOutcome::Recorded
        );

        assert_eq!(
            store.tally(&session).await.unwrap(),
            Tally { yes: 1, no: 1 }
        );
    }

    #[tokio::test]
    async fn test_reopen_preserves_history_and_dedup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("votes.jsonl");
        let session = SessionId::generate();

        {
            let store = JsonlVoteStore::open(&path).unwrap();
            store
                .record(ballot(&session, "p1", VoteChoice::Yes))
                .await
                .unwrap();
            store
                .record(ballot(&session, "p2", VoteChoice::No))
                .await
                .unwrap();
        }

        let store = JsonlVoteStore::open(&path).unwrap();
        assert_eq!(
            store.tally(&session).await.unwrap(),
            Tally { yes: 1, no: 1 }
        );
        // Dedup survives the restart
        assert_eq!(
            store
                .record(ballot(&session, "p1", VoteChoice::No))
                .await
                .unwrap(),
            RecordOutcome::AlreadyVoted
        );
    }

    #[tokio::test]
    async fn test_torn_line_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("votes.jsonl");
        let session = SessionId::generate();

        {
            let store = JsonlVoteStore::open(&path).unwrap();
            store
                .record(ballot(&session, "p1", VoteChoice::Yes))
                .await
                .unwrap();
        }
        // Simulate a crash mid-append
        {
            let mut file = OpenOptions::new().append(true).open(&path).unwrap();
            write!(file, "{{\"session_id\":\"trunc").unwrap();
        }

        let store = JsonlVoteStore::open(&path).unwrap();
        assert_eq!(
            store.tally(&session).await.unwrap(),
            Tally { yes: 1, no: 0 }
        );
    }

    #[tokio::test]
    async fn test_empty_tally_for_unknown_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlVoteStore::open(dir.path().join("votes.jsonl")).unwrap();
        assert_eq!(
            store.tally(&SessionId::generate()).await.unwrap(),
            Tally::empty()
        );
    }
}
