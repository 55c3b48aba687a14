use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use folio_core::errors::{Error, Result};
use log::error;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

type Erased = Box<dyn Any + Send + 'static>;

// A write job runs against the actor's connection inside one immediate transaction.
type Job = Box<dyn FnOnce(&mut SqliteConnection) -> Result<Erased> + Send + 'static>;
type Reply = oneshot::Sender<Result<Erased>>;

const QUEUE_CAPACITY: usize = 1024;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job, Reply)>,
}

impl WriteHandle {
    /// Runs `job` on the writer's dedicated connection and waits for its result.
    ///
    /// Jobs are executed one at a time, each inside an `IMMEDIATE` transaction,
    /// so a read-modify-write inside a job cannot interleave with another write.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let erased: Job = Box::new(move |conn| job(conn).map(|value| Box::new(value) as Erased));

        self.tx
            .send((erased, reply_tx))
            .await
            .map_err(|_| Error::Unexpected("database writer has stopped".to_string()))?;

        let boxed = reply_rx.await.map_err(|_| {
            Error::Unexpected("database writer dropped the job without replying".to_string())
        })??;

        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::Unexpected("database writer returned an unexpected type".into()))
    }
}

/// Spawns the single writer task. It holds one pooled connection for its
/// whole lifetime and stops once every `WriteHandle` is dropped.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(Job, Reply)>(QUEUE_CAPACITY);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Database writer could not acquire a connection: {}", e);
                // Dropping the receiver makes every pending and future exec() fail.
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // The caller may have gone away (request cancelled); nothing to do then.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
