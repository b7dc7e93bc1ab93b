use dbot_core::{DbotError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::pipeline::{ImageJob, ImagePipeline};

/// Fixed-size worker pool over one FIFO channel.
///
/// At most `concurrency` jobs run at once; the rest wait in the channel. Jobs are dequeued in
/// submission order but may complete in any order.
pub struct ImageJobQueue {
    sender: StdMutex<Option<UnboundedSender<ImageJob>>>,
    pending: Arc<AtomicUsize>,
    workers: StdMutex<Vec<JoinHandle<()>>>,
    concurrency: usize,
}

impl ImageJobQueue {
    /// Spawns `concurrency` workers on the current tokio runtime.
    pub fn start(pipeline: Arc<ImagePipeline>, concurrency: usize) -> Self {
        let concurrency = concurrency.max(1);
        let (sender, receiver) = mpsc::unbounded_channel();
        let receiver = Arc::new(Mutex::new(receiver));
        let pending = Arc::new(AtomicUsize::new(0));

        let workers = (0..concurrency)
            .map(|worker_id| {
                tokio::spawn(worker_loop(
                    worker_id,
                    receiver.clone(),
                    pipeline.clone(),
                    pending.clone(),
                ))
            })
            .collect();

        info!(concurrency, "Image job queue started");
        Self {
            sender: StdMutex::new(Some(sender)),
            pending,
            workers: StdMutex::new(workers),
            concurrency,
        }
    }

    /// Adds a job and returns immediately.
    pub fn enqueue(&self, job: ImageJob) -> Result<()> {
        let guard = self
            .sender
            .lock()
            .map_err(|_| DbotError::QueueClosed)?;
        let sender = guard.as_ref().ok_or(DbotError::QueueClosed)?;

        self.pending.fetch_add(1, Ordering::SeqCst);
        if sender.send(job).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            return Err(DbotError::QueueClosed);
        }
        debug!(pending = self.pending(), "Image job enqueued");
        Ok(())
    }

    /// Jobs queued but not yet picked up by a worker.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Stops accepting jobs. Workers exit once the channel is drained.
    pub fn shutdown(&self) {
        if let Ok(mut guard) = self.sender.lock() {
            if guard.take().is_some() {
                let pending = self.pending();
                if pending > 0 {
                    warn!(pending, "Image job queue closed with jobs still queued");
                } else {
                    info!("Image job queue closed");
                }
            }
        }
    }

    /// Waits for every worker to exit. Only returns after [`shutdown`](Self::shutdown).
    pub async fn join(&self) {
        let handles: Vec<JoinHandle<()>> = match self.workers.lock() {
            Ok(mut workers) => workers.drain(..).collect(),
            Err(_) => return,
        };
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Image worker terminated abnormally");
            }
        }
    }
}

async fn worker_loop(
    worker_id: usize,
    receiver: Arc<Mutex<UnboundedReceiver<ImageJob>>>,
    pipeline: Arc<ImagePipeline>,
    pending: Arc<AtomicUsize>,
) {
    loop {
        let job = {
            let mut receiver = receiver.lock().await;
            receiver.recv().await
        };
        let Some(job) = job else {
            debug!(worker_id, "Image worker exiting");
            break;
        };
        pending.fetch_sub(1, Ordering::SeqCst);
        pipeline.run(job).await;
    }
}
