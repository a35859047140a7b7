use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, Semaphore, SemaphorePermit};
use tokio::time::{Interval, MissedTickBehavior};

/// Bounded pool of peripheral frame buffers (`fb_count` slots).
///
/// A slot taken with [`checkout`](Self::checkout) and [`commit`](Self::commit)
/// stays taken until [`give_back`](Self::give_back); nothing returns it
/// implicitly.
#[derive(Debug)]
pub struct FrameBufferPool {
    slots: Semaphore,
    capacity: usize,
    outstanding: AtomicUsize,
    wait_timeout: Duration,
}

impl FrameBufferPool {
    pub fn new(capacity: usize, wait_timeout: Duration) -> Self {
        Self {
            slots: Semaphore::new(capacity),
            capacity,
            outstanding: AtomicUsize::new(0),
            wait_timeout,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Buffers currently handed out
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Wait for a free slot, up to the capture timeout.
    ///
    /// Dropping the returned permit without committing gives the slot back.
    pub async fn checkout(&self) -> Option<SemaphorePermit<'_>> {
        match tokio::time::timeout(self.wait_timeout, self.slots.acquire()).await {
            Ok(Ok(permit)) => Some(permit),
            Ok(Err(_)) => None,
            Err(_) => {
                tracing::debug!(
                    capacity = self.capacity,
                    "No free frame buffer within {:?}",
                    self.wait_timeout
                );
                None
            }
        }
    }

    /// Mark a checked-out slot as owned by a frame
    pub fn commit(&self, permit: SemaphorePermit<'_>) {
        permit.forget();
        self.outstanding.fetch_add(1, Ordering::SeqCst);
    }

    pub fn give_back(&self) {
        let returned = self
            .outstanding
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        if returned {
            self.slots.add_permits(1);
        } else {
            tracing::error!("Frame buffer returned to a pool with none outstanding");
        }
    }
}

/// Paces captures at the sensor's exposure rate
#[derive(Debug)]
pub struct SensorClock {
    exposures: Mutex<Interval>,
}

impl SensorClock {
    pub fn new(frame_interval: Duration) -> Self {
        let mut interval = tokio::time::interval(frame_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            exposures: Mutex::new(interval),
        }
    }

    /// Wait for the next exposure to complete
    pub async fn next_exposure(&self) {
        self.exposures.lock().await.tick().await;
    }
}
