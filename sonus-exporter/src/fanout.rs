//! Bounded fan-out of one harvest per topology leaf.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{Instrument, debug, warn};

use crate::error::{ProbeError, Result};

type Joined = std::result::Result<(String, Result<()>), JoinError>;

/// Run `harvest` once per leaf with at most `concurrency` in flight.
///
/// Tasks inherit the caller's span. The first failure is returned labelled
/// with its leaf; once it is seen no further leaves are started, while the
/// ones already running are awaited and their outcome dropped. On success
/// returns the number of completed leaves.
pub async fn fan_out<L, F, Fut>(leaves: Vec<L>, concurrency: usize, mut harvest: F) -> Result<usize>
where
    L: Display,
    F: FnMut(L) -> Fut,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let stop = Arc::new(AtomicBool::new(false));
    let mut tasks = JoinSet::new();
    let mut state = FanOutState::default();

    for leaf in leaves {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        while let Some(joined) = tasks.try_join_next() {
            state.absorb(joined);
        }
        if state.failed() || stop.load(Ordering::SeqCst) {
            debug!(leaf = %leaf, "Not starting leaf after earlier failure");
            break;
        }

        let label = leaf.to_string();
        let work = harvest(leaf);
        let stop = stop.clone();
        tasks.spawn(
            async move {
                let result = work.await;
                // Raised before the permit is released so the next acquire sees it.
                if result.is_err() {
                    stop.store(true, Ordering::SeqCst);
                }
                drop(permit);
                (label, result)
            }
            .in_current_span(),
        );
    }

    while let Some(joined) = tasks.join_next().await {
        state.absorb(joined);
    }

    match state.first_error {
        Some(err) => Err(err),
        None => Ok(state.completed),
    }
}

#[derive(Default)]
struct FanOutState {
    completed: usize,
    first_error: Option<ProbeError>,
}

impl FanOutState {
    fn failed(&self) -> bool {
        self.first_error.is_some()
    }

    fn absorb(&mut self, joined: Joined) {
        let err = match joined {
            Ok((_, Ok(()))) => {
                self.completed += 1;
                return;
            }
            Ok((leaf, Err(err))) => {
                warn!(leaf = %leaf, error = %err, "Leaf harvest failed");
                ProbeError::at_leaf(leaf, err)
            }
            Err(join_err) => {
                warn!(error = %join_err, "Leaf harvest task failed");
                ProbeError::Task(join_err)
            }
        };
        if self.first_error.is_none() {
            self.first_error = Some(err);
        }
    }
}
