use crate::error::SimError;
use std::panic::{self, AssertUnwindSafe};

/// Fixed-size pool running the red-black split of a grid pass.
///
/// Cells with even `x + y` go to one task and odd cells to the other. Each
/// task only computes values; the caller's `write` closure stores them after
/// both tasks have joined, so no two threads ever touch the same buffer.
pub struct WorkerPool {
    pool: Option<rayon::ThreadPool>,
}

impl WorkerPool {
    pub fn new(threads: usize) -> Result<Self, SimError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .thread_name(|i| format!("gridflow-worker-{i}"))
            .build()?;
        log::debug!("started worker pool with {} threads", pool.current_num_threads());
        Ok(Self { pool: Some(pool) })
    }

    pub fn is_running(&self) -> bool {
        self.pool.is_some()
    }

    /// Stops the pool. Any later dispatch fails with [`SimError::PoolShutdown`].
    pub fn shutdown(&mut self) {
        if self.pool.take().is_some() {
            log::debug!("worker pool shut down");
        }
    }

    /// Evaluates `cell` for every cell of a `cols x rows` grid, one parity per
    /// task, and hands each result to `write` once both tasks are done.
    ///
    /// A panicking task loses only its own half: the other half is still
    /// written and the panic comes back as [`SimError::WorkerPanicked`].
    pub fn checkerboard<T, F, W>(
        &self,
        cols: usize,
        rows: usize,
        cell: F,
        mut write: W,
    ) -> Result<(), SimError>
    where
        T: Send,
        F: Fn(usize, usize) -> T + Sync,
        W: FnMut(usize, usize, T),
    {
        let pool = self.pool.as_ref().ok_or(SimError::PoolShutdown)?;

        let run = |parity: usize| {
            panic::catch_unwind(AssertUnwindSafe(|| {
                let mut out = Vec::with_capacity(cols * rows / 2 + 1);
                for y in 0..rows {
                    for x in ((y + parity) % 2..cols).step_by(2) {
                        out.push(cell(x, y));
                    }
                }
                out
            }))
        };

        let (even, odd) = pool.join(|| run(0), || run(1));

        let mut failure = None;
        for (parity, result) in [(0, even), (1, odd)] {
            match result {
                Ok(values) => {
                    let mut values = values.into_iter();
                    for y in 0..rows {
                        for x in ((y + parity) % 2..cols).step_by(2) {
                            if let Some(value) = values.next() {
                                write(x, y, value);
                            }
                        }
                    }
                }
                Err(payload) => {
                    let message = payload
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    failure.get_or_insert(SimError::WorkerPanicked { parity, message });
                }
            }
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
