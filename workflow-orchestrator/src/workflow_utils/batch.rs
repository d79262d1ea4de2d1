//! Batch execution utilities for parallel task processing

use futures::{stream::FuturesUnordered, Future, StreamExt};
use std::sync::Arc;
use tokio::sync::{AcquireError, Semaphore};

/// Context provided to each task in a batch
#[derive(Debug, Clone, Copy)]
pub struct TaskContext {
    /// Task number (1-indexed for display)
    pub task_number: usize,
    /// Total number of tasks in this batch
    pub total_tasks: usize,
}

/// Execute items concurrently with an upper bound on in-flight tasks
///
/// # Arguments
/// - `items`: Items to process
/// - `max_concurrency`: Maximum concurrent tasks (0 is treated as 1)
/// - `task_executor`: Function that processes each item, receives (item, context)
///
/// # Returns
/// Vector of results in input order, regardless of completion order
///
/// # Error Handling
/// Every task runs to completion; task outcomes are returned as values. The
/// only error is the semaphore closing underneath the batch.
///
/// # Example
/// ```rust,ignore
/// let results = execute_batch(
///     agent_ids,
///     3,  // max_concurrency
///     |agent_id, ctx| async move {
///         executor.execute(&agent_id, &task).await
///     }
/// ).await?;
/// ```
pub async fn execute_batch<T, F, Fut, R>(
    items: Vec<T>,
    max_concurrency: usize,
    task_executor: F,
) -> Result<Vec<R>, AcquireError>
where
    F: Fn(T, TaskContext) -> Fut,
    Fut: Future<Output = R>,
{
    let total = items.len();
    let permits = max_concurrency.clamp(1, Semaphore::MAX_PERMITS);
    let sem = Arc::new(Semaphore::new(permits));
    let executor = &task_executor;
    let mut tasks = FuturesUnordered::new();

    // Push all tasks to FuturesUnordered with semaphore control
    for (idx, item) in items.into_iter().enumerate() {
        let sem = sem.clone();

        let ctx = TaskContext {
            task_number: idx + 1,
            total_tasks: total,
        };

        tasks.push(async move {
            // Acquire permit (waits while max_concurrency tasks are running)
            let _permit = sem.acquire().await?;
            Ok::<_, AcquireError>((idx, executor(item, ctx).await))
        });
    }

    // Collect as they complete, then restore input order
    let mut results = Vec::with_capacity(total);
    while let Some(result) = tasks.next().await {
        results.push(result?);
    }
    results.sort_by_key(|(idx, _)| *idx);

    Ok(results.into_iter().map(|(_, r)| r).collect())
}
