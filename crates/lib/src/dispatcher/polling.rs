//! Long-polling ingestion.

use std::sync::Arc;

use tokio::sync::watch;

use super::dispatch::{dispatch_update, Shared};
use crate::api::{ApiError, GetUpdates};
use crate::types::Update;

/// Offset acknowledging every update in `batch`, or None for an empty batch.
pub(crate) fn next_offset(batch: &[Update]) -> Option<i64> {
    batch.last().map(|u| u.update_id + 1)
}

/// Poll getUpdates until `shutdown` flips to true or a call fails.
///
/// Each update in a batch is dispatched in order, then the offset moves past the last one.
pub(crate) async fn run(
    shared: Arc<Shared>,
    timeout: u64,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), ApiError> {
    let mut offset = 0i64;
    log::info!("polling: started (timeout {}s)", timeout);
    loop {
        if *shutdown.borrow() {
            break;
        }
        let request = GetUpdates {
            offset: Some(offset),
            limit: Some(1),
            timeout: Some(timeout),
            allowed_updates: Vec::new(),
        };
        let batch = tokio::select! {
            res = shared.api.get_updates(&request) => res?,
            changed = shutdown.changed() => {
                // A dropped sender counts as shutdown.
                if changed.is_err() {
                    break;
                }
                continue;
            }
        };
        let Some(next) = next_offset(&batch) else {
            continue;
        };
        log::debug!("polling: {} update(s), next offset {}", batch.len(), next);
        for update in batch {
            dispatch_update(&shared, update);
        }
        offset = next;
    }
    log::info!("polling: stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update(id: i64) -> Update {
        serde_json::from_value(json!({
            "update_id": id,
            "poll_answer": { "poll_id": "p", "user": { "id": 1, "is_bot": false, "first_name": "a" }, "option_ids": [0] }
        }))
        .unwrap()
    }

    #[test]
    fn offset_moves_past_the_last_update() {
        assert_eq!(next_offset(&[update(5), update(6), update(7)]), Some(8));
        assert_eq!(next_offset(&[update(41)]), Some(42));
    }

    #[test]
    fn empty_batch_keeps_the_offset() {
        assert_eq!(next_offset(&[]), None);
    }
}
