//! # Sequential Identifier Allocation
//!
//! Shared by both sale controllers: scan upward from a configured start,
//! skipping identifiers the ledger already holds, so sale allocations
//! and direct mints share one namespace without coordination.

use mintgate_core::{MintError, TokenId};
use mintgate_ledger::Collection;

/// Allocate `count` unminted identifiers scanning upward from `start`.
///
/// Returns the allocation and the identifier to resume scanning from on
/// the next call. Exhausting the numeric identifier space surfaces as
/// [`MintError::SupplyExhausted`].
pub(crate) fn allocate_identifiers(
    collection: &Collection,
    start: TokenId,
    count: u64,
) -> Result<(Vec<TokenId>, TokenId), MintError> {
    if count == 0 {
        return Ok((Vec::new(), start));
    }
    let mut allocated = Vec::with_capacity(count.min(1_024) as usize);
    let mut candidate = start;
    loop {
        if !collection.is_minted(candidate) {
            allocated.push(candidate);
            if allocated.len() as u64 == count {
                // Saturate the resume point at the top of the space; a
                // later call starting there runs into exhaustion itself.
                let resume = candidate.next().unwrap_or(candidate);
                return Ok((allocated, resume));
            }
        }
        candidate = candidate
            .next()
            .ok_or(MintError::SupplyExhausted { cap: u64::MAX })?;
    }
}
