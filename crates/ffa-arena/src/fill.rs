//! Bulk region fill on top of the host's size-limited fill call.

use ffa_geom::Volume;
use tracing::{debug, warn};

use crate::error::FillError;
use crate::host::Blocks;

/// Options passed through to every host fill call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillOptions {
    /// Only replace cells currently holding this block.
    pub replace: Option<String>,
}

/// A sub-region that still failed after every retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillFailure {
    pub region: Volume,
    pub error: FillError,
}

/// Outcome of one bulk fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillReport {
    pub region: Volume,
    /// Host calls issued, retries included.
    pub calls: usize,
    /// Sub-regions the region was split into.
    pub pieces: usize,
    pub cells_filled: u64,
    pub failures: Vec<FillFailure>,
}

impl FillReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Splits regions to the host cell limit and fills piece by piece.
///
/// A failed piece is retried, then recorded and skipped; the remaining
/// pieces are still filled.
#[derive(Debug, Clone, Copy)]
pub struct BulkFiller {
    cell_limit: u64,
    retries: u32,
}

impl BulkFiller {
    #[must_use]
    pub const fn new(cell_limit: u64, retries: u32) -> Self {
        Self {
            cell_limit,
            retries,
        }
    }

    #[must_use]
    pub const fn cell_limit(&self) -> u64 {
        self.cell_limit
    }

    pub fn fill<B: Blocks + ?Sized>(
        &self,
        blocks: &mut B,
        region: Volume,
        block: &str,
        options: &FillOptions,
    ) -> FillReport {
        let pieces = region.split(self.cell_limit);
        let mut report = FillReport {
            region,
            calls: 0,
            pieces: pieces.len(),
            cells_filled: 0,
            failures: Vec::new(),
        };

        for piece in pieces {
            let mut attempt = 0;
            loop {
                report.calls += 1;
                match blocks.fill(piece, block, options) {
                    Ok(()) => {
                        report.cells_filled += piece.cell_count();
                        break;
                    }
                    Err(error) if attempt < self.retries => {
                        attempt += 1;
                        debug!("Retrying fill of {piece:?} ({error}), attempt {attempt}");
                    }
                    Err(error) => {
                        warn!("Giving up on fill of {piece:?} with {block}: {error}");
                        report.failures.push(FillFailure {
                            region: piece,
                            error,
                        });
                        break;
                    }
                }
            }
        }

        debug!(
            "Filled {} of {} cells with {block} in {} calls",
            report.cells_filled,
            region.cell_count(),
            report.calls
        );
        report
    }
}
