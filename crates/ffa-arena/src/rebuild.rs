//! Arena clear-and-rebuild sequence.
//!
//! ```text
//!   to.y + clearance  ┌─────────────────────┐  air
//!   to.y              ├─────────────────────┤  roof
//!                     │█                   █│
//!   from.y + 4        │█       air x2      █│  walls on the four sides
//!   from.y + 3        │█▒▒▒▒▒▒ surface ▒▒▒▒█│
//!   from.y + 1..2     │█░░░░░░ filler ░░░░░█│
//!   from.y            └█▓▓▓▓▓▓ ground ▓▓▓▓▓█┘
//! ```

use ffa_geom::{BlockPos, Volume};
use tracing::{info, warn};

use crate::config::Materials;
use crate::fill::{BulkFiller, FillOptions, FillReport};
use crate::host::Blocks;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillStep {
    pub label: &'static str,
    pub region: Volume,
    pub block: String,
}

/// Ordered fills that restore an arena volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildPlan {
    steps: Vec<FillStep>,
}

/// Every step's fill report, in plan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildReport {
    pub steps: Vec<(&'static str, FillReport)>,
}

impl RebuildReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.steps.iter().all(|(_, report)| report.is_complete())
    }

    /// Labels of steps with at least one unfilled piece.
    pub fn failed_steps(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps
            .iter()
            .filter(|(_, report)| !report.is_complete())
            .map(|(label, _)| *label)
    }

    #[must_use]
    pub fn cells_filled(&self) -> u64 {
        self.steps.iter().map(|(_, report)| report.cells_filled).sum()
    }
}

fn volume(from: (i32, i32, i32), to: (i32, i32, i32)) -> Volume {
    Volume::new(
        BlockPos::new(from.0, from.1, from.2),
        BlockPos::new(to.0, to.1, to.2),
    )
}

impl RebuildPlan {
    /// Plan for `arena`, which must be at least 3 x 5 x 3.
    #[must_use]
    pub fn for_arena(arena: &Volume, materials: &Materials, roof_clearance: i32) -> Self {
        let a = arena.from;
        let b = arena.to;
        let (x1, x2) = (a.x + 1, b.x - 1);
        let (z1, z2) = (a.z + 1, b.z - 1);

        let mut steps = Vec::with_capacity(11);
        let mut step = |label, region, block: &String| {
            steps.push(FillStep {
                label,
                region,
                block: block.clone(),
            });
        };

        step("ground", volume((x1, a.y, z1), (x2, a.y, z2)), &materials.ground);
        step("filler", volume((x1, a.y + 1, z1), (x2, a.y + 2, z2)), &materials.filler);
        step("surface", volume((x1, a.y + 3, z1), (x2, a.y + 3, z2)), &materials.surface);

        // Liquids left in the play volume survive a single air fill.
        let play = volume((x1, a.y + 4, z1), (x2, b.y, z2));
        step("play air", play, &materials.air);
        step("play air (second pass)", play, &materials.air);

        step("roof", volume((a.x, b.y, a.z), (b.x, b.y, b.z)), &materials.roof);
        step("west wall", volume((a.x, a.y, a.z), (a.x, b.y - 1, b.z)), &materials.wall);
        step("east wall", volume((b.x, a.y, a.z), (b.x, b.y - 1, b.z)), &materials.wall);
        step("north wall", volume((a.x, a.y, a.z), (b.x, b.y - 1, a.z)), &materials.wall);
        step("south wall", volume((a.x, a.y, b.z), (b.x, b.y - 1, b.z)), &materials.wall);

        if roof_clearance > 0 {
            step(
                "clearance",
                volume((a.x, b.y + 1, a.z), (b.x, b.y.saturating_add(roof_clearance), b.z)),
                &materials.air,
            );
        }

        Self { steps }
    }

    #[must_use]
    pub fn steps(&self) -> &[FillStep] {
        &self.steps
    }

    /// Run every step, continuing past failed ones.
    pub fn execute<B: Blocks + ?Sized>(&self, blocks: &mut B, filler: &BulkFiller) -> RebuildReport {
        let options = FillOptions::default();
        let steps: Vec<_> = self
            .steps
            .iter()
            .map(|step| (step.label, filler.fill(&mut *blocks, step.region, &step.block, &options)))
            .collect();

        let report = RebuildReport { steps };
        if report.is_complete() {
            info!("Arena rebuilt, {} cells", report.cells_filled());
        } else {
            let failed: Vec<_> = report.failed_steps().collect();
            warn!("Arena rebuilt with failed steps: {}", failed.join(", "));
        }
        report
    }
}
