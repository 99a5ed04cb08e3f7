use crate::cell::CellId;
use smallvec::SmallVec;

use crate::N_SMALLVEC_SIZE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    Expanded,
    PathPreviewChanged,
    Found,
    Exhausted,
    PathStep,
}

/// A single change emitted by the engine. Events of one [Step] are meant to be applied in order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepEvent {
    /// Cells that left the live preview path and cells that joined it. The two lists never
    /// share a cell, so erasing `removed` before painting `added` never drops a highlight.
    PathPreviewChanged {
        removed: Vec<CellId>,
        added: Vec<CellId>,
    },
    /// `cell` was just visited and is now the current cell; `previous` no longer is.
    /// `discovered` lists cells that joined the frontier, in neighbour-scan order.
    Expanded {
        cell: CellId,
        previous: Option<CellId>,
        discovered: SmallVec<[CellId; N_SMALLVEC_SIZE]>,
    },
    /// The target was dequeued; `path` runs from source to target.
    Found { path: Vec<CellId> },
    /// The frontier ran dry before the target was reached.
    Exhausted,
    /// One cell of the final path, traced from the target back to the source. The cell moves
    /// from the preview onto the final path.
    PathStep { cell: CellId, index: usize },
}

impl StepEvent {
    pub fn kind(&self) -> StepKind {
        match self {
            StepEvent::PathPreviewChanged { .. } => StepKind::PathPreviewChanged,
            StepEvent::Expanded { .. } => StepKind::Expanded,
            StepEvent::Found { .. } => StepKind::Found,
            StepEvent::Exhausted => StepKind::Exhausted,
            StepEvent::PathStep { .. } => StepKind::PathStep,
        }
    }

    /// Every cell id the event touches.
    pub fn cells(&self) -> Vec<CellId> {
        match self {
            StepEvent::PathPreviewChanged { removed, added } => {
                removed.iter().chain(added.iter()).copied().collect()
            }
            StepEvent::Expanded {
                cell,
                previous,
                discovered,
            } => std::iter::once(*cell)
                .chain(*previous)
                .chain(discovered.iter().copied())
                .collect(),
            StepEvent::Found { path } => path.clone(),
            StepEvent::Exhausted => Vec::new(),
            StepEvent::PathStep { cell, .. } => vec![*cell],
        }
    }
}

/// Everything that changed during one engine step, in application order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub events: Vec<StepEvent>,
}

impl Step {
    pub fn kinds(&self) -> Vec<StepKind> {
        self.events.iter().map(StepEvent::kind).collect()
    }

    /// Whether this step belongs to the final path trace rather than the search itself.
    pub fn is_path_step(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, StepEvent::PathStep { .. }))
    }

    /// The cell expanded in this step, if any.
    pub fn expanded(&self) -> Option<CellId> {
        self.events.iter().find_map(|e| match e {
            StepEvent::Expanded { cell, .. } => Some(*cell),
            _ => None,
        })
    }
}
