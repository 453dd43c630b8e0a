//! Overflow analysis. Decides how much of a variable-length section fits above
//! the footer zone, and records what had to be cut.
//!
//! # Policy
//! - A section whose natural height fits its budget is placed whole.
//! - Otherwise it keeps as many whole slots (lines or rows) as fit, and its last
//!   visible slot becomes an explicit truncation marker.
//! - At least one slot always survives, so a section never disappears.
//!
//! Under `OverflowPolicy::Reject` the engine turns any cut into an error instead.

use serde::{Deserialize, Serialize};

use crate::config::OverflowPolicy;
use crate::errors::ReportError;
use crate::layout::engine::SectionKind;

// Slack for float accumulation when comparing heights against a budget.
const EPSILON: f32 = 1e-3;

/// Record of a section that was cut to fit the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverflowNotice {
    pub section: SectionKind,
    /// Height the full content needed.
    pub required_mm: f32,
    /// Height that was available.
    pub available_mm: f32,
    /// Content slots not shown.
    pub hidden: usize,
}

/// How many of `slot_count` slots fit in a budget.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotFit {
    /// Everything fits.
    All,
    /// Show `shown` real slots followed by one marker slot.
    Truncated { shown: usize, hidden: usize },
}

/// Fits `slot_count` slots of `slot_height` under a section heading of
/// `heading_height`, within `budget` millimetres.
pub fn fit_slots(slot_count: usize, heading_height: f32, slot_height: f32, budget: f32) -> SlotFit {
    if slot_count == 0 {
        // Only the placeholder slot; nothing to cut.
        return SlotFit::All;
    }
    let natural = heading_height + slot_count as f32 * slot_height;
    if natural <= budget + EPSILON {
        return SlotFit::All;
    }

    let room = ((budget - heading_height) / slot_height + EPSILON).floor();
    let capacity = if room >= 1.0 { room as usize } else { 1 };
    // One slot is taken by the marker.
    let shown = capacity.saturating_sub(1).min(slot_count);
    SlotFit::Truncated {
        shown,
        hidden: slot_count - shown,
    }
}

/// Applies the configured policy to a notice: `Ok` keeps it for the layout report,
/// `Err` aborts the export.
pub fn enforce_policy(
    notice: OverflowNotice,
    policy: OverflowPolicy,
) -> Result<OverflowNotice, ReportError> {
    match policy {
        OverflowPolicy::Truncate => Ok(notice),
        OverflowPolicy::Reject => Err(ReportError::LayoutOverflow {
            section: notice.section,
            required_mm: notice.required_mm,
            available_mm: notice.available_mm,
        }),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_notice() -> OverflowNotice {
        OverflowNotice {
            section: SectionKind::Suggestions,
            required_mm: 300.0,
            available_mm: 120.0,
            hidden: 20,
        }
    }

    // ── fit_slots ───────────────────────────────────────────────────────────

    #[test]
    fn test_fit_slots_everything_fits() {
        assert_eq!(fit_slots(3, 9.0, 9.0, 100.0), SlotFit::All);
    }

    #[test]
    fn test_fit_slots_exact_budget_fits() {
        // 9 + 4 × 9 = 45
        assert_eq!(fit_slots(4, 9.0, 9.0, 45.0), SlotFit::All);
    }

    #[test]
    fn test_fit_slots_truncates_with_marker() {
        // room for (50 - 9) / 9 = 4 slots: 3 real + marker
        assert_eq!(
            fit_slots(10, 9.0, 9.0, 50.0),
            SlotFit::Truncated {
                shown: 3,
                hidden: 7
            }
        );
    }

    #[test]
    fn test_fit_slots_tiny_budget_keeps_marker_only() {
        assert_eq!(
            fit_slots(5, 9.0, 6.0, 4.0),
            SlotFit::Truncated {
                shown: 0,
                hidden: 5
            }
        );
    }

    #[test]
    fn test_fit_slots_empty_section_is_never_cut() {
        assert_eq!(fit_slots(0, 9.0, 9.0, 18.0), SlotFit::All);
        assert_eq!(fit_slots(0, 9.0, 9.0, 2.0), SlotFit::All);
    }

    // ── enforce_policy ──────────────────────────────────────────────────────

    #[test]
    fn test_truncate_policy_keeps_notice() {
        let notice = enforce_policy(make_notice(), OverflowPolicy::Truncate).unwrap();
        assert_eq!(notice.hidden, 20);
    }

    #[test]
    fn test_reject_policy_returns_layout_overflow() {
        let err = enforce_policy(make_notice(), OverflowPolicy::Reject).unwrap_err();
        match err {
            ReportError::LayoutOverflow {
                section,
                required_mm,
                available_mm,
            } => {
                assert_eq!(section, SectionKind::Suggestions);
                assert_eq!(required_mm, 300.0);
                assert_eq!(available_mm, 120.0);
            }
            other => panic!("expected LayoutOverflow, got {other:?}"),
        }
    }
}
