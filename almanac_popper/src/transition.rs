// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enter/exit phases of the panel animation.
//!
//! The host runs the actual animation; this module only tracks where in the
//! lifecycle the panel is so that `Opened` is reported once the enter animation
//! has finished and the panel can be unmounted once the exit animation has.

use crate::props::TransitionKind;

/// Lifecycle phase of the panel's transition.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    /// Fully hidden; nothing needs to be mounted.
    #[default]
    Exited,
    /// Opening animation in progress.
    Entering,
    /// Fully shown.
    Entered,
    /// Closing animation in progress.
    Exiting,
}

impl TransitionPhase {
    /// Phase after the panel was asked to open.
    ///
    /// Without an animation the panel is entered immediately.
    #[must_use]
    pub fn begin_enter(self, kind: TransitionKind) -> Self {
        match self {
            Self::Entered => Self::Entered,
            _ if kind.animates() => Self::Entering,
            _ => Self::Entered,
        }
    }

    /// Phase after the panel was asked to close.
    #[must_use]
    pub fn begin_exit(self, kind: TransitionKind) -> Self {
        match self {
            Self::Exited => Self::Exited,
            _ if kind.animates() => Self::Exiting,
            _ => Self::Exited,
        }
    }

    /// Whether the panel content must be mounted in this phase.
    pub fn is_mounted(self) -> bool {
        !matches!(self, Self::Exited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animated_cycle_passes_through_intermediate_phases() {
        let phase = TransitionPhase::Exited.begin_enter(TransitionKind::Grow);
        assert_eq!(phase, TransitionPhase::Entering);
        let phase = TransitionPhase::Entered.begin_exit(TransitionKind::Grow);
        assert_eq!(phase, TransitionPhase::Exiting);
    }

    #[test]
    fn unanimated_cycle_jumps_to_final_phases() {
        let phase = TransitionPhase::Exited.begin_enter(TransitionKind::None);
        assert_eq!(phase, TransitionPhase::Entered);
        let phase = phase.begin_exit(TransitionKind::None);
        assert_eq!(phase, TransitionPhase::Exited);
        assert!(!phase.is_mounted());
    }

    #[test]
    fn reopening_mid_exit_animates_back_in() {
        let phase = TransitionPhase::Exiting.begin_enter(TransitionKind::Fade);
        assert_eq!(phase, TransitionPhase::Entering);
        assert!(phase.is_mounted());
    }
}
