//! Display mode toggles

use serde::{Deserialize, Serialize};
use shared::DisplayMode;

/// How the eight mode checkboxes interact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TogglePolicy {
    /// Every checked mode runs its own annotation pass
    #[default]
    Independent,
    /// Checking a mode unchecks all others
    Exclusive,
}

/// On/off state of every display mode
#[derive(Debug, Clone, Default)]
pub struct ModeToggles {
    flags: [bool; 8],
    policy: TogglePolicy,
}

impl ModeToggles {
    pub fn new(policy: TogglePolicy) -> Self {
        Self {
            flags: [false; 8],
            policy,
        }
    }

    pub fn is_on(&self, mode: DisplayMode) -> bool {
        self.flags[mode.index()]
    }

    /// Set a flag. Returns true if any flag changed.
    pub fn set(&mut self, mode: DisplayMode, on: bool) -> bool {
        let before = self.flags;
        if on && self.policy == TogglePolicy::Exclusive {
            self.flags = [false; 8];
        }
        self.flags[mode.index()] = on;
        before != self.flags
    }

    /// Enabled modes in priority order
    pub fn active_modes(&self) -> impl Iterator<Item = DisplayMode> + '_ {
        DisplayMode::ALL
            .into_iter()
            .filter(move |m| self.flags[m.index()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_independent_flags_accumulate_in_priority_order() {
        let mut t = ModeToggles::default();
        assert!(t.set(DisplayMode::FaceOnly, true));
        assert!(t.set(DisplayMode::VertexPositions, true));
        let modes: Vec<_> = t.active_modes().collect();
        assert_eq!(modes, vec![DisplayMode::VertexPositions, DisplayMode::FaceOnly]);
    }

    #[test]
    fn test_set_same_value_reports_no_change() {
        let mut t = ModeToggles::default();
        assert!(!t.set(DisplayMode::EdgeOnly, false));
        assert!(t.set(DisplayMode::EdgeOnly, true));
        assert!(!t.set(DisplayMode::EdgeOnly, true));
    }

    #[test]
    fn test_exclusive_policy_keeps_one_mode() {
        let mut t = ModeToggles::new(TogglePolicy::Exclusive);
        t.set(DisplayMode::EdgeNormals, true);
        t.set(DisplayMode::VertexIndices, true);
        let modes: Vec<_> = t.active_modes().collect();
        assert_eq!(modes, vec![DisplayMode::VertexIndices]);
        t.set(DisplayMode::VertexIndices, false);
        assert_eq!(t.active_modes().count(), 0);
    }
}
