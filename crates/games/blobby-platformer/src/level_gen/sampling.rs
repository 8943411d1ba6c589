use serde::{Deserialize, Serialize};

/// Outcome of one rejection-sampling stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub requested: u32,
    pub placed: u32,
    pub attempts: u32,
}

impl Placement {
    /// The attempt budget ran out before the target was met.
    pub fn is_short(&self) -> bool {
        self.placed < self.requested
    }
}

/// Call `try_place` until `requested` candidates are accepted or `budget`
/// attempts are spent. `try_place` returns whether its candidate was kept.
pub(super) fn sample_until(
    requested: u32,
    budget: u32,
    mut try_place: impl FnMut() -> bool,
) -> Placement {
    let mut placement = Placement {
        requested,
        ..Placement::default()
    };
    while placement.placed < requested && placement.attempts < budget {
        placement.attempts += 1;
        if try_place() {
            placement.placed += 1;
        }
    }
    placement
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_target() {
        let p = sample_until(3, 100, || true);
        assert_eq!(p.placed, 3);
        assert_eq!(p.attempts, 3);
        assert!(!p.is_short());
    }

    #[test]
    fn stops_at_budget() {
        let mut calls = 0;
        let p = sample_until(5, 10, || {
            calls += 1;
            calls % 4 == 0
        });
        assert_eq!(p.attempts, 10);
        assert_eq!(p.placed, 2);
        assert!(p.is_short());
    }

    #[test]
    fn zero_target_makes_no_attempts() {
        let p = sample_until(0, 10, || panic!("should not be called"));
        assert_eq!(p, Placement::default());
    }
}
