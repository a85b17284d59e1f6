//! Per-session selection record.

/// Stage of the cascading selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Empty,
    TopChosen,
    SubChosen,
}

/// Which top-key and sub-key are currently chosen.
///
/// A sub-key can only be held together with the top-key it was chosen
/// under, so replacing the top-key drops it in the same assignment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Empty,
    TopChosen {
        top: String,
    },
    SubChosen {
        top: String,
        sub: String,
    },
}

impl SelectionState {
    pub fn stage(&self) -> Stage {
        match self {
            SelectionState::Empty => Stage::Empty,
            SelectionState::TopChosen { .. } => Stage::TopChosen,
            SelectionState::SubChosen { .. } => Stage::SubChosen,
        }
    }

    pub fn selected_top(&self) -> Option<&str> {
        match self {
            SelectionState::Empty => None,
            SelectionState::TopChosen { top } | SelectionState::SubChosen { top, .. } => {
                Some(top)
            }
        }
    }

    pub fn selected_sub(&self) -> Option<&str> {
        match self {
            SelectionState::SubChosen { sub, .. } => Some(sub),
            _ => None,
        }
    }
}
