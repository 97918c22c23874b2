//! Back navigation and orientation handling

/// Result of a back press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// Navigate the view back one page
    GoBack,
    /// Nothing to go back to; close the shell
    Exit,
}

pub fn on_back_pressed(can_go_back: bool) -> BackAction {
    if can_go_back {
        BackAction::GoBack
    } else {
        BackAction::Exit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// How the host should present the system status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBarMode {
    /// Status bar visible with the tinted strip behind it
    Tinted,
    /// Status bar hidden; a swipe reveals it transiently
    HiddenTransient,
}

impl StatusBarMode {
    pub fn for_orientation(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Portrait => StatusBarMode::Tinted,
            Orientation::Landscape => StatusBarMode::HiddenTransient,
        }
    }

    /// Whether the tinted strip should take up layout space
    pub fn reserves_strip(&self) -> bool {
        matches!(self, StatusBarMode::Tinted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_press() {
        assert_eq!(on_back_pressed(true), BackAction::GoBack);
        assert_eq!(on_back_pressed(false), BackAction::Exit);
    }

    #[test]
    fn test_orientation_modes() {
        let portrait = StatusBarMode::for_orientation(Orientation::Portrait);
        let landscape = StatusBarMode::for_orientation(Orientation::Landscape);
        assert!(portrait.reserves_strip());
        assert_eq!(landscape, StatusBarMode::HiddenTransient);
        assert!(!landscape.reserves_strip());
    }
}
