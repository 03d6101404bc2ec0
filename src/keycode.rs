//! Virtual key codes understood by the alignment overlays.

/// Virtual key codes for keyboard keys.
///
/// Only keys the overlays react to are named; everything else arrives as
/// [`Key::Character`] or [`Key::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Navigation
    Escape,
    Tab,
    Space,
    Enter,
    Backspace,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    /// A printable key.
    Character(char),

    /// Unknown key with raw code.
    Unknown(u32),
}

/// Unit direction a key moves a monitor in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nudge {
    /// Horizontal direction (-1, 0 or 1).
    pub dx: i32,
    /// Vertical direction (-1, 0 or 1).
    pub dy: i32,
    /// Whether the coarse (page) step applies instead of the fine one.
    pub coarse: bool,
}

impl Key {
    /// Position change this key requests for a secondary monitor.
    ///
    /// Up and Page Up increase `y`; this moves the monitor's content upwards.
    pub fn nudge(&self) -> Option<Nudge> {
        let (dx, dy, coarse) = match self {
            Key::ArrowUp => (0, 1, false),
            Key::ArrowDown => (0, -1, false),
            Key::ArrowLeft => (-1, 0, false),
            Key::ArrowRight => (1, 0, false),
            Key::PageUp => (0, 1, true),
            Key::PageDown => (0, -1, true),
            _ => return None,
        };
        Some(Nudge { dx, dy, coarse })
    }
}

impl Default for Key {
    fn default() -> Self {
        Key::Unknown(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_nudges_are_unit_steps() {
        assert_eq!(
            Key::ArrowRight.nudge(),
            Some(Nudge {
                dx: 1,
                dy: 0,
                coarse: false
            })
        );
        assert_eq!(Key::ArrowDown.nudge().map(|n| (n.dx, n.dy)), Some((0, -1)));
    }

    #[test]
    fn test_page_keys_are_coarse_and_vertical() {
        let up = Key::PageUp.nudge().unwrap();
        assert!(up.coarse);
        assert_eq!((up.dx, up.dy), (0, 1));
        let down = Key::PageDown.nudge().unwrap();
        assert_eq!((down.dx, down.dy), (0, -1));
    }

    #[test]
    fn test_other_keys_do_not_nudge() {
        assert_eq!(Key::Home.nudge(), None);
        assert_eq!(Key::Character('a').nudge(), None);
        assert_eq!(Key::Escape.nudge(), None);
    }
}
