//! Interaction state sets, state-dependent colors and invalidation flags.

use bitflags::bitflags;

use crate::geometry::Color;

bitflags! {
    /// Interaction state of the view hosting a drawable.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct StateFlags: u16 {
        const ENABLED        = 1 << 0;
        const FOCUSED        = 1 << 1;
        const PRESSED        = 1 << 2;
        const HOVERED        = 1 << 3;
        const SELECTED       = 1 << 4;
        const ACTIVATED      = 1 << 5;
        const CHECKED        = 1 << 6;
        const WINDOW_FOCUSED = 1 << 7;
    }
}

bitflags! {
    /// Flags indicating what the host needs to do for a drawable
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct ChangeFlags: u8 {
        /// Drawable needs repainting (visual appearance changed)
        const NEEDS_PAINT = 0b01;
        /// An animation is running; keep scheduling frames
        const ANIMATING   = 0b10;
    }
}

/// Resolves a color from a state set.
///
/// Entries are checked in insertion order and the first whose required
/// flags are all present wins. An entry with no required flags matches any
/// state, so it should come last.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorStateList {
    entries: Vec<(StateFlags, Color)>,
    default_color: Color,
}

impl ColorStateList {
    /// A list that only holds a default color.
    pub fn new(default_color: Color) -> Self {
        Self {
            entries: Vec::new(),
            default_color,
        }
    }

    /// Single color regardless of state.
    pub fn value_of(color: Color) -> Self {
        Self::new(color)
    }

    /// Add an entry used when `states` are all set.
    pub fn with(mut self, states: StateFlags, color: Color) -> Self {
        self.entries.push((states, color));
        self
    }

    pub fn color_for_state(&self, states: StateFlags) -> Color {
        self.entries
            .iter()
            .find(|(required, _)| states.contains(*required))
            .map(|(_, color)| *color)
            .unwrap_or(self.default_color)
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    pub fn is_stateful(&self) -> bool {
        !self.entries.is_empty()
    }
}

impl From<Color> for ColorStateList {
    fn from(color: Color) -> Self {
        Self::value_of(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_of_ignores_state() {
        let list = ColorStateList::value_of(Color::WHITE);
        assert!(!list.is_stateful());
        assert_eq!(list.color_for_state(StateFlags::empty()), Color::WHITE);
        assert_eq!(
            list.color_for_state(StateFlags::PRESSED | StateFlags::ENABLED),
            Color::WHITE
        );
    }

    #[test]
    fn test_first_matching_entry_wins() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let blue = Color::rgb(0.0, 0.0, 1.0);
        let list = ColorStateList::new(Color::BLACK)
            .with(StateFlags::PRESSED | StateFlags::ENABLED, red)
            .with(StateFlags::FOCUSED, blue);

        assert!(list.is_stateful());
        assert_eq!(
            list.color_for_state(StateFlags::PRESSED | StateFlags::ENABLED | StateFlags::FOCUSED),
            red
        );
        assert_eq!(list.color_for_state(StateFlags::FOCUSED), blue);
        assert_eq!(list.color_for_state(StateFlags::PRESSED), Color::BLACK);
    }
}
