use crate::data::GuestField;

/// Focus state for the adults/children/rooms counter rows
///
/// The counts themselves live in the search store; this only tracks which
/// row the +/- keys apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuestPickerState {
    focused: usize,
}

impl Default for GuestPickerState {
    fn default() -> Self {
        Self::new()
    }
}

impl GuestPickerState {
    pub fn new() -> Self {
        Self { focused: 0 }
    }

    pub fn focused(&self) -> GuestField {
        GuestField::ALL[self.focused]
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % GuestField::ALL.len();
    }

    pub fn focus_previous(&mut self) {
        self.focused = (self.focused + GuestField::ALL.len() - 1) % GuestField::ALL.len();
    }
}
