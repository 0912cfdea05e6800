/// Whether a generation is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Generating,
}

impl SessionState {
    /// `Idle -> Generating`. Returns `false` (and changes nothing) when a
    /// generation is already running.
    pub fn begin(&mut self) -> bool {
        match self {
            SessionState::Idle => {
                *self = SessionState::Generating;
                true
            }
            SessionState::Generating => false,
        }
    }

    pub fn finish(&mut self) {
        *self = SessionState::Idle;
    }

    pub fn is_generating(&self) -> bool {
        matches!(self, SessionState::Generating)
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            SessionState::Idle => "Ready to generate",
            SessionState::Generating => "Generating teams...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut state = SessionState::default();
        assert_eq!(state, SessionState::Idle);
        assert!(state.begin());
        assert!(state.is_generating());
        assert!(!state.begin());
        assert!(state.is_generating());
        state.finish();
        assert!(!state.is_generating());
        assert!(state.begin());
    }

    #[test]
    fn test_status_label() {
        assert_eq!(SessionState::Idle.status_label(), "Ready to generate");
        assert_eq!(SessionState::Generating.status_label(), "Generating teams...");
    }
}
