use serde::Serialize;

/// Two-step confirmation gate for sensitive actions.
///
/// Used for revealing the recovery phrase and for the destructive overwrite
/// in `create_wallet`. Transitions are triggered solely by user action; there
/// is no timeout or auto-revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    #[default]
    Hidden,
    PendingConfirm,
    Revealed,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmGate {
    state: GateState,
}

impl ConfirmGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state == GateState::Revealed
    }

    pub fn is_pending(&self) -> bool {
        self.state == GateState::PendingConfirm
    }

    /// First user trigger. Hidden opens the confirmation prompt; Revealed
    /// toggles straight back to Hidden; a pending prompt stays pending.
    pub fn request(&mut self) -> GateState {
        self.state = match self.state {
            GateState::Hidden => GateState::PendingConfirm,
            GateState::PendingConfirm => GateState::PendingConfirm,
            GateState::Revealed => GateState::Hidden,
        };
        self.state
    }

    /// Explicit confirmation. Only a pending prompt transitions to Revealed.
    pub fn confirm(&mut self) -> GateState {
        if self.state == GateState::PendingConfirm {
            self.state = GateState::Revealed;
        }
        self.state
    }

    /// Dismisses a pending prompt.
    pub fn cancel(&mut self) -> GateState {
        if self.state == GateState::PendingConfirm {
            self.state = GateState::Hidden;
        }
        self.state
    }

    pub fn reset(&mut self) {
        self.state = GateState::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_then_confirm_reveals() {
        let mut gate = ConfirmGate::new();
        assert_eq!(gate.request(), GateState::PendingConfirm);
        assert_eq!(gate.confirm(), GateState::Revealed);
        assert!(gate.is_revealed());
    }

    #[test]
    fn test_confirm_without_request_is_noop() {
        let mut gate = ConfirmGate::new();
        assert_eq!(gate.confirm(), GateState::Hidden);
    }

    #[test]
    fn test_toggle_law() {
        let mut gate = ConfirmGate::new();
        gate.request();
        gate.confirm();
        // Requesting while revealed hides again, without a prompt.
        assert_eq!(gate.request(), GateState::Hidden);
    }

    #[test]
    fn test_cancel_dismisses_prompt() {
        let mut gate = ConfirmGate::new();
        gate.request();
        assert_eq!(gate.cancel(), GateState::Hidden);
        // Cancel outside a prompt changes nothing.
        assert_eq!(gate.cancel(), GateState::Hidden);
    }

    #[test]
    fn test_repeated_request_stays_pending() {
        let mut gate = ConfirmGate::new();
        gate.request();
        assert_eq!(gate.request(), GateState::PendingConfirm);
    }
}
