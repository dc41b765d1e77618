//! State for the session gate.

use crate::model::User;
use crate::store::mvi::SliceState;
use crate::store::status::{OperationSlot, OperationStatus};

/// Operations tracked by the session slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionOperation {
    SignIn,
    SignOut,
    Profile,
}

impl SessionOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionOperation::SignIn => "sign_in",
            SessionOperation::SignOut => "sign_out",
            SessionOperation::Profile => "profile",
        }
    }
}

/// Sign-in state as seen by the rest of the app.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    /// Derived flag: seeded from token presence, then driven by
    /// sign-in/sign-out outcomes.
    pub is_logged: bool,
    sign_in: OperationSlot,
    sign_out: OperationSlot,
    profile_op: OperationSlot,
    /// Profile returned by the last sign-in or profile fetch.
    pub profile: Option<User>,
}

impl SliceState for SessionState {}

impl SessionState {
    /// Initial state at boot, given whether a stored credential exists.
    pub fn restored(has_token: bool) -> Self {
        Self {
            is_logged: has_token,
            ..Self::default()
        }
    }

    pub fn slot(&self, operation: SessionOperation) -> &OperationSlot {
        match operation {
            SessionOperation::SignIn => &self.sign_in,
            SessionOperation::SignOut => &self.sign_out,
            SessionOperation::Profile => &self.profile_op,
        }
    }

    pub(crate) fn slot_mut(&mut self, operation: SessionOperation) -> &mut OperationSlot {
        match operation {
            SessionOperation::SignIn => &mut self.sign_in,
            SessionOperation::SignOut => &mut self.sign_out,
            SessionOperation::Profile => &mut self.profile_op,
        }
    }

    pub fn status(&self, operation: SessionOperation) -> OperationStatus {
        self.slot(operation).status()
    }
}
