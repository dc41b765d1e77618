//! Intents for the session gate.

use crate::model::User;
use crate::store::mvi::Intent;

use super::state::SessionOperation;

#[derive(Debug, Clone)]
pub enum SessionIntent {
    /// A session operation was dispatched.
    Started {
        operation: SessionOperation,
        generation: u64,
    },

    /// Sign-in resolved; the credential is already stored.
    SignedIn { generation: u64, user: User },

    /// Sign-out resolved; the credential is already removed.
    SignedOut { generation: u64 },

    /// Profile fetch resolved.
    ProfileLoaded { generation: u64, user: User },

    /// Any session operation rejected.
    Failed {
        operation: SessionOperation,
        generation: u64,
        message: String,
    },
}

impl Intent for SessionIntent {}
