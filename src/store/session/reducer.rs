//! Reducer for the session gate.

use crate::store::mvi::Reducer;

use super::intent::SessionIntent;
use super::state::{SessionOperation, SessionState};

pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Intent = SessionIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SessionIntent::Started {
                operation,
                generation,
            } => state.slot_mut(operation).start(generation),

            SessionIntent::SignedIn { generation, user } => {
                if state.slot_mut(SessionOperation::SignIn).succeed(generation) {
                    state.is_logged = true;
                    state.profile = Some(user);
                }
            }

            SessionIntent::SignedOut { generation } => {
                if state.slot_mut(SessionOperation::SignOut).succeed(generation) && state.is_logged {
                    state.is_logged = false;
                    state.profile = None;
                }
            }

            SessionIntent::ProfileLoaded { generation, user } => {
                if state.slot_mut(SessionOperation::Profile).succeed(generation) {
                    state.profile = Some(user);
                }
            }

            SessionIntent::Failed {
                operation,
                generation,
                message,
            } => {
                state.slot_mut(operation).fail(generation, message);
            }
        }
        state
    }
}
