//! Combined state of every slice and the reducer that routes intents.

use crate::model::{Product, User};
use crate::store::entity::{EntityIntent, EntityReducer, EntitySlice};
use crate::store::mvi::{Intent, Reducer, SliceState};
use crate::store::session::{SessionIntent, SessionOperation, SessionReducer, SessionState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub products: EntitySlice<Product>,
    pub users: EntitySlice<User>,
    pub session: SessionState,
}

impl SliceState for AppState {}

#[derive(Debug, Clone)]
pub enum AppIntent {
    Products(EntityIntent<Product>),
    Users(EntityIntent<User>),
    Session(SessionIntent),
}

impl Intent for AppIntent {}

/// Routes intents to their slice.
///
/// A sign-out that is applied also resets every entity slice, so nothing
/// cached under one session is visible to the next.
pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;
    type Intent = AppIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AppIntent::Products(intent) => AppState {
                products: EntityReducer::<Product>::reduce(state.products, intent),
                ..state
            },
            AppIntent::Users(intent) => AppState {
                users: EntityReducer::<User>::reduce(state.users, intent),
                ..state
            },
            AppIntent::Session(intent) => {
                let signed_out = match &intent {
                    SessionIntent::SignedOut { generation } => state
                        .session
                        .slot(SessionOperation::SignOut)
                        .accepts(*generation),
                    _ => false,
                };
                let session = SessionReducer::reduce(state.session, intent);
                if signed_out {
                    AppState {
                        products: EntityReducer::<Product>::reduce(state.products, EntityIntent::Reset),
                        users: EntityReducer::<User>::reduce(state.users, EntityIntent::Reset),
                        session,
                    }
                } else {
                    AppState { session, ..state }
                }
            }
        }
    }
}
