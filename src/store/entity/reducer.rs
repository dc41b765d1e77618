//! Reducer for entity slices.

use std::marker::PhantomData;

use crate::model::Entity;
use crate::store::mvi::Reducer;

use super::intent::EntityIntent;
use super::state::{EntityOperation, EntitySlice};

/// Reducer for entity slice state transitions.
pub struct EntityReducer<T>(PhantomData<T>);

impl<T: Entity> Reducer for EntityReducer<T> {
    type State = EntitySlice<T>;
    type Intent = EntityIntent<T>;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            EntityIntent::Started {
                operation,
                generation,
            } => {
                state.slot_mut(operation).start(generation);
            }

            EntityIntent::Counted { generation, total } => {
                if state.slot_mut(EntityOperation::Count).succeed(generation) {
                    state.total = Some(total);
                }
            }

            EntityIntent::Listed { generation, page } => {
                if state.slot_mut(EntityOperation::List).succeed(generation) {
                    state.entities = Some(page.entities);
                    state.count = Some(page.count);
                }
            }

            EntityIntent::Fetched { generation, entity } => {
                if state.slot_mut(EntityOperation::Fetch).succeed(generation) {
                    state.current = Some(entity);
                }
            }

            // Mutations reach the cached page whatever their generation; only
            // the slot and `current` follow the latest dispatch.
            EntityIntent::Created { generation, entity } => {
                if let Some(entities) = state.entities.as_mut() {
                    entities.push(entity.clone());
                }
                if state.slot_mut(EntityOperation::Create).succeed(generation) {
                    state.current = Some(entity);
                }
            }

            EntityIntent::Updated { generation, entity } => {
                if let (Some(entities), Some(id)) = (state.entities.as_mut(), entity.id()) {
                    if let Some(existing) = entities.iter_mut().find(|e| e.id() == Some(id)) {
                        *existing = entity.clone();
                    }
                }
                if state.slot_mut(EntityOperation::Update).succeed(generation) {
                    state.current = Some(entity);
                }
            }

            EntityIntent::Deleted { generation, id } => {
                // count is unchanged: the backend never persists deletes
                if let Some(entities) = state.entities.as_mut() {
                    entities.retain(|e| e.id() != Some(id));
                }
                state.slot_mut(EntityOperation::Delete).succeed(generation);
            }

            EntityIntent::Failed {
                operation,
                generation,
                message,
            } => {
                state.slot_mut(operation).fail(generation, message);
            }

            EntityIntent::Reset => return EntitySlice::default(),
        }
        state
    }
}
