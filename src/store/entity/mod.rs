mod intent;
mod reducer;
mod state;

pub use intent::EntityIntent;
pub use reducer::EntityReducer;
pub use state::{EntityOperation, EntitySlice};
