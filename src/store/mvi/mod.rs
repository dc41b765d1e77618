//! Model-View-Intent (MVI) primitives for the state slices.
//!
//! # Architecture
//!
//! ```text
//! Operation ──→ Intent ──→ Reducer ──→ State ──→ Subscribers
//!     ↑                                              │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Snapshot of one slice (statuses plus cached payloads)
//! - **Intent**: Lifecycle event of an async operation
//! - **Reducer**: Pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::SliceState;
