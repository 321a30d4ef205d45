//! Model-View-Intent (MVI) primitives shared by every state slice.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ Slice ──→ Subscribers
//!    ↑                                 │
//!    └─────────────────────────────────┘
//! ```
//!
//! - **Slice**: Immutable partition of the application state
//! - **SliceAction**: Intent to change exactly one slice
//! - **Reducer**: Pure function that transforms a slice based on an action

mod action;
mod reducer;
mod slice;

pub use action::SliceAction;
pub use reducer::Reducer;
pub use slice::Slice;
