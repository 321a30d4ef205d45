//! In-memory state container and its middleware pipeline.
//!
//! ```text
//! dispatch ──→ stage 1 ──→ stage 2 ──→ … ──→ reducer ──→ subscribers
//! ```
//!
//! Every action enters at the top of the chain. The last stage hands it to
//! the root reducer, after which subscribers are notified synchronously.

mod container;
pub mod middleware;

pub use container::{Store, StoreBuilder, Unsubscribe, WeakStore};
pub use middleware::{
    ActionContext, AsyncDispatchMiddleware, CredentialSyncMiddleware, DispatchQueue,
    LoggingMiddleware, Middleware, Next,
};
