//! Per-visitor session management.
//!
//! Every visitor of the landing page gets a session holding their own chat
//! and search widgets. Sessions are identified by UUID and expire after a
//! period of inactivity.
//!
//! # Architecture
//!
//! - [`Session`]: One visitor's widgets
//! - [`SessionStore`]: Thread-safe store for all active sessions
//!
//! # Example
//!
//! ```rust
//! use gujarat_travel_planner::session::SessionStore;
//!
//! let store = SessionStore::new("http://localhost:5000");
//! let session = store.create();
//! session.with_chat(|chat| chat.set_input("Hello!"));
//!
//! let input = session.with_chat(|chat| chat.input().to_string());
//! assert_eq!(input, "Hello!");
//! ```

mod store;

pub use store::{DEFAULT_SESSION_TIMEOUT, Session, SessionStore};
