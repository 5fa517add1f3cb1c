//! Inventory API Client
//!
//! Talks to the remote inventory API on behalf of the front-end.
//!
//! ## Architecture
//!
//! - **ApiClient**: Typed REST calls for auth, products, categories and dashboard
//! - **Session**: Explicit login state passed to every authenticated call
//! - **SessionStore**: Keeps the session on disk between commands
//! - **InventorySnapshot**: Concurrent dashboard load plus derived counters
//!
//! ## Data Flow
//!
//! 1. `login` returns a `Session`, which the caller saves in a `SessionStore`
//! 2. Later commands load the session and pass it to the client
//! 3. `InventorySnapshot` fetches products, categories and the backend summary
//! 4. The report module derives every counter from the fetched records

mod error;
mod http;
mod session;
mod snapshot;

pub use error::{ClientError, ClientResult};
pub use http::{ApiClient, InventoryApi, REQUEST_ID_HEADER};
pub use session::{Session, SessionError, SessionStore};
pub use snapshot::InventorySnapshot;
