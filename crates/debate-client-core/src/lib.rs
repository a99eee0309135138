//! Client core for the debate platform: API envelope decoding, session
//! state with durable persistence, and paginated list query state.

pub mod envelope;
pub mod error;
pub mod list_query;
pub mod session;
pub mod storage;

pub use envelope::{DecodedBody, decode_body, unwrap_envelope, unwrap_payload};
pub use error::ClientError;
pub use list_query::{DEFAULT_PAGE_SIZE, FetchTicket, ListQuery, PageResponse};
pub use session::{Principal, SessionPhase, SessionStore, ThemePreference};
pub use storage::{FileSessionStore, MemorySessionStore, SessionStateStore, StoredSession};
