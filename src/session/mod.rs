//! Session layer: the authenticated user/token lifecycle, built on the
//! request layer and a durable storage seam.

pub mod storage;
pub mod store;
pub mod user;

pub use storage::{DiskStorage, MemoryStorage, SessionStorage, TOKEN_KEY, USER_KEY};
pub use store::{Session, SessionStore};
pub use user::{RegisterRequest, User};
