//! Protected link management for the paywall dashboard.
//!
//! Links live only in memory for the lifetime of a [`LinkStore`]; nothing is
//! persisted and dropping the store loses every link.
//!
//! # Status transitions
//!
//! - `Active ⇄ Paused` via [`LinkStore::toggle_status`]
//! - `* → Expired` only via an explicit [`LinkStore::update`]
//!
//! Expiration dates and click limits are never evaluated automatically.
//! [`LinkStore::expired_candidates`] reports which links *would* qualify so
//! the caller can decide whether to expire them.

mod error;
mod link;
mod store;

pub use error::{LinkError, LinkResult};
pub use link::{LinkId, LinkStatus, LinkUpdate, NewLink, ProtectedLink};
pub use store::LinkStore;
