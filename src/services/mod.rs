pub mod separation_service;
pub mod separation_store;

pub use separation_service::{separation_id, SeparationService, StoredSeparation};
pub use separation_store::{InMemoryStore, SeparationStore};
