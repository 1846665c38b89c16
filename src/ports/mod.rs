//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the domain and implemented by adapters,
//! observers and learners elsewhere in the crate.

pub mod learner;
pub mod observer;
pub mod repository;

pub use learner::Learner;
pub use observer::Observer;
pub use repository::TableRepository;
