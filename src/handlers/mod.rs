// Handlers split by security tier:
// Public (no auth) for the banner and health probe, Protected (JWT auth) for /api/*
pub mod protected;
pub mod public;

pub use public::{health, root};
