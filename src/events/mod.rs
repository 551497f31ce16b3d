//! Event types exchanged between the native layer and the core.
//!
//! Submodules:
//! - [`input`] – raw key/mouse/quit events and the tagged device code used to
//!   look up bound actions
pub mod input;
