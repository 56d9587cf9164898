//! Event handling module.
//!
//! This module contains handlers for network events: the campaign lifecycle
//! calls (load, save draft, publish) against the campaigns API.

pub mod network;
