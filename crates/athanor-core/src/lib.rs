//! Athanor Core -- the simulation engine for an incremental alchemy game.
//!
//! This crate provides the authoritative game-state model: the resource
//! ledger, per-tick production, transmutation (recipe resolution), the
//! upgrade/prestige economy, and passive worker assignments, all in
//! deterministic fixed-point arithmetic.
//!
//! # Four-Phase Tick Pipeline
//!
//! Each call to [`engine::Engine::advance_tick`] advances the simulation by
//! one tick through the following phases:
//!
//! 1. **Extraction** -- Every tier-1 element gains
//!    `base_rate * extractor_level * purity_bonus`.
//! 2. **Workers** -- Every assigned worker adds `rate * purity_bonus` to its
//!    target element, independent of phase 1.
//! 3. **Condensation** -- Energy grows by 0.1% of the total quantity held
//!    (compounds included), read from the post-production ledger.
//! 4. **Bookkeeping** -- Increment the tick counter, recompute the state
//!    hash, deliver buffered events.
//!
//! # Player Actions
//!
//! All mutating operations outside the tick are explicit player actions:
//! gather, transmute, upgrade extractor, calcinate, create worker, assign
//! worker. Each validates its preconditions against the ledger and commits a
//! single atomic mutation -- failures are typed business outcomes
//! ([`action::ActionError`]), never panics, and never leave the ledger
//! partially mutated.
//!
//! # Key Types
//!
//! - [`engine::Engine`] -- Session owner and pipeline orchestrator.
//! - [`catalog::Catalog`] -- Immutable registry of elements, compounds
//!   (recipe multisets), and worker types (frozen at startup).
//! - [`ledger::Ledger`] -- Mutable quantities, extractor state, energy, and
//!   the discovery log.
//! - [`action::Action`] -- Tagged union over the six player actions, for
//!   reducer-style dispatch via [`engine::Engine::apply`].
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for drift-free fractional
//!   accumulation.
//! - [`event::EventBus`] -- Bounded, suppressible event buffers drained by
//!   the caller.

pub mod action;
pub mod catalog;
pub mod economy;
pub mod engine;
pub mod event;
pub mod fixed;
pub mod id;
pub mod ledger;
pub mod query;
pub mod sim;
pub mod worker;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
