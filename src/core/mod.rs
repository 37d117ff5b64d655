//! # Core Application Logic
//!
//! Panel state and the reducer that changes it. Knows nothing about
//! terminals or HTTP; the dispatcher and the TUI both sit outside.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Panel (state)        │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • config               │
//!                    └───────────┬─────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!         ┌────────────┐                  ┌────────────┐
//!         │    TUI     │ ── Dispatch ──►  │ Dispatcher │
//!         │ (ratatui)  │ ◄── Action ───── │  (tokio)   │
//!         └────────────┘                  └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Panel` struct, all panel state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod state;
