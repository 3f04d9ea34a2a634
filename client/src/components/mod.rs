//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome and route guarding while reading shared
//! state from Leptos context providers.

pub mod guarded;
pub mod nav_bar;
pub mod toast;
