//! Client state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! These types are provided through Leptos context from `app` and shared by
//! pages and components.

pub mod auth;
pub mod notification;
