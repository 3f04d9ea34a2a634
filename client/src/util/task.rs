//! Browser task spawning.
//!
//! Gateway futures are `!Send` (they hold `fetch` handles), so they run on
//! the local executor. Native builds have no executor and drop the future.

use std::future::Future;

pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(future);
    #[cfg(not(feature = "csr"))]
    drop(future);
}
