#![forbid(unsafe_code)]

//! WASM host for the Sambut contact page.
//!
//! Binds `sambut-core` to the browser:
//! - `PageView` over the live document (`web-sys`),
//! - `KeyValueStore` over `window.localStorage`,
//! - the page's timer queue over a single re-armed `setTimeout`,
//! - timestamp labels over `Date.prototype.toLocaleString("id-ID")`,
//! - tracing output over `console.*`.
//!
//! The JS surface is [`SambutPage`] plus the free functions
//! `updateWelcomeMessage`, `showAlert` and `closeAlert` used by inline
//! handlers in the page markup.

pub mod options;
pub mod timing;

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::SambutPage;

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct SambutPage;

#[cfg(not(target_arch = "wasm32"))]
impl SambutPage {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
