#![forbid(unsafe_code)]

//! `sambut-core` holds every piece of page behavior for the Sambut contact page.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment pushes [`PageEvent`] values
//!   and reads results back through a [`PageView`] implementation.
//! - **Deterministic time**: the host advances a monotonic clock explicitly;
//!   alert and pulse timers live in a [`TimerQueue`] owned by the page.
//! - **No globals**: the in-memory submission history is owned by the
//!   [`MessageForm`] controller inside a [`Page`], not by module state.
//!
//! `sambut-web` wraps these building blocks with the DOM, `localStorage`,
//! and browser timers. Tests drive the same code through [`MemoryView`] and
//! [`MemoryStore`].
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use sambut_core::{
//!     ElementId, FixedTimestamp, FormField, MemoryStore, MemoryView, Page, PageConfig, PageEvent,
//! };
//!
//! let mut page = Page::new(
//!     MemoryView::contact_page(),
//!     MemoryStore::new(),
//!     PageConfig::default(),
//!     FixedTimestamp::new("18/10/2026, 09.30.00"),
//! );
//! page.handle(PageEvent::Loaded);
//!
//! let view = page.view_mut();
//! view.set_input(FormField::Name, "Budi Santoso");
//! view.set_input(FormField::Email, "budi@example.com");
//! view.set_input(FormField::Phone, "081234567890");
//! view.set_input(FormField::Message, "Halo, saya ingin bertanya.");
//!
//! page.handle(PageEvent::FormSubmit);
//! assert_eq!(page.history().len(), 1);
//! assert_eq!(page.view().input(FormField::Name), "");
//!
//! page.advance_to(Duration::from_secs(6));
//! assert!(page.view().alert().is_none());
//! assert!(page.view().markup(&ElementId::SubmissionDisplay).is_some());
//! ```

pub mod alert;
pub mod config;
pub mod form;
pub mod greeting;
pub mod history;
#[cfg(feature = "logging")]
pub mod logging;
pub mod markup;
pub mod messages;
pub mod navigation;
pub mod page;
pub mod scroll;
pub mod storage;
pub mod submission;
pub mod timer;
pub mod validation;
pub mod view;

pub use alert::{ActiveAlert, AlertId, AlertKind, AlertOverlay, AlertPresenter};
pub use config::{ConfigError, PageConfig, StorageKeys};
pub use form::{MessageForm, SubmitOutcome};
pub use greeting::{GreetingController, GreetingOutcome};
pub use history::{HistoryPreview, HistoryRenderer};
pub use markup::{Markup, escape_html};
pub use navigation::{AnchorOutcome, NavigationController};
pub use page::{Page, PageContext, PageEvent};
pub use scroll::{HeaderShadow, ScrollStyler};
pub use storage::{KeyValueStore, MemoryStore, PersistentStore, StorageError, StorageResult};
#[cfg(feature = "clock")]
pub use submission::LocalClock;
pub use submission::{ContactSubmission, FixedTimestamp, SubmissionHistory, TimestampSource};
pub use timer::{TimerId, TimerQueue, TimerTask};
pub use validation::{FormField, ValidationError, ValidationResult};
pub use view::{ElementId, MemoryView, MountedAlert, PageView, ScrollBehavior, StyleProperty};
