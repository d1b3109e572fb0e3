//! Navigation and input-dispatch runtime
//!
//! Hosts pluggable panels on a stack, routes keys through a two-tier binding
//! registry, and lets a modal dialog take over input without disturbing the
//! stack beneath it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                          App                             │
//! │   global KeyActions · Commands · catch_unwind boundary   │
//! └──────────────────────────────────────────────────────────┘
//!                │                              ▲
//!                ▼                              │ closures
//! ┌──────────────────────────────┐   ┌──────────────────────┐
//! │            Pages             │   │     UpdateQueue      │
//! │  surfaces + one dialog slot  │   │ (bounded, in order)  │
//! └──────────────────────────────┘   └──────────────────────┘
//!                │                              ▲
//!                ▼                              │
//! ┌──────────────────────────────┐   ┌──────────────────────┐
//! │            Stack             │   │       Workers        │
//! │  Components + listeners      │   │ (cancel token, tokio)│
//! └──────────────────────────────┘   └──────────────────────┘
//! ```

pub mod app;
pub mod command;
pub mod component;
pub mod dialog;
pub mod error;
pub mod flash;
pub mod hints;
pub mod keys;
pub mod pages;
pub mod queue;
pub mod stack;
pub mod worker;

#[cfg(test)]
pub mod testing;

pub use app::{App, DispatchState, Routed};
pub use command::{Commands, ExternalCommand};
pub use component::{Component, Context, Handle, Handled, Interactive, RenderContext};
pub use dialog::Dialog;
pub use error::QueueError;
pub use flash::{Flash, FlashLevel, FlashSink};
pub use hints::{MenuHint, MenuHints};
pub use keys::{ActionOwner, Dispatch, Key, KeyAction, KeyActions};
pub use queue::{UpdateQueue, UpdateSender};
pub use stack::StackListener;
pub use worker::Worker;
