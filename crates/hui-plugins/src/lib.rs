//! # hui-plugins — Annotation Host Plugins
//!
//! The plugins the annotation host discovers at startup, and the machinery
//! that loads them.
//!
//! - [`TextboxPlugin`] (`histomicsui_textbox`) registers the textbox element
//!   schema with the host, once.
//! - [`ArrowPlugin`] (`histomicsui_arrow`) only ships client code; arrow is
//!   already part of the baseline schema.
//! - [`PluginRegistry`] holds plugins by entry point and loads the enabled
//!   ones in registration order.
//! - [`HostConfig`] selects the enabled plugins (YAML).
//! - [`bootstrap`] wires it together and returns a [`LoadedHost`].
//!
//! ```
//! use hui_plugins::{bootstrap, HostConfig};
//! use serde_json::json;
//!
//! let host = bootstrap(&HostConfig::all())?;
//! host.validate(&json!({
//!     "type": "textbox",
//!     "center": [100, 200, 0],
//!     "width": 50,
//!     "height": 30,
//!     "text": "Hello World"
//! }))
//! .expect("textbox is registered");
//! # Ok::<(), hui_plugins::PluginError>(())
//! ```
//!
//! Libraries in this workspace emit `tracing` events and never install a
//! subscriber.

pub mod arrow;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod plugin;
pub mod registry;
pub mod textbox;

pub use arrow::{ArrowPlugin, ARROW_ENTRY_POINT};
pub use bootstrap::{bootstrap, bootstrap_from_path, bootstrap_with, LoadedHost};
pub use config::HostConfig;
pub use error::PluginError;
pub use plugin::{ClientBundle, HostPlugin, PluginInfo};
pub use registry::PluginRegistry;
pub use textbox::{TextboxPlugin, TEXTBOX_ENTRY_POINT};
