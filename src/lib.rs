//! # DomTemple
//!
//! Convention-based HTML templating. Elements are found by naming convention
//! and filled from a plain data model; the markup itself carries no template
//! language.
//!
//! ```
//! use domtemple::process;
//! use serde_json::json;
//!
//! let html = process(
//!     r#"<h1 class="title"></h1><div id="artist"><p class="name"></p></div>"#,
//!     &json!({ "Title": "Artist", "Artist": { "Name": "Prince" } }),
//! )
//! .unwrap();
//! assert_eq!(
//!     html,
//!     r#"<h1 class="title">Artist</h1><div id="artist"><p class="name">Prince</p></div>"#
//! );
//! ```
//!
//! ## Convention Invariants
//!
//! 1. **Lookup Priority**: a field name (lower-cased) resolves in this exact order:
//!    1. Tag: the first descendant element with that tag name
//!    2. Id: every descendant element with that `id`
//!    3. Class: every descendant element whose `class` is exactly that name
//!
//!    Class is only consulted when tag and id both miss, so styling classes never
//!    collide with id-based hooks.
//!
//! 2. **Scope Narrowing**: lookups search the descendants of the current scope.
//!    The top-level scope is the whole document; an object field descends into
//!    each matched node, excluding the node itself.
//!
//! 3. **Template Expansion**: a collection's container gives up one template
//!    child (the child with class `template`, else its first child), which is
//!    cloned, appended and bound once per item. A null or empty collection leaves
//!    the container without the template.
//!
//! 4. **Path Fallback**: an object field that matches nothing binds its own fields
//!    under dash-joined names, so `Artist.Name` can target `class="artist-name"`.
//!
//! 5. **Independent Renders**: every render parses its own tree. Rendering a
//!    sequence of models concatenates independent renders in input order.

mod binder;
pub mod dom;
mod error;
mod matcher;
mod model;
mod options;
mod render;
mod template;

#[cfg(feature = "napi")]
mod native;


pub use error::{Error, Result};
pub use model::{from_serialize, Field, Kind, Reflect, Value};
pub use options::{ParseMode, RenderOptions};
pub use render::{process, process_each, Renderer};

#[cfg(feature = "napi")]
pub use native::process_native;
