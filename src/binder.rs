//! # Binder
//!
//! Walks a reflected model against a document tree and mutates the tree in place.
//!
//! ## Binding Invariants
//!
//! 1. **Explicit scope**: every call receives the node it binds against. Nothing
//!    outside the subtree of that node is matched or mutated.
//! 2. **Dispatch by kind**: scalars replace inner markup, objects recurse into each
//!    matched node, collections expand a template once per item.
//! 3. **Null is inert**: a null scalar or object binds nothing. A null collection
//!    still consumes the template and leaves its container empty.
//! 4. **Misses are silent**: a field that matches no node is skipped. The only
//!    failure is a container with items to bind but nothing to clone.

use markup5ever_rcdom::Handle;
use tracing::trace;

use crate::dom;
use crate::error::{Error, Result};
use crate::matcher::match_field;
use crate::model::{Field, Kind, Value};
use crate::options::RenderOptions;
use crate::template::resolve_template;

pub struct Binder<'a> {
    options: &'a RenderOptions,
}

impl<'a> Binder<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    /// Bind `model` into the subtree under `scope`.
    pub fn bind(&self, scope: &Handle, model: &Value) -> Result<()> {
        match model {
            Value::Object(fields) => self.bind_fields(scope, fields, None),
            // Nothing to enumerate.
            Value::Null(_) | Value::Scalar(_) | Value::Collection(_) => Ok(()),
        }
    }

    fn bind_fields(&self, scope: &Handle, fields: &[Field], path: Option<&str>) -> Result<()> {
        for field in fields {
            let name = match path {
                Some(prefix) => format!("{}-{}", prefix, field.name),
                None => field.name.clone(),
            };
            self.bind_field(scope, &name, &field.value)?;
        }
        Ok(())
    }

    fn bind_field(&self, scope: &Handle, name: &str, value: &Value) -> Result<()> {
        if matches!(value, Value::Null(Kind::Scalar) | Value::Null(Kind::Object)) {
            trace!(field = name, "skipping null field");
            return Ok(());
        }

        let matches = match_field(scope, name);
        trace!(
            field = name,
            kind = ?value.kind(),
            matched = matches.len(),
            by = ?matches.first().map(|m| m.kind),
            "resolved field"
        );

        match value {
            Value::Scalar(text) => {
                for m in &matches {
                    dom::set_inner_content(&m.node, text);
                }
            }
            Value::Object(fields) => {
                if matches.is_empty() && self.options.path_fallback {
                    return self.bind_fields(scope, fields, Some(&name.to_lowercase()));
                }
                for m in &matches {
                    self.bind_fields(&m.node, fields, None)?;
                }
            }
            Value::Collection(items) => {
                for m in &matches {
                    self.expand(&m.node, name, items)?;
                }
            }
            Value::Null(_) => {
                for m in &matches {
                    self.expand(&m.node, name, &[])?;
                }
            }
        }
        Ok(())
    }

    /// Replace the template child of `container` with one bound clone per item.
    fn expand(&self, container: &Handle, name: &str, items: &[Value]) -> Result<()> {
        let Some(template) = resolve_template(container, &self.options.template_class) else {
            if items.is_empty() {
                return Ok(());
            }
            return Err(Error::empty_container(name, dom::describe(container)));
        };

        for item in items {
            let clone = dom::clone_node(&template);
            dom::append_child(container, clone.clone());
            self.bind_item(&clone, name, item)?;
        }
        Ok(())
    }

    fn bind_item(&self, clone: &Handle, name: &str, item: &Value) -> Result<()> {
        match item {
            Value::Scalar(text) => {
                dom::set_inner_content(clone, text);
                Ok(())
            }
            Value::Object(fields) => self.bind_fields(clone, fields, None),
            Value::Collection(inner) => self.expand(clone, name, inner),
            Value::Null(_) => Ok(()),
        }
    }
}
