//! Document driver: parse, bind, serialize.

use rayon::prelude::*;
use tracing::debug;

use crate::binder::Binder;
use crate::dom::Document;
use crate::error::Result;
use crate::model::{Reflect, Value};
use crate::options::RenderOptions;

/// Renders models into markup under a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `model` into `markup`.
    ///
    /// A model that reflects to a collection renders once per item, see
    /// [`Renderer::render_each`].
    pub fn render<M: Reflect + ?Sized>(&self, markup: &str, model: &M) -> Result<String> {
        self.render_value(markup, &model.reflect())
    }

    /// Render every model against its own fresh parse of `markup` and concatenate
    /// the results in input order.
    pub fn render_each<M: Reflect>(&self, markup: &str, models: &[M]) -> Result<String> {
        let values: Vec<Value> = models.iter().map(Reflect::reflect).collect();
        self.render_all(markup, &values)
    }

    pub fn render_value(&self, markup: &str, model: &Value) -> Result<String> {
        match model {
            Value::Collection(items) => self.render_all(markup, items),
            _ => self.render_one(markup, model),
        }
    }

    fn render_one(&self, markup: &str, model: &Value) -> Result<String> {
        let document = Document::parse(markup, self.options.parse_mode);
        debug!(
            mode = ?document.mode(),
            model = ?model.kind(),
            fields = model.fields().len(),
            "rendering document"
        );

        Binder::new(&self.options).bind(document.root(), model)?;
        document.serialize()
    }

    fn render_all(&self, markup: &str, models: &[Value]) -> Result<String> {
        debug!(
            count = models.len(),
            parallel = self.options.parallel,
            "rendering model sequence"
        );

        let parts: Vec<String> = if self.options.parallel {
            models
                .par_iter()
                .map(|model| self.render_value(markup, model))
                .collect::<Result<_>>()?
        } else {
            models
                .iter()
                .map(|model| self.render_value(markup, model))
                .collect::<Result<_>>()?
        };
        Ok(parts.concat())
    }
}

/// Render `model` into `markup` with default options.
pub fn process<M: Reflect + ?Sized>(markup: &str, model: &M) -> Result<String> {
    Renderer::default().render(markup, model)
}

/// Render each model into an independent parse of `markup` with default options.
pub fn process_each<M: Reflect>(markup: &str, models: &[M]) -> Result<String> {
    Renderer::default().render_each(markup, models)
}
