//! # Model Reflection
//!
//! Models are discovered at bind time, not declared up front. Every model is
//! reflected into an owned [`Value`] tree before binding starts:
//!
//! - **Scalar**: strings, booleans, chars and numbers. Bound as inner markup.
//! - **Object**: an ordered list of named [`Field`]s. Bound by recursion.
//! - **Collection**: an ordered list of items. Bound by template expansion.
//! - **Null**: an unset value. It keeps the *declared* kind, because a null
//!   collection still empties its container while a null object binds nothing.
//!
//! Sources of reflection:
//! 1. The [`Reflect`] trait, implemented for primitives, strings, `Option`,
//!    `Vec`, slices, arrays and `serde_json::Value`.
//! 2. [`impl_model!`](crate::impl_model), which implements `Reflect` for a struct
//!    from an explicit field list.
//! 3. [`from_serialize`] for anything implementing `serde::Serialize`.

use serde::Serialize;

use crate::error::{Error, Result};

/// The three binding kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Scalar,
    Object,
    Collection,
}

/// A reflected model value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unset value of the given declared kind.
    Null(Kind),
    /// String representation of a scalar.
    Scalar(String),
    /// Fields in declaration order.
    Object(Vec<Field>),
    Collection(Vec<Value>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null(kind) => *kind,
            Value::Scalar(_) => Kind::Scalar,
            Value::Object(_) => Kind::Object,
            Value::Collection(_) => Kind::Collection,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }

    /// Fields of an object. Every other value has none.
    pub fn fields(&self) -> &[Field] {
        match self {
            Value::Object(fields) => fields,
            _ => &[],
        }
    }

    pub fn scalar(value: impl ToString) -> Self {
        Value::Scalar(value.to_string())
    }

    pub fn object(fields: impl IntoIterator<Item = Field>) -> Self {
        Value::Object(fields.into_iter().collect())
    }
}

/// A named field of an object model.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn kind(&self) -> Kind {
        self.value.kind()
    }
}

/// Runtime reflection of a model value.
pub trait Reflect {
    /// Declared kind of the type, used when a value of it is absent.
    fn kind() -> Kind;

    fn reflect(&self) -> Value;
}

/// Reflect any serializable value through `serde_json`.
///
/// Field order follows serialization order, which for derived structs is
/// declaration order. A `None` field loses its declared kind here and is treated
/// as a null object; use [`Reflect`] directly when a null collection must still
/// empty its container.
pub fn from_serialize<T: Serialize + ?Sized>(model: &T) -> Result<Value> {
    let json = serde_json::to_value(model).map_err(Error::Model)?;
    Ok(json.reflect())
}

macro_rules! reflect_scalars {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn kind() -> Kind {
                    Kind::Scalar
                }

                fn reflect(&self) -> Value {
                    Value::Scalar(self.to_string())
                }
            }
        )*
    };
}

reflect_scalars!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
    str,
);

impl<T: Reflect + ?Sized> Reflect for &T {
    fn kind() -> Kind {
        T::kind()
    }

    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn kind() -> Kind {
        T::kind()
    }

    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn kind() -> Kind {
        T::kind()
    }

    fn reflect(&self) -> Value {
        match self {
            Some(value) => value.reflect(),
            None => Value::Null(T::kind()),
        }
    }
}

impl<T: Reflect> Reflect for [T] {
    fn kind() -> Kind {
        Kind::Collection
    }

    fn reflect(&self) -> Value {
        Value::Collection(self.iter().map(Reflect::reflect).collect())
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn kind() -> Kind {
        Kind::Collection
    }

    fn reflect(&self) -> Value {
        self.as_slice().reflect()
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn kind() -> Kind {
        Kind::Collection
    }

    fn reflect(&self) -> Value {
        self.as_slice().reflect()
    }
}

impl Reflect for serde_json::Value {
    fn kind() -> Kind {
        Kind::Object
    }

    fn reflect(&self) -> Value {
        match self {
            serde_json::Value::Null => Value::Null(Kind::Object),
            serde_json::Value::Bool(b) => Value::scalar(b),
            serde_json::Value::Number(n) => Value::scalar(n),
            serde_json::Value::String(s) => Value::Scalar(s.clone()),
            serde_json::Value::Array(items) => {
                Value::Collection(items.iter().map(Reflect::reflect).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(name, value)| Field::new(name.clone(), value.reflect()))
                    .collect(),
            ),
        }
    }
}

impl Reflect for Value {
    fn kind() -> Kind {
        Kind::Object
    }

    fn reflect(&self) -> Value {
        self.clone()
    }
}

/// Implement [`Reflect`] for a struct by listing its fields in declaration order.
///
/// ```
/// use domtemple::{impl_model, process};
///
/// struct Artist {
///     name: String,
///     albums: Vec<String>,
/// }
///
/// impl_model!(Artist { name, albums });
///
/// let artist = Artist { name: "Prince".into(), albums: vec!["1999".into()] };
/// let html = process(r#"<h1 class="name"></h1><ul id="albums"><li></li></ul>"#, &artist).unwrap();
/// assert_eq!(html, r#"<h1 class="name">Prince</h1><ul id="albums"><li>1999</li></ul>"#);
/// ```
#[macro_export]
macro_rules! impl_model {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn kind() -> $crate::Kind {
                $crate::Kind::Object
            }

            fn reflect(&self) -> $crate::Value {
                $crate::Value::Object(vec![
                    $($crate::Field::new(
                        stringify!($field),
                        $crate::Reflect::reflect(&self.$field),
                    ),)*
                ])
            }
        }
    };
}
