use crate::binding::{ScalarKind, TypeDescriptor};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// Produces the [`TypeDescriptor`] of a Rust type.
///
/// Implemented for scalars, `Option`, the std collections and maps. Composite
/// types implement it by returning a
/// [`CompositeDescriptor`](crate::binding::CompositeDescriptor):
///
/// ```rust
/// use courier::binding::{CompositeDescriptor, Describe, TypeDescriptor};
///
/// struct User {
///     name: String,
///     tags: Vec<String>,
/// }
///
/// impl Describe for User {
///     fn describe() -> TypeDescriptor {
///         CompositeDescriptor::new("User")
///             .required_field::<String>("name")
///             .field::<Vec<String>>("tags")
///             .build()
///     }
/// }
///
/// assert!(matches!(User::describe(), TypeDescriptor::Composite(_)));
/// ```
pub trait Describe {
    fn describe() -> TypeDescriptor;
}

macro_rules! describe_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::Scalar(ScalarKind::$kind)
                }
            }
        )*
    };
}

describe_scalar! {
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    NaiveDate => Date,
    DateTime<Utc> => DateTime,
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::optional(T::describe())
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list(T::describe())
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::list(T::describe())
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::array(T::describe())
    }
}

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::set(T::describe())
    }
}

impl<T: Describe> Describe for BTreeSet<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::set(T::describe())
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        map_of::<K, V>()
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        map_of::<K, V>()
    }
}

/// Map keys are wire segments, so non-scalar key types degrade to strings.
fn map_of<K: Describe, V: Describe>() -> TypeDescriptor {
    let key = match K::describe() {
        TypeDescriptor::Scalar(kind) => kind,
        _ => ScalarKind::String,
    };
    TypeDescriptor::map(key, V::describe())
}
