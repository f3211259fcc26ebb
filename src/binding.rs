mod arguments;
mod conversion_error;
mod conversion_provider;
mod describe;
mod method_descriptor;
mod naming_convention;
mod parameter_map;
mod scalar_conversion;
mod type_descriptor;

pub use arguments::Arguments;
pub use conversion_error::ConversionError;
pub use conversion_provider::ConversionProvider;
pub use describe::Describe;
pub use method_descriptor::{MethodDescriptor, NameHint, ParameterDescriptor, binding_prefix};
pub use naming_convention::{NamingConvention, NamingConventionError};
pub use parameter_map::ParameterMap;
pub use type_descriptor::{CompositeDescriptor, PropertyDescriptor, ScalarKind, TypeDescriptor};
