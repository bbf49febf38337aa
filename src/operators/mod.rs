pub mod arithmetic;
pub mod math;

pub use arithmetic::binary;

use crate::ast::OperatorRegistry;

/// Registers the default operator set.
pub fn register_operators(registry: &mut OperatorRegistry) {
    arithmetic::register(registry);
}
