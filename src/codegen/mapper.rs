//! Mapper interface augmentation

use crate::contract::MethodContract;
use crate::java::{ClassKind, JavaClass, JavaType};

/// Copy of `existing` with every contract that has no same-named method
/// appended, in the order given.
///
/// Methods already present are kept untouched, so running this twice adds
/// nothing the second time.
#[must_use]
pub fn augment_interface<'a>(
    existing: &JavaClass,
    contracts: impl IntoIterator<Item = &'a MethodContract>,
) -> JavaClass {
    let mut interface = existing.clone();
    debug_assert_eq!(interface.kind, ClassKind::Interface);

    for contract in contracts {
        if interface.method(&contract.name).is_some() {
            tracing::warn!(
                mapper = %interface.java_type,
                method = %contract.name,
                "method already present, keeping existing declaration"
            );
            continue;
        }
        for java_type in contract.signature.types() {
            interface.import_type(java_type);
        }
        interface.methods.push(contract.declaration());
    }
    interface
}

/// An empty interface for `mapper_type`
#[must_use]
pub fn empty_interface(mapper_type: &JavaType) -> JavaClass {
    JavaClass::new(mapper_type.clone(), ClassKind::Interface)
}
