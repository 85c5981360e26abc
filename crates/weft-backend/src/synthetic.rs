//! Compiler-internal descriptors the source never declares.
//!
//! Code generation needs a static field for every enum constant, an
//! `INSTANCE` field for every object, and a facade class per file for its
//! top-level declarations. [`SyntheticDescriptorFactory`] mints these on
//! demand. Singleton fields are memoized per owning declaration for the
//! lifetime of the factory: asking twice yields the same `Arc`, which
//! codegen relies on when it compares symbols by identity.

use std::collections::hash_map::Entry;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use weft_common::{FileEntry, SourceManager};
use weft_ir::descriptor::{
    access_flags, ClassDescriptor, ClassKind, Container, FileClassDescriptor, MemberKind,
    Modality, PackageFragment, PropertyDescriptor, SourceElement, Visibility,
};

use crate::config::BackendConfig;
use crate::error::SyntheticError;
use crate::facade::facade_class_name;

/// Name of the field holding an object's single instance.
pub const INSTANCE_FIELD_NAME: &str = "INSTANCE";

/// Cache key comparing class descriptors by identity.
#[derive(Debug, Clone)]
struct ClassKey(Arc<ClassDescriptor>);

impl PartialEq for ClassKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ClassKey {}

impl Hash for ClassKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

/// Factory for synthetic field and facade class descriptors.
///
/// Enum entries and objects share one cache; a declaration is never both, so
/// a key always maps to fields minted by the same rule. The cache sits behind
/// a mutex so backend workers running in parallel can share one factory; the
/// lock is held across lookup and insertion.
#[derive(Debug)]
pub struct SyntheticDescriptorFactory {
    sources: Arc<SourceManager>,
    config: BackendConfig,
    singleton_fields: Mutex<FxHashMap<ClassKey, Arc<PropertyDescriptor>>>,
}

impl SyntheticDescriptorFactory {
    pub fn new(sources: Arc<SourceManager>, config: BackendConfig) -> Self {
        Self {
            sources,
            config,
            singleton_fields: Mutex::new(FxHashMap::default()),
        }
    }

    /// The static field holding the constant for `entry`.
    ///
    /// # Errors
    ///
    /// Fails if `entry` is not an enum entry or is not nested directly in an
    /// enum class.
    pub fn field_for_enum_entry(
        &self,
        entry: &Arc<ClassDescriptor>,
    ) -> Result<Arc<PropertyDescriptor>, SyntheticError> {
        let enum_class = enum_class_of(entry)?;
        Ok(self.get_or_create(entry, || PropertyDescriptor {
            name: entry.name.clone(),
            container: Container::Class(Arc::clone(enum_class)),
            ty: enum_class.default_type(),
            annotations: entry.annotations.clone(),
            modality: Modality::Final,
            visibility: Visibility::Public,
            is_var: false,
            is_static: true,
            access_flags: access_flags::ACC_ENUM,
            member_kind: MemberKind::Synthesized,
            source: entry.source.clone(),
        }))
    }

    /// The static `INSTANCE` field of `object`.
    ///
    /// # Errors
    ///
    /// Fails if `object` is not an object declaration.
    pub fn field_for_object_instance(
        &self,
        object: &Arc<ClassDescriptor>,
    ) -> Result<Arc<PropertyDescriptor>, SyntheticError> {
        if object.kind != ClassKind::Object {
            return Err(SyntheticError::NotAnObject {
                declaration: object.fq_name(),
                kind: object.kind,
            });
        }
        Ok(self.get_or_create(object, || PropertyDescriptor {
            name: INSTANCE_FIELD_NAME.to_string(),
            container: Container::Class(Arc::clone(object)),
            ty: object.default_type(),
            annotations: Vec::new(),
            modality: Modality::Final,
            visibility: Visibility::Public,
            is_var: false,
            is_static: true,
            access_flags: 0,
            member_kind: MemberKind::Synthesized,
            source: SourceElement::None,
        }))
    }

    /// A new facade class descriptor for the file behind `entry`.
    ///
    /// Not memoized: every call returns a fresh descriptor.
    ///
    /// # Errors
    ///
    /// Fails if `entry` does not resolve to a file registered with this
    /// factory's source manager.
    pub fn create_file_class(
        &self,
        entry: &FileEntry,
        package: Arc<PackageFragment>,
    ) -> Result<Arc<FileClassDescriptor>, SyntheticError> {
        let file = self
            .sources
            .source_file(entry)
            .ok_or_else(|| SyntheticError::UnresolvedFileEntry {
                entry: entry.to_string(),
            })?;
        let name = facade_class_name(&file, &self.config.facade_suffix);
        debug!(file = %entry.name(), facade = %name, "created file facade class");
        Ok(Arc::new(FileClassDescriptor {
            name,
            package,
            supertypes: vec![self.config.root_type()],
            // TODO: carry file-level annotations once IrFile annotations are
            // threaded through lowering.
            annotations: Vec::new(),
            source: SourceElement::File(file),
        }))
    }

    /// Number of singleton fields minted so far.
    pub fn cached_len(&self) -> usize {
        self.singleton_fields.lock().len()
    }

    fn get_or_create(
        &self,
        owner: &Arc<ClassDescriptor>,
        create: impl FnOnce() -> PropertyDescriptor,
    ) -> Arc<PropertyDescriptor> {
        let mut fields = self.singleton_fields.lock();
        match fields.entry(ClassKey(Arc::clone(owner))) {
            Entry::Occupied(cached) => {
                trace!(owner = %owner.fq_name(), "synthetic field cache hit");
                Arc::clone(cached.get())
            }
            Entry::Vacant(slot) => {
                let field = Arc::new(create());
                debug!(
                    owner = %owner.fq_name(),
                    field = %field.name,
                    "synthesized singleton field"
                );
                Arc::clone(slot.insert(field))
            }
        }
    }
}

fn enum_class_of(entry: &ClassDescriptor) -> Result<&Arc<ClassDescriptor>, SyntheticError> {
    if entry.kind != ClassKind::EnumEntry {
        return Err(SyntheticError::NotAnEnumEntry {
            declaration: entry.fq_name(),
            kind: entry.kind,
        });
    }
    match &entry.container {
        Container::Class(class) if class.kind == ClassKind::EnumClass => Ok(class),
        Container::Class(class) => Err(SyntheticError::NotAnEnumClass {
            entry: entry.fq_name(),
            container: format!("{} ({})", class.fq_name(), class.kind),
        }),
        Container::Package(package) => Err(SyntheticError::NotAnEnumClass {
            entry: entry.fq_name(),
            container: format!("package {package}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> SyntheticDescriptorFactory {
        SyntheticDescriptorFactory::new(Arc::new(SourceManager::new()), BackendConfig::default())
    }

    fn class(name: &str, kind: ClassKind, container: Container) -> Arc<ClassDescriptor> {
        Arc::new(ClassDescriptor::new(name, kind, container))
    }

    fn app() -> Container {
        Container::Package(Arc::new(PackageFragment::new("app")))
    }

    #[test]
    fn keys_compare_by_identity() {
        let a = class("Same", ClassKind::Object, app());
        let b = class("Same", ClassKind::Object, app());
        assert_eq!(a, b);
        assert_eq!(ClassKey(a.clone()), ClassKey(a.clone()));
        assert_ne!(ClassKey(a), ClassKey(b));
    }

    #[test]
    fn content_equal_objects_get_separate_fields() {
        let factory = factory();
        let a = class("Same", ClassKind::Object, app());
        let b = class("Same", ClassKind::Object, app());
        let fa = factory.field_for_object_instance(&a).unwrap();
        let fb = factory.field_for_object_instance(&b).unwrap();
        assert!(!Arc::ptr_eq(&fa, &fb));
        assert_eq!(factory.cached_len(), 2);
    }

    #[test]
    fn failed_preconditions_are_not_cached() {
        let factory = factory();
        let plain = class("Point", ClassKind::Class, app());
        assert!(factory.field_for_object_instance(&plain).is_err());
        assert!(factory.field_for_enum_entry(&plain).is_err());
        assert_eq!(factory.cached_len(), 0);
    }

    #[test]
    fn enum_entry_at_top_level_is_rejected() {
        let factory = factory();
        let stray = class("RED", ClassKind::EnumEntry, app());
        assert_eq!(
            factory.field_for_enum_entry(&stray).unwrap_err(),
            SyntheticError::NotAnEnumClass {
                entry: "app.RED".into(),
                container: "package app".into(),
            }
        );
    }

    #[test]
    fn factory_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyntheticDescriptorFactory>();
    }
}
