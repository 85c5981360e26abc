//! Integration tests for synthetic descriptor minting through a backend
//! session.

use std::sync::Arc;
use std::thread;

use weft_backend::{BackendConfig, BackendSession, SyntheticError};
use weft_common::{SourceManager, Span};
use weft_ir::descriptor::{
    access_flags, Annotation, ClassDescriptor, ClassKind, Container, MemberKind, Modality,
    PackageFragment, SourceElement, Visibility,
};
use weft_ir::ir::{IrField, IrFile, IrNode};
use weft_ir::{render, IrType};

// ── Helpers ────────────────────────────────────────────────────────────

fn package() -> Arc<PackageFragment> {
    Arc::new(PackageFragment::new("app"))
}

fn session_with(sources: SourceManager) -> BackendSession {
    BackendSession::new(BackendConfig::default(), Arc::new(sources))
}

fn session() -> BackendSession {
    session_with(SourceManager::new())
}

/// `enum class Color { @Deprecated RED }` and its entry.
fn color_and_red() -> (Arc<ClassDescriptor>, Arc<ClassDescriptor>) {
    let color = Arc::new(ClassDescriptor::new(
        "Color",
        ClassKind::EnumClass,
        Container::Package(package()),
    ));
    let mut red = ClassDescriptor::new(
        "RED",
        ClassKind::EnumEntry,
        Container::Class(color.clone()),
    );
    red.annotations.push(Annotation::new("kotlin.Deprecated"));
    red.source = SourceElement::Declaration {
        file: "app/color.kt".into(),
        span: Span::new(20, 23),
    };
    (color, Arc::new(red))
}

fn object(name: &str) -> Arc<ClassDescriptor> {
    Arc::new(ClassDescriptor::new(
        name,
        ClassKind::Object,
        Container::Package(package()),
    ))
}

// ── Enum backing fields ────────────────────────────────────────────────

#[test]
fn enum_entry_field_is_memoized_by_identity() {
    let session = session();
    let (_, red) = color_and_red();
    let first = session.descriptors().field_for_enum_entry(&red).unwrap();
    let second = session.descriptors().field_for_enum_entry(&red).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(session.descriptors().cached_len(), 1);
}

#[test]
fn enum_entry_field_contents() {
    let session = session();
    let (color, red) = color_and_red();
    let field = session.descriptors().field_for_enum_entry(&red).unwrap();

    assert_eq!(field.name, "RED");
    assert_eq!(field.ty, IrType::class("app.Color"));
    assert!(Arc::ptr_eq(field.owner_class().unwrap(), &color));
    assert_eq!(field.annotations, vec![Annotation::new("kotlin.Deprecated")]);
    assert_eq!(field.modality, Modality::Final);
    assert_eq!(field.visibility, Visibility::Public);
    assert!(field.is_static);
    assert!(!field.is_var);
    assert_eq!(field.access_flags, access_flags::ACC_ENUM);
    assert_eq!(field.source, red.source);
}

#[test]
fn enum_field_requires_an_enum_entry() {
    let session = session();
    let (color, _) = color_and_red();
    let err = session.descriptors().field_for_enum_entry(&color).unwrap_err();
    assert_eq!(
        err,
        SyntheticError::NotAnEnumEntry {
            declaration: "app.Color".into(),
            kind: ClassKind::EnumClass,
        }
    );
}

#[test]
fn enum_field_requires_an_enum_class_container() {
    let session = session();
    let holder = Arc::new(ClassDescriptor::new(
        "Holder",
        ClassKind::Class,
        Container::Package(package()),
    ));
    let entry = Arc::new(ClassDescriptor::new(
        "A",
        ClassKind::EnumEntry,
        Container::Class(holder),
    ));
    let err = session.descriptors().field_for_enum_entry(&entry).unwrap_err();
    assert_eq!(
        err.to_string(),
        "should be enum class: container of app.Holder.A is app.Holder (CLASS)"
    );
}

// ── Object instance fields ─────────────────────────────────────────────

#[test]
fn object_instance_field_is_memoized_by_identity() {
    let session = session();
    let registry = object("Registry");
    let first = session.descriptors().field_for_object_instance(&registry).unwrap();
    let second = session.descriptors().field_for_object_instance(&registry).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn object_instance_field_contents() {
    let session = session();
    let mut registry = ClassDescriptor::new(
        "Registry",
        ClassKind::Object,
        Container::Package(package()),
    );
    registry.annotations.push(Annotation::new("kotlin.Deprecated"));
    let registry = Arc::new(registry);
    let field = session.descriptors().field_for_object_instance(&registry).unwrap();

    assert_eq!(field.name, "INSTANCE");
    assert_eq!(field.ty.to_string(), "Registry");
    assert!(Arc::ptr_eq(field.owner_class().unwrap(), &registry));
    assert!(field.annotations.is_empty());
    assert_eq!(field.modality, Modality::Final);
    assert_eq!(field.visibility, Visibility::Public);
    assert_eq!(field.member_kind, MemberKind::Synthesized);
    assert_eq!(field.source, SourceElement::None);
}

#[test]
fn object_field_requires_an_object() {
    let session = session();
    let (_, red) = color_and_red();
    let err = session.descriptors().field_for_object_instance(&red).unwrap_err();
    assert_eq!(err.to_string(), "should be an object: app.Color.RED is ENUM_ENTRY");
}

#[test]
fn enum_and_object_fields_share_one_cache() {
    let session = session();
    let (_, red) = color_and_red();
    let registry = object("Registry");
    session.descriptors().field_for_enum_entry(&red).unwrap();
    session.descriptors().field_for_object_instance(&registry).unwrap();
    session.descriptors().field_for_enum_entry(&red).unwrap();
    assert_eq!(session.descriptors().cached_len(), 2);
}

#[test]
fn separate_sessions_do_not_share_fields() {
    let registry = object("Registry");
    let a = session().descriptors().field_for_object_instance(&registry).unwrap();
    let b = session().descriptors().field_for_object_instance(&registry).unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(a, b);
}

#[test]
fn parallel_requests_observe_one_field() {
    let session = session();
    let registry = object("Registry");
    let fields: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    session
                        .descriptors()
                        .field_for_object_instance(&registry)
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(fields.iter().all(|f| Arc::ptr_eq(f, &fields[0])));
    assert_eq!(session.descriptors().cached_len(), 1);
}

#[test]
fn synthesized_field_renders_stably() {
    let session = session();
    let (_, red) = color_and_red();
    let field = IrField {
        span: Span::SYNTHETIC,
        descriptor: session.descriptors().field_for_enum_entry(&red).unwrap(),
        initializer: None,
    };
    let first = render(IrNode::Field(&field));
    insta::assert_snapshot!(first, @"FIELD name:RED type:Color visibility:public [static]");
    assert_eq!(first, render(IrNode::Field(&field)));
}

// ── File facade classes ────────────────────────────────────────────────

#[test]
fn file_class_is_not_memoized() {
    let mut sources = SourceManager::new();
    let entry = sources.add_file("app/main.kt", "app", "fun main() {}\n", None);
    let session = session_with(sources);

    let first = session.descriptors().create_file_class(&entry, package()).unwrap();
    let second = session.descriptors().create_file_class(&entry, package()).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
}

#[test]
fn file_class_contents() {
    let mut sources = SourceManager::new();
    let entry = sources.add_file("app/string-utils.kt", "app", "", None);
    let session = session_with(sources);

    let facade = session.descriptors().create_file_class(&entry, package()).unwrap();
    assert_eq!(facade.name, "String_utilsKt");
    assert_eq!(facade.fq_name(), "app.String_utilsKt");
    assert_eq!(facade.supertypes, vec![IrType::class("kotlin.Any")]);
    assert!(facade.annotations.is_empty());
    match &facade.source {
        SourceElement::File(file) => assert_eq!(file.file_name(), "string-utils.kt"),
        other => panic!("expected file source, got {other:?}"),
    }
}

#[test]
fn file_class_uses_configured_names() {
    let mut sources = SourceManager::new();
    let plain = sources.add_file("main.kt", "", "", None);
    let named = sources.add_file("util.kt", "", "", Some("Helpers".into()));
    let config: BackendConfig =
        toml::from_str("root_supertype = \"lang.Object\"\nfacade_suffix = \"Facade\"").unwrap();
    let session = BackendSession::new(config, Arc::new(sources));
    let root = Arc::new(PackageFragment::new(""));

    let facade = session.descriptors().create_file_class(&plain, root.clone()).unwrap();
    assert_eq!(facade.fq_name(), "MainFacade");
    assert_eq!(facade.supertypes[0].to_string(), "Object");

    let facade = session.descriptors().create_file_class(&named, root).unwrap();
    assert_eq!(facade.name, "Helpers");
}

#[test]
fn synthetic_file_entry_is_rejected() {
    let session = session();
    let entry = SourceManager::synthetic_entry("<lambda>", "");
    let err = session.descriptors().create_file_class(&entry, package()).unwrap_err();
    assert_eq!(
        err,
        SyntheticError::UnresolvedFileEntry {
            entry: "<lambda> (synthetic)".into(),
        }
    );
}

#[test]
fn stale_file_entry_is_rejected() {
    let mut other = SourceManager::new();
    let entry = other.add_file("app/main.kt", "app", "", None);
    let session = session();
    assert!(matches!(
        session.descriptors().create_file_class(&entry, package()),
        Err(SyntheticError::UnresolvedFileEntry { .. })
    ));
}

#[test]
fn session_builds_file_class_for_ir_file() {
    let mut sources = SourceManager::new();
    let entry = sources.add_file("app/main.kt", "app", "", None);
    let session = session_with(sources);
    let file = IrFile {
        span: Span::new(0, 0),
        entry,
        package: package(),
        annotations: Vec::new(),
        declarations: Vec::new(),
    };
    let facade = session.file_class(&file).unwrap();
    assert_eq!(facade.fq_name(), "app.MainKt");
    assert_eq!(session.sources().len(), 1);
    assert_eq!(session.config().facade_suffix, "Kt");
}
