//! Naming of file facade classes.

use weft_common::SourceFile;

/// Short name of the facade class holding `file`'s top-level declarations.
///
/// An explicit name requested by the file wins. Otherwise the file stem is
/// sanitized to an identifier, capitalized, and suffixed: `"string-utils.kt"`
/// becomes `"String_utilsKt"` with the default suffix.
pub fn facade_class_name(file: &SourceFile, suffix: &str) -> String {
    if let Some(name) = &file.facade_name {
        return name.clone();
    }
    let mut name = identifier_prefix(file.file_stem());
    name.push_str(suffix);
    name
}

fn identifier_prefix(stem: &str) -> String {
    let sanitized: String = stem
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    let mut chars = sanitized.chars();
    match chars.next() {
        None => "_".to_string(),
        Some(first) if first.is_ascii_digit() => format!("_{sanitized}"),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use weft_common::SourceManager;

    use super::*;

    fn name_for(path: &str, explicit: Option<&str>) -> String {
        let mut sources = SourceManager::new();
        let entry = sources.add_file(path, "app", "", explicit.map(str::to_string));
        let file = sources.source_file(&entry).unwrap();
        facade_class_name(&file, "Kt")
    }

    #[test]
    fn capitalizes_the_stem() {
        assert_eq!(name_for("src/app/main.kt", None), "MainKt");
    }

    #[test]
    fn sanitizes_non_identifier_characters() {
        assert_eq!(name_for("string-utils.kt", None), "String_utilsKt");
        assert_eq!(name_for("a b.kt", None), "A_bKt");
    }

    #[test]
    fn leading_digit_is_prefixed() {
        assert_eq!(name_for("2d.kt", None), "_2dKt");
    }

    #[test]
    fn explicit_name_wins() {
        assert_eq!(name_for("main.kt", Some("Launcher")), "Launcher");
    }
}
