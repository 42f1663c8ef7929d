/// Splits a display name into label lines on embedded `\n` markers.
///
/// Always yields at least one (possibly empty) line.
pub fn label_lines(name: &str) -> Vec<&str> {
    name.split('\n').collect()
}

/// Joins the label lines of a display name with single spaces.
///
/// This is the key used by the cross-reference index, the abbreviation table and search.
pub fn normalize_name(name: &str) -> String {
    if !name.contains('\n') {
        return name.to_string();
    }
    name.replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_name_joins_lines_with_spaces() {
        assert_eq!(normalize_name("Batch\nNormalization"), "Batch Normalization");
        assert_eq!(normalize_name("ReLU"), "ReLU");
    }

    #[test]
    fn label_lines_never_empty() {
        assert_eq!(label_lines(""), vec![""]);
        assert_eq!(label_lines("a\nb"), vec!["a", "b"]);
    }
}
