use crate::error::{Error, Result};
use std::path::Path;

/// Reads one label per line. A leading WordNet synset id such as
/// `n02123045 tabby, tabby cat` is dropped.
pub fn parse_labels(source: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_synset_id(line).to_string())
        .collect()
}

pub fn load_labels(path: &Path) -> Result<Vec<String>> {
    let labels = parse_labels(&std::fs::read_to_string(path)?);
    if labels.is_empty() {
        return Err(Error::Model(format!(
            "labels file {} contains no labels",
            path.display()
        )));
    }
    Ok(labels)
}

fn strip_synset_id(line: &str) -> &str {
    match line.split_once(' ') {
        Some((id, rest))
            if id.len() == 9
                && id.starts_with('n')
                && id[1..].chars().all(|c| c.is_ascii_digit()) =>
        {
            rest.trim_start()
        }
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_synset_lines() {
        let labels = parse_labels("n01440764 tench, Tinca tinca\nn02123045 tabby, tabby cat\n\n");

        assert_eq!(labels, vec!["tench, Tinca tinca", "tabby, tabby cat"]);
    }

    #[test]
    fn test_parse_plain_lines() {
        let labels = parse_labels("background\n  golden retriever  \nnotasynset label\n");

        assert_eq!(
            labels,
            vec!["background", "golden retriever", "notasynset label"]
        );
    }

    #[test]
    fn test_load_empty_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "   ").unwrap();

        assert!(matches!(load_labels(file.path()), Err(Error::Model(_))));
    }
}
