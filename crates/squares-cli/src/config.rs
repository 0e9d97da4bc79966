use anyhow::Context;
use serde::{Deserialize, Serialize};
use squares_core::{build_spec, PuzzleSpec, SquaresError};
use std::fs;
use std::path::Path;

/// Puzzle definition as stored on disk.
///
/// Accepts both `width`/`height`/`words` and the older `Xsize`/`Ysize`/`Words`
/// key names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleFile {
    #[serde(alias = "Xsize")]
    pub width: usize,
    #[serde(alias = "Ysize")]
    pub height: usize,
    #[serde(alias = "Words")]
    pub words: Vec<String>,
}

impl PuzzleFile {
    /// Read and parse a JSON puzzle file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot open puzzle file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Validated spec for this puzzle.
    pub fn to_spec(&self) -> Result<PuzzleSpec, SquaresError> {
        build_spec(self.width, self.height, &self.words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_current_keys() {
        let file = PuzzleFile::parse(r#"{"width": 4, "height": 4, "words": ["SWOT", "PIG"]}"#)
            .unwrap();
        assert_eq!(file.width, 4);
        assert_eq!(file.words, vec!["SWOT", "PIG"]);
    }

    #[test]
    fn test_parse_legacy_keys() {
        let file =
            PuzzleFile::parse(r#"{"Xsize": 5, "Ysize": 3, "Words": ["AND", "GNU"]}"#).unwrap();
        assert_eq!((file.width, file.height), (5, 3));
        assert_eq!(file.words, vec!["AND", "GNU"]);
    }

    #[test]
    fn test_load_from_disk() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"{{"Xsize": 4, "Ysize": 4, "Words": ["SWOT", "PIG", "AND", "GNU"]}}"#
        )
        .unwrap();

        let file = PuzzleFile::load(tmp.path()).unwrap();
        let spec = file.to_spec().unwrap();
        assert_eq!(spec.area(), 16);
        assert_eq!(spec.words().len(), 4);
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = PuzzleFile::load(Path::new("/nonexistent/puzzle.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/puzzle.json"));
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "{{\"width\": 4").unwrap();
        assert!(PuzzleFile::load(tmp.path()).is_err());
    }

    #[test]
    fn test_invalid_puzzle_rejected() {
        let file = PuzzleFile {
            width: 1,
            height: 1,
            words: vec!["AB".into()],
        };
        assert_eq!(
            file.to_spec().unwrap_err(),
            SquaresError::GridTooSmall { area: 1, required: 2 }
        );
    }
}
