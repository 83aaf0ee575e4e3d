#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_empty_file_uses_ldc_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.corpora.aquaint_root, PathBuf::from("/corpora/LDC/LDC02T31"));
        assert_eq!(config.corpora.gigaword_root, PathBuf::from("/corpora/LDC/LDC11T07/data"));
        assert_eq!(config.segmentation.strategy, SegmentationStrategy::RuleBased);
        assert_eq!(config.segmentation.min_words, default_min_words());
        assert_eq!(config.run.run_id, "1");
        assert!(config.run.checkpoint.is_none());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
[corpora]
aquaint2_root = "/data/aquaint2"

[segmentation]
strategy = "period"

[run]
topic_file = "topics.xml"
checkpoint = "cache/topics.json"
"#,
        )
        .unwrap();
        assert_eq!(config.corpora.aquaint2_root, PathBuf::from("/data/aquaint2"));
        assert_eq!(config.corpora.aquaint_root, PathBuf::from("/corpora/LDC/LDC02T31"));
        assert_eq!(config.segmentation.strategy, SegmentationStrategy::Period);
        assert_eq!(config.segmentation.min_words, 8);
        assert_eq!(config.run.topic_file, Some(PathBuf::from("topics.xml")));
        assert_eq!(config.run.output_dir, PathBuf::from("./outputs"));
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        assert!(Config::from_toml("[segmentation]\nstrategy = \"spacy\"\n").is_err());
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("newsum.toml");
        assert!(Config::load(Some(missing.as_path())).is_err());

        std::fs::write(&missing, "[run]\nrun_id = \"42\"\n").unwrap();
        assert_eq!(Config::load(Some(missing.as_path())).unwrap().run.run_id, "42");
    }
}
