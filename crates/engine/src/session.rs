//! Startup glue: load a dictionary, build an engine, generate the first board.
//!
//! A failure at any step leaves no playable board; the error says which step
//! failed.

use anyhow::{Context, Result};

use crate::config::EngineConfig;
use crate::core::{Dictionary, DictionaryProvider, TileFactory};
use crate::engine::{GenerationReport, MatchEngine};

pub async fn start<P, F>(
    provider: &P,
    language: &str,
    config: EngineConfig,
    factory: F,
) -> Result<(MatchEngine<Dictionary, F>, GenerationReport)>
where
    P: DictionaryProvider,
    F: TileFactory,
{
    let dictionary = Dictionary::load(provider, language)
        .await
        .with_context(|| format!("loading dictionary for {language}"))?;

    let mut engine =
        MatchEngine::new(config, dictionary, factory).context("creating match engine")?;
    let report = engine
        .generate_board()
        .context("generating the first board")?;

    Ok((engine, report))
}

/// Parse a JSON config, falling back to defaults for missing fields
pub fn config_from_json(text: &str) -> Result<EngineConfig> {
    EngineConfig::from_json_str(text).context("reading engine config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HeadlessTileFactory, StaticDictionaryProvider};
    use crate::types::BoardPhase;

    #[tokio::test]
    async fn test_start_generates_a_playable_board() {
        let _ = env_logger::builder().is_test(true).try_init();
        let provider = StaticDictionaryProvider::new().with_language(
            "english",
            "cat\ndog\ntea\n",
            "a 3\ne 3\nt 2\nc 1\nd 1\no 2\ng 1\nr 2\ns 2\n",
        );
        let config = EngineConfig::default().with_size(5, 5).with_seed(11);

        let (engine, report) = start(&provider, "english", config, HeadlessTileFactory::new())
            .await
            .unwrap();
        assert!(report.passes >= 1);
        assert_eq!(engine.phase(), BoardPhase::Idle);
        assert!(engine.grid().is_full());
        assert_eq!(engine.factory().live_count(), 25);
    }

    #[tokio::test]
    async fn test_start_reports_failed_step() {
        let provider = StaticDictionaryProvider::new();
        let err = start(
            &provider,
            "english",
            EngineConfig::default(),
            HeadlessTileFactory::new(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("loading dictionary for english"));
    }

    #[test]
    fn test_config_from_json_context() {
        let err = config_from_json("{ not json").unwrap_err();
        assert_eq!(err.to_string(), "reading engine config");
    }
}
