//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use super::validator::ConfigValidator;
use proptest::prelude::*;

fn output_format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Table),
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
    ]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(0u64..60),
        prop::option::of(any::<bool>()),
        prop::option::of(output_format_strategy()),
        prop::option::of(0u32..200),
        prop::option::of(0u32..200),
        prop::option::of(0u32..5),
    )
        .prop_map(
            |(lock_wait, autoinit, format, page, max_page, retries)| Config {
                maximum_lock_wait_seconds: lock_wait,
                disable_autoinit: autoinit,
                output_format: format,
                page_size: page,
                max_page_size: max_page,
                transient_retries: retries,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Every field set in the higher layer wins; unset fields fall through
    #[test]
    fn merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let merged = ConfigMerger::merge([&low, &high]);

        prop_assert_eq!(merged.page_size, high.page_size.or(low.page_size));
        prop_assert_eq!(merged.max_page_size, high.max_page_size.or(low.max_page_size));
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));
        prop_assert_eq!(merged.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(
            merged.transient_retries,
            high.transient_retries.or(low.transient_retries)
        );
    }

    // Merging a config into itself changes nothing
    #[test]
    fn merge_idempotent(config in config_strategy()) {
        let mut target = config.clone();
        ConfigMerger::merge_into(&mut target, &config);
        prop_assert_eq!(target, config);
    }

    // A validated config always yields a usable page size
    #[test]
    fn valid_config_has_usable_page_size(config in config_strategy()) {
        if ConfigValidator::validate(&config).is_ok() {
            prop_assert!(config.page_size() >= 1);
            prop_assert!(config.page_size() <= config.max_page_size());
            prop_assert!(config.lock_wait_seconds() >= 1);
        }
    }

    // YAML serialization preserves every field
    #[test]
    fn yaml_preserves_config(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
