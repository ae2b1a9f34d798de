//! Integration tests for channel units.
//!
//! These tests verify end-to-end workflows: analysis, persistence and
//! reconstruction against a model.

use aprender_channels::channel::{read_unit_configs, write_unit_configs, OUTPUT_PLACEHOLDER};
use aprender_channels::prelude::*;
use std::collections::BTreeMap;
use std::rc::Rc;

/// conv1 -> bn1 -> relu -> conv2, with conv1's output also added back
/// after conv3 (residual), and the network output taking conv3.
fn residual_model() -> ModuleDict {
    ModuleDict::new()
        .add("conv1", Dynamic::new(Conv2d::new(3, 16, 3)))
        .add("bn1", Dynamic::new(BatchNorm2d::new(16)))
        .add("relu", ReLU)
        .add("conv2", Dynamic::new(Conv2d::new(16, 32, 3)))
        .add("conv3", Conv2d::new(32, 16, 1))
        .add("fc", Linear::new(16, 10))
}

fn residual_units() -> BTreeMap<String, UnitConfig> {
    let mut units = BTreeMap::new();
    units.insert(
        "stem".to_string(),
        UnitConfig::with_num_channels(16)
            .with_output(ChannelConfig::named("conv1"))
            .with_output(ChannelConfig::named("conv3"))
            .with_input(ChannelConfig::named("bn1"))
            .with_input(ChannelConfig::named("relu"))
            .with_input(ChannelConfig::named("conv2"))
            .with_input(ChannelConfig::named("fc")),
    );
    units.insert(
        "body".to_string(),
        UnitConfig::with_num_channels(32)
            .with_output(ChannelConfig::named("conv2"))
            .with_input(ChannelConfig::named("conv3")),
    );
    units.insert(
        "head".to_string(),
        UnitConfig::with_num_channels(10)
            .with_output(ChannelConfig::named("fc"))
            .with_input(ChannelConfig::named(OUTPUT_PLACEHOLDER)),
    );
    units
}

#[test]
fn test_two_layer_scenario() {
    let model = ModuleDict::new()
        .add("conv1", Conv2d::new(3, 16, 3))
        .add("conv2", Conv2d::new(16, 32, 3));
    let mut stored = BTreeMap::new();
    stored.insert(
        "conv1_(0, 16)_16".to_string(),
        UnitConfig::with_num_channels(16)
            .with_output(ChannelConfig::named("conv1").with_range(0, 16))
            .with_input(ChannelConfig::named("conv2").with_range(0, 16)),
    );
    let analyzer = ConfigAnalyzer::new(stored);

    let units = ChannelUnit::init_from_channel_analyzer(
        &model,
        AnalyzerSource::Instance(&analyzer),
        &AnalyzerRegistry::new(),
    )
    .expect("analysis succeeds");

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].num_channels(), 16);
    assert_eq!(units[0].output_related().len(), 1);
    assert_eq!(units[0].input_related().len(), 1);
    assert_eq!(units[0].output_related()[0].name(), "conv1");
    assert_eq!(units[0].input_related()[0].name(), "conv2");
}

#[test]
fn test_residual_model_mutability() {
    let model = residual_model();
    let analyzer = ConfigAnalyzer::new(residual_units());
    let units: Vec<ChannelUnit> = init_from_channel_analyzer(
        &model,
        AnalyzerSource::Instance(&analyzer),
        &AnalyzerRegistry::new(),
    )
    .expect("analysis succeeds");

    // BTreeMap order: body, head, stem
    let names: Vec<_> = units.iter().map(ChannelUnit::name).collect();
    assert_eq!(
        names,
        vec!["conv2_(0, 32)_32", "fc_(0, 10)_10", "conv1_(0, 16)_16"]
    );

    let body = &units[0];
    assert!(!body.is_mutable(), "conv3 is static with parameters");

    let head = &units[1];
    assert!(!head.is_mutable(), "network output cannot be pruned");
    assert!(!head.input_related()[0].has_module());

    let stem = &units[2];
    assert_eq!(stem.output_related().len(), 2);
    assert_eq!(stem.input_related().len(), 4);
    assert!(!stem.is_mutable(), "conv3 and fc pin the residual width");
}

#[test]
fn test_persist_and_reload_on_new_model_instance() {
    let original_model = residual_model();
    let analyzer = ConfigAnalyzer::new(residual_units());
    let units: Vec<ChannelUnit> = init_from_channel_analyzer(
        &original_model,
        AnalyzerSource::Instance(&analyzer),
        &AnalyzerRegistry::new(),
    )
    .expect("analysis succeeds");

    let mut saved = Vec::new();
    write_unit_configs(&mut saved, ConfigAnalyzer::snapshot(&units).units())
        .expect("write to memory");
    let loaded = read_unit_configs(saved.as_slice()).expect("read back");

    let other_model = residual_model();
    let config = AnalyzerConfig::new(ConfigAnalyzer::TYPE_NAME)
        .with_param("units", serde_json::to_value(&loaded).expect("encode"));
    let reloaded: Vec<ChannelUnit> = init_from_channel_analyzer(
        &other_model,
        AnalyzerSource::Config(config),
        &AnalyzerRegistry::with_defaults(),
    )
    .expect("reload succeeds");

    assert_eq!(reloaded.len(), units.len());
    let summary = |unit: &ChannelUnit| {
        let channels: Vec<_> = unit
            .channels()
            .iter()
            .map(|c| (c.name().to_string(), c.start(), c.end(), c.is_output_channel()))
            .collect();
        (unit.name(), unit.num_channels(), channels)
    };
    let mut before: Vec<_> = units.iter().map(summary).collect();
    let mut after: Vec<_> = reloaded.iter().map(summary).collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);

    // Same names, but resolved against the new model's layers.
    let stem = reloaded
        .iter()
        .find(|unit| unit.name() == "conv1_(0, 16)_16")
        .expect("stem reloaded");
    let conv1 = stem.output_related()[0].module().expect("conv1 resolved");
    let expected = other_model.get("conv1").expect("conv1 registered");
    assert!(Rc::ptr_eq(&conv1, expected));
    assert_ne!(stem.output_related()[0], units[2].output_related()[0]);
}

#[test]
fn test_specialize_units_from_analysis() {
    let model = residual_model();
    let analyzer = ConfigAnalyzer::new(residual_units());
    let units: Vec<ChannelUnit> = init_from_channel_analyzer(
        &model,
        AnalyzerSource::Instance(&analyzer),
        &AnalyzerRegistry::new(),
    )
    .expect("analysis succeeds");

    let mut mutable: Vec<MutableChannelUnit> = units
        .iter()
        .map(|unit| init_from_channel_unit(unit, InitArgs::new()))
        .collect::<aprender_channels::Result<_>>()
        .expect("specialize");

    for (unit, specialized) in units.iter().zip(&mutable) {
        assert!(specialized.channel_unit().shares_channels_with(unit));
        assert_eq!(specialized.current_choice(), unit.num_channels());
    }

    mutable[0].set_current_choice(24).expect("24 <= 32");
    let config = mutable[0].config_template(true, false);
    assert_eq!(
        config.init_args.expect("requested").get("choice"),
        Some(&serde_json::json!(24))
    );
}
