//! Property tests for channel and unit invariants.

use aprender_channels::prelude::*;
use proptest::prelude::*;

fn channel_strategy() -> impl Strategy<Value = (String, usize, usize, bool)> {
    ("[a-z]{1,6}", 0usize..64, 0usize..64, any::<bool>()).prop_map(|(name, a, b, out)| {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        (name, start, end, out)
    })
}

fn build_unit(num_channels: usize, specs: &[(String, usize, usize, bool)]) -> ChannelUnit {
    let mut unit = ChannelUnit::new(num_channels);
    for (name, start, end, out) in specs {
        let channel = Channel::new(name.as_str(), None, (*start, *end))
            .expect("ordered range")
            .with_output_channel(*out);
        if *out {
            unit.add_output_related(channel);
        } else {
            unit.add_input_related(channel);
        }
    }
    unit
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_lists_hold_only_their_direction(
        n in 0usize..128,
        specs in prop::collection::vec(channel_strategy(), 0..12),
    ) {
        let unit = build_unit(n, &specs);
        prop_assert!(unit.output_related().iter().all(|c| c.is_output_channel()));
        prop_assert!(unit.input_related().iter().all(|c| !c.is_output_channel()));
    }

    #[test]
    fn prop_adding_twice_is_idempotent(
        n in 0usize..128,
        specs in prop::collection::vec(channel_strategy(), 0..12),
    ) {
        let once = build_unit(n, &specs);
        let mut doubled = specs.clone();
        doubled.extend(specs.iter().cloned());
        let twice = build_unit(n, &doubled);
        prop_assert_eq!(once.num_related(), twice.num_related());
        prop_assert_eq!(once.name(), twice.name());
    }

    #[test]
    fn prop_config_round_trip(
        n in 0usize..128,
        specs in prop::collection::vec(channel_strategy(), 0..12),
    ) {
        let unit = build_unit(n, &specs);
        let config = unit.config_template(true, true);
        let restored = ChannelUnit::init_from_cfg(&ModuleDict::new(), &config).unwrap();

        prop_assert_eq!(restored.num_channels(), unit.num_channels());
        prop_assert_eq!(restored.output_related(), unit.output_related());
        prop_assert_eq!(restored.input_related(), unit.input_related());
    }

    #[test]
    fn prop_json_text_round_trip(
        n in 0usize..128,
        specs in prop::collection::vec(channel_strategy(), 0..8),
    ) {
        let config = build_unit(n, &specs).config_template(true, true);
        let text = config.to_json_string().unwrap();
        prop_assert_eq!(UnitConfig::from_json_str(&text).unwrap(), config);
    }

    #[test]
    fn prop_num_channels_is_range_length(start in 0usize..1000, len in 0usize..1000) {
        let channel = Channel::new("c", None, (start, start + len)).unwrap();
        prop_assert_eq!(channel.num_channels(), len);
    }

    #[test]
    fn prop_reversed_range_rejected(start in 1usize..1000, gap in 1usize..1000) {
        let end = start.saturating_sub(gap);
        prop_assume!(end < start);
        prop_assert!(Channel::new("c", None, (start, end)).is_err());
    }

    #[test]
    fn prop_name_format(
        name in "[a-z]{1,6}",
        start in 0usize..32,
        len in 0usize..32,
        n in 0usize..64,
    ) {
        let mut unit = ChannelUnit::new(n);
        unit.add_output_related(Channel::output(name.as_str(), None, (start, start + len)).unwrap());
        prop_assert_eq!(unit.name(), format!("{name}_({start}, {})_{n}", start + len));
    }
}
