use duomix_audio::mixer::mock::{MockCall, MockMixer};
use duomix_audio::{DownmixEngine, EffectError, EngineState, MixStrategy};
use duomix_protocol::config::{AudioDescriptor, CommonConfig};
use duomix_protocol::layout::{self, ChannelLayout};
use pretty_assertions::assert_eq;
use test_log::test;

const FRAME_COUNT: usize = 128;

fn stereo_out_config(input: ChannelLayout) -> CommonConfig {
    CommonConfig::new(
        AudioDescriptor::new(48_000, input, FRAME_COUNT),
        AudioDescriptor::new(48_000, ChannelLayout::layout(layout::LAYOUT_STEREO), FRAME_COUNT),
    )
}

fn active_engine(input_mask: u32) -> DownmixEngine<MockMixer> {
    let mut engine = DownmixEngine::new(
        &stereo_out_config(ChannelLayout::layout(input_mask)),
        MockMixer::accepting(0.25),
    );
    engine.enable().unwrap();
    engine
}

#[test]
fn construction_derives_fold_parameters() {
    let engine = DownmixEngine::new(
        &stereo_out_config(ChannelLayout::layout(layout::LAYOUT_5POINT1)),
        MockMixer::accepting(0.0),
    );
    assert_eq!(engine.state(), EngineState::Initialized);
    assert_eq!(engine.strategy(), MixStrategy::Fold);
}

#[test]
fn construction_with_invalid_mask_stays_uninitialized() {
    // Index masks are not positional, so parameter derivation refuses them.
    let mut engine = DownmixEngine::new(
        &stereo_out_config(ChannelLayout::IndexMask(0x3f)),
        MockMixer::accepting(0.0),
    );
    assert_eq!(engine.state(), EngineState::Uninitialized);

    assert!(matches!(engine.enable(), Err(EffectError::Lifecycle(_))));
    assert_eq!(engine.state(), EngineState::Uninitialized);

    let input = [0.0; 12];
    let mut output = [0.0; 4];
    assert!(matches!(
        engine.process(&input, &mut output, 12),
        Err(EffectError::IllegalState(_))
    ));
}

#[test]
fn enable_only_from_initialized() {
    let mut engine = DownmixEngine::new(
        &stereo_out_config(ChannelLayout::layout(layout::LAYOUT_5POINT1)),
        MockMixer::accepting(0.0),
    );

    engine.enable().unwrap();
    assert_eq!(engine.state(), EngineState::Active);

    // A second enable fails and leaves the engine active.
    assert!(matches!(engine.enable(), Err(EffectError::Lifecycle(_))));
    assert_eq!(engine.state(), EngineState::Active);
}

#[test]
fn disable_only_from_active() {
    let mut engine = DownmixEngine::new(
        &stereo_out_config(ChannelLayout::layout(layout::LAYOUT_5POINT1)),
        MockMixer::accepting(0.0),
    );

    assert!(matches!(engine.disable(), Err(EffectError::Lifecycle(_))));
    assert_eq!(engine.state(), EngineState::Initialized);

    engine.enable().unwrap();
    engine.disable().unwrap();
    assert_eq!(engine.state(), EngineState::Initialized);

    assert!(matches!(engine.disable(), Err(EffectError::Lifecycle(_))));
}

#[test]
fn process_requires_an_enabled_engine() {
    let mut engine = DownmixEngine::new(
        &stereo_out_config(ChannelLayout::layout(layout::LAYOUT_STEREO)),
        MockMixer::accepting(0.0),
    );

    let input = [0.5; 8];
    let mut output = [0.0; 8];

    // Configured but not enabled.
    assert!(matches!(
        engine.process(&input, &mut output, 8),
        Err(EffectError::IllegalState(_))
    ));

    engine.enable().unwrap();
    engine.process(&input, &mut output, 8).unwrap();
}

#[test]
fn process_rejects_short_input() {
    let mut engine = active_engine(layout::LAYOUT_STEREO);
    let input = [0.5; 4];
    let mut output = [0.0; 8];
    assert!(matches!(
        engine.process(&input, &mut output, 8),
        Err(EffectError::IllegalArgument(_))
    ));
    // Nothing was mixed.
    assert_eq!(output, [0.0; 8]);
    assert!(engine.mixer().calls.is_empty());
}

#[test]
fn process_rejects_short_output() {
    let mut engine = active_engine(layout::LAYOUT_5POINT1);
    let input = [0.5; 12];
    let mut output = [0.0; 2];
    assert!(matches!(
        engine.process(&input, &mut output, 12),
        Err(EffectError::IllegalArgument(_))
    ));
    assert!(engine.mixer().calls.is_empty());
}

#[test]
fn process_rejects_frame_count_mismatch() {
    let mut config = stereo_out_config(ChannelLayout::layout(layout::LAYOUT_STEREO));
    config.output.frame_count = FRAME_COUNT / 2;
    let mut engine = DownmixEngine::new(&config, MockMixer::accepting(0.0));
    engine.enable().unwrap();

    let input = [0.5; 8];
    let mut output = [0.0; 8];
    assert!(matches!(
        engine.process(&input, &mut output, 8),
        Err(EffectError::IllegalArgument(_))
    ));
}

#[test]
fn process_rejects_zero_frame_size() {
    // A blank layout mask passes validation but implies a zero frame size,
    // which the processing ladder rejects as an argument error.
    let mut engine = DownmixEngine::new(
        &stereo_out_config(ChannelLayout::layout(0)),
        MockMixer::accepting(0.0),
    );
    engine.enable().unwrap();

    let input = [0.5; 8];
    let mut output = [0.0; 8];
    assert!(matches!(
        engine.process(&input, &mut output, 8),
        Err(EffectError::IllegalArgument(_))
    ));
}

#[test]
fn strip_copies_stereo_input_through() {
    let mut engine = active_engine(layout::LAYOUT_STEREO);
    engine.set_strategy(MixStrategy::Strip);

    let input = [0.1, -0.2, 0.3, -0.4, 0.5, -0.6, 0.7, -0.8];
    let mut output = [0.0; 8];
    let processed = engine.process(&input, &mut output, 8).unwrap();

    assert_eq!(output, input);
    assert_eq!(processed.consumed, 8);
    // Four stereo frames in, four stereo frames out.
    assert_eq!(processed.produced, 8);
}

#[test]
fn strip_keeps_the_first_two_channels() {
    let mut engine = active_engine(layout::LAYOUT_5POINT1);
    engine.set_strategy(MixStrategy::Strip);

    let input = [
        0.1, 0.2, 0.3, 0.4, 0.5, 0.6, //
        0.7, 0.8, 0.9, 1.0, 1.1, 1.2,
    ];
    let mut output = [0.0; 4];
    let processed = engine.process(&input, &mut output, 12).unwrap();

    assert_eq!(output, [0.1, 0.2, 0.7, 0.8]);
    assert_eq!(processed.consumed, 12);
    assert_eq!(processed.produced, 4);
    // Strip never touches the channel mixer.
    assert!(engine.mixer().calls.is_empty());
}

#[test]
fn fold_delegates_to_the_channel_mixer() {
    let mut engine = active_engine(layout::LAYOUT_7POINT1);

    let input = [0.5; 16];
    let mut output = [0.0; 4];
    let processed = engine.process(&input, &mut output, 16).unwrap();

    assert_eq!(processed.consumed, 16);
    assert_eq!(processed.produced, 4);
    assert_eq!(output, [0.25; 4]);
    assert_eq!(
        engine.mixer().calls,
        vec![MockCall {
            frames: 2,
            accumulate: false,
            mask: layout::LAYOUT_7POINT1,
        }]
    );
}

#[test]
fn late_mixer_rejection_is_an_illegal_state() {
    let mut engine = DownmixEngine::new(
        &stereo_out_config(ChannelLayout::layout(layout::LAYOUT_22POINT2)),
        MockMixer::rejecting(),
    );
    engine.enable().unwrap();

    let channels = layout::LAYOUT_22POINT2.count_ones() as usize;
    let input = vec![0.5; channels * 2];
    let mut output = [0.0; 4];
    assert!(matches!(
        engine.process(&input, &mut output, input.len()),
        Err(EffectError::IllegalState(_))
    ));
    assert_eq!(output, [0.0; 4]);
}

#[test]
fn produced_count_scales_with_input_channel_count() {
    for mask in [
        layout::LAYOUT_MONO,
        layout::LAYOUT_STEREO,
        layout::LAYOUT_5POINT1,
        layout::LAYOUT_7POINT1,
        layout::LAYOUT_7POINT1POINT4,
        layout::LAYOUT_22POINT2,
        layout::LAYOUT_22POINT2 | layout::CHANNEL_FRONT_WIDE_LEFT | layout::CHANNEL_FRONT_WIDE_RIGHT,
    ] {
        let channels = mask.count_ones() as usize;
        let frames = 3;
        let mut engine = active_engine(mask);

        let input = vec![0.5; channels * frames];
        let mut output = vec![0.0; frames * 2];
        let processed = engine.process(&input, &mut output, input.len()).unwrap();

        assert_eq!(processed.consumed, channels * frames, "mask {mask:#x}");
        assert_eq!(processed.produced, frames * 2, "mask {mask:#x}");
    }
}

#[test]
fn fold_with_default_mixer_steers_surround_content() {
    let config = stereo_out_config(ChannelLayout::layout(layout::LAYOUT_5POINT1));
    let mut engine = DownmixEngine::with_default_mixer(&config);
    engine.enable().unwrap();

    // One frame with signal on the center channel only: it must land equally
    // on both outputs, attenuated but present.
    let input = [0.0, 0.0, 1.0, 0.0, 0.0, 0.0];
    let mut output = [0.0; 2];
    let processed = engine.process(&input, &mut output, 6).unwrap();

    assert_eq!(processed.produced, 2);
    assert!((output[0] - output[1]).abs() < 1e-6);
    assert!(output[0] > 0.2 && output[0] < 0.5, "got {}", output[0]);

    // Back-left-only content must stay off the right output.
    let input = [0.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    engine.process(&input, &mut output, 6).unwrap();
    assert!(output[0] > 0.0);
    assert!(output[1].abs() < 1e-6);
}

#[test]
fn set_config_replaces_the_configuration_wholesale() {
    let mut engine = active_engine(layout::LAYOUT_5POINT1);

    engine
        .set_config(&stereo_out_config(ChannelLayout::layout(
            layout::LAYOUT_7POINT1,
        )))
        .unwrap();
    assert_eq!(engine.state(), EngineState::Initialized);

    // The engine must be re-enabled before it processes again.
    let input = [0.5; 16];
    let mut output = [0.0; 4];
    assert!(matches!(
        engine.process(&input, &mut output, 16),
        Err(EffectError::IllegalState(_))
    ));

    engine.enable().unwrap();
    let processed = engine.process(&input, &mut output, 16).unwrap();
    assert_eq!(processed.produced, 4);
    assert_eq!(
        engine.mixer().calls.last().unwrap().mask,
        layout::LAYOUT_7POINT1
    );
}

#[test]
fn rejected_set_config_changes_nothing() {
    let mut engine = active_engine(layout::LAYOUT_5POINT1);

    let bad = stereo_out_config(ChannelLayout::IndexMask(0x3f));
    assert!(matches!(
        engine.set_config(&bad),
        Err(EffectError::IllegalArgument(_))
    ));
    assert_eq!(engine.state(), EngineState::Active);

    // The previous configuration keeps processing.
    let input = [0.5; 12];
    let mut output = [0.0; 4];
    let processed = engine.process(&input, &mut output, 12).unwrap();
    assert_eq!(processed.produced, 4);
    assert_eq!(
        engine.mixer().calls.last().unwrap().mask,
        layout::LAYOUT_5POINT1
    );
}

#[test]
fn set_strategy_does_not_touch_the_lifecycle() {
    let mut engine = active_engine(layout::LAYOUT_5POINT1);
    engine.set_strategy(MixStrategy::Strip);
    assert_eq!(engine.state(), EngineState::Active);
    assert_eq!(engine.strategy(), MixStrategy::Strip);

    engine.set_strategy(MixStrategy::Fold);
    assert_eq!(engine.strategy(), MixStrategy::Fold);
}
