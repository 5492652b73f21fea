pub(crate) fn mix_sample(slot: &mut f32, sample: f32, accumulate: bool) {
    if accumulate {
        *slot = (*slot + sample).clamp(-1.0, 1.0);
    } else {
        *slot = sample;
    }
}

pub(crate) fn strip_to_stereo(
    input: &[f32],
    output: &mut [f32],
    input_channels: usize,
    accumulate: bool,
) {
    debug_assert!(input_channels > 0);
    debug_assert_eq!(input.len() % input_channels, 0);
    debug_assert!(output.len() >= input.len() / input_channels * 2);

    for (frame, out) in input
        .chunks_exact(input_channels)
        .zip(output.chunks_exact_mut(2))
    {
        let left = frame[0];
        // A mono frame feeds both output channels.
        let right = if input_channels > 1 { frame[1] } else { left };
        mix_sample(&mut out[0], left, accumulate);
        mix_sample(&mut out[1], right, accumulate);
    }
}
