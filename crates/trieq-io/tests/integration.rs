//! Integration tests for trieq-io WAV I/O and offline processing.

use tempfile::tempdir;
use trieq_analysis::{band_energy, signal::white_noise};
use trieq_eq::EqParams;
use trieq_io::{PlanarSamples, ProcessingEngine, WavSpec, read_wav, write_wav};

// ---------------------------------------------------------------------------
// WAV roundtrip tests -- multichannel
// ---------------------------------------------------------------------------

#[test]
fn wav_roundtrip_four_channels_f32() {
    let channels: Vec<Vec<f32>> = (0..4)
        .map(|c| white_noise(2000, 0.9, 10 + c as u32))
        .collect();
    let samples = PlanarSamples::new(channels).unwrap();
    let spec = WavSpec {
        channels: 4,
        sample_rate: 96000,
        bits_per_sample: 32,
    };

    let dir = tempdir().unwrap();
    let path = dir.path().join("quad.wav");
    write_wav(&path, &samples, spec).unwrap();

    let (loaded, loaded_spec) = read_wav(&path).unwrap();
    assert_eq!(loaded_spec, spec);
    assert_eq!(loaded, samples);
}

#[test]
fn wav_roundtrip_stereo_i24() {
    let left = white_noise(1000, 0.5, 1);
    let right = white_noise(1000, 0.5, 2);
    let samples = PlanarSamples::new(vec![left.clone(), right.clone()]).unwrap();
    let spec = WavSpec {
        channels: 2,
        sample_rate: 44100,
        bits_per_sample: 24,
    };

    let dir = tempdir().unwrap();
    let path = dir.path().join("stereo24.wav");
    write_wav(&path, &samples, spec).unwrap();

    let (loaded, _) = read_wav(&path).unwrap();
    for (a, b) in left.iter().zip(loaded.channel(0).unwrap()) {
        assert!((a - b).abs() < 1e-6);
    }
    for (a, b) in right.iter().zip(loaded.channel(1).unwrap()) {
        assert!((a - b).abs() < 1e-6);
    }
}

#[test]
fn read_missing_file_is_error() {
    let dir = tempdir().unwrap();
    assert!(read_wav(dir.path().join("missing.wav")).is_err());
}

// ---------------------------------------------------------------------------
// File processing
// ---------------------------------------------------------------------------

#[test]
fn process_file_shapes_each_channel() {
    let sample_rate = 44100;
    let left = white_noise(44100, 0.5, 7);
    let right = white_noise(44100, 0.5, 8);
    let samples = PlanarSamples::new(vec![left.clone(), right.clone()]).unwrap();
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
    };

    let dir = tempdir().unwrap();
    let input_path = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");
    write_wav(&input_path, &samples, spec).unwrap();

    let (mut loaded, loaded_spec) = read_wav(&input_path).unwrap();
    let mut engine = ProcessingEngine::new(
        EqParams {
            low_freq: 100.0,
            low_gain: 6.0,
            high_freq: 8000.0,
            high_gain: -6.0,
            ..EqParams::default()
        },
        512,
    );
    engine.process(&mut loaded, loaded_spec.sample_rate as f32);
    write_wav(&output_path, &loaded, loaded_spec).unwrap();

    let (processed, processed_spec) = read_wav(&output_path).unwrap();
    assert_eq!(processed_spec.channels, 2);
    assert_eq!(processed.len(), 44100);

    let sr = sample_rate as f32;
    for (original, shaped) in [&left, &right].into_iter().zip(processed.channels()) {
        let low_ratio = band_energy(shaped, sr, 20.0, 200.0) / band_energy(original, sr, 20.0, 200.0);
        let high_ratio =
            band_energy(shaped, sr, 6000.0, 22050.0) / band_energy(original, sr, 6000.0, 22050.0);
        assert!(low_ratio > 1.5, "low ratio {low_ratio}");
        assert!(high_ratio < 0.7, "high ratio {high_ratio}");
    }
}

#[test]
fn sanitizer_silences_non_finite_input() {
    let mut input = white_noise(1024, 0.5, 4);
    input[100] = f32::NAN;
    input[700] = f32::INFINITY;
    let mut samples = PlanarSamples::from_mono(input);

    let mut engine = ProcessingEngine::new(EqParams::default(), 128);
    engine.set_sanitize_output(true);
    engine.process(&mut samples, 48000.0);

    let out = samples.channel(0).unwrap();
    assert!(out.iter().all(|s| s.is_finite()));
    assert_eq!(out[100], 0.0);
    assert_eq!(out[700], 0.0);
    // Filters are reset at the bad sample and resume on the next one.
    assert!(out[101..128].iter().all(|&s| s != 0.0));
    assert!(out[701..768].iter().any(|&s| s != 0.0));
}
