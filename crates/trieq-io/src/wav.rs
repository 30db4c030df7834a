//! WAV file reading and writing.
//!
//! Samples are held planar (one `Vec<f32>` per channel) so they can be handed
//! to the equalizer block by block without deinterleaving on the fly.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Bit depths [`write_wav`] accepts. 32 bits is written as IEEE float.
pub const SUPPORTED_BIT_DEPTHS: [u16; 3] = [16, 24, 32];

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len()); // total across all channels
    let num_frames = total_samples / u64::from(spec.channels.max(1));
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24, or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Multichannel audio, one buffer per channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanarSamples {
    channels: Vec<Vec<f32>>,
}

impl PlanarSamples {
    /// Wraps per-channel buffers. All channels must have the same length.
    pub fn new(channels: Vec<Vec<f32>>) -> Result<Self> {
        let len = channels.first().map_or(0, Vec::len);
        if channels.iter().any(|c| c.len() != len) {
            return Err(Error::RaggedChannels);
        }
        Ok(Self { channels })
    }

    /// A single channel.
    pub fn from_mono(samples: Vec<f32>) -> Self {
        Self {
            channels: vec![samples],
        }
    }

    /// `num_channels` channels of `num_frames` zeros.
    pub fn silence(num_channels: usize, num_frames: usize) -> Self {
        Self {
            channels: vec![vec![0.0; num_frames]; num_channels],
        }
    }

    /// Splits interleaved frames into channels. A trailing partial frame is dropped.
    pub fn from_interleaved(data: &[f32], num_channels: usize) -> Self {
        let num_channels = num_channels.max(1);
        let frames = data.len() / num_channels;
        let mut channels = vec![Vec::with_capacity(frames); num_channels];
        for frame in data.chunks_exact(num_channels) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }
        Self { channels }
    }

    /// Interleaves channels into frames.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.len() * self.num_channels());
        for i in 0..self.len() {
            out.extend(self.channels.iter().map(|c| c[i]));
        }
        out
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (samples per channel).
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Returns `true` if there are no frames.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One channel's samples.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// All channels.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// All channels, mutably. Lengths must stay equal.
    pub fn channels_mut(&mut self) -> &mut [Vec<f32>] {
        &mut self.channels
    }

    /// Consumes the buffer, returning the channels.
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }
}

/// Read every channel of a WAV file as planar f32 along with the spec.
///
/// Integer PCM is scaled to `[-1, 1)`.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(PlanarSamples, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());

    let interleaved: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = int_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let samples = PlanarSamples::from_interleaved(&interleaved, usize::from(spec.channels));
    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        frames = samples.len(),
        sample_rate = spec.sample_rate,
        "wav read"
    );
    Ok((samples, spec))
}

/// Write planar samples to a WAV file.
///
/// `spec.channels` must equal the number of channels in `samples`.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &PlanarSamples, spec: WavSpec) -> Result<()> {
    if usize::from(spec.channels) != samples.num_channels() {
        return Err(Error::ChannelMismatch {
            expected: usize::from(spec.channels),
            found: samples.num_channels(),
        });
    }
    if !SUPPORTED_BIT_DEPTHS.contains(&spec.bits_per_sample) {
        return Err(Error::UnsupportedBitDepth(spec.bits_per_sample));
    }

    let path = path.as_ref();
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;
    let interleaved = samples.to_interleaved();

    if spec.bits_per_sample == 32 {
        for &sample in &interleaved {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = int_scale(spec.bits_per_sample);
        for &sample in &interleaved {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        frames = samples.len(),
        bits = spec.bits_per_sample,
        "wav written"
    );
    Ok(())
}

fn int_scale(bits: u16) -> f32 {
    (1i64 << (bits.clamp(1, 32) - 1)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_interleave_roundtrip() {
        let planar = PlanarSamples::new(vec![vec![1.0, 3.0], vec![2.0, 4.0]]).unwrap();
        let interleaved = planar.to_interleaved();
        assert_eq!(interleaved, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(PlanarSamples::from_interleaved(&interleaved, 2), planar);
    }

    #[test]
    fn test_partial_frame_dropped() {
        let planar = PlanarSamples::from_interleaved(&[1.0, 2.0, 3.0], 2);
        assert_eq!(planar.len(), 1);
        assert_eq!(planar.channel(1), Some(&[2.0][..]));
    }

    #[test]
    fn test_ragged_channels_rejected() {
        let err = PlanarSamples::new(vec![vec![0.0; 3], vec![0.0; 2]]).unwrap_err();
        assert!(matches!(err, Error::RaggedChannels));
    }

    #[test]
    fn test_roundtrip_f32() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin()).collect();
        let spec = WavSpec::default();

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &PlanarSamples::from_mono(samples.clone()), spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec, spec);
        assert_eq!(loaded.channel(0), Some(&samples[..]));
    }

    #[test]
    fn test_roundtrip_i16() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin() * 0.9).collect();
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &PlanarSamples::from_mono(samples.clone()), spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 44100);
        assert_eq!(loaded.len(), samples.len());

        // 16-bit has less precision
        for (a, b) in samples.iter().zip(loaded.channel(0).unwrap()) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn test_write_rejects_channel_mismatch() {
        let file = NamedTempFile::new().unwrap();
        let spec = WavSpec {
            channels: 2,
            ..WavSpec::default()
        };
        let err = write_wav(file.path(), &PlanarSamples::from_mono(vec![0.0; 4]), spec).unwrap_err();
        assert!(matches!(
            err,
            Error::ChannelMismatch {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_write_rejects_bit_depth() {
        let file = NamedTempFile::new().unwrap();
        let spec = WavSpec {
            bits_per_sample: 12,
            ..WavSpec::default()
        };
        let err = write_wav(file.path(), &PlanarSamples::from_mono(vec![0.0; 4]), spec).unwrap_err();
        assert!(matches!(err, Error::UnsupportedBitDepth(12)));
    }

    #[test]
    fn test_info() {
        let file = NamedTempFile::new().unwrap();
        let spec = WavSpec {
            channels: 2,
            sample_rate: 22050,
            bits_per_sample: 24,
        };
        write_wav(file.path(), &PlanarSamples::silence(2, 22050), spec).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.num_frames, 22050);
        assert_eq!(info.format, WavFormat::Pcm);
        assert!((info.duration_secs - 1.0).abs() < 1e-9);
    }
}
