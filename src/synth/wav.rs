//! Writes a chunk stream into a WAV container with `hound`.

use std::io::{Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::{SynthesisError, TrackError};

use super::types::{AudioChunk, AudioFormat};

fn spec_for(format: AudioFormat) -> WavSpec {
    WavSpec {
        channels: format.channels,
        sample_rate: format.sample_rate,
        bits_per_sample: format.sample_width * 8,
        sample_format: SampleFormat::Int,
    }
}

/// Append raw little-endian PCM to `writer`, decoding according to `width`.
fn append_payload<W: Write + Seek>(
    writer: &mut WavWriter<W>,
    width: u16,
    payload: &[u8],
) -> Result<(), hound::Error> {
    let width = usize::from(width);
    if width == 0 || width > 4 {
        return Err(hound::Error::Unsupported);
    }
    if payload.len() % width != 0 {
        return Err(hound::Error::FormatError("payload ends in a partial sample"));
    }

    for s in payload.chunks_exact(width) {
        match s {
            // 8-bit WAV is unsigned; hound expects it centred on zero.
            [b] => writer.write_sample((i16::from(*b) - 128) as i8)?,
            [a, b] => writer.write_sample(i16::from_le_bytes([*a, *b]))?,
            [a, b, c] => writer.write_sample(i32::from_le_bytes([0, *a, *b, *c]) >> 8)?,
            [a, b, c, d] => writer.write_sample(i32::from_le_bytes([*a, *b, *c, *d]))?,
            _ => unreachable!("chunks_exact yields {width}-byte slices"),
        }
    }
    Ok(())
}

/// Materialize a synthesized stream as a WAV file at `path`.
///
/// The header is taken from the first chunk; every later chunk is assumed to
/// share that format and is appended as-is. An empty stream produces a
/// header-only file in `fallback` format. Returns the number of payload bytes
/// written.
pub fn write_wav<I>(path: &Path, chunks: I, fallback: AudioFormat) -> Result<u64, TrackError>
where
    I: IntoIterator<Item = Result<AudioChunk, SynthesisError>>,
{
    let materialize_err = |source| TrackError::Materialize {
        path: path.to_path_buf(),
        source,
    };

    let mut chunks = chunks.into_iter();
    let first = chunks.next().transpose()?;
    let format = first.as_ref().map_or(fallback, |c| c.format);

    let mut writer = WavWriter::create(path, spec_for(format)).map_err(materialize_err)?;
    let mut written = 0u64;

    for chunk in first.into_iter().map(Ok).chain(chunks) {
        let chunk = chunk?;
        append_payload(&mut writer, format.sample_width, &chunk.payload).map_err(materialize_err)?;
        written += chunk.payload.len() as u64;
    }

    writer.finalize().map_err(materialize_err)?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(payload: &[u8]) -> Result<AudioChunk, SynthesisError> {
        Ok(AudioChunk {
            format: AudioFormat {
                sample_rate: 16_000,
                channels: 1,
                sample_width: 2,
            },
            payload: payload.to_vec(),
        })
    }

    #[test]
    fn header_comes_from_first_chunk_and_payloads_are_concatenated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("01. Duck.wav");

        let written = write_wav(
            &path,
            vec![chunk(&[1, 0, 2, 0]), chunk(&[3, 0]), chunk(&[0xff, 0xff])],
            AudioFormat::default(),
        )
        .unwrap();
        assert_eq!(written, 8);

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 16);
        let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(samples, vec![1, 2, 3, -1]);
    }

    #[test]
    fn empty_stream_writes_header_only_file_in_fallback_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("01. Silence.wav");

        let written = write_wav(&path, Vec::new(), AudioFormat::default()).unwrap();
        assert_eq!(written, 0);

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 22_050);
        assert_eq!(reader.duration(), 0);
    }

    #[test]
    fn eight_bit_payload_round_trips_unsigned_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("u8.wav");
        let format = AudioFormat {
            sample_rate: 8_000,
            channels: 1,
            sample_width: 1,
        };

        write_wav(
            &path,
            vec![Ok(AudioChunk {
                format,
                payload: vec![0, 128, 255],
            })],
            AudioFormat::default(),
        )
        .unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().bits_per_sample, 8);
        let samples: Vec<i8> = reader.samples::<i8>().map(Result::unwrap).collect();
        assert_eq!(samples, vec![-128, 0, 127]);
    }

    #[test]
    fn synthesis_error_mid_stream_is_propagated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.wav");

        let err = write_wav(
            &path,
            vec![
                chunk(&[1, 0]),
                Err(SynthesisError::Io(std::io::Error::other("pipe closed"))),
            ],
            AudioFormat::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TrackError::Synthesis(_)));
    }

    #[test]
    fn partial_sample_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odd.wav");

        let err = write_wav(&path, vec![chunk(&[1, 0, 2])], AudioFormat::default()).unwrap_err();
        assert!(matches!(err, TrackError::Materialize { .. }));
    }
}
