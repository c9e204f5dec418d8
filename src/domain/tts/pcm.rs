/// Scale between a signed 16-bit sample and a normalized float sample
const PCM16_SCALE: f32 = 32768.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PcmDecodeError {
    #[error("PCM16 data must have an even byte length, got {len} bytes")]
    OddLength { len: usize },
}

/// Decode raw mono PCM16LE bytes into normalized samples.
///
/// Every consecutive byte pair is read as a little-endian `i16` and divided by
/// 32768, so output values lie in `[-1.0, 1.0)`. The output has exactly
/// `bytes.len() / 2` samples.
///
/// # Errors
/// Odd-length input is rejected with [`PcmDecodeError::OddLength`]: a trailing
/// half sample means the cache entry is corrupt, so nothing is truncated.
pub fn decode_pcm16le(bytes: &[u8]) -> Result<Vec<f32>, PcmDecodeError> {
    if bytes.len() % 2 != 0 {
        return Err(PcmDecodeError::OddLength { len: bytes.len() });
    }

    Ok(bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / PCM16_SCALE)
        .collect())
}

/// Encode normalized samples back into PCM16LE bytes.
///
/// Values outside `[-1.0, 1.0)` saturate at the `i16` bounds.
pub fn encode_pcm16le(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        let value = (sample * PCM16_SCALE)
            .round()
            .clamp(i16::MIN as f32, i16::MAX as f32) as i16;
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}
