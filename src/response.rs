//! Decoding of instrument responses into numeric arrays.
//!
//! Three response shapes exist on this bus: a single numeric token for
//! scalar queries, one delimited line of comma-separated decimal floats for
//! trace data, and a raw byte blob with fixed framing for binary trace
//! reads. Every function here is pure and fails with [`ParseError`] when
//! the payload does not match the expected shape — values are never
//! silently truncated or padded.

use num_complex::Complex64;

use crate::error::ParseError;

/// Fixed framing of a binary trace block: bytes before the payload.
///
/// These are protocol constants observed on the bus, not something to be
/// inferred from the payload itself.
pub const BLOCK_PREFIX_LEN: usize = 2;

/// Fixed framing of a binary trace block: bytes after the payload.
pub const BLOCK_SUFFIX_LEN: usize = 3;

/// Parse a single numeric token.
pub fn parse_scalar<T: std::str::FromStr>(line: &str) -> Result<T, ParseError> {
    let token = line.trim();
    if token.is_empty() {
        return Err(ParseError::EmptyResponse);
    }
    token.parse::<T>().map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
    })
}

/// Parse one line of comma-separated decimal floats.
///
/// A blank line decodes to an empty sequence; any non-numeric field aborts
/// the whole parse.
pub fn parse_float_list(line: &str) -> Result<Vec<f64>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    trimmed
        .split(',')
        .map(|field| {
            let token = field.trim();
            token.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Split a flat array of 2k values at its midpoint.
///
/// The instrument returns magnitude and phase as one flat array with a
/// clean first-half/second-half layout; that framing is a precondition of
/// the formatted-data query, and an odd-length array is rejected rather
/// than re-guessed.
pub fn split_mag_phase(mut values: Vec<f64>) -> Result<(Vec<f64>, Vec<f64>), ParseError> {
    if values.len() % 2 != 0 {
        return Err(ParseError::OddPairCount(values.len()));
    }
    let second = values.split_off(values.len() / 2);
    Ok((values, second))
}

/// Pair consecutive (real, imaginary) values into complex samples.
pub fn pair_complex(values: &[f64]) -> Result<Vec<Complex64>, ParseError> {
    if values.len() % 2 != 0 {
        return Err(ParseError::OddPairCount(values.len()));
    }
    Ok(values
        .chunks_exact(2)
        .map(|pair| Complex64::new(pair[0], pair[1]))
        .collect())
}

/// Strip the fixed header and trailer from a binary trace block.
pub fn strip_block_framing(raw: &[u8]) -> Result<&[u8], ParseError> {
    if raw.len() < BLOCK_PREFIX_LEN + BLOCK_SUFFIX_LEN {
        return Err(ParseError::TruncatedBlock(raw.len()));
    }
    Ok(&raw[BLOCK_PREFIX_LEN..raw.len() - BLOCK_SUFFIX_LEN])
}

/// Linearly spaced axis between `start` and `stop`, inclusive of both
/// endpoints, over `points` samples.
pub fn linspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar_trims_whitespace() {
        let value: f64 = parse_scalar(" 1.234E-03 \r\n").unwrap();
        assert_eq!(value, 1.234e-3);
    }

    #[test]
    fn test_parse_scalar_rejects_garbage() {
        let err = parse_scalar::<f64>("OVER").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { .. }));
    }

    #[test]
    fn test_parse_scalar_rejects_empty() {
        let err = parse_scalar::<f64>("  ").unwrap_err();
        assert!(matches!(err, ParseError::EmptyResponse));
    }

    #[test]
    fn test_parse_float_list() {
        let values = parse_float_list("-1.5, 2.0 ,3e1").unwrap();
        assert_eq!(values, vec![-1.5, 2.0, 30.0]);
    }

    #[test]
    fn test_parse_float_list_blank_is_empty() {
        assert!(parse_float_list("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_float_list_aborts_on_bad_field() {
        let err = parse_float_list("1.0,x,3.0").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { token } if token == "x"));
    }

    #[test]
    fn test_split_mag_phase_halves() {
        let (mag, phase) = split_mag_phase(vec![1.0, 2.0, 3.0, 10.0, 20.0, 30.0]).unwrap();
        assert_eq!(mag, vec![1.0, 2.0, 3.0]);
        assert_eq!(phase, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_split_mag_phase_empty() {
        let (mag, phase) = split_mag_phase(Vec::new()).unwrap();
        assert!(mag.is_empty());
        assert!(phase.is_empty());
    }

    #[test]
    fn test_split_mag_phase_odd_rejected() {
        assert!(matches!(
            split_mag_phase(vec![1.0, 2.0, 3.0]),
            Err(ParseError::OddPairCount(3))
        ));
    }

    #[test]
    fn test_pair_complex_interleaved() {
        let trace = pair_complex(&[1.0, -2.0, 3.0, 4.0]).unwrap();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0], Complex64::new(1.0, -2.0));
        assert_eq!(trace[1], Complex64::new(3.0, 4.0));
    }

    #[test]
    fn test_pair_complex_empty() {
        assert!(pair_complex(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_strip_block_framing() {
        let raw = b"#0-10.5,-11.25END";
        let payload = strip_block_framing(raw).unwrap();
        assert_eq!(payload, b"-10.5,-11.25");
    }

    #[test]
    fn test_strip_block_framing_short_blob() {
        assert!(matches!(
            strip_block_framing(&[0u8; 4]),
            Err(ParseError::TruncatedBlock(4))
        ));
    }

    #[test]
    fn test_linspace_inclusive_endpoints() {
        let axis = linspace(1e9, 2e9, 5);
        assert_eq!(axis, vec![1e9, 1.25e9, 1.5e9, 1.75e9, 2e9]);
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(5.0, 9.0, 1), vec![5.0]);
    }
}
