//! The `;`-delimited record format of the backing store.
//!
//! ```text
//! id;base;vector
//! q0;computational;"1.0,0.0;0.0,0.0"
//! ```
//!
//! `vector` holds one `re,im` token per amplitude at full precision. The writer
//! quotes it only when it contains the delimiter (two or more amplitudes), so a
//! single amplitude is written bare: `i;y;0.0,1.0`. The reader also accepts an
//! unquoted multi-amplitude vector, where the tokens spill over trailing fields.

use std::collections::HashSet;
use std::io;

use num_complex::Complex64 as C64;

use crate::core::error::{QuantumError, Result};
use crate::core::state::QuantumState;

pub const DELIMITER: u8 = b';';
pub const HEADER: [&str; 3] = ["id", "base", "vector"];

pub fn encode<'a, I>(states: I) -> io::Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a QuantumState>,
{
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(Vec::new());
    wtr.write_record(HEADER)?;
    for state in states {
        let vector = encode_vector(state);
        wtr.write_record([state.id(), state.basis(), vector.as_str()])?;
    }
    wtr.into_inner().map_err(|e| e.into_error())
}

/// Parse a whole store. All-or-nothing: the first bad record aborts.
pub fn decode(input: &[u8]) -> Result<Vec<QuantumState>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let mut states = Vec::new();
    let mut seen = HashSet::new();
    for result in rdr.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            QuantumError::format(line, e.to_string())
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() < HEADER.len() {
            return Err(QuantumError::format(
                line,
                format!("expected fields id;base;vector, found {}", record.len()),
            ));
        }
        let id = &record[0];
        let base = &record[1];
        let vector = record.iter().skip(2).collect::<Vec<_>>().join(";");
        let amps = decode_vector(&vector).map_err(|reason| QuantumError::format(line, reason))?;
        let state = QuantumState::new(id, amps, base)
            .map_err(|e| QuantumError::format(line, format!("state '{id}' rejected: {e}")))?;
        if !seen.insert(state.id().to_string()) {
            return Err(QuantumError::format(line, format!("duplicate id '{id}'")));
        }
        states.push(state);
    }
    Ok(states)
}

fn encode_vector(state: &QuantumState) -> String {
    state
        .amplitudes()
        .iter()
        .map(|z| format!("{:?},{:?}", z.re, z.im))
        .collect::<Vec<_>>()
        .join(";")
}

fn decode_vector(field: &str) -> std::result::Result<Vec<C64>, String> {
    if field.trim().is_empty() {
        return Err("empty vector field".to_string());
    }
    field.split(';').map(decode_amplitude).collect()
}

/// `re,im`, or a lone `re` for a real amplitude.
fn decode_amplitude(token: &str) -> std::result::Result<C64, String> {
    let mut parts = token.split(',');
    let re = parse_component(parts.next(), token)?;
    let im = match parts.next() {
        Some(p) => parse_component(Some(p), token)?,
        None => 0.0,
    };
    if parts.next().is_some() {
        return Err(format!("amplitude token '{token}' has more than two components"));
    }
    Ok(C64::new(re, im))
}

fn parse_component(part: Option<&str>, token: &str) -> std::result::Result<f64, String> {
    let part = part.map(str::trim).unwrap_or_default();
    part.parse::<f64>()
        .map_err(|_| format!("cannot parse '{part}' in amplitude token '{token}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn sample() -> Vec<QuantumState> {
        vec![
            QuantumState::computational("q0", [1.0, 0.0]).unwrap(),
            QuantumState::new("plus", [FRAC_1_SQRT_2, -FRAC_1_SQRT_2], "hadamard").unwrap(),
        ]
    }

    #[test]
    fn writes_header_and_quoted_vector() {
        let text = String::from_utf8(encode(&sample()).unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id;base;vector"));
        assert_eq!(lines.next(), Some("q0;computational;\"1.0,0.0;0.0,0.0\""));
        assert_eq!(
            lines.next(),
            Some("plus;hadamard;\"0.7071067811865476,0.0;-0.7071067811865476,0.0\"")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn decode_is_exact_inverse() {
        let states = sample();
        let back = decode(&encode(&states).unwrap()).unwrap();
        assert_eq!(back, states);
    }

    #[test]
    fn reads_crlf_and_unquoted_vectors() {
        let input =
            "id;base;vector\r\nq1;computational;0.0,0.0;1.0,0.0\r\n\r\nr;computational;1\r\n";
        let states = decode(input.as_bytes()).unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].amplitudes()[1], C64::new(1.0, 0.0));
        assert_eq!(states[1].amplitudes()[0], C64::new(1.0, 0.0));
    }

    #[test]
    fn single_amplitude_is_written_bare() {
        let one = [QuantumState::new("i", [C64::new(0.0, 1.0)], "y").unwrap()];
        let text = String::from_utf8(encode(&one).unwrap()).unwrap();
        assert_eq!(text, "id;base;vector\ni;y;0.0,1.0\n");
        assert_eq!(decode(text.as_bytes()).unwrap(), one);
    }

    #[test]
    fn infinite_tokens_are_rejected() {
        let err = decode(b"id;base;vector\nx;c;\"inf,0\"\n").unwrap_err();
        assert!(matches!(err, QuantumError::Format { line: 2, .. }), "{err}");
        let err = decode(b"id;base;vector\nx;c;\"1e200,0.0;0.0,0.0\"\n").unwrap_err();
        assert!(matches!(err, QuantumError::Format { .. }), "{err}");
    }

    #[test]
    fn empty_input_is_empty_store() {
        assert!(decode(b"").unwrap().is_empty());
        assert!(decode(b"id;base;vector\n").unwrap().is_empty());
    }

    #[test]
    fn missing_fields_are_format_errors() {
        let err = decode(b"id;base;vector\nq0;computational\n").unwrap_err();
        assert!(matches!(err, QuantumError::Format { line: 2, .. }), "{err}");
    }

    #[test]
    fn bad_numbers_are_format_errors() {
        let input = b"id;base;vector\nq0;computational;\"1.0,zero;0.0,0.0\"\n";
        let err = decode(input).unwrap_err();
        assert!(matches!(err, QuantumError::Format { .. }));
        let err = decode(b"id;base;vector\nq0;computational;\"1,0,0\"\n").unwrap_err();
        assert!(matches!(err, QuantumError::Format { .. }));
    }

    #[test]
    fn unnormalized_and_duplicate_records_are_rejected() {
        let err = decode(b"id;base;vector\nq0;c;\"1.0,0.0;1.0,0.0\"\n").unwrap_err();
        assert!(err.to_string().contains("state 'q0' rejected"), "{err}");

        let dup = b"id;base;vector\nq0;c;\"1.0,0.0\"\nq0;c;\"0.0,1.0\"\n";
        let err = decode(dup).unwrap_err();
        assert!(matches!(err, QuantumError::Format { line: 3, .. }), "{err}");
    }
}
