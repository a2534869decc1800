//! Text forms typed at the CLI and shell: amplitudes and inline matrices.
use anyhow::{anyhow, bail, Result};
use num_complex::Complex64 as C64;

/// `re` or `re,im`.
pub fn parse_amplitude(token: &str) -> Result<C64> {
    let parts: Vec<&str> = token.split(',').map(str::trim).collect();
    let num = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| anyhow!("invalid number '{s}' in '{token}' (expected re or re,im)"))
    };
    match parts.as_slice() {
        [re] => Ok(C64::new(num(*re)?, 0.0)),
        [re, im] => Ok(C64::new(num(*re)?, num(*im)?)),
        _ => bail!("invalid amplitude '{token}' (expected re or re,im)"),
    }
}

pub fn parse_amplitudes<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<C64>> {
    tokens
        .iter()
        .flat_map(|t| t.as_ref().split_whitespace().map(str::to_owned).collect::<Vec<_>>())
        .map(|t| parse_amplitude(&t))
        .collect()
}

/// Rows split by `;`, entries by whitespace: `"0 1; 1 0"`.
pub fn parse_matrix(text: &str) -> Result<Vec<Vec<C64>>> {
    let rows: Vec<Vec<C64>> = text
        .split(';')
        .filter(|row| !row.trim().is_empty())
        .map(|row| row.split_whitespace().map(parse_amplitude).collect::<Result<Vec<_>>>())
        .collect::<Result<_>>()?;
    if rows.is_empty() {
        bail!("empty matrix");
    }
    Ok(rows)
}
