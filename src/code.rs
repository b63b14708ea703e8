//! Short identity strings for mazes.
//!
//! A code packs the seed and both dimensions into one integer, written as base-36 digits
//! with a `.` after the third digit, e.g. `k3f.0q9zb`.

use crate::error::CodeError;

/// Parameters of one code format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeVersion {
    pub version: u8,
    /// Smallest legal width or height.
    pub min_size: u8,
    /// Largest legal width or height.
    pub max_size: u8,
    /// Seeds are reduced modulo this value.
    pub seed_limit: u64,
    /// Number of base-36 digits in a code.
    pub code_length: usize,
}

impl CodeVersion {
    /// Number of distinct sizes per dimension.
    pub fn size_radix(&self) -> u64 {
        (self.max_size - self.min_size) as u64 + 1
    }

    /// Clamps a requested dimension into the legal range.
    pub fn clamp_size(&self, size: u8) -> u8 {
        size.clamp(self.min_size, self.max_size)
    }

    /// Looks up a version entry.
    pub fn get(version: u8) -> Result<&'static CodeVersion, CodeError> {
        VERSIONS
            .iter()
            .find(|entry| entry.version == version)
            .ok_or(CodeError::UnknownVersion(version))
    }

    /// Finds the version whose codes have the given number of digits.
    pub fn for_length(length: usize) -> Option<&'static CodeVersion> {
        VERSIONS.iter().find(|entry| entry.code_length == length)
    }
}

pub const VERSIONS: [CodeVersion; 2] = [
    CodeVersion {
        version: 0,
        min_size: 4,
        max_size: 51,
        seed_limit: 34_000_000,
        code_length: 7,
    },
    CodeVersion {
        version: 1,
        min_size: 4,
        max_size: 99,
        seed_limit: 300_000_000,
        code_length: 8,
    },
];

pub const DEFAULT_VERSION: u8 = 1;

/// Position of the separator dot in a code.
const SEPARATOR_AT: usize = 3;
const SEPARATOR: char = '.';
const RADIX: u32 = 36;

/// Encodes a seed and the maze dimensions into an identity code.
///
/// Dimensions are clamped into the version's range before packing.
pub fn encode(version: &CodeVersion, seed: u64, width: u8, height: u8) -> String {
    let radix = version.size_radix();
    let items = [
        (seed % version.seed_limit, version.seed_limit),
        ((version.clamp_size(height) - version.min_size) as u64, radix),
        ((version.clamp_size(width) - version.min_size) as u64, radix),
    ];
    let value = items
        .iter()
        .fold(0u64, |value, &(item, radix)| value * radix + item);

    let mut digits = Vec::with_capacity(version.code_length);
    let mut rest = value;
    for _ in 0..version.code_length {
        let digit = (rest % RADIX as u64) as u32;
        digits.push(char::from_digit(digit, RADIX).unwrap_or('0'));
        rest /= RADIX as u64;
    }

    let mut code = String::with_capacity(version.code_length + 1);
    for (i, digit) in digits.into_iter().rev().enumerate() {
        if i == SEPARATOR_AT {
            code.push(SEPARATOR);
        }
        code.push(digit);
    }
    code
}

/// Decodes an identity code back into `(seed, width, height)`.
pub fn decode(version: &CodeVersion, code: &str) -> Result<(u64, u8, u8), CodeError> {
    let digits = strip_separator(code);
    if digits.len() != version.code_length {
        return Err(CodeError::Length {
            expected: version.code_length,
            found: digits.len(),
        });
    }

    let mut value: u64 = 0;
    for c in digits {
        let digit = c.to_digit(RADIX).ok_or(CodeError::IllegalCharacter(c))?;
        value = value * RADIX as u64 + digit as u64;
    }

    // Least significant item first. Each item is taken modulo its own radix, so it is
    // always in range; a code past the packed range shows up as a non-zero remainder.
    let radix = version.size_radix();
    let width = value % radix;
    value /= radix;
    let height = value % radix;
    value /= radix;
    let seed = value % version.seed_limit;
    value /= version.seed_limit;
    if value != 0 {
        return Err(CodeError::Remainder(value));
    }

    Ok((
        seed,
        (width as u8) + version.min_size,
        (height as u8) + version.min_size,
    ))
}

/// Decodes a code, inferring the version from its digit count.
pub fn decode_any(code: &str) -> Result<(&'static CodeVersion, u64, u8, u8), CodeError> {
    let length = strip_separator(code).len();
    let version = CodeVersion::for_length(length).ok_or(CodeError::Length {
        expected: VERSIONS[DEFAULT_VERSION as usize].code_length,
        found: length,
    })?;
    let (seed, width, height) = decode(version, code)?;
    Ok((version, seed, width, height))
}

/// Digits of a code without the separator, if the separator sits at its usual place.
fn strip_separator(code: &str) -> Vec<char> {
    code.chars()
        .enumerate()
        .filter(|&(i, c)| !(i == SEPARATOR_AT && c == SEPARATOR))
        .map(|(_, c)| c)
        .collect()
}
