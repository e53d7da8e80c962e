use std::error;
use std::fmt;

/// An error that can occur when converting a scalar into the requested type.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarError {
    /// The given string did not contain only numbers
    AllDigits(String),

    /// The given string caused an overflow when calculating its numerical value
    Overflow(String),

    /// The given string was not a recognized floating point value
    InvalidFloat(String),

    /// The given string parsed to an infinite or NaN floating point value
    NonFinite(String),
}

impl fmt::Display for ScalarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScalarError::AllDigits(x) => write!(f, "did not contain all digits: {}", x),
            ScalarError::Overflow(x) => write!(f, "caused an overflow: {}", x),
            ScalarError::InvalidFloat(x) => write!(f, "is not a valid number: {}", x),
            ScalarError::NonFinite(x) => write!(f, "is not a finite number: {}", x),
        }
    }
}

impl error::Error for ScalarError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}

/// A single field of an object record.
///
/// Numeric conversions are locale invariant: `.` is always the decimal
/// separator and no grouping characters are accepted.
///
/// ```
/// use levelsave::Scalar;
///
/// let v1 = Scalar::new("-15");
/// assert_eq!(v1.to_i64(), Ok(-15));
/// assert_eq!(v1.to_f64(), Ok(-15.0));
/// ```
#[derive(PartialEq, Eq, Copy, Clone)]
pub struct Scalar<'a> {
    data: &'a str,
}

impl<'a> Scalar<'a> {
    /// Create a new scalar backed by record text
    pub fn new(data: &'a str) -> Scalar<'a> {
        Scalar { data }
    }

    /// View the underlying text
    pub fn as_str(&self) -> &'a str {
        self.data
    }

    /// Try converting the scalar to f64
    pub fn to_f64(&self) -> Result<f64, ScalarError> {
        to_f64(self.data)
    }

    /// Try converting the scalar to a boolean. Any non-zero integer is true.
    ///
    /// ```
    /// use levelsave::Scalar;
    ///
    /// assert_eq!(Scalar::new("1").to_bool(), Ok(true));
    /// assert_eq!(Scalar::new("0").to_bool(), Ok(false));
    /// assert!(Scalar::new("yes").to_bool().is_err());
    /// ```
    pub fn to_bool(&self) -> Result<bool, ScalarError> {
        to_i64(self.data.as_bytes()).map(|x| x != 0)
    }

    /// Try converting the scalar to i64
    pub fn to_i64(&self) -> Result<i64, ScalarError> {
        to_i64(self.data.as_bytes())
    }

    /// Try converting the scalar to u64
    pub fn to_u64(&self) -> Result<u64, ScalarError> {
        to_u64(self.data.as_bytes())
    }
}

impl<'a> fmt::Debug for Scalar<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar {{ {} }}", self)
    }
}

impl<'a> fmt::Display for Scalar<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.data)
    }
}

#[inline]
fn to_f64(d: &str) -> Result<f64, ScalarError> {
    // Integers are the overwhelmingly common case in level data
    if let Ok(x) = to_i64(d.as_bytes()) {
        return Ok(x as f64);
    }

    let val: f64 = d
        .parse()
        .map_err(|_| ScalarError::InvalidFloat(d.to_owned()))?;

    if val.is_finite() {
        Ok(val)
    } else {
        Err(ScalarError::NonFinite(d.to_owned()))
    }
}

#[inline]
fn to_i64(d: &[u8]) -> Result<i64, ScalarError> {
    let is_negative = d.first().map_or(false, |&x| x == b'-');
    let rest = to_u64(&d[is_negative as usize..])?;
    if is_negative {
        if rest > i64::MAX as u64 + 1 {
            Err(ScalarError::Overflow(to_owned(d)))
        } else {
            Ok((rest as i64).wrapping_neg())
        }
    } else {
        i64::try_from(rest).map_err(|_| ScalarError::Overflow(to_owned(d)))
    }
}

#[inline]
fn to_u64(d: &[u8]) -> Result<u64, ScalarError> {
    const POWER10: [u64; 8] = [10_000_000, 1_000_000, 100_000, 10_000, 1_000, 100, 10, 1];

    if d.is_empty() {
        return Err(ScalarError::AllDigits(to_owned(d)));
    }

    let mut result: u64 = 0;
    let mut chunks = d.chunks_exact(8);
    for chunk in chunks.by_ref() {
        let val = eight_digits(chunk).ok_or_else(|| ScalarError::AllDigits(to_owned(d)))?;

        result = result
            .checked_mul(100_000_000)
            .and_then(|x| x.checked_add(val))
            .ok_or_else(|| ScalarError::Overflow(to_owned(d)))?;
    }

    let remainder = chunks.remainder();
    if remainder.iter().any(|&x| !x.is_ascii_digit()) {
        return Err(ScalarError::AllDigits(to_owned(d)));
    }

    if result != 0 {
        result = 10_u64
            .checked_pow(remainder.len() as u32)
            .and_then(|x| result.checked_mul(x))
            .ok_or_else(|| ScalarError::Overflow(to_owned(d)))?;
    }

    let maxxed = 8 - remainder.len();
    for (i, &x) in remainder.iter().enumerate() {
        result = result
            .checked_add(u64::from(x - b'0') * POWER10[maxxed + i])
            .ok_or_else(|| ScalarError::Overflow(to_owned(d)))?;
    }

    Ok(result)
}

/// Parses eight ascii digits at once with SWAR arithmetic. Returns `None` if
/// any byte is not a digit.
#[inline]
fn eight_digits(chunk: &[u8]) -> Option<u64> {
    let val = u64::from_le_bytes(chunk.try_into().ok()?);
    let is_digits = ((val & 0xF0F0_F0F0_F0F0_F0F0)
        | ((val.wrapping_add(0x0606_0606_0606_0606) & 0xF0F0_F0F0_F0F0_F0F0) >> 4))
        == 0x3333_3333_3333_3333;

    if !is_digits {
        return None;
    }

    let val = (val & 0x0F0F_0F0F_0F0F_0F0F).wrapping_mul(2561) >> 8;
    let val = (val & 0x00FF_00FF_00FF_00FF).wrapping_mul(6553601) >> 16;
    let val = (val & 0x0000_FFFF_0000_FFFF).wrapping_mul(42949672960001) >> 32;
    Some(val)
}

fn to_owned(d: &[u8]) -> String {
    String::from_utf8_lossy(d).into_owned()
}
