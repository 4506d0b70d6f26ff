//! Numeric narrowing rules.
//!
//! Integers narrow by two's-complement truncation under
//! [`NarrowingPolicy::Truncate`]. Floating values first truncate toward
//! zero into a 32-bit integer (64-bit for `long`), saturating at the
//! bounds and mapping NaN to zero, and are then bit-truncated. Under
//! [`NarrowingPolicy::Checked`] any loss of information is an error.

use core_types::{Element, ElementType, RuntimeError, RuntimeResult};
use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;

/// How narrowing handles values outside the target range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NarrowingPolicy {
    /// Keep the low-order bits (integers) or saturate then truncate (floats)
    #[default]
    Truncate,
    /// Reject values the target cannot represent exactly
    Checked,
}

fn out_of_target(value: impl ToString, target: ElementType) -> RuntimeError {
    RuntimeError::uncoercible(value.to_string(), target.name())
}

/// Narrow a 64-bit integer to `target`
pub fn narrow_integer(
    n: i64,
    target: ElementType,
    policy: NarrowingPolicy,
) -> RuntimeResult<Element> {
    if policy == NarrowingPolicy::Truncate {
        return Ok(match target {
            ElementType::Byte => Element::Byte(n as i8),
            ElementType::Short => Element::Short(n as i16),
            ElementType::Int => Element::Int(n as i32),
            ElementType::Long => Element::Long(n),
            ElementType::Float => Element::Float(n as f32),
            ElementType::Double => Element::Double(n as f64),
        });
    }

    let element = match target {
        ElementType::Byte => i8::try_from(n).ok().map(Element::Byte),
        ElementType::Short => i16::try_from(n).ok().map(Element::Short),
        ElementType::Int => i32::try_from(n).ok().map(Element::Int),
        ElementType::Long => Some(Element::Long(n)),
        ElementType::Float => Some(Element::Float(n as f32)),
        ElementType::Double => Some(Element::Double(n as f64)),
    };
    element.ok_or_else(|| out_of_target(n, target))
}

/// Narrow a 64-bit float to `target`
pub fn narrow_float(
    d: f64,
    target: ElementType,
    policy: NarrowingPolicy,
) -> RuntimeResult<Element> {
    match (target, policy) {
        (ElementType::Double, _) => Ok(Element::Double(d)),
        (ElementType::Float, NarrowingPolicy::Truncate) => Ok(Element::Float(d as f32)),
        (ElementType::Float, NarrowingPolicy::Checked) => {
            let narrowed = d as f32;
            if d.is_finite() && !narrowed.is_finite() {
                return Err(out_of_target(d, target));
            }
            Ok(Element::Float(narrowed))
        }
        (ElementType::Long, NarrowingPolicy::Truncate) => Ok(Element::Long(d as i64)),
        (_, NarrowingPolicy::Truncate) => {
            narrow_integer(i64::from(d as i32), target, NarrowingPolicy::Truncate)
        }
        (_, NarrowingPolicy::Checked) => {
            // 2^63 is the first double past i64::MAX
            if !d.is_finite()
                || d.fract() != 0.0
                || d < -9.223_372_036_854_776e18
                || d >= 9.223_372_036_854_776e18
            {
                return Err(out_of_target(d, target));
            }
            narrow_integer(d as i64, target, NarrowingPolicy::Checked)
        }
    }
}

/// Low-order 64 bits of an arbitrary precision integer, two's complement
pub fn low_bits(n: &BigInt) -> i64 {
    let fill = if n.sign() == Sign::Minus { 0xff } else { 0x00 };
    let mut bytes = n.to_signed_bytes_le();
    bytes.resize(8, fill);
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes);
    i64::from_le_bytes(word)
}

/// Narrow an arbitrary precision integer to `target`
pub fn narrow_big_integer(
    n: &BigInt,
    target: ElementType,
    policy: NarrowingPolicy,
) -> RuntimeResult<Element> {
    match target {
        ElementType::Float | ElementType::Double => {
            let d = n.to_f64().ok_or_else(|| out_of_target(n, target))?;
            narrow_float(d, target, policy)
        }
        _ => match policy {
            NarrowingPolicy::Truncate => narrow_integer(low_bits(n), target, policy),
            NarrowingPolicy::Checked => {
                let exact = n.to_i64().ok_or_else(|| out_of_target(n, target))?;
                narrow_integer(exact, target, policy)
            }
        },
    }
}
