//! Field Arithmetic (spec §4.2).
//!
//! All operations here take an explicit `&Field` (spec §9 design note:
//! "a systems-language re-architecture should make the field explicit").
//! `crate::global` layers the original library's argument-less free
//! functions on top of these, for callers that want that shape instead.

use crate::error::{ReedSolomonError, Result};
use crate::field::{Field, Symbol};

/// `gf_add(a, b) = gf_sub(a, b) = a XOR b` — characteristic 2.
#[inline]
pub fn gf_add(a: Symbol, b: Symbol) -> Symbol {
    a ^ b
}

/// Alias of [`gf_add`]; subtraction and addition coincide in
/// characteristic 2.
#[inline]
pub fn gf_sub(a: Symbol, b: Symbol) -> Symbol {
    a ^ b
}

/// `gf_neg(a) = a` — negation is the identity in characteristic 2.
#[inline]
pub fn gf_neg(a: Symbol) -> Symbol {
    a
}

/// `gf_mul(a, b)`: zero if either operand is zero, else
/// `gf_exp[gf_log[a] + gf_log[b]]` — no modulo needed thanks to the
/// duplicated antilog table.
#[inline]
pub fn gf_mul(field: &Field, a: Symbol, b: Symbol) -> Symbol {
    if a == 0 || b == 0 {
        return 0;
    }
    field.exp(field.log(a) as usize + field.log(b) as usize)
}

/// `gf_div(a, b)`: fails with [`ReedSolomonError::DivisionByZero`] if
/// `b == 0`; returns `0` if `a == 0`; otherwise
/// `gf_exp[(gf_log[a] + field_charac - gf_log[b]) mod field_charac]`.
pub fn gf_div(field: &Field, a: Symbol, b: Symbol) -> Result<Symbol> {
    if b == 0 {
        return Err(ReedSolomonError::DivisionByZero);
    }
    if a == 0 {
        return Ok(0);
    }
    let charac = field.characteristic();
    let exponent = (field.log(a) as usize + charac - field.log(b) as usize) % charac;
    Ok(field.exp(exponent))
}

/// `gf_pow(a, p)`: `gf_exp[(gf_log[a] * p) mod field_charac]`, with `p`
/// possibly negative.
pub fn gf_pow(field: &Field, a: Symbol, p: i64) -> Symbol {
    if a == 0 {
        return if p == 0 { 1 } else { 0 };
    }
    let charac = field.characteristic() as i64;
    let exponent = (((field.log(a) as i64) * p) % charac + charac) % charac;
    field.exp(exponent as usize)
}

/// `gf_inverse(a) = gf_exp[field_charac - gf_log[a]]` for `a != 0`.
pub fn gf_inverse(field: &Field, a: Symbol) -> Result<Symbol> {
    if a == 0 {
        return Err(ReedSolomonError::DivisionByZero);
    }
    Ok(field.exp(field.characteristic() - field.log(a) as usize))
}
