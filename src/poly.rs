//! Polynomial Arithmetic (spec §4.3).
//!
//! Polynomials are represented as `&[Symbol]` / `Vec<Symbol>`, most
//! significant coefficient first (length = degree + 1), matching the
//! convention the teacher's `rs` template uses for its generator
//! polynomial and syndrome arithmetic.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use crate::field::{Field, Symbol};
use crate::gf::{gf_add, gf_mul};

/// `poly_scale(p, x)` — elementwise `gf_mul`.
pub fn poly_scale(field: &Field, p: &[Symbol], x: Symbol) -> Vec<Symbol> {
    p.iter().map(|&c| gf_mul(field, c, x)).collect()
}

/// `poly_add(p, q)` — XOR-aligned from the right; operand lengths may
/// differ.
pub fn poly_add(p: &[Symbol], q: &[Symbol]) -> Vec<Symbol> {
    let len = p.len().max(q.len());
    let mut r = vec![0 as Symbol; len];
    for (i, &c) in p.iter().enumerate() {
        r[len - p.len() + i] = c;
    }
    for (i, &c) in q.iter().enumerate() {
        r[len - q.len() + i] = gf_add(r[len - q.len() + i], c);
    }
    r
}

/// `poly_neg(p) = p` — negation is the identity in characteristic 2.
pub fn poly_neg(p: &[Symbol]) -> Vec<Symbol> {
    p.to_vec()
}

/// Schoolbook convolution, output length `len(p) + len(q) - 1`. This is
/// the "simple" double-loop variant; [`poly_mul`] is the log-domain
/// optimized variant and the two must agree for every input (spec §8).
pub fn poly_mul_simple(field: &Field, p: &[Symbol], q: &[Symbol]) -> Vec<Symbol> {
    if p.is_empty() || q.is_empty() {
        return Vec::new();
    }
    let mut r = vec![0 as Symbol; p.len() + q.len() - 1];
    for (i, &pi) in p.iter().enumerate() {
        if pi == 0 {
            continue;
        }
        for (j, &qj) in q.iter().enumerate() {
            r[i + j] = gf_add(r[i + j], gf_mul(field, pi, qj));
        }
    }
    r
}

/// Log-domain optimized variant of [`poly_mul_simple`]: precomputes
/// `gf_log` of each nonzero coefficient of `p` once, rather than
/// re-deriving it on every inner-loop multiplication.
pub fn poly_mul(field: &Field, p: &[Symbol], q: &[Symbol]) -> Vec<Symbol> {
    if p.is_empty() || q.is_empty() {
        return Vec::new();
    }
    let mut r = vec![0 as Symbol; p.len() + q.len() - 1];
    for (i, &pi) in p.iter().enumerate() {
        if pi == 0 {
            continue;
        }
        let log_pi = field.log(pi) as usize;
        for (j, &qj) in q.iter().enumerate() {
            if qj == 0 {
                continue;
            }
            let log_qj = field.log(qj) as usize;
            r[i + j] = gf_add(r[i + j], field.exp(log_pi + log_qj));
        }
    }
    r
}

/// `poly_eval(p, x)` — Horner's method from the high-order coefficient.
pub fn poly_eval(field: &Field, p: &[Symbol], x: Symbol) -> Symbol {
    let mut y: Symbol = 0;
    for &c in p {
        y = gf_add(gf_mul(field, y, x), c);
    }
    y
}

/// `poly_div(dividend, divisor)` — extended synthetic division.
/// Returns `(quotient, remainder)` where `remainder.len() == divisor.len() - 1`.
///
/// Panics if `divisor` is empty (an invariant violation upstream, not a
/// runtime input error: generator polynomials are never empty).
pub fn poly_div(field: &Field, dividend: &[Symbol], divisor: &[Symbol]) -> (Vec<Symbol>, Vec<Symbol>) {
    assert!(!divisor.is_empty(), "divisor must have at least one coefficient");
    let mut work = dividend.to_vec();
    let normalizer = divisor[0];

    for i in 0..dividend.len().saturating_sub(divisor.len() - 1) {
        let coef = work[i];
        if coef == 0 {
            continue;
        }
        // normalizer is the divisor's leading coefficient; dividing it
        // out up front keeps the inner loop a single gf_mul per term.
        let coef = if normalizer != 1 {
            crate::gf::gf_div(field, coef, normalizer).expect("normalizer is nonzero by construction")
        } else {
            coef
        };
        work[i] = coef;
        for j in 1..divisor.len() {
            if divisor[j] != 0 {
                work[i + j] = gf_add(work[i + j], gf_mul(field, divisor[j], coef));
            }
        }
    }

    let separator = dividend.len().saturating_sub(divisor.len() - 1);
    let quotient = work[..separator].to_vec();
    let remainder = work[separator..].to_vec();
    (quotient, remainder)
}
