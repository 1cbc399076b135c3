//! Field Tables (spec §4.1).
//!
//! Builds the log/antilog tables for `GF(2^c_exp)` from a primitive
//! polynomial and a field generator. The cyclic dependency between table
//! construction and multiplication (§9 design note) is broken by
//! `gf_mult_no_lut`, a carry-less integer multiply with reduction that is
//! the only field multiplication allowed to work before tables exist.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::{ReedSolomonError, Result};

/// A symbol: an element of `GF(2^c_exp)`, stored widened to `u16` so the
/// same type covers every field size the spec allows (2 <= c_exp <= 16).
pub type Symbol = u16;

/// An immutable, fully constructed Galois field.
///
/// Two `Field`s are considered equivalent for the purposes of this crate
/// iff they were built from the same `(prim, generator, c_exp)` triple;
/// `Field` does not implement `PartialEq` itself since comparing the
/// tables directly would be both expensive and redundant.
#[derive(Debug, Clone)]
pub struct Field {
    prim: u32,
    generator: Symbol,
    c_exp: u32,
    field_charac: usize,
    /// Antilog table, duplicated into `[0, 2*field_charac)` so `gf_mul`
    /// never needs a modular reduction on the exponent sum.
    gf_exp: Vec<Symbol>,
    /// Log table; `gf_log[0]` is never written and must never be read.
    gf_log: Vec<Symbol>,
}

impl Field {
    /// `init_tables(prim, generator, c_exp)` from spec §4.1.
    ///
    /// Preconditions: `generator` in `[2, field_size)`; `prim` must be a
    /// primitive polynomial of degree `c_exp` over `GF(2)`. Use
    /// `prim = 0` to have the smallest valid primitive polynomial chosen
    /// automatically via `find_prime_polys` (§11 of `SPEC_FULL.md`).
    pub fn new(prim: u32, generator: Symbol, c_exp: u32) -> Result<Field> {
        if !(2..=16).contains(&c_exp) {
            return Err(ReedSolomonError::InvalidParameter {
                name: "c_exp",
                reason: alloc::format!("must be in 2..=16, got {c_exp}"),
            });
        }
        let field_size = 1usize << c_exp;
        let field_charac = field_size - 1;

        if (generator as usize) < 2 || (generator as usize) >= field_size {
            return Err(ReedSolomonError::InvalidParameter {
                name: "generator",
                reason: alloc::format!("must be in 2..{field_size}, got {generator}"),
            });
        }

        let prim = if prim == 0 {
            *find_prime_polys(generator, c_exp, false, false)?
                .first()
                .ok_or(ReedSolomonError::InvalidParameter {
                    name: "prim",
                    reason: alloc::format!(
                        "no primitive polynomial found for generator {generator}, c_exp {c_exp}"
                    ),
                })?
        } else {
            if !is_primitive(prim, generator, field_size) {
                return Err(ReedSolomonError::InvalidParameter {
                    name: "prim",
                    reason: alloc::format!(
                        "0x{prim:x} is not primitive for generator {generator}, c_exp {c_exp}"
                    ),
                });
            }
            prim
        };

        let mut gf_exp = vec![0 as Symbol; 2 * field_charac];
        let mut gf_log = vec![0 as Symbol; field_size];

        let mut x: u32 = 1;
        for i in 0..field_charac {
            gf_exp[i] = x as Symbol;
            gf_log[x as usize] = i as Symbol;
            x = gf_mult_no_lut(x, generator as u32, Some(prim), Some(field_size as u32));
        }
        for i in field_charac..2 * field_charac {
            gf_exp[i] = gf_exp[i - field_charac];
        }

        Ok(Field {
            prim,
            generator,
            c_exp,
            field_charac,
            gf_exp,
            gf_log,
        })
    }

    /// Default construction: `prim = 0x11d`, `generator = 2`, `c_exp = 8`
    /// — the canonical `GF(2^8)` field used by `RSCodec`'s defaults (§6).
    pub fn gf256() -> Field {
        Field::new(0x11d, 2, 8).expect("0x11d is primitive for generator 2, c_exp 8")
    }

    #[inline]
    pub fn field_size(&self) -> usize {
        self.field_charac + 1
    }

    #[inline]
    pub fn characteristic(&self) -> usize {
        self.field_charac
    }

    #[inline]
    pub fn c_exp(&self) -> u32 {
        self.c_exp
    }

    #[inline]
    pub fn prim(&self) -> u32 {
        self.prim
    }

    #[inline]
    pub fn generator(&self) -> Symbol {
        self.generator
    }

    #[inline]
    pub(crate) fn exp(&self, i: usize) -> Symbol {
        self.gf_exp[i]
    }

    #[inline]
    pub(crate) fn log(&self, x: Symbol) -> Symbol {
        debug_assert!(x != 0, "gf_log[0] is undefined and must never be read");
        self.gf_log[x as usize]
    }
}

/// Reference carry-less multiply with reduction by `prim`, used to
/// bootstrap the tables and as the one multiplication that must work
/// before any `Field` exists (spec §4.2, §9).
///
/// When `prim` is `None` this returns the plain carry-less integer
/// product (the `carryless=false`-equivalent reference variant used in
/// testing, per spec §4.2).
pub fn gf_mult_no_lut(a: u32, b: u32, prim: Option<u32>, field_charac_full: Option<u32>) -> u32 {
    let mut a = a;
    let mut b = b;
    let mut r: u32 = 0;
    while b != 0 {
        if b & 1 != 0 {
            r ^= a;
        }
        b >>= 1;
        a <<= 1;
        if let (Some(prim), Some(field_charac_full)) = (prim, field_charac_full) {
            if a & field_charac_full != 0 {
                a ^= prim;
            }
        }
    }
    r
}

/// Checks whether `prim` is a primitive polynomial for the given
/// generator and field size: starting from 1 and repeatedly multiplying
/// by `generator` (reducing by `prim`) must visit every nonzero element
/// of the field exactly once before returning to 1.
fn is_primitive(prim: u32, generator: Symbol, field_size: usize) -> bool {
    let field_charac = field_size - 1;
    let mut seen = vec![false; field_size];
    let mut x: u32 = 1;
    for _ in 0..field_charac {
        if x == 0 || x as usize >= field_size || seen[x as usize] {
            return false;
        }
        seen[x as usize] = true;
        x = gf_mult_no_lut(x, generator as u32, Some(prim), Some(field_size as u32));
    }
    x == 1
}

/// `find_prime_polys(generator, c_exp, fast_primes, single)` from spec
/// §4.1: enumerates odd candidates in `[field_size, 2*field_size)` and
/// retains those that are primitive for `generator`. `fast_primes`
/// narrows candidates to those that are themselves prime integers (a
/// heuristic filter, not a correctness requirement); `single` stops at
/// the first match.
pub fn find_prime_polys(
    generator: Symbol,
    c_exp: u32,
    fast_primes: bool,
    single: bool,
) -> Result<Vec<u32>> {
    if !(2..=16).contains(&c_exp) {
        return Err(ReedSolomonError::InvalidParameter {
            name: "c_exp",
            reason: alloc::format!("must be in 2..=16, got {c_exp}"),
        });
    }
    let field_size = 1u32 << c_exp;
    if (generator as u32) < 2 || (generator as u32) >= field_size {
        return Err(ReedSolomonError::InvalidParameter {
            name: "generator",
            reason: alloc::format!("must be in 2..{field_size}, got {generator}"),
        });
    }

    let mut correct_primes = Vec::new();
    let mut candidate = field_size + 1;
    while candidate < 2 * field_size {
        if candidate % 2 != 0 && (!fast_primes || is_prime_int(candidate)) {
            if is_primitive(candidate, generator, field_size as usize) {
                correct_primes.push(candidate);
                if single {
                    break;
                }
            }
        }
        candidate += 2;
    }
    Ok(correct_primes)
}

fn is_prime_int(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn gf256_tables() {
        let f = Field::gf256();
        assert_eq!(f.characteristic(), 255);
        assert_eq!(f.field_size(), 256);
        let expected_start: [Symbol; 10] = [1, 2, 4, 8, 16, 32, 64, 128, 29, 58];
        assert_eq!(&f.gf_exp[0..10], &expected_start);
    }

    #[test]
    fn find_prime_polys_gf256() {
        let primes = find_prime_polys(2, 8, false, false).unwrap();
        assert_eq!(
            primes,
            vec![
                285, 299, 301, 333, 351, 355, 357, 361, 369, 391, 397, 425, 451, 463, 487, 501
            ]
        );
    }

    #[test]
    fn exp_log_are_inverses() {
        let f = Field::gf256();
        for x in 1..=255u32 {
            let x = x as Symbol;
            assert_eq!(f.exp(f.log(x) as usize), x);
        }
        assert_eq!(f.exp(0), 1);
    }

    #[test]
    fn exp_table_is_periodic() {
        let f = Field::gf256();
        for i in 0..f.characteristic() {
            assert_eq!(f.exp(i), f.exp(i + f.characteristic()));
        }
    }

    #[test]
    fn auto_prim_selection() {
        let f = Field::new(0, 2, 8).unwrap();
        // the smallest primitive poly for (generator=2, c_exp=8) is 285 (0x11d)
        assert_eq!(f.prim(), 0x11d);
    }

    #[test]
    fn rejects_non_primitive() {
        // 287 is odd but not in the known-primitive list for (generator=2, c_exp=8)
        assert!(Field::new(287, 2, 8).is_err());
    }

    #[test]
    fn small_field_gf16() {
        let f = Field::new(0x13, 2, 4).unwrap();
        assert_eq!(f.characteristic(), 15);
        assert_eq!(f.field_size(), 16);
    }
}
