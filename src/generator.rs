//! Generator Polynomials (spec §4.4).

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use crate::field::{Field, Symbol};
use crate::gf::gf_pow;
use crate::poly::poly_mul;

/// `rs_generator_poly(nsym, fcr, generator)`:
///
/// `g(x) = prod_{i=0}^{nsym-1} (x - alpha^(fcr+i))`
///
/// Length `nsym + 1`, leading coefficient `1`.
pub fn rs_generator_poly(field: &Field, nsym: usize, fcr: u32, generator: Symbol) -> Vec<Symbol> {
    let mut g: Vec<Symbol> = vec![1];
    for i in 0..nsym {
        let root = gf_pow(field, generator, (fcr as i64) + (i as i64));
        g = poly_mul(field, &g, &[1, root]);
    }
    g
}

/// `rs_generator_poly_all(n_max, fcr, generator)`: the family
/// `{g_0, g_1, ..., g_n_max}` built incrementally, entry `j` being the
/// generator for `nsym = j`. Entry `0` is `[1]`.
///
/// `O(n_max^2)` in both storage and construction time (spec §9); gate
/// behind `single_gen=false` and only build it when a caller actually
/// needs variable `nsym` (see `RSCodec`).
pub fn rs_generator_poly_all(field: &Field, n_max: usize, fcr: u32, generator: Symbol) -> Vec<Vec<Symbol>> {
    let mut family = Vec::with_capacity(n_max + 1);
    family.push(vec![1 as Symbol]);
    for j in 0..n_max {
        let root = gf_pow(field, generator, (fcr as i64) + (j as i64));
        let next = poly_mul(field, &family[j], &[1, root]);
        family.push(next);
    }
    family
}
