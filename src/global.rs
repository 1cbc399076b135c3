//! Process-wide field cache (spec §9 design note: "Provide a thin
//! adapter layer that memoizes the last-initialized field for back-compat
//! if a free-function API is desired, but document it as best-effort and
//! not thread-safe across re-inits").
//!
//! The rest of this crate makes the field an explicit `&Field` argument
//! to every low-level function, per the same design note's primary
//! recommendation. This module exists only for callers porting code
//! written against the original library's argument-less module-level
//! functions (`gf_mul(a, b)` instead of `gf_mul(&field, a, b)`). It is
//! gated behind the `std` feature because it needs `std::sync::Mutex`
//! (spec §5: "a thread-local or synchronized slot is acceptable").
//!
//! Concurrent re-initialization with different parameters is defined by
//! spec §5 to fail rather than silently race: a second differing call to
//! [`init_tables`] is rejected instead of replacing the first caller's
//! tables out from under any other thread relying on them.

extern crate alloc;
use alloc::vec::Vec;

use std::sync::Mutex;

use crate::error::{ReedSolomonError, Result};
use crate::field::{Field, Symbol};
use crate::gf;

struct CachedField {
    field: Field,
}

static CACHE: Mutex<Option<CachedField>> = Mutex::new(None);

/// `init_tables(prim, generator, c_exp)` against the process-wide cache.
///
/// The first call for a process populates the cache. A later call with
/// *different* `(prim, generator, c_exp)` fails with
/// [`ReedSolomonError::FieldNotInitialized`] rather than silently
/// replacing the tables underneath any other thread currently relying on
/// them (spec §5) — callers who genuinely want to switch fields should
/// construct an explicit [`Field`] (or [`crate::codec::RSCodec`]) instead
/// of using this adapter.
pub fn init_tables(prim: u32, generator: Symbol, c_exp: u32) -> Result<()> {
    let mut guard = CACHE.lock().expect("field cache mutex poisoned");
    match &*guard {
        Some(cached)
            if cached.field.prim() == prim
                && cached.field.generator() == generator
                && cached.field.c_exp() == c_exp => {}
        Some(_) => return Err(ReedSolomonError::FieldNotInitialized),
        None => {
            let field = Field::new(prim, generator, c_exp)?;
            *guard = Some(CachedField { field });
        }
    }
    Ok(())
}

fn with_cached_field<R>(f: impl FnOnce(&Field) -> R) -> Result<R> {
    let guard = CACHE.lock().expect("field cache mutex poisoned");
    match &*guard {
        Some(cached) => Ok(f(&cached.field)),
        None => Err(ReedSolomonError::FieldNotInitialized),
    }
}

/// Argument-less `gf_add`/`gf_sub`, over whichever field was last passed
/// to [`init_tables`]. Addition does not depend on the field's tables
/// (characteristic 2), so this never fails on an uninitialized cache.
pub fn gf_add(a: Symbol, b: Symbol) -> Symbol {
    gf::gf_add(a, b)
}

/// See [`gf_add`].
pub fn gf_sub(a: Symbol, b: Symbol) -> Symbol {
    gf::gf_sub(a, b)
}

/// Argument-less `gf_mul` over the process-wide cached field.
pub fn gf_mul(a: Symbol, b: Symbol) -> Result<Symbol> {
    with_cached_field(|field| gf::gf_mul(field, a, b))
}

/// Argument-less `gf_div` over the process-wide cached field.
pub fn gf_div(a: Symbol, b: Symbol) -> Result<Symbol> {
    with_cached_field(|field| gf::gf_div(field, a, b))?
}

/// Argument-less `gf_pow` over the process-wide cached field.
pub fn gf_pow(a: Symbol, p: i64) -> Result<Symbol> {
    with_cached_field(|field| gf::gf_pow(field, a, p))
}

/// Argument-less `gf_inverse` over the process-wide cached field.
pub fn gf_inverse(a: Symbol) -> Result<Symbol> {
    with_cached_field(|field| gf::gf_inverse(field, a))?
}

/// Argument-less `rs_encode_msg` over the process-wide cached field.
pub fn rs_encode_msg(msg: &[Symbol], nsym: usize, fcr: u32, generator: Symbol) -> Result<Vec<Symbol>> {
    with_cached_field(|field| crate::encode::rs_encode_msg(field, msg, nsym, fcr, generator, None))?
}
