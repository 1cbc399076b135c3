//! Polymorphism over symbol containers (spec §9 design note:
//! "define a trait/interface ... requiring indexed read/write, length,
//! and slice construction; provide built-in implementations for 8-bit
//! and 16-bit symbol buffers").
//!
//! `RSCodec` (see [`crate::codec`]) is generic over this trait rather
//! than hard-coded to `Vec<u8>`, so a single facade type can serve both
//! the common byte-oriented case (fields up to `GF(2^8)`) and the wider
//! `GF(2^16)` fields the spec allows.

extern crate alloc;
use alloc::vec::Vec;

use crate::error::{ReedSolomonError, Result};
use crate::field::{Field, Symbol};

/// A container of symbols that can be validated against a [`Field`] and
/// rebuilt from a corrected/encoded symbol sequence.
///
/// Implementations only need to know how to move to and from the crate's
/// internal `Vec<Symbol>` representation; all of the arithmetic happens
/// on that representation.
pub trait SymbolBuffer: Sized {
    /// Number of symbols in this container.
    fn symbol_len(&self) -> usize;

    /// Validate every symbol is `< field.field_size()` and widen to the
    /// internal `Symbol` representation. Fails with
    /// [`ReedSolomonError::SymbolOutOfRange`] on the first offending
    /// value.
    fn to_symbols(&self, field: &Field) -> Result<Vec<Symbol>>;

    /// Narrow a symbol sequence back into this container type. Callers
    /// only ever invoke this with symbols already known to fit (they
    /// came from this same container type, or from arithmetic bounded by
    /// the same field), so this does not itself validate.
    fn from_symbols(symbols: &[Symbol]) -> Self;
}

impl SymbolBuffer for Vec<u8> {
    fn symbol_len(&self) -> usize {
        self.len()
    }

    fn to_symbols(&self, field: &Field) -> Result<Vec<Symbol>> {
        let field_size = field.field_size();
        let mut out = Vec::with_capacity(self.len());
        for &b in self {
            let s = b as Symbol;
            if s as usize >= field_size {
                return Err(ReedSolomonError::SymbolOutOfRange {
                    value: b as u32,
                    field_size,
                });
            }
            out.push(s);
        }
        Ok(out)
    }

    fn from_symbols(symbols: &[Symbol]) -> Self {
        symbols.iter().map(|&s| s as u8).collect()
    }
}

impl SymbolBuffer for Vec<u16> {
    fn symbol_len(&self) -> usize {
        self.len()
    }

    fn to_symbols(&self, field: &Field) -> Result<Vec<Symbol>> {
        let field_size = field.field_size();
        let mut out = Vec::with_capacity(self.len());
        for &s in self {
            if s as usize >= field_size {
                return Err(ReedSolomonError::SymbolOutOfRange {
                    value: s as u32,
                    field_size,
                });
            }
            out.push(s as Symbol);
        }
        Ok(out)
    }

    fn from_symbols(symbols: &[Symbol]) -> Self {
        symbols.to_vec()
    }
}
