//! A universal Reed-Solomon errors-and-erasures codec over `GF(2^p)`,
//! `2 <= p <= 16`.
//!
//! The [`codec`] module's [`RSCodec`] is the entry point most callers
//! want: construct one with the parameters for your code (or just an
//! `nsym`, taking the GF(256) defaults), then `encode`/`decode`/`check`
//! byte buffers of any length. Everything below `codec` is the core
//! engine, exposed for callers who want to drive the field/polynomial/
//! syndrome primitives directly instead of going through the chunking
//! facade.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Error taxonomy (§7): a single `ReedSolomonError` enum covering every
/// failure mode across the field, polynomial, encoder, decoder and
/// facade layers.
pub mod error;

/// Field Tables (§4.1): `Field` construction from a primitive polynomial
/// and generator, and `find_prime_polys`.
pub mod field;

/// Field Arithmetic (§4.2): symbol-level add/sub/mul/div/pow/inverse.
pub mod gf;

/// Polynomial Arithmetic (§4.3): scale/add/mul/div/eval over `&Field`.
pub mod poly;

/// Generator Polynomials (§4.4): `rs_generator_poly` and the cached
/// `rs_generator_poly_all` family.
pub mod generator;

/// Encoder (§4.5): systematic `rs_encode_msg`.
pub mod encode;

/// Decoder (§4.6): syndromes, Forney syndromes, Berlekamp-Massey, Chien
/// search, Forney magnitudes, correction, and both top-level
/// orchestrations.
pub mod decode;

/// Polymorphism over symbol containers (§9 design note): the
/// `SymbolBuffer` trait plus `Vec<u8>`/`Vec<u16>` implementations.
pub mod symbols;

/// Chunked Codec Facade (§4.7): `RSCodec`.
pub mod codec;

/// Process-wide field cache (§9 design note): a best-effort,
/// argument-less adapter over the most recently initialized field, for
/// callers porting code written against the original library's
/// module-level functions.
#[cfg(feature = "std")]
pub mod global;

pub use codec::RSCodec;
pub use error::{BlockError, DecodeOutcome, ReedSolomonError};
pub use field::Field;
