//! Chunked Codec Facade (spec §4.7).
//!
//! Splits arbitrarily long messages into independent RS blocks so the
//! low-level encoder/decoder (bounded to `field_charac` symbols per
//! block) can serve payloads of any length. Grounded on the structure of
//! `examples/H4n-uL-FrAD_Rust/src/tools/ecc/reedsolo.rs`'s `RSCodec`
//! (itself a port of this same `reedsolo` library), generalized to a
//! runtime field, the errors-and-erasures erasure-report contract, and
//! multi-`nsym` generator caching (spec §4.4, §9).

extern crate alloc;
use alloc::format;
use alloc::vec::Vec;

use crate::decode::{rs_check, rs_correct_msg, rs_correct_msg_nofsynd};
use crate::encode::rs_encode_msg;
use crate::error::{BlockError, DecodeOutcome, ReedSolomonError, Result};
use crate::field::{find_prime_polys, Field, Symbol};
use crate::generator::{rs_generator_poly, rs_generator_poly_all};
use crate::symbols::SymbolBuffer;

/// The cached generator polynomial(s) backing an [`RSCodec`] instance.
///
/// `Single` holds just `g_nsym` for the codec's one supported `nsym`;
/// `Family` holds the full `{g_0, ..., g_nsize}` so `encode`/`decode` can
/// be called with any `nsym <= nsize` at the cost of `O(nsize^2)` storage
/// and construction time (spec §4.4, §9: "gate behind `single_gen=false`
/// ... recommend it only when callers actually need variable nsym").
#[derive(Debug, Clone)]
enum Gen {
    Single(usize, Vec<Symbol>),
    Family(Vec<Vec<Symbol>>),
}

impl Gen {
    fn lookup(&self, nsym: usize) -> Result<&[Symbol]> {
        match self {
            Gen::Single(cached_nsym, g) => {
                if nsym == *cached_nsym {
                    Ok(g)
                } else {
                    Err(ReedSolomonError::InvalidParameter {
                        name: "nsym",
                        reason: format!(
                            "this codec was built with single_gen=true for nsym={cached_nsym}; \
                             {nsym} requires single_gen=false"
                        ),
                    })
                }
            }
            Gen::Family(family) => family.get(nsym).map(|g| g.as_slice()).ok_or_else(|| {
                ReedSolomonError::InvalidParameter {
                    name: "nsym",
                    reason: format!(
                        "nsym={nsym} exceeds the cached generator family (max {})",
                        family.len().saturating_sub(1)
                    ),
                }
            }),
        }
    }

    fn max_nsym(&self) -> usize {
        match self {
            Gen::Single(n, _) => *n,
            Gen::Family(family) => family.len().saturating_sub(1),
        }
    }
}

/// `RSCodec(nsym, nsize?, fcr?, prim?, generator?, c_exp?, single_gen?)`
/// (spec §4.7, §6): the public, chunking facade over the core RS engine.
///
/// Immutable once constructed; `encode`/`decode`/`check` may be called
/// concurrently from multiple threads (spec §5).
#[derive(Debug, Clone)]
pub struct RSCodec {
    field: Field,
    fcr: u32,
    nsize: usize,
    gen: Gen,
    nofsynd: bool,
}

/// Infers `c_exp` from a nonzero `prim`'s bit length (its degree as a
/// polynomial over `GF(2)`).
fn degree_of(prim: u32) -> u32 {
    32 - prim.leading_zeros() - 1
}

impl RSCodec {
    /// Constructs a codec for a single `nsym` (the common case).
    /// Equivalent to [`RSCodec::new`] with `single_gen = true`.
    pub fn new(
        nsym: usize,
        nsize: Option<usize>,
        fcr: Option<u32>,
        prim: Option<u32>,
        generator: Option<Symbol>,
        c_exp: Option<u32>,
    ) -> Result<RSCodec> {
        Self::with_options(nsym, nsize, fcr, prim, generator, c_exp, true, false)
    }

    /// Full constructor exposing `single_gen` (cache the whole generator
    /// family, spec §4.4/§4.7) and `nofsynd` (use the `_nofsynd`
    /// orchestration internally instead of the Forney-syndrome one, spec
    /// §4.6/§9 Open Questions — both produce identical results; this
    /// only selects which algorithm runs).
    #[allow(clippy::too_many_arguments)]
    pub fn with_options(
        nsym: usize,
        nsize: Option<usize>,
        fcr: Option<u32>,
        prim: Option<u32>,
        generator: Option<Symbol>,
        c_exp: Option<u32>,
        single_gen: bool,
        nofsynd: bool,
    ) -> Result<RSCodec> {
        let generator = generator.unwrap_or(2);
        let fcr = fcr.unwrap_or(0);
        let requested_prim = prim.unwrap_or(0x11d);

        let resolved_c_exp = match (prim, c_exp) {
            (Some(p), Some(c)) if p != 0 => {
                if degree_of(p) != c {
                    return Err(ReedSolomonError::InvalidParameter {
                        name: "c_exp",
                        reason: format!(
                            "prim 0x{p:x} has degree {}, inconsistent with c_exp={c}",
                            degree_of(p)
                        ),
                    });
                }
                c
            }
            (Some(p), None) if p != 0 => degree_of(p),
            (_, Some(c)) => c,
            _ => 8,
        };

        // prim=0 (or entirely unspecified) means "auto-select the
        // smallest valid primitive polynomial", matching the original
        // `reedsolo` library's constructor (spec SPEC_FULL §11).
        let resolved_prim = if prim == Some(0) || (prim.is_none() && c_exp.is_some()) {
            0
        } else {
            requested_prim
        };

        let field = Field::new(resolved_prim, generator, resolved_c_exp)?;
        let field_charac = field.characteristic();

        if nsym == 0 || nsym >= field_charac {
            return Err(ReedSolomonError::InvalidParameter {
                name: "nsym",
                reason: format!(
                    "must be in 1..{field_charac}, got {nsym}"
                ),
            });
        }

        let nsize = nsize.unwrap_or(field_charac);
        if nsize > field_charac || nsize <= nsym {
            return Err(ReedSolomonError::InvalidParameter {
                name: "nsize",
                reason: format!(
                    "must be in {}..={field_charac}, got {nsize}",
                    nsym + 1
                ),
            });
        }

        let gen = if single_gen {
            Gen::Single(nsym, rs_generator_poly(&field, nsym, fcr, generator))
        } else {
            Gen::Family(rs_generator_poly_all(&field, nsize, fcr, generator))
        };

        Ok(RSCodec {
            field,
            fcr,
            nsize,
            gen,
            nofsynd,
        })
    }

    /// The `Field` this codec was built over, for embedders calling the
    /// low-level §4.1-4.6 functions directly (spec §6).
    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn fcr(&self) -> u32 {
        self.fcr
    }

    pub fn nsize(&self) -> usize {
        self.nsize
    }

    /// The `nsym` this codec defaults to when callers pass `None`.
    pub fn nsym(&self) -> usize {
        match &self.gen {
            Gen::Single(n, _) => *n,
            Gen::Family(_) => self.gen.max_nsym(),
        }
    }

    fn resolve_nsym(&self, nsym: Option<usize>) -> Result<usize> {
        let nsym = nsym.unwrap_or_else(|| self.nsym());
        if nsym == 0 || nsym >= self.nsize {
            return Err(ReedSolomonError::InvalidParameter {
                name: "nsym",
                reason: format!(
                    "must be in 1..{}, got {nsym}",
                    self.nsize
                ),
            });
        }
        if nsym > self.gen.max_nsym() {
            return Err(ReedSolomonError::InvalidParameter {
                name: "nsym",
                reason: format!(
                    "nsym={nsym} exceeds this codec's cached generator (max {})",
                    self.gen.max_nsym()
                ),
            });
        }
        Ok(nsym)
    }

    /// `encode(data, nsym?)` (spec §4.7): splits `data` into blocks of
    /// `nsize - nsym` payload symbols, encodes each block, concatenates.
    pub fn encode<B: SymbolBuffer>(&self, data: &B, nsym: Option<usize>) -> Result<B> {
        let nsym = self.resolve_nsym(nsym)?;
        let gen = self.gen.lookup(nsym)?;
        let symbols = data.to_symbols(&self.field)?;
        let payload_size = self.nsize - nsym;

        let num_blocks = (symbols.len() + payload_size - 1) / payload_size.max(1);
        let mut out = Vec::with_capacity(symbols.len() + nsym * num_blocks.max(1));
        if symbols.is_empty() {
            let codeword = rs_encode_msg(&self.field, &[], nsym, self.fcr, self.field.generator(), Some(gen))?;
            out.extend(codeword);
        } else {
            for chunk in symbols.chunks(payload_size) {
                let codeword =
                    rs_encode_msg(&self.field, chunk, nsym, self.fcr, self.field.generator(), Some(gen))?;
                out.extend(codeword);
            }
        }
        Ok(B::from_symbols(&out))
    }

    /// `decode(data, nsym?, erase_pos?, only_erasures?)` (spec §4.7).
    ///
    /// Splits `data` into codeword blocks of `nsize` symbols (the last
    /// block may be shorter, mirroring `encode`'s shortened final
    /// block), partitions `erase_pos` by block, decodes each block, and
    /// concatenates. Fails fast with the first block's error; use
    /// [`RSCodec::decode_blocks`] to inspect per-block outcomes instead.
    pub fn decode<B: SymbolBuffer>(
        &self,
        data: &B,
        nsym: Option<usize>,
        erase_pos: &[usize],
        only_erasures: bool,
    ) -> Result<(B, B, Vec<usize>)> {
        let outcome = self.decode_blocks(data, nsym, erase_pos, only_erasures)?;
        if let Some(Err(e)) = outcome.block_results.into_iter().find(|r| r.is_err()) {
            return Err(e.error);
        }
        Ok(outcome.value)
    }

    /// Block-granular variant of [`RSCodec::decode`]: never fails on a
    /// per-block error, instead reporting it in `block_results` (spec
    /// §4.7: "A per-block failure surfaces as a list entry"). The
    /// aggregate `value` only concatenates payload/codeword/errata for
    /// blocks that succeeded; a caller that ignores `block_results`
    /// should prefer [`RSCodec::decode`], which re-raises the first
    /// failure.
    pub fn decode_blocks<B: SymbolBuffer>(
        &self,
        data: &B,
        nsym: Option<usize>,
        erase_pos: &[usize],
        only_erasures: bool,
    ) -> Result<DecodeOutcome<(B, B, Vec<usize>)>> {
        let nsym = self.resolve_nsym(nsym)?;
        let symbols = data.to_symbols(&self.field)?;

        let mut payload = Vec::new();
        let mut codeword = Vec::new();
        let mut errata = Vec::new();
        let mut block_results = Vec::new();

        let mut offset = 0usize;
        for (block_index, chunk) in symbols.chunks(self.nsize).enumerate() {
            let block_start = offset;
            let block_end = offset + chunk.len();
            let local_erase_pos: Vec<usize> = erase_pos
                .iter()
                .filter(|&&p| p >= block_start && p < block_end)
                .map(|&p| p - block_start)
                .collect();

            let result = if self.nofsynd {
                rs_correct_msg_nofsynd(
                    &self.field,
                    chunk,
                    nsym,
                    self.fcr,
                    self.field.generator(),
                    &local_erase_pos,
                    only_erasures,
                )
            } else {
                rs_correct_msg(
                    &self.field,
                    chunk,
                    nsym,
                    self.fcr,
                    self.field.generator(),
                    &local_erase_pos,
                    only_erasures,
                )
            };

            match result {
                Ok((block_payload, block_codeword, block_errata)) => {
                    payload.extend(block_payload);
                    codeword.extend(block_codeword);
                    errata.extend(block_errata.into_iter().map(|p| p + block_start));
                    block_results.push(Ok(()));
                }
                Err(e) => {
                    block_results.push(Err(BlockError {
                        block_index,
                        error: e,
                    }));
                }
            }

            offset = block_end;
        }

        Ok(DecodeOutcome {
            value: (B::from_symbols(&payload), B::from_symbols(&codeword), errata),
            block_results,
        })
    }

    /// `check(data, nsym?)` (spec §4.7): per-block syndrome-zero test.
    pub fn check<B: SymbolBuffer>(&self, data: &B, nsym: Option<usize>) -> Result<Vec<bool>> {
        let nsym = self.resolve_nsym(nsym)?;
        let symbols = data.to_symbols(&self.field)?;
        Ok(symbols
            .chunks(self.nsize)
            .map(|chunk| rs_check(&self.field, chunk, nsym, self.fcr, self.field.generator()))
            .collect())
    }

    /// `maxerrata(errors?, erasures?, verbose?)` (spec §4.7):
    ///
    /// - no args -> `(nsym/2, nsym)`
    /// - `erasures=f` -> `((nsym-f)/2, f)`, failing [`ReedSolomonError::TooManyErasures`] if `f > nsym`
    /// - `errors=e` -> `(e, nsym - 2e)`, failing [`ReedSolomonError::TooManyErrors`] if `2e > nsym`
    pub fn maxerrata(
        &self,
        errors: Option<usize>,
        erasures: Option<usize>,
        verbose: bool,
    ) -> Result<(usize, usize)> {
        let nsym = self.nsym();
        let result = match (errors, erasures) {
            (None, None) => (nsym / 2, nsym),
            (None, Some(f)) => {
                if f > nsym {
                    return Err(ReedSolomonError::TooManyErasures { erasures: f, nsym });
                }
                ((nsym - f) / 2, f)
            }
            (Some(e), None) => {
                if 2 * e > nsym {
                    return Err(ReedSolomonError::TooManyErrors {
                        errors: e,
                        erasures: 0,
                        nsym,
                    });
                }
                (e, nsym - 2 * e)
            }
            (Some(e), Some(f)) => {
                if 2 * e + f > nsym {
                    return Err(ReedSolomonError::TooManyErrors {
                        errors: e,
                        erasures: f,
                        nsym,
                    });
                }
                (e, f)
            }
        };
        if verbose {
            #[cfg(feature = "std")]
            std::eprintln!(
                "maxerrata: up to {} errors and up to {} erasures correctable (nsym={nsym})",
                result.0,
                result.1
            );
        }
        Ok(result)
    }
}

/// `find_prime_polys` re-exported at facade level for callers who only
/// need to pick a `prim` without constructing a codec (spec §4.1).
pub fn find_prime_polys_for(generator: Symbol, c_exp: u32) -> Result<Vec<u32>> {
    find_prime_polys(generator, c_exp, false, false)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_then_decode_round_trips() {
        let rs = RSCodec::new(10, None, None, None, None, None).unwrap();
        let msg: Vec<u8> = b"hello world ".repeat(10);
        let enc: Vec<u8> = rs.encode(&msg, None).unwrap();
        let (dec, full, errata) = rs.decode(&enc, None, &[], false).unwrap();
        assert_eq!(dec, msg);
        assert_eq!(full, enc);
        assert!(errata.is_empty());
    }

    #[test]
    fn scenario_1_flip_then_correct_then_fail() {
        let rs = RSCodec::new(10, None, None, None, None, None).unwrap();
        let msg: Vec<u8> = b"hello world ".repeat(10);
        let mut enc: Vec<u8> = rs.encode(&msg, None).unwrap();
        let n = enc.len();
        // original test uses python negative indices -3, -9; translate to positive
        for &i in &[27usize, n - 3, n - 9, 7, 0] {
            enc[i] = 99;
            let (dec, _, _) = rs.decode(&enc, None, &[], false).unwrap();
            assert_eq!(dec, msg);
        }
        enc[82] = 99;
        assert!(rs.decode(&enc, None, &[], false).is_err());
    }

    #[test]
    fn scenario_2_long_message_two_corruptions() {
        let rs = RSCodec::new(10, None, None, None, None, None).unwrap();
        let msg: Vec<u8> = vec![b'a'; 10_000];
        let mut enc: Vec<u8> = rs.encode(&msg, None).unwrap();
        enc[177] = 99;
        enc[2212] = 88;
        let (dec, _, _) = rs.decode(&enc, None, &[], false).unwrap();
        assert_eq!(dec, msg);
    }

    #[test]
    fn scenario_3_custom_fcr_and_prim_hex_vector() {
        let rs = RSCodec::new(14, None, Some(120), Some(0x187), None, None).unwrap();
        let hexmsg = "08faa123555555c000000354064432c0280e1b4d090cfc04887400\
                       000003500000000e1985ff9c6b33066ca9f43d12e8";
        let encmsg = hex_decode(hexmsg);
        let decmsg: Vec<u8> = encmsg[..34].to_vec();
        let enc: Vec<u8> = rs.encode(&decmsg, None).unwrap();
        assert_eq!(enc, encmsg);
        let (dec, _, _) = rs.decode(&enc, None, &[], false).unwrap();
        assert_eq!(dec, decmsg);
    }

    fn hex_decode(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn check_flags_corrupted_blocks() {
        let rs = RSCodec::new(10, None, None, None, None, None).unwrap();
        let msg: Vec<u8> = b"hello world ".repeat(10);
        let enc: Vec<u8> = rs.encode(&msg, None).unwrap();
        assert_eq!(rs.check(&enc, None).unwrap(), vec![true]);
        let mut corrupted = enc.clone();
        corrupted[0] ^= 0xff;
        assert_eq!(rs.check(&corrupted, None).unwrap(), vec![false]);
    }

    #[test]
    fn maxerrata_matches_spec_table() {
        let rs = RSCodec::new(10, None, None, None, None, None).unwrap();
        assert_eq!(rs.maxerrata(None, None, false).unwrap(), (5, 10));
        assert_eq!(rs.maxerrata(None, Some(4), false).unwrap(), (3, 4));
        assert_eq!(rs.maxerrata(None, Some(10), false).unwrap(), (0, 10));
        assert!(rs.maxerrata(None, Some(11), false).is_err());
        assert_eq!(rs.maxerrata(Some(5), None, false).unwrap(), (5, 0));
        assert!(rs.maxerrata(Some(6), None, false).is_err());
    }

    #[test]
    fn multi_block_erasure_positions_translate_per_block() {
        let rs = RSCodec::new(4, Some(20), None, None, None, None).unwrap();
        let msg: Vec<u8> = (0..64u32).map(|b| (b % 251) as u8).collect();
        let enc: Vec<u8> = rs.encode(&msg, None).unwrap();
        // block size is 20, so position 25 lives in block 1 at local index 5
        let mut corrupted = enc.clone();
        corrupted[25] = 0;
        let (dec, full, errata) = rs.decode(&corrupted, None, &[25], true).unwrap();
        assert_eq!(dec, msg);
        assert_eq!(full, enc);
        assert!(errata.contains(&25));
    }

    #[test]
    fn single_gen_true_rejects_other_nsym() {
        let rs = RSCodec::new(10, None, None, None, None, None).unwrap();
        let data: Vec<u8> = vec![1, 2, 3];
        assert!(rs.encode(&data, Some(8)).is_err());
    }

    #[test]
    fn family_supports_variable_nsym_matching_dedicated_instance() {
        let family_rs =
            RSCodec::with_options(20, None, None, None, None, None, false, false).unwrap();
        let dedicated_rs = RSCodec::new(12, None, None, None, None, None).unwrap();
        let msg: Vec<u8> = (0..200u32).map(|b| (b % 251) as u8).collect();
        let via_family: Vec<u8> = family_rs.encode(&msg, Some(12)).unwrap();
        let via_dedicated: Vec<u8> = dedicated_rs.encode(&msg, None).unwrap();
        assert_eq!(via_family, via_dedicated);
    }

    #[test]
    fn nofsynd_flag_produces_identical_results() {
        let forney_rs = RSCodec::new(10, None, None, None, None, None).unwrap();
        let nofsynd_rs =
            RSCodec::with_options(10, None, None, None, None, None, true, true).unwrap();
        let msg: Vec<u8> = b"hello world ".repeat(10);
        let mut enc: Vec<u8> = forney_rs.encode(&msg, None).unwrap();
        enc[5] = 0xaa;
        enc[50] = 0xbb;
        let via_forney = forney_rs.decode(&enc, None, &[], false).unwrap();
        let via_nofsynd = nofsynd_rs.decode(&enc, None, &[], false).unwrap();
        assert_eq!(via_forney, via_nofsynd);
    }

    #[test]
    fn auto_prim_selection_from_c_exp() {
        let rs = RSCodec::new(4, None, None, None, None, Some(4)).unwrap();
        assert_eq!(rs.field().prim(), 0x13);
    }
}
