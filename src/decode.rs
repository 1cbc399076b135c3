//! Decoder (spec §4.6).
//!
//! All sub-operations are pure functions of an explicit `&Field`, mostly
//! direct generalizations of the teacher's `rs` template (syndromes,
//! Forney syndromes, Berlekamp-Massey, Chien search, Forney magnitudes)
//! to a runtime field, arbitrary `fcr`, and the errors-and-erasures case
//! (erasure locator seeding for the `nofsynd` orchestration).

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::{ReedSolomonError, Result};
use crate::field::{Field, Symbol};
use crate::gf::{gf_add, gf_div, gf_inverse, gf_mul, gf_pow, gf_sub};
use crate::poly::{poly_add, poly_eval, poly_mul, poly_scale};

/// Coefficient position (exponent of the location number `alpha^p`) for
/// a codeword index counted from the left, in a codeword of length `n`.
#[inline]
fn coef_pos(n: usize, codeword_index: usize) -> usize {
    n - 1 - codeword_index
}

/// `rs_calc_syndromes(msg, nsym, fcr, generator)`.
///
/// Returns a vector of length `nsym + 1` with `s[0] = 0` by convention
/// and `s[i+1] = msg evaluated at alpha^(fcr+i)`. A codeword is valid iff
/// `s[1..]` are all zero.
pub fn rs_calc_syndromes(field: &Field, msg: &[Symbol], nsym: usize, fcr: u32, generator: Symbol) -> Vec<Symbol> {
    let mut s = vec![0 as Symbol; nsym + 1];
    for i in 0..nsym {
        let root = gf_pow(field, generator, fcr as i64 + i as i64);
        s[i + 1] = poly_eval(field, msg, root);
    }
    s
}

/// `rs_check(msg, nsym, ...) = max(s[1..]) == 0`.
pub fn rs_check(field: &Field, msg: &[Symbol], nsym: usize, fcr: u32, generator: Symbol) -> bool {
    rs_calc_syndromes(field, msg, nsym, fcr, generator)[1..]
        .iter()
        .all(|&s| s == 0)
}

/// `rs_find_errata_locator(coef_positions)`: `Lambda(x) = prod (1 + alpha^p . x)`
/// over the given coefficient positions — each factor has its roots at
/// `x = alpha^-p`, matching the `X_i^-1` convention the Forney evaluation
/// below expects.
pub fn rs_find_errata_locator(field: &Field, coef_positions: &[usize], generator: Symbol) -> Vec<Symbol> {
    let mut locator = vec![1 as Symbol];
    for &p in coef_positions {
        let root = gf_pow(field, generator, p as i64);
        locator = poly_mul(field, &locator, &[root, 1]);
    }
    locator
}

/// `rs_forney_syndromes(syndromes, erasure_positions, n)`: removes the
/// effect of known erasures from the syndromes so Berlekamp-Massey only
/// has to find the unknown errors.
///
/// `syndromes` here is the `nsym`-length syndrome vector (i.e. without
/// the leading `s[0] = 0` convention of [`rs_calc_syndromes`]).
pub fn rs_forney_syndromes(
    field: &Field,
    syndromes: &[Symbol],
    erasure_positions: &[usize],
    n: usize,
    generator: Symbol,
) -> Vec<Symbol> {
    let mut fsynd = syndromes.to_vec();
    for &j in erasure_positions {
        let x = gf_pow(field, generator, coef_pos(n, j) as i64);
        for i in 0..fsynd.len().saturating_sub(1) {
            fsynd[i] = gf_add(gf_mul(field, fsynd[i], x), fsynd[i + 1]);
        }
    }
    let keep = fsynd.len().saturating_sub(erasure_positions.len());
    fsynd.truncate(keep);
    fsynd
}

/// `rs_find_error_locator(synd, nsym, erase_count)`: Berlekamp-Massey.
///
/// `synd` is the `nsym`-length (or, for the `nofsynd` path, full
/// `nsym`-length original) syndrome vector. `erase_loc`, when supplied,
/// seeds the iteration with a known errata locator (the `nofsynd`
/// orchestration, §4.6) so Berlekamp-Massey only has to extend it to
/// cover the unknown errors. Fails with [`ReedSolomonError::TooManyErrors`]
/// if `2*deg(locator) + erase_count > nsym` at the end.
pub fn rs_find_error_locator(
    field: &Field,
    synd: &[Symbol],
    nsym: usize,
    erase_loc: Option<&[Symbol]>,
    erase_count: usize,
) -> Result<Vec<Symbol>> {
    let (mut err_loc, mut old_loc) = match erase_loc {
        Some(el) => (el.to_vec(), el.to_vec()),
        None => (vec![1 as Symbol], vec![1 as Symbol]),
    };

    let synd_shift = synd.len().saturating_sub(nsym);

    for i in 0..nsym.saturating_sub(erase_count) {
        let k = if erase_loc.is_some() {
            erase_count + i + synd_shift
        } else {
            i + synd_shift
        };
        let mut delta = synd[k];
        for j in 1..err_loc.len() {
            delta = gf_add(delta, gf_mul(field, err_loc[err_loc.len() - 1 - j], synd[k - j]));
        }
        old_loc.push(0);

        if delta != 0 {
            if old_loc.len() > err_loc.len() {
                let new_loc = poly_scale(field, &old_loc, delta);
                let delta_inv = gf_inverse(field, delta)?;
                old_loc = poly_scale(field, &err_loc, delta_inv);
                err_loc = new_loc;
            }
            let scaled_old = poly_scale(field, &old_loc, delta);
            err_loc = poly_add(&err_loc, &scaled_old);
        }
    }

    let leading_zeros = err_loc.iter().take_while(|&&x| x == 0).count();
    err_loc.drain(0..leading_zeros);

    let errs = err_loc.len() - 1;
    if errs.saturating_sub(erase_count) * 2 + erase_count > nsym {
        return Err(ReedSolomonError::TooManyErrors {
            errors: errs.saturating_sub(erase_count),
            erasures: erase_count,
            nsym,
        });
    }
    Ok(err_loc)
}

/// `rs_find_errors(locator, n)`: Chien search. Brute-forces
/// `x = alpha^0 .. alpha^(n-1)`; roots (found via evaluating at the
/// reciprocal, per the errata locator's `1 + X_i.x` convention, which
/// vanishes at `x = X_i^-1`) give error coefficient positions, translated
/// back to codeword indices. Fails with
/// [`ReedSolomonError::TooManyErrors`] if the number of roots found does
/// not match `deg(locator)`.
pub fn rs_find_errors(field: &Field, locator: &[Symbol], n: usize, generator: Symbol) -> Result<Vec<usize>> {
    let expected = locator.len() - 1;
    let mut positions = Vec::new();
    for j in 0..n {
        let xj = gf_pow(field, generator, coef_pos(n, j) as i64);
        let xj_inv = gf_inverse(field, xj)?;
        if poly_eval(field, locator, xj_inv) == 0 {
            positions.push(j);
        }
    }
    if positions.len() != expected {
        return Err(ReedSolomonError::TooManyErrors {
            errors: positions.len(),
            erasures: 0,
            nsym: 0,
        });
    }
    Ok(positions)
}

/// `rs_find_error_evaluator(full_synd, locator)`:
/// `Omega(x) = (Synd(x) * Lambda(x)) mod x^(deg(Lambda)+1)`.
///
/// `full_synd` is the full `nsym+1`-length syndrome vector *including* the
/// leading `s[0] = 0` convention term of [`rs_calc_syndromes`] — dropping
/// it here would shift every subsequent coefficient and desynchronize the
/// Forney evaluation below (spec §4.6).
fn find_error_evaluator(field: &Field, full_synd: &[Symbol], locator: &[Symbol]) -> Vec<Symbol> {
    let keep = locator.len(); // deg(locator) + 1
    let mut reversed_synd = full_synd.to_vec();
    reversed_synd.reverse();
    let product = poly_mul(field, &reversed_synd, locator);
    product[product.len() - keep..].to_vec()
}

/// Forney magnitudes for every position in `errata_codeword_positions`,
/// given the combined errata locator and the full (unreduced) syndromes.
fn find_error_magnitudes(
    field: &Field,
    full_synd: &[Symbol],
    locator: &[Symbol],
    errata_codeword_positions: &[usize],
    n: usize,
    fcr: u32,
    generator: Symbol,
) -> Result<Vec<Symbol>> {
    let omega = find_error_evaluator(field, full_synd, locator);

    // location numbers X_i = alpha^(coefficient position) for every
    // errata position, in the same order as errata_codeword_positions.
    let x: Vec<Symbol> = errata_codeword_positions
        .iter()
        .map(|&j| gf_pow(field, generator, coef_pos(n, j) as i64))
        .collect();

    let mut magnitudes = Vec::with_capacity(x.len());
    for (i, &xi) in x.iter().enumerate() {
        let xi_inv = gf_inverse(field, xi)?;

        // err_loc_prime = prod_{j != i} (1 - Xi^-1 . Xj) -- the product
        // form of the errata locator's derivative evaluated at Xi^-1.
        let mut err_loc_prime: Symbol = 1;
        for (j, &xj) in x.iter().enumerate() {
            if j != i {
                err_loc_prime = gf_mul(field, err_loc_prime, gf_sub(1, gf_mul(field, xi_inv, xj)));
            }
        }
        if err_loc_prime == 0 {
            return Err(ReedSolomonError::CouldNotCorrect);
        }

        let omega_eval = poly_eval(field, &omega, xi_inv);
        // adjust to fcr: the syndromes are evaluated at alpha^(fcr+i),
        // which folds an extra X_i^fcr factor into every syndrome.
        let y = gf_mul(field, gf_pow(field, xi, 1 - fcr as i64), omega_eval);
        magnitudes.push(gf_div(field, y, err_loc_prime)?);
    }
    Ok(magnitudes)
}

/// `rs_correct_errata(msg, full_synd, errata_positions)`: applies the
/// Forney magnitudes via XOR, in place. `full_synd` is the `nsym+1`-length
/// syndrome vector including the leading `s[0] = 0` term (spec §4.6).
pub fn rs_correct_errata(
    field: &Field,
    msg: &mut [Symbol],
    full_synd: &[Symbol],
    errata_positions: &[usize],
    fcr: u32,
    generator: Symbol,
) -> Result<()> {
    if errata_positions.is_empty() {
        return Ok(());
    }
    let n = msg.len();
    let coef_positions: Vec<usize> = errata_positions.iter().map(|&p| coef_pos(n, p)).collect();
    let locator = rs_find_errata_locator(field, &coef_positions, generator);
    let magnitudes = find_error_magnitudes(field, full_synd, &locator, errata_positions, n, fcr, generator)?;
    for (&pos, magnitude) in errata_positions.iter().zip(magnitudes) {
        msg[pos] = gf_add(msg[pos], magnitude);
    }
    Ok(())
}

fn validate_erasures(erase_pos: &[usize], len: usize, nsym: usize) -> Result<()> {
    for &p in erase_pos {
        if p >= len {
            return Err(ReedSolomonError::InvalidErasurePosition { position: p, len });
        }
    }
    let mut sorted = erase_pos.to_vec();
    sorted.sort_unstable();
    if sorted.windows(2).any(|w| w[0] == w[1]) {
        return Err(ReedSolomonError::InvalidErasurePosition {
            position: sorted
                .windows(2)
                .find(|w| w[0] == w[1])
                .map(|w| w[0])
                .unwrap_or(0),
            len,
        });
    }
    if erase_pos.len() > nsym {
        return Err(ReedSolomonError::TooManyErasures {
            erasures: erase_pos.len(),
            nsym,
        });
    }
    Ok(())
}

fn dedupe_sorted(mut positions: Vec<usize>) -> Vec<usize> {
    positions.sort_unstable();
    positions.dedup();
    positions
}

/// Top-level decode with the Forney-syndrome orchestration (spec §4.6,
/// "With Forney syndrome"): erase-pos -> erasure locator -> Forney
/// syndromes -> Berlekamp-Massey on the Forney syndromes -> Chien search
/// -> merge positions -> magnitudes -> correct -> verify.
///
/// Returns `(payload, corrected codeword, sorted unique errata positions)`.
pub fn rs_correct_msg(
    field: &Field,
    msg: &[Symbol],
    nsym: usize,
    fcr: u32,
    generator: Symbol,
    erase_pos: &[usize],
    only_erasures: bool,
) -> Result<(Vec<Symbol>, Vec<Symbol>, Vec<usize>)> {
    if msg.len() > field.characteristic() {
        return Err(ReedSolomonError::MessageTooLong {
            msg_len: msg.len(),
            nsym: 0,
            field_charac: field.characteristic(),
        });
    }
    validate_erasures(erase_pos, msg.len(), nsym)?;

    let mut msg_out = msg.to_vec();
    for &p in erase_pos {
        msg_out[p] = 0;
    }

    let synd_full = rs_calc_syndromes(field, &msg_out, nsym, fcr, generator);
    if synd_full[1..].iter().all(|&s| s == 0) {
        let payload = msg_out[..msg_out.len() - nsym].to_vec();
        let errata = dedupe_sorted(erase_pos.to_vec());
        return Ok((payload, msg_out, errata));
    }

    let synd = &synd_full[1..];

    let mut errata_positions = erase_pos.to_vec();
    if !only_erasures {
        let fsynd = rs_forney_syndromes(field, synd, erase_pos, msg_out.len(), generator);
        let err_loc = rs_find_error_locator(field, &fsynd, nsym, None, erase_pos.len())?;
        let err_pos = rs_find_errors(field, &err_loc, msg_out.len(), generator)?;
        errata_positions.extend(err_pos);
    }
    let errata_positions = dedupe_sorted(errata_positions);

    rs_correct_errata(field, &mut msg_out, &synd_full, &errata_positions, fcr, generator)?;

    let verify = rs_calc_syndromes(field, &msg_out, nsym, fcr, generator);
    if verify[1..].iter().any(|&s| s != 0) {
        return Err(ReedSolomonError::CouldNotCorrect);
    }

    let payload = msg_out[..msg_out.len() - nsym].to_vec();
    Ok((payload, msg_out, errata_positions))
}

/// Top-level decode without a precomputed Forney syndrome (spec §4.6,
/// `_nofsynd`): builds a combined errata locator from the erasures and
/// runs Berlekamp-Massey on the full syndromes with `erase_count` seeded,
/// rather than reducing the syndromes first. Kept for cross-validation
/// against [`rs_correct_msg`] (§14 of `SPEC_FULL.md`).
pub fn rs_correct_msg_nofsynd(
    field: &Field,
    msg: &[Symbol],
    nsym: usize,
    fcr: u32,
    generator: Symbol,
    erase_pos: &[usize],
    only_erasures: bool,
) -> Result<(Vec<Symbol>, Vec<Symbol>, Vec<usize>)> {
    if msg.len() > field.characteristic() {
        return Err(ReedSolomonError::MessageTooLong {
            msg_len: msg.len(),
            nsym: 0,
            field_charac: field.characteristic(),
        });
    }
    validate_erasures(erase_pos, msg.len(), nsym)?;

    let mut msg_out = msg.to_vec();
    for &p in erase_pos {
        msg_out[p] = 0;
    }

    let synd_full = rs_calc_syndromes(field, &msg_out, nsym, fcr, generator);
    if synd_full[1..].iter().all(|&s| s == 0) {
        let payload = msg_out[..msg_out.len() - nsym].to_vec();
        let errata = dedupe_sorted(erase_pos.to_vec());
        return Ok((payload, msg_out, errata));
    }

    let synd = &synd_full[1..];

    let n = msg_out.len();
    let erase_count = erase_pos.len();
    let erase_coef_positions: Vec<usize> = erase_pos.iter().map(|&p| coef_pos(n, p)).collect();
    let erase_loc = rs_find_errata_locator(field, &erase_coef_positions, generator);

    let errata_positions = if only_erasures {
        dedupe_sorted(erase_pos.to_vec())
    } else {
        let err_loc = rs_find_error_locator(field, synd, nsym, Some(&erase_loc), erase_count)?;
        let found = rs_find_errors(field, &err_loc, n, generator)?;
        let mut combined = found;
        combined.extend_from_slice(erase_pos);
        dedupe_sorted(combined)
    };

    rs_correct_errata(field, &mut msg_out, &synd_full, &errata_positions, fcr, generator)?;

    let verify = rs_calc_syndromes(field, &msg_out, nsym, fcr, generator);
    if verify[1..].iter().any(|&s| s != 0) {
        return Err(ReedSolomonError::CouldNotCorrect);
    }

    let payload = msg_out[..msg_out.len() - nsym].to_vec();
    Ok((payload, msg_out, errata_positions))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::encode::rs_encode_msg;

    fn corrupt(codeword: &mut [Symbol], positions: &[usize], field_size: usize) {
        for &p in positions {
            codeword[p] = (codeword[p] + 1) % field_size as Symbol;
        }
    }

    #[test]
    fn decode_clean_codeword_round_trips() {
        let f = Field::gf256();
        let msg: Vec<Symbol> = (0..223).collect();
        let codeword = rs_encode_msg(&f, &msg, 32, 0, f.generator(), None).unwrap();
        let (payload, full, errata) = rs_correct_msg(&f, &codeword, 32, 0, f.generator(), &[], false).unwrap();
        assert_eq!(payload, msg);
        assert_eq!(full, codeword);
        assert!(errata.is_empty());
    }

    #[test]
    fn decode_corrects_errors_up_to_budget() {
        let f = Field::gf256();
        let msg: Vec<Symbol> = (0..223).collect();
        let codeword = rs_encode_msg(&f, &msg, 32, 0, f.generator(), None).unwrap();
        let mut corrupted = codeword.clone();
        corrupt(&mut corrupted, &[0, 50, 100, 222, 254], 256);
        let (payload, full, errata) =
            rs_correct_msg(&f, &corrupted, 32, 0, f.generator(), &[], false).unwrap();
        assert_eq!(payload, msg);
        assert_eq!(full, codeword);
        assert_eq!(errata.len(), 5);
    }

    #[test]
    fn decode_corrects_erasures_up_to_nsym() {
        let f = Field::gf256();
        let msg: Vec<Symbol> = (0..223).collect();
        let codeword = rs_encode_msg(&f, &msg, 32, 0, f.generator(), None).unwrap();
        let mut corrupted = codeword.clone();
        let positions: Vec<usize> = (0..32).collect();
        corrupt(&mut corrupted, &positions, 256);
        let (payload, full, errata) =
            rs_correct_msg(&f, &corrupted, 32, 0, f.generator(), &positions, true).unwrap();
        assert_eq!(payload, msg);
        assert_eq!(full, codeword);
        assert_eq!(errata, positions);
    }

    #[test]
    fn decode_corrects_mixed_errors_and_erasures() {
        let f = Field::gf256();
        let msg: Vec<Symbol> = (0..223).collect();
        let codeword = rs_encode_msg(&f, &msg, 32, 0, f.generator(), None).unwrap();
        let mut corrupted = codeword.clone();
        let erasures: Vec<usize> = (0..20).collect(); // f=20
        corrupt(&mut corrupted, &erasures, 256);
        let errors = [230usize, 231, 232, 233, 234, 235]; // e=6, 2*6+20=32<=32
        corrupt(&mut corrupted, &errors, 256);
        let (payload, full, errata) =
            rs_correct_msg(&f, &corrupted, 32, 0, f.generator(), &erasures, false).unwrap();
        assert_eq!(payload, msg);
        assert_eq!(full, codeword);
        for &e in &erasures {
            assert!(errata.contains(&e));
        }
    }

    #[test]
    fn erasure_always_reported_even_if_not_actually_corrupted() {
        let f = Field::gf256();
        let msg: Vec<Symbol> = (0..223).collect();
        let codeword = rs_encode_msg(&f, &msg, 32, 0, f.generator(), None).unwrap();
        // mark position 5 as erased even though it was never corrupted
        let (payload, full, errata) =
            rs_correct_msg(&f, &codeword, 32, 0, f.generator(), &[5], false).unwrap();
        assert_eq!(payload, msg);
        assert_eq!(full, codeword);
        assert!(errata.contains(&5));
    }

    #[test]
    fn too_many_errors_reported_as_uncorrectable() {
        let f = Field::gf256();
        let msg: Vec<Symbol> = (0..223).collect();
        let codeword = rs_encode_msg(&f, &msg, 32, 0, f.generator(), None).unwrap();
        let mut corrupted = codeword.clone();
        let positions: Vec<usize> = (0..17).collect(); // e=17, 2*17=34 > 32
        corrupt(&mut corrupted, &positions, 256);
        let result = rs_correct_msg(&f, &corrupted, 32, 0, f.generator(), &[], false);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_erasure_position_is_rejected() {
        let f = Field::gf256();
        let msg: Vec<Symbol> = (0..223).collect();
        let codeword = rs_encode_msg(&f, &msg, 32, 0, f.generator(), None).unwrap();
        let result = rs_correct_msg(&f, &codeword, 32, 0, f.generator(), &[255], false);
        assert_eq!(
            result,
            Err(ReedSolomonError::InvalidErasurePosition { position: 255, len: 255 })
        );
    }

    #[test]
    fn duplicate_erasure_position_is_rejected() {
        let f = Field::gf256();
        let msg: Vec<Symbol> = (0..223).collect();
        let codeword = rs_encode_msg(&f, &msg, 32, 0, f.generator(), None).unwrap();
        let result = rs_correct_msg(&f, &codeword, 32, 0, f.generator(), &[3, 3], false);
        assert!(matches!(result, Err(ReedSolomonError::InvalidErasurePosition { .. })));
    }

    #[test]
    fn too_many_erasures_rejected_before_any_work() {
        let f = Field::gf256();
        let msg: Vec<Symbol> = (0..223).collect();
        let codeword = rs_encode_msg(&f, &msg, 32, 0, f.generator(), None).unwrap();
        let positions: Vec<usize> = (0..33).collect();
        let result = rs_correct_msg(&f, &codeword, 32, 0, f.generator(), &positions, false);
        assert_eq!(
            result,
            Err(ReedSolomonError::TooManyErasures { erasures: 33, nsym: 32 })
        );
    }

    #[test]
    fn nofsynd_path_agrees_with_forney_syndrome_path() {
        let f = Field::gf256();
        let msg: Vec<Symbol> = (0..223).collect();
        let codeword = rs_encode_msg(&f, &msg, 32, 0, f.generator(), None).unwrap();
        let mut corrupted = codeword.clone();
        let erasures: Vec<usize> = (0..10).collect();
        corrupt(&mut corrupted, &erasures, 256);
        let errors = [100usize, 150, 200];
        corrupt(&mut corrupted, &errors, 256);

        let via_forney = rs_correct_msg(&f, &corrupted, 32, 0, f.generator(), &erasures, false).unwrap();
        let via_nofsynd =
            rs_correct_msg_nofsynd(&f, &corrupted, 32, 0, f.generator(), &erasures, false).unwrap();
        assert_eq!(via_forney.0, via_nofsynd.0);
        assert_eq!(via_forney.1, via_nofsynd.1);
        assert_eq!(via_forney.2, via_nofsynd.2);
    }

    #[test]
    fn nonzero_fcr_and_custom_prim_round_trip() {
        // spec scenario 3: RSCodec(14, fcr=120, prim=0x187)
        let f = Field::new(0x187, 2, 8).unwrap();
        let msg: Vec<Symbol> = (0..34u32).map(|b| b as Symbol).collect();
        let codeword = rs_encode_msg(&f, &msg, 14, 120, f.generator(), None).unwrap();
        let mut corrupted = codeword.clone();
        corrupt(&mut corrupted, &[0, 10, 20, 30, 40, 47, 5], 256); // 7 = floor(14/2)
        let (payload, full, _) =
            rs_correct_msg(&f, &corrupted, 14, 120, f.generator(), &[], false).unwrap();
        assert_eq!(payload, msg);
        assert_eq!(full, codeword);

        let mut too_corrupted = codeword.clone();
        corrupt(&mut too_corrupted, &[0, 10, 20, 30, 40, 47, 5, 15], 256); // 8 > floor(14/2)
        assert!(rs_correct_msg(&f, &too_corrupted, 14, 120, f.generator(), &[], false).is_err());
    }
}
