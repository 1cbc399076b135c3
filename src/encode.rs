//! Encoder (spec §4.5).

extern crate alloc;
use alloc::vec::Vec;

use crate::error::{ReedSolomonError, Result};
use crate::field::{Field, Symbol};
use crate::generator::rs_generator_poly;
use crate::poly::poly_div;

/// `rs_encode_msg(msg, nsym, fcr, generator, gen)`.
///
/// `len(msg) + nsym` must be `<= field_charac`, else
/// [`ReedSolomonError::MessageTooLong`]. If `gen` is `None` it is derived
/// from `nsym`/`fcr`/`generator`. Returns the systematic codeword: `msg`
/// followed by the `nsym` parity coefficients (the remainder of
/// `msg * x^nsym` divided by `g(x)`).
pub fn rs_encode_msg(
    field: &Field,
    msg: &[Symbol],
    nsym: usize,
    fcr: u32,
    generator: Symbol,
    gen: Option<&[Symbol]>,
) -> Result<Vec<Symbol>> {
    if msg.len() + nsym > field.characteristic() {
        return Err(ReedSolomonError::MessageTooLong {
            msg_len: msg.len(),
            nsym,
            field_charac: field.characteristic(),
        });
    }

    let owned_gen;
    let gen = match gen {
        Some(g) => g,
        None => {
            owned_gen = rs_generator_poly(field, nsym, fcr, generator);
            &owned_gen
        }
    };

    // dividend = msg * x^nsym, i.e. msg with nsym zero coefficients appended
    let mut dividend = msg.to_vec();
    dividend.extend(core::iter::repeat(0 as Symbol).take(nsym));

    let (_, remainder) = poly_div(field, &dividend, gen);

    let mut codeword = msg.to_vec();
    codeword.extend_from_slice(&remainder);
    Ok(codeword)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::decode::rs_calc_syndromes;

    #[test]
    fn systematic_prefix_is_unchanged() {
        let f = Field::gf256();
        let msg: Vec<Symbol> = (0..223).collect();
        let codeword = rs_encode_msg(&f, &msg, 32, 0, f.generator(), None).unwrap();
        assert_eq!(codeword.len(), 255);
        assert_eq!(&codeword[..223], &msg[..]);
    }

    #[test]
    fn encoded_message_has_zero_syndromes() {
        let f = Field::gf256();
        let msg: Vec<Symbol> = (0..223).collect();
        let codeword = rs_encode_msg(&f, &msg, 32, 0, f.generator(), None).unwrap();
        let synd = rs_calc_syndromes(&f, &codeword, 32, 0, f.generator());
        assert!(synd[1..].iter().all(|&s| s == 0));
    }

    #[test]
    fn too_long_message_is_rejected() {
        let f = Field::gf256();
        let msg: Vec<Symbol> = (0..250).collect();
        let err = rs_encode_msg(&f, &msg, 32, 0, f.generator(), None).unwrap_err();
        assert_eq!(
            err,
            ReedSolomonError::MessageTooLong {
                msg_len: 250,
                nsym: 32,
                field_charac: 255,
            }
        );
    }

    #[test]
    fn encodes_with_nonzero_fcr_and_custom_prim() {
        // spec scenario 3: RSCodec(14, fcr=120, prim=0x187), 34-byte message
        let f = Field::new(0x187, 2, 8).unwrap();
        let msg: Vec<Symbol> = (0..34u32).map(|b| b as Symbol).collect();
        let codeword = rs_encode_msg(&f, &msg, 14, 120, f.generator(), None).unwrap();
        assert_eq!(codeword.len(), 48);
        let synd = rs_calc_syndromes(&f, &codeword, 14, 120, f.generator());
        assert!(synd[1..].iter().all(|&s| s == 0));
    }
}
