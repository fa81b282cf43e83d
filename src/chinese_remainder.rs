use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::longest_path::LongestPath;
use crate::polynomial::Polynomial;
use crate::transfer::transfer;
use crate::tree_decomposition::Bag;
use crate::zp::{self, mod_inverse, Zp};

/// 2^32 直下の素数表。係数の復元はこの順に法を増やしていく。
pub const PRIMES: [u64; 18] = [
    4294967291, 4294967279, 4294967231, 4294967197, 4294967189, 4294967161,
    4294967143, 4294967111, 4294967087, 4294967029, 4294966997, 4294966981,
    4294966943, 4294966927, 4294966909, 4294966877, 4294966829, 4294966813,
];

/// 各素数での部分結果から整数係数多項式を復元する。
/// q_i = (P/p_i)・((P/p_i)^{-1} mod p_i) を係数に掛けて足し合わせ、
/// 各係数を対称区間 (-P/2, P/2] に還元する。
pub fn crt_combine(partials: &[Polynomial<BigInt>], primes: &[u64]) -> Polynomial<BigInt> {
    assert_eq!(partials.len(), primes.len());

    let pp: BigInt = primes.iter().map(|&p| BigInt::from(p)).product();
    let mut acc = Polynomial::<BigInt>::zero();
    for (r, &p) in partials.iter().zip(primes) {
        let m = &pp / p;
        let m_mod = (&m % p).to_u64().unwrap();
        let q = &m * BigInt::from(mod_inverse(m_mod, p));
        acc += &(r.clone() * q);
    }

    let limit: BigInt = &pp >> 1;
    let coeffs: Vec<BigInt> = acc
        .iter()
        .map(|c| {
            let mut c = c % &pp;
            if c > limit {
                c -= &pp;
            }
            c
        })
        .collect();
    Polynomial::from_coeffs(coeffs)
}

/// 素数を 1 つずつ増やしながらパイプライン全体を回し、
/// 復元結果が直前の反復と一致したら打ち切って返す。
/// 部分結果は素数ごとに stderr へ出力する。
/// 素数表を使い切っても収束しなければ不変条件違反としてパニックする。
pub fn chinese_remainder(root: &Bag) -> Polynomial<BigInt> {
    let mut partials: Vec<Polynomial<BigInt>> = Vec::new();
    let mut result = Polynomial::<BigInt>::zero();

    for (k, &p) in PRIMES.iter().enumerate() {
        zp::set_modulus(p);
        let op = LongestPath::<Polynomial<Zp>>::default();
        let w: Polynomial<Zp> = transfer(&op, root);
        let lifted = w.map(|c| BigInt::from(c.value()));
        eprintln!("result (mod {})\t: {}", p, lifted);
        partials.push(lifted);

        let next = crt_combine(&partials, &PRIMES[..=k]);
        if k > 0 && next == result {
            return next;
        }
        result = next;
    }
    panic!(
        "chinese remainder did not converge within {} primes",
        PRIMES.len()
    );
}

/// CRT を使わず、多倍長整数係数の多項式で直接転送する。
pub fn transfer_direct(root: &Bag) -> Polynomial<BigInt> {
    let op = LongestPath::<Polynomial<BigInt>>::default();
    transfer(&op, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    /// c の p を法とする非負剰余
    fn residue(c: &BigInt, p: u64) -> BigInt {
        let r = c % p;
        if r < BigInt::zero() {
            r + p
        } else {
            r
        }
    }

    fn partials_for(target: &Polynomial<BigInt>, primes: &[u64]) -> Vec<Polynomial<BigInt>> {
        primes
            .iter()
            .map(|&p| target.map(|c| residue(c, p)))
            .collect()
    }

    #[test]
    fn test_single_prime_small_values() {
        let target = Polynomial::from_coeffs(vec![BigInt::from(3), BigInt::from(5)]);
        let primes = &PRIMES[..1];
        let combined = crt_combine(&partials_for(&target, primes), primes);
        assert_eq!(combined, target);
    }

    #[test]
    fn test_symmetric_range_negative() {
        // 剰余 p-1 は -1 に還元される
        let p = PRIMES[0];
        let partial = Polynomial::from_coeffs(vec![BigInt::from(p - 1)]);
        let combined = crt_combine(&[partial], &PRIMES[..1]);
        assert_eq!(combined, Polynomial::constant(BigInt::from(-1)));
    }

    #[test]
    fn test_two_primes_reconstruct() {
        let target = Polynomial::from_coeffs(vec![
            BigInt::from(1234567890123u64),
            BigInt::from(-987654321987i64),
        ]);
        let primes = &PRIMES[..2];
        let combined = crt_combine(&partials_for(&target, primes), primes);
        assert_eq!(combined, target);
    }

    #[test]
    fn test_large_coefficients_reconstruct() {
        // 約 200 ビットの係数（正負とも）を 8 素数で復元する
        let big = (BigInt::one() << 200u32) + 12345;
        let neg = -(BigInt::one() << 199u32) - 777;
        let target = Polynomial::from_coeffs(vec![big, BigInt::from(42), neg]);
        let primes = &PRIMES[..8];
        let combined = crt_combine(&partials_for(&target, primes), primes);
        assert_eq!(combined, target);
    }

    #[test]
    fn test_idempotent_after_convergence() {
        // 収束後に素数を足しても結果は変わらない
        let big = (BigInt::one() << 200u32) - 99999;
        let target = Polynomial::from_coeffs(vec![BigInt::from(7), big]);
        let combined8 = crt_combine(&partials_for(&target, &PRIMES[..8]), &PRIMES[..8]);
        let combined9 = crt_combine(&partials_for(&target, &PRIMES[..9]), &PRIMES[..9]);
        assert_eq!(combined8, combined9);
        assert_eq!(combined8, target);
    }
}
