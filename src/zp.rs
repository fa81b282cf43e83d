use std::cell::Cell;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{One, Zero};

thread_local! {
    /// 現在の法（スレッドローカル）。CRT の各反復が開始時に設定する。
    /// パイプライン実行中に変更してはならない。
    static MODULUS: Cell<u64> = const { Cell::new(0) };
}

/// 法 p を設定する。p は 2^32 未満の素数であること。
pub fn set_modulus(p: u64) {
    assert!(p >= 2 && p <= u32::MAX as u64, "modulus out of range: {}", p);
    MODULUS.with(|m| m.set(p));
}

/// 現在の法を返す。未設定ならパニックする。
pub fn modulus() -> u64 {
    let p = MODULUS.with(|m| m.get());
    assert!(p != 0, "modulus not set");
    p
}

/// 拡張ユークリッド互除法: g = gcd(a, b) と ax + by = g を満たす (g, x, y)
fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    if b == 0 {
        (a, 1, 0)
    } else {
        let (g, x, y) = extended_gcd(b, a % b);
        (g, y, x - (a / b) * y)
    }
}

/// a の法 m での逆元。gcd(a, m) != 1（特に a = 0）ならパニックする。
pub fn mod_inverse(a: u64, m: u64) -> u64 {
    let (g, x, _) = extended_gcd(a as i128, m as i128);
    assert!(g == 1, "inverse does not exist: {} (mod {})", a, m);
    x.rem_euclid(m as i128) as u64
}

/// ℤ/pℤ の元。値は常に [0, p) に正規化して保持する。
/// p はスレッドローカルな法で、要素の構築前に `set_modulus` で設定すること。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Zp {
    v: u64,
}

impl Zp {
    pub fn new(v: u64) -> Self {
        Zp { v: v % modulus() }
    }

    /// 代表元 [0, p) を返す
    pub fn value(self) -> u64 {
        self.v
    }

    /// 乗法逆元。0 の逆元はパニックする。
    pub fn inverse(self) -> Zp {
        Zp {
            v: mod_inverse(self.v, modulus()),
        }
    }
}

impl Add for Zp {
    type Output = Zp;
    fn add(self, rhs: Zp) -> Zp {
        Zp {
            v: (self.v + rhs.v) % modulus(),
        }
    }
}

impl Sub for Zp {
    type Output = Zp;
    fn sub(self, rhs: Zp) -> Zp {
        let p = modulus();
        Zp {
            v: (self.v + p - rhs.v) % p,
        }
    }
}

impl Mul for Zp {
    type Output = Zp;
    fn mul(self, rhs: Zp) -> Zp {
        // p < 2^32 なので積は u64 に収まる
        Zp {
            v: self.v * rhs.v % modulus(),
        }
    }
}

impl Neg for Zp {
    type Output = Zp;
    fn neg(self) -> Zp {
        let p = modulus();
        Zp { v: (p - self.v) % p }
    }
}

impl AddAssign for Zp {
    fn add_assign(&mut self, rhs: Zp) {
        *self = *self + rhs;
    }
}

impl SubAssign for Zp {
    fn sub_assign(&mut self, rhs: Zp) {
        *self = *self - rhs;
    }
}

impl MulAssign for Zp {
    fn mul_assign(&mut self, rhs: Zp) {
        *self = *self * rhs;
    }
}

impl Zero for Zp {
    fn zero() -> Self {
        Zp { v: 0 }
    }

    fn is_zero(&self) -> bool {
        self.v == 0
    }
}

impl One for Zp {
    fn one() -> Self {
        Zp { v: 1 }
    }
}

impl fmt::Display for Zp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.v)
    }
}
