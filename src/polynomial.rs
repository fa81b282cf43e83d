use std::fmt;
use std::ops::{Add, AddAssign, Index, Mul, MulAssign, Neg, Shl, ShlAssign, Sub, SubAssign};

use num_traits::{One, Zero};

/// 係数環 T 上の密な一変数多項式。
/// 添字が次数に対応する係数ベクトルで保持する。
/// 正規化規則: 末尾（最高次）のゼロ係数は取り除くが、定数項だけは常に残す。
/// ゼロ多項式は単一のゼロ係数 [0] で表す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<T> {
    coeffs: Vec<T>,
}

impl<T> Polynomial<T> {
    /// 定数多項式
    pub fn constant(c: T) -> Self {
        Polynomial { coeffs: vec![c] }
    }

    /// 次数（= 係数ベクトル長 - 1）
    pub fn order(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// 係数の昇冪イテレータ（CRT の係数ごとの還元に使う）
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.coeffs.iter()
    }

    /// 係数ごとの変換 T → U（体の元の持ち上げ・還元に使う）
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Polynomial<U> {
        Polynomial {
            coeffs: self.coeffs.iter().map(f).collect(),
        }
    }
}

impl<T: Zero> Polynomial<T> {
    /// 係数ベクトルから構築（正規化する）。空ベクトルはゼロ多項式になる。
    pub fn from_coeffs(coeffs: Vec<T>) -> Self {
        let mut p = Polynomial { coeffs };
        if p.coeffs.is_empty() {
            p.coeffs.push(T::zero());
        }
        p.normalize();
        p
    }

    fn normalize(&mut self) {
        while self.coeffs.len() > 1 && self.coeffs.last().unwrap().is_zero() {
            self.coeffs.pop();
        }
    }

    fn grow(&mut self, order: usize) {
        while self.coeffs.len() <= order {
            self.coeffs.push(T::zero());
        }
    }
}

impl<T> Index<usize> for Polynomial<T> {
    type Output = T;
    fn index(&self, i: usize) -> &T {
        &self.coeffs[i]
    }
}

impl<T: Zero + AddAssign + Clone> AddAssign<&Polynomial<T>> for Polynomial<T> {
    fn add_assign(&mut self, rhs: &Polynomial<T>) {
        self.grow(rhs.order());
        for (i, c) in rhs.coeffs.iter().enumerate() {
            self.coeffs[i] += c.clone();
        }
        self.normalize();
    }
}

impl<T: Zero + AddAssign + Clone> AddAssign for Polynomial<T> {
    fn add_assign(&mut self, rhs: Polynomial<T>) {
        *self += &rhs;
    }
}

impl<T: Zero + AddAssign + Clone> Add for Polynomial<T> {
    type Output = Polynomial<T>;
    fn add(mut self, rhs: Polynomial<T>) -> Polynomial<T> {
        self += &rhs;
        self
    }
}

impl<T: Zero + SubAssign + Clone> SubAssign<&Polynomial<T>> for Polynomial<T> {
    fn sub_assign(&mut self, rhs: &Polynomial<T>) {
        self.grow(rhs.order());
        for (i, c) in rhs.coeffs.iter().enumerate() {
            self.coeffs[i] -= c.clone();
        }
        self.normalize();
    }
}

impl<T: Zero + SubAssign + Clone> Sub for Polynomial<T> {
    type Output = Polynomial<T>;
    fn sub(mut self, rhs: Polynomial<T>) -> Polynomial<T> {
        self -= &rhs;
        self
    }
}

impl<T: Zero + SubAssign + Clone> SubAssign<Polynomial<T>> for Polynomial<T> {
    fn sub_assign(&mut self, rhs: Polynomial<T>) {
        *self -= &rhs;
    }
}

/// スカラー加算（定数項に足す）
impl<T: AddAssign> AddAssign<T> for Polynomial<T> {
    fn add_assign(&mut self, rhs: T) {
        self.coeffs[0] += rhs;
    }
}

/// スカラー減算（定数項から引く）
impl<T: SubAssign> SubAssign<T> for Polynomial<T> {
    fn sub_assign(&mut self, rhs: T) {
        self.coeffs[0] -= rhs;
    }
}

/// スカラー倍
impl<T: Zero + MulAssign + Clone> MulAssign<T> for Polynomial<T> {
    fn mul_assign(&mut self, rhs: T) {
        for c in self.coeffs.iter_mut() {
            *c *= rhs.clone();
        }
        self.normalize();
    }
}

impl<T: Zero + MulAssign + Clone> Mul<T> for Polynomial<T> {
    type Output = Polynomial<T>;
    fn mul(mut self, rhs: T) -> Polynomial<T> {
        self *= rhs;
        self
    }
}

/// 多項式どうしの積（畳み込み）
impl<T: Zero + AddAssign + Mul<Output = T> + Clone> Mul for Polynomial<T> {
    type Output = Polynomial<T>;
    fn mul(self, rhs: Polynomial<T>) -> Polynomial<T> {
        let mut product = vec![T::zero(); self.order() + rhs.order() + 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                product[i + j] += a.clone() * b.clone();
            }
        }
        Polynomial::from_coeffs(product)
    }
}

impl<T: Zero + Neg<Output = T> + Clone> Neg for Polynomial<T> {
    type Output = Polynomial<T>;
    fn neg(self) -> Polynomial<T> {
        Polynomial {
            coeffs: self.coeffs.into_iter().map(|c| -c).collect(),
        }
    }
}

/// x^k 倍（係数ベクトルの左シフト）
impl<T: Zero> ShlAssign<usize> for Polynomial<T> {
    fn shl_assign(&mut self, k: usize) {
        for _ in 0..k {
            self.coeffs.insert(0, T::zero());
        }
        self.normalize();
    }
}

impl<T: Zero> Shl<usize> for Polynomial<T> {
    type Output = Polynomial<T>;
    fn shl(mut self, k: usize) -> Polynomial<T> {
        self <<= k;
        self
    }
}

impl<T: Zero + AddAssign + Clone> Zero for Polynomial<T> {
    fn zero() -> Self {
        Polynomial::constant(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_zero())
    }
}

impl<T: Zero + One + AddAssign + Mul<Output = T> + Clone> One for Polynomial<T> {
    fn one() -> Self {
        Polynomial::constant(T::one())
    }
}

impl<T: Zero + One + PartialEq + fmt::Display> fmt::Display for Polynomial<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate() {
            if c.is_zero() {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            if i == 0 {
                write!(f, "{}", c)?;
                continue;
            }
            if !c.is_one() {
                write!(f, "{} ", c)?;
            }
            if i == 1 {
                write!(f, "x")?;
            } else {
                write!(f, "x^{}", i)?;
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}
