use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::ops::{AddAssign, Mul, Shl};

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::polynomial::Polynomial;
use crate::transfer::Operators;

/// 接続状態。バッグの列（頂点位置）ごとに 1 エントリ:
///   0   未使用
///   k>0 開いた path 断片（strand）k の端点。同じラベルは高々 2 回現れ、
///       2 回なら断片の両端がバッグ内に残っており、1 回なら片端は
///       スコープ外で確定済み
///   -1  通過済みで両側の辺が確定した位置（bullet）
/// 空列は「完成状態」の番兵で、path 全体が確定したことを表す。
pub type Connectivity = Vec<i8>;

/// canonicalize が扱えるラベル数の上限（バッグサイズ + 1 で十分）
const MAX_LABELS: usize = 128;

/// 位置 i が自由端点か（ラベルが正で、状態中にちょうど 1 回現れる）
pub fn is_endpoint(c: &Connectivity, i: usize) -> bool {
    c[i] > 0 && c.iter().filter(|&&x| x == c[i]).count() == 1
}

/// 完成状態か
pub fn is_finished(c: &Connectivity) -> bool {
    c.is_empty()
}

/// 未完成かつ全列が未使用か
pub fn is_empty(c: &Connectivity) -> bool {
    !c.is_empty() && c.iter().all(|&x| x == 0)
}

/// ちょうど 1 回現れる正ラベルの個数（= 確定済み端点の数）。
/// 単純 path の端点は 2 つなので、2 を超えた状態は棄却される。
pub fn how_many_endpoints(c: &Connectivity) -> usize {
    let mut count = [0u8; MAX_LABELS];
    for &x in c {
        if x > 0 {
            count[x as usize] += 1;
        }
    }
    count.iter().filter(|&&n| n == 1).count()
}

/// 正ラベルを出現順に 1, 2, 3, ... へ振り直す。bullet と 0 はそのまま。
pub fn canonicalize(mut c: Connectivity) -> Connectivity {
    let mut table = [0i8; MAX_LABELS];
    let mut next = 1i8;
    for x in c.iter_mut() {
        if *x <= 0 {
            continue;
        }
        let idx = *x as usize;
        if table[idx] != 0 {
            *x = table[idx];
        } else {
            table[idx] = next;
            *x = next;
            next += 1;
        }
    }
    c
}

/// 位置 i と j を辺で結ぶ。単純 path の配置として不正なら None。
pub fn connect(mut c: Connectivity, i: usize, j: usize) -> Option<Connectivity> {
    // 完成状態にはもう辺を足せない
    if is_finished(&c) {
        return None;
    }

    let li = c[i];
    let lj = c[j];

    // bullet は両辺が確定済み
    if li < 0 || lj < 0 {
        return None;
    }

    // 両方とも未使用: 新しい strand を開始
    if li == 0 && lj == 0 {
        let fresh = c.iter().copied().max().unwrap() + 1;
        c[i] = fresh;
        c[j] = fresh;
        return Some(c);
    }

    // 片方だけ未使用: strand をこの辺の先へ伸ばす
    if li != 0 && lj == 0 {
        c[i] = -1;
        c[j] = li;
        return Some(c);
    }
    if li == 0 && lj != 0 {
        c[i] = lj;
        c[j] = -1;
        return Some(c);
    }

    // 同じ strand の両端を結ぶとループになる
    if li == lj {
        return None;
    }

    if is_endpoint(&c, i) && is_endpoint(&c, j) {
        // 片端確定済みの strand どうしの結合。他に strand が残っていたら
        // その strand は二度と繋がらないので不正
        if c.iter().any(|&x| x > 0 && x != li && x != lj) {
            return None;
        }
        c.clear();
        return Some(c);
    }

    // 少なくとも一方は両端がバッグ内の strand: lj を li に統合する
    for x in c.iter_mut() {
        if *x == lj {
            *x = li;
        }
    }
    c[i] = -1;
    c[j] = -1;
    Some(c)
}

/// 未使用の位置 i に片端確定済みの新しい strand を立てる
pub fn detach(mut c: Connectivity, i: usize) -> Connectivity {
    c[i] = c.iter().copied().max().unwrap() + 1;
    c
}

/// 列 i をスコープから外す。path として不正になる状態は None。
pub fn delete_node(c: &Connectivity, i: usize) -> Option<Connectivity> {
    if is_finished(c) {
        return Some(c.clone());
    }

    if is_endpoint(c, i) {
        // 自由端点がスコープ外へ出ると strand 全体が確定する。
        // 他に strand が残っていたらそちらが孤立するので不正
        if c.iter().any(|&x| x > 0 && x != c[i]) {
            return None;
        }
        return Some(Connectivity::new());
    }

    let mut newc = c.clone();
    newc.remove(i);
    Some(canonicalize(newc))
}

/// 子の状態 sa を a_to_b で親のスキーマへ写し、親の状態 sb と統合する。
/// 子側で 2 回現れるラベルは親の 2 列を connect で結び、bullet は
/// 親の未使用列にだけ重ねられる。残った片割れラベル（相方が子側で
/// 既に確定した strand）は位置に応じて detach・対の完成・path の完成の
/// いずれかになる。矛盾したら None。
fn fuse_states(a_to_b: &[usize], sa: &Connectivity, sb: &Connectivity) -> Option<Connectivity> {
    let n = sb.len();
    let mut newa = vec![0i8; n];
    for (i, &x) in sa.iter().enumerate() {
        newa[a_to_b[i]] = x;
    }

    let mut newc = sb.clone();
    let mut open: BTreeMap<i8, usize> = BTreeMap::new();

    for i in 0..n {
        if newa[i] > 0 {
            if let Some(j) = open.remove(&newa[i]) {
                newc = connect(newc, i, j)?;
            } else {
                open.insert(newa[i], i);
            }
        } else if newa[i] == -1 {
            if newc[i] != 0 {
                return None;
            }
            newc[i] = -1;
        }
    }

    for (_, bi) in open {
        if is_finished(&newc) {
            return None;
        }
        match newc[bi] {
            -1 => return None,
            0 => newc = detach(newc, bi),
            label => {
                if newc.iter().filter(|&&x| x == label).count() == 2 {
                    // 親 strand の一端に繋がり、この列は通過点になる
                    newc[bi] = -1;
                } else if newc.iter().filter(|&&x| x > 0).count() == 1 {
                    // 最後に残った strand どうしの結合で path が完成する
                    newc.clear();
                } else {
                    return None;
                }
            }
        }
    }

    Some(newc)
}

/// 最長路母関数の演算子束。
/// 重み W は多項式環（x 倍を左シフトで表す）を想定する。
pub struct LongestPath<W> {
    _weight: PhantomData<W>,
}

impl<W> Default for LongestPath<W> {
    fn default() -> Self {
        LongestPath {
            _weight: PhantomData,
        }
    }
}

impl<W> Operators for LongestPath<W>
where
    W: Clone + Zero + One + AddAssign + Mul<Output = W> + Shl<usize, Output = W>,
{
    type Weight = W;
    type Table = HashMap<Connectivity, W>;

    fn empty_state(&self, n: usize) -> Self::Table {
        HashMap::from([(vec![0i8; n], W::one())])
    }

    fn join_operator(&self, i: usize, j: usize, table: &Self::Table) -> Self::Table {
        // 辺を使わない選択肢として元の表をそのまま残す
        let mut new_table = table.clone();
        for (c, w) in table {
            if let Some(newc) = connect(c.clone(), i, j) {
                if how_many_endpoints(&newc) <= 2 {
                    // 辺 1 本につき x 倍
                    let shifted = w.clone() << 1;
                    *new_table
                        .entry(canonicalize(newc))
                        .or_insert_with(W::zero) += shifted;
                }
            }
        }
        new_table
    }

    fn delete_operator(&self, i: usize, table: &Self::Table) -> Self::Table {
        let mut new_table = HashMap::new();
        for (c, w) in table {
            if let Some(newc) = delete_node(c, i) {
                if how_many_endpoints(&newc) <= 2 {
                    *new_table.entry(newc).or_insert_with(W::zero) += w.clone();
                }
            }
        }
        new_table
    }

    fn table_fusion(
        &self,
        a_to_b: &[usize],
        table_a: &Self::Table,
        table_b: &Self::Table,
    ) -> Self::Table {
        let mut new_table = HashMap::new();
        for (sa, wa) in table_a {
            for (sb, wb) in table_b {
                // 完成状態は空配置としか組み合わせられない
                if is_finished(sa) {
                    if is_empty(sb) {
                        *new_table
                            .entry(Connectivity::new())
                            .or_insert_with(W::zero) += wa.clone() * wb.clone();
                    }
                    continue;
                }
                if is_finished(sb) {
                    if is_empty(sa) {
                        *new_table
                            .entry(Connectivity::new())
                            .or_insert_with(W::zero) += wa.clone() * wb.clone();
                    }
                    continue;
                }

                if let Some(newc) = fuse_states(a_to_b, sa, sb) {
                    if how_many_endpoints(&newc) <= 2 {
                        *new_table
                            .entry(canonicalize(newc))
                            .or_insert_with(W::zero) += wa.clone() * wb.clone();
                    }
                }
            }
        }
        new_table
    }

    fn final_weight(&self, table: Self::Table) -> W {
        assert_eq!(table.len(), 1, "final table is not a singleton");
        let (c, w) = table.into_iter().next().unwrap();
        assert!(is_finished(&c), "final state is not finished");
        w
    }
}

/// 転送の生の重み（定数項 1 = 空配置、x^k の係数 = 長さ k の無向単純路数）
/// から出力規約の多項式へ変換する。空配置を除き、路の向き 2 通り分を掛けて
/// x^k の係数を「長さ k の向き付き単純路の本数」にする。
pub fn to_directed_counts(raw: Polynomial<BigInt>) -> Polynomial<BigInt> {
    let mut p = raw;
    p -= BigInt::one();
    p * BigInt::from(2)
}
