use num_bigint::BigInt;
use rayon::prelude::*;

use crate::graph::Graph;
use crate::polynomial::Polynomial;

/// 全探索による向き付き単純路の数え上げ（検証用リファレンス実装）。
/// 開始頂点ごとに DFS で単純路を列挙し、長さ k（辺数）の路 1 本につき
/// x^k の係数へ 1 を積む。結果は転送パイプラインの出力規約と同じ
/// 「向き付き本数」の多項式になる。開始頂点単位で並列化する。
/// 頂点数に対して指数時間なので小さなグラフ専用。
pub fn count_paths_brute(g: &Graph) -> Polynomial<BigInt> {
    let n = g.num_vertices();
    if n == 0 {
        return Polynomial::from_coeffs(Vec::new());
    }

    let counts = (0..n as u32)
        .into_par_iter()
        .map(|s| {
            let mut counts = vec![0u64; n];
            let mut visited = vec![false; n];
            visited[s as usize] = true;
            extend(g, s, 0, &mut visited, &mut counts);
            counts
        })
        .reduce(
            || vec![0u64; n],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b) {
                    *x += y;
                }
                a
            },
        );

    Polynomial::from_coeffs(counts.into_iter().map(BigInt::from).collect())
}

/// v で終わる長さ depth の路を全ての隣接頂点へ伸ばす
fn extend(g: &Graph, v: u32, depth: usize, visited: &mut [bool], counts: &mut [u64]) {
    for u in g.neighbors(v).iter() {
        if !visited[u as usize] {
            counts[depth + 1] += 1;
            visited[u as usize] = true;
            extend(g, u, depth + 1, visited, counts);
            visited[u as usize] = false;
        }
    }
}
