use crate::graph::Graph;
use crate::smallset::SmallSet;

/// 候補頂点の隣接頂点間で欠けている辺の数（fill-in 量）
fn fill_in_count(g: &Graph, v: u32) -> usize {
    let nbrs = g.neighbors(v);
    let mut missing = 0;
    for a in nbrs.iter() {
        for b in nbrs.iter() {
            if a < b && !g.has_edge(a, b) {
                missing += 1;
            }
        }
    }
    missing
}

/// 貪欲消去: 毎ステップ、評価値最小の頂点を消去する。
/// 同点は頂点 id の小さい方を選ぶ。
fn greedy_order(g: &Graph, key: fn(&Graph, u32) -> usize) -> Vec<u32> {
    let mut work = g.clone();
    let mut alive: SmallSet<u32> = (0..g.num_vertices() as u32).collect();
    let mut order = Vec::with_capacity(g.num_vertices());

    while !alive.is_empty() {
        let v = alive.iter().min_by_key(|&v| key(&work, v)).unwrap();
        order.push(v);
        work.eliminate_vertex(v);
        alive.remove(v);
    }
    order
}

/// 局所版: 次の候補を直前に消去した頂点の隣接頂点に限定する。
/// 隣接候補が尽きたら全体の最小値に戻る。
fn greedy_local_order(g: &Graph, key: fn(&Graph, u32) -> usize) -> Vec<u32> {
    let n = g.num_vertices();
    let mut work = g.clone();
    let mut alive: SmallSet<u32> = (0..n as u32).collect();
    let mut order = Vec::with_capacity(n);

    if n == 0 {
        return order;
    }

    let mut current = alive.iter().min_by_key(|&v| key(&work, v)).unwrap();
    loop {
        order.push(current);
        let nbrs = work.neighbors(current).clone();
        work.eliminate_vertex(current);
        alive.remove(current);
        if alive.is_empty() {
            break;
        }
        current = if nbrs.is_empty() {
            alive.iter().min_by_key(|&v| key(&work, v)).unwrap()
        } else {
            nbrs.iter().min_by_key(|&v| key(&work, v)).unwrap()
        };
    }
    order
}

/// 最小次数ヒューリスティック
pub fn greedy_degree_order(g: &Graph) -> Vec<u32> {
    greedy_order(g, |g, v| g.degree(v))
}

/// 最小 fill-in ヒューリスティック
pub fn greedy_fillin_order(g: &Graph) -> Vec<u32> {
    greedy_order(g, fill_in_count)
}

/// 局所最小次数ヒューリスティック
pub fn greedy_local_degree_order(g: &Graph) -> Vec<u32> {
    greedy_local_order(g, |g, v| g.degree(v))
}

/// 局所最小 fill-in ヒューリスティック
pub fn greedy_local_fillin_order(g: &Graph) -> Vec<u32> {
    greedy_local_order(g, fill_in_count)
}
