use std::fmt;

use crate::graph::Graph;
use crate::smallset::SmallSet;

/// 木分解の節（バッグ）。
/// `vertices` のソート順が転送エンジンの列位置を定める。
/// `edges` はこのバッグが所有するグラフ辺で、分解全体で各辺は
/// ちょうど 1 つのバッグに属する。
#[derive(Debug, Clone, Default)]
pub struct Bag {
    pub vertices: SmallSet<u32>,
    pub edges: Vec<(u32, u32)>,
    pub children: Vec<Bag>,
}

impl Bag {
    /// 分解の幅 = 最大バッグサイズ - 1
    pub fn width(&self) -> usize {
        let mut w = self.vertices.len();
        for c in &self.children {
            w = w.max(c.width() + 1);
        }
        w - 1
    }

    /// バッグ総数
    pub fn bag_count(&self) -> usize {
        1 + self.children.iter().map(Bag::bag_count).sum::<usize>()
    }
}

impl fmt::Display for Bag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.vertices)?;
        if !self.children.is_empty() {
            write!(f, " [")?;
            for c in &self.children {
                write!(f, " {}", c)?;
            }
            write!(f, " ]")?;
        }
        Ok(())
    }
}

/// 消去順序から根付き木分解を構築する。
/// 頂点 v の消去時に {v} ∪ N(v) をバッグとして記録し、
/// v から N(v) への元グラフの辺をそのバッグに割り当て、
/// N(v) 間を完全結合 (fill-in) してから v を取り除く。
/// バッグの親は N(v) の中で最も早く消去される頂点のバッグ。
/// 根は最後に消去された頂点のバッグになる。非連結な入力はパニックする。
pub fn build_tree_decomposition(order: &[u32], g: &Graph) -> Bag {
    let n = order.len();
    assert_eq!(n, g.num_vertices(), "order must cover all vertices");
    assert!(n > 0, "cannot decompose an empty graph");

    let mut pos = vec![0usize; n];
    for (i, &v) in order.iter().enumerate() {
        pos[v as usize] = i;
    }

    let mut work = g.clone();
    let mut vertex_sets: Vec<SmallSet<u32>> = Vec::with_capacity(n);
    let mut edge_sets: Vec<Vec<(u32, u32)>> = Vec::with_capacity(n);
    let mut parent: Vec<Option<usize>> = Vec::with_capacity(n);

    for &v in order {
        let nbrs = work.neighbors(v).clone();
        let mut vertices = nbrs.clone();
        vertices.insert(v);
        // fill-in 辺ではなく元グラフの辺だけを所有させる
        let edges: Vec<(u32, u32)> = nbrs
            .iter()
            .filter(|&u| g.has_edge(v, u))
            .map(|u| (v, u))
            .collect();
        parent.push(nbrs.iter().map(|u| pos[u as usize]).min());
        vertex_sets.push(vertices);
        edge_sets.push(edges);
        work.eliminate_vertex(v);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut roots: Vec<usize> = Vec::new();
    for (i, p) in parent.iter().enumerate() {
        match p {
            Some(p) => children[*p].push(i),
            None => roots.push(i),
        }
    }
    assert_eq!(roots.len(), 1, "input graph must be connected");

    assemble(roots[0], &children, &mut vertex_sets, &mut edge_sets)
}

fn assemble(
    i: usize,
    children: &[Vec<usize>],
    vertex_sets: &mut [SmallSet<u32>],
    edge_sets: &mut [Vec<(u32, u32)>],
) -> Bag {
    Bag {
        vertices: std::mem::take(&mut vertex_sets[i]),
        edges: std::mem::take(&mut edge_sets[i]),
        children: children[i]
            .iter()
            .map(|&c| assemble(c, children, vertex_sets, edge_sets))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{parse_graph, Graph};
    use crate::heuristics::greedy_degree_order;

    fn collect_bags<'a>(bag: &'a Bag, out: &mut Vec<&'a Bag>) {
        out.push(bag);
        for c in &bag.children {
            collect_bags(c, out);
        }
    }

    /// 木分解の 3 不変条件を検査する
    fn check_invariants(td: &Bag, g: &Graph) {
        let mut bags = Vec::new();
        collect_bags(td, &mut bags);

        // 1. 全頂点がどこかのバッグに現れる
        for v in 0..g.num_vertices() as u32 {
            assert!(
                bags.iter().any(|b| b.vertices.has(v)),
                "vertex {} not covered",
                v
            );
        }

        // 2. 全辺がちょうど 1 つのバッグに属し、両端点がそのバッグにある
        for (u, v) in g.edges() {
            let owners: Vec<&&Bag> = bags
                .iter()
                .filter(|b| b.edges.iter().any(|&(a, b_)| (a, b_) == (u, v) || (a, b_) == (v, u)))
                .collect();
            assert_eq!(owners.len(), 1, "edge ({},{}) owned by {} bags", u, v, owners.len());
            assert!(owners[0].vertices.has(u) && owners[0].vertices.has(v));
        }

        // 3. 走行交差性: 各頂点 v について、v を含むバッグの中で
        //    「親も v を含む」ものを除くとちょうど 1 つ残る
        fn count_tops(bag: &Bag, v: u32, parent_has: bool, tops: &mut usize) {
            let has = bag.vertices.has(v);
            if has && !parent_has {
                *tops += 1;
            }
            for c in &bag.children {
                count_tops(c, v, has, tops);
            }
        }
        for v in 0..g.num_vertices() as u32 {
            let mut tops = 0;
            count_tops(td, v, false, &mut tops);
            assert_eq!(tops, 1, "running intersection violated for vertex {}", v);
        }
    }

    #[test]
    fn test_path_graph_decomposition() {
        let g = parse_graph("0 1\n1 2\n2 3\n").unwrap();
        let td = build_tree_decomposition(&[0, 1, 2, 3], &g);
        check_invariants(&td, &g);
        assert_eq!(td.width(), 1);
        assert_eq!(td.bag_count(), 4);
    }

    #[test]
    fn test_cycle_decomposition() {
        let g = parse_graph("0 1\n1 2\n2 3\n3 0\n").unwrap();
        let order = greedy_degree_order(&g);
        let td = build_tree_decomposition(&order, &g);
        check_invariants(&td, &g);
        assert_eq!(td.width(), 2);
    }

    #[test]
    fn test_complete_graph_decomposition() {
        let g = parse_graph("0 1\n0 2\n0 3\n1 2\n1 3\n2 3\n").unwrap();
        let td = build_tree_decomposition(&[0, 1, 2, 3], &g);
        check_invariants(&td, &g);
        // K4 の木幅は 3
        assert_eq!(td.width(), 3);
    }

    #[test]
    fn test_single_vertex() {
        let g = Graph::with_vertices(1);
        let td = build_tree_decomposition(&[0], &g);
        assert_eq!(td.bag_count(), 1);
        assert_eq!(td.width(), 0);
        assert!(td.edges.is_empty());
    }

    #[test]
    #[should_panic(expected = "must be connected")]
    fn test_disconnected_panics() {
        // 0-1 と 2-3 の 2 成分
        let g = parse_graph("0 1\n2 3\n").unwrap();
        build_tree_decomposition(&[0, 1, 2, 3], &g);
    }

    #[test]
    fn test_arbitrary_order_keeps_invariants() {
        let g = parse_graph("0 1\n1 2\n2 3\n3 0\n0 2\n").unwrap();
        let td = build_tree_decomposition(&[3, 1, 0, 2], &g);
        check_invariants(&td, &g);
    }
}
