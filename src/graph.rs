use crate::smallset::SmallSet;

/// 辺リスト解析のエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseGraphError {
    #[error("line {0}: expected two vertex ids, found {1:?}")]
    BadLine(usize, String),
    #[error("line {0}: self-loop at vertex {1}")]
    SelfLoop(usize, u32),
}

/// 単純無向グラフ。頂点は 0 起点の密な整数 id。
/// 隣接リストをソート済み集合で持ち、辺 (u,v) は両側に記録する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adj: Vec<SmallSet<u32>>,
    num_edges: usize,
}

impl Graph {
    pub fn with_vertices(n: usize) -> Self {
        Graph {
            adj: vec![SmallSet::new(); n],
            num_edges: 0,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.adj.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// 辺を追加する（冪等）。新規追加なら true。自己ループは不可。
    pub fn add_edge(&mut self, u: u32, v: u32) -> bool {
        assert!(u != v, "self-loop at vertex {}", u);
        if self.adj[u as usize].has(v) {
            return false;
        }
        self.adj[u as usize].insert(v);
        self.adj[v as usize].insert(u);
        self.num_edges += 1;
        true
    }

    pub fn has_edge(&self, u: u32, v: u32) -> bool {
        self.adj[u as usize].has(v)
    }

    pub fn degree(&self, v: u32) -> usize {
        self.adj[v as usize].len()
    }

    pub fn neighbors(&self, v: u32) -> &SmallSet<u32> {
        &self.adj[v as usize]
    }

    /// 全辺を u < v の組で列挙する
    pub fn edges(&self) -> Vec<(u32, u32)> {
        let mut result = Vec::with_capacity(self.num_edges);
        for u in 0..self.adj.len() as u32 {
            for v in self.adj[u as usize].iter() {
                if u < v {
                    result.push((u, v));
                }
            }
        }
        result
    }

    /// 頂点 v を消去する: 隣接頂点間を完全結合（fill-in）してから
    /// v を全ての隣接リストから外す。消去後の degree(v) は 0。
    pub fn eliminate_vertex(&mut self, v: u32) {
        let nbrs = self.adj[v as usize].clone();
        for a in nbrs.iter() {
            for b in nbrs.iter() {
                if a < b && !self.has_edge(a, b) {
                    self.add_edge(a, b);
                }
            }
        }
        for u in nbrs.iter() {
            self.adj[u as usize].remove(v);
        }
        self.num_edges -= self.adj[v as usize].len();
        self.adj[v as usize] = SmallSet::new();
    }

    /// 連結判定（幅優先探索）。頂点 0 個のグラフは連結とみなす。
    pub fn is_connected(&self) -> bool {
        let n = self.num_vertices();
        if n == 0 {
            return true;
        }
        let mut seen = vec![false; n];
        let mut queue = std::collections::VecDeque::from([0u32]);
        seen[0] = true;
        let mut count = 1;
        while let Some(u) = queue.pop_front() {
            for v in self.adj[u as usize].iter() {
                if !seen[v as usize] {
                    seen[v as usize] = true;
                    count += 1;
                    queue.push_back(v);
                }
            }
        }
        count == n
    }
}

/// 辺リスト形式のテキストをグラフに変換する。
/// 空行以外の各行は空白区切りの頂点 id 2 つ。頂点は出現した id から
/// 暗黙に定義され、頂点数は最大 id + 1 となる。
/// 重複辺は畳み込み、自己ループはエラーにする。
pub fn parse_graph(input: &str) -> Result<Graph, ParseGraphError> {
    let mut edges: Vec<(u32, u32)> = Vec::new();
    let mut max_vertex: Option<u32> = None;

    for (lineno, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(ParseGraphError::BadLine(lineno + 1, line.to_string()));
        }
        let u: u32 = fields[0]
            .parse()
            .map_err(|_| ParseGraphError::BadLine(lineno + 1, line.to_string()))?;
        let v: u32 = fields[1]
            .parse()
            .map_err(|_| ParseGraphError::BadLine(lineno + 1, line.to_string()))?;
        if u == v {
            return Err(ParseGraphError::SelfLoop(lineno + 1, u));
        }
        max_vertex = Some(max_vertex.map_or(u.max(v), |m| m.max(u).max(v)));
        edges.push((u, v));
    }

    let n = max_vertex.map_or(0, |m| m as usize + 1);
    let mut g = Graph::with_vertices(n);
    for (u, v) in edges {
        g.add_edge(u, v);
    }
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let g = parse_graph("0 1\n1 2\n\n2 0\n").unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 3);
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(2, 0));
    }

    #[test]
    fn test_parse_collapses_duplicates() {
        let g = parse_graph("0 1\n1 0\n0 1\n").unwrap();
        assert_eq!(g.num_edges(), 1);
    }

    #[test]
    fn test_parse_bad_line() {
        assert_eq!(
            parse_graph("0 1\n1 2 3\n"),
            Err(ParseGraphError::BadLine(2, "1 2 3".to_string()))
        );
        assert!(matches!(
            parse_graph("0 x\n"),
            Err(ParseGraphError::BadLine(1, _))
        ));
    }

    #[test]
    fn test_parse_self_loop() {
        assert_eq!(parse_graph("3 3\n"), Err(ParseGraphError::SelfLoop(1, 3)));
    }

    #[test]
    fn test_parse_empty_input() {
        let g = parse_graph("").unwrap();
        assert_eq!(g.num_vertices(), 0);
        assert_eq!(g.num_edges(), 0);
    }

    #[test]
    fn test_edges_listing() {
        let g = parse_graph("0 1\n1 2\n").unwrap();
        assert_eq!(g.edges(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_eliminate_vertex_adds_fill_in() {
        // スター型: 中心 0 を消去すると葉どうしが完全結合になる
        let mut g = parse_graph("0 1\n0 2\n0 3\n").unwrap();
        g.eliminate_vertex(0);
        assert_eq!(g.degree(0), 0);
        assert!(g.has_edge(1, 2));
        assert!(g.has_edge(1, 3));
        assert!(g.has_edge(2, 3));
        assert_eq!(g.num_edges(), 3);
    }

    #[test]
    fn test_is_connected() {
        assert!(parse_graph("0 1\n1 2\n").unwrap().is_connected());
        // 頂点 1 が孤立（辺は 0-2 のみ）
        assert!(!parse_graph("0 2\n").unwrap().is_connected());
    }
}
