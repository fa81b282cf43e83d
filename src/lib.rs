//! 木分解上の転送行列法による最長路母関数の計算
//!
//! 無向グラフの単純路を長さ別に数え上げる多項式（最長路母関数）を、
//! 木分解上の動的計画法で計算する。x^k の係数は長さ k（辺数）の
//! 向き付き単純路の本数。計算量は木幅に対して指数的。
//!
//! 係数は指数的に大きくなるため、32 ビット素数を法とする体上で
//! 転送を繰り返し、中国剰余定理 (CRT) で整数係数を復元する。
//! 新しい素数を足しても結果が変わらなくなった時点で打ち切る。

pub mod chinese_remainder;
pub mod graph;
pub mod heuristics;
pub mod longest_path;
pub mod polynomial;
pub mod reference;
pub mod smallset;
pub mod transfer;
pub mod tree_decomposition;
pub mod zp;

pub use chinese_remainder::{chinese_remainder, crt_combine, transfer_direct, PRIMES};
pub use graph::{parse_graph, Graph, ParseGraphError};
pub use heuristics::{
    greedy_degree_order, greedy_fillin_order, greedy_local_degree_order, greedy_local_fillin_order,
};
pub use longest_path::{to_directed_counts, Connectivity, LongestPath};
pub use polynomial::Polynomial;
pub use reference::count_paths_brute;
pub use smallset::SmallSet;
pub use transfer::{recurse, transfer, Operators};
pub use tree_decomposition::{build_tree_decomposition, Bag};
pub use zp::{mod_inverse, set_modulus, Zp};
