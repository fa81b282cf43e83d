use crate::tree_decomposition::Bag;

/// 転送エンジンが要求する演算子束。
/// 状態表の型と重みの型、および 4 つの表変換を提供する。
/// 各演算子は新しい表を返し、無効になった状態は黙って落とす。
pub trait Operators {
    type Weight;
    type Table;

    /// 長さ n のゼロ状態だけを重み 1 で含む初期表
    fn empty_state(&self, n: usize) -> Self::Table;

    /// 列 i の頂点がスコープから外れるときの表変換
    fn delete_operator(&self, i: usize, table: &Self::Table) -> Self::Table;

    /// バッグ内の辺 (列 i, 列 j) を使う/使わないの両方を展開する表変換
    fn join_operator(&self, i: usize, j: usize, table: &Self::Table) -> Self::Table;

    /// 子バッグの表を親の列スキーマに写して合成する。
    /// a_to_b[i] は子の列 i に対応する親の列位置。
    fn table_fusion(
        &self,
        a_to_b: &[usize],
        table_a: &Self::Table,
        table_b: &Self::Table,
    ) -> Self::Table;

    /// 全頂点削除後の表から最終重みを取り出す。
    /// 表が単一要素でなければ不変条件違反としてパニックする。
    fn final_weight(&self, table: Self::Table) -> Self::Weight;
}

/// バッグを後順に畳み込む再帰。
/// 子の表は、親に無い頂点を 1 つずつ削除してから親の表に融合する。
/// 削除のたびに作業用集合から頂点を外し、列位置の整合を保つ。
pub fn recurse<Op: Operators>(op: &Op, bag: &Bag) -> Op::Table {
    let mut table = op.empty_state(bag.vertices.len());

    for child in &bag.children {
        let mut child_table = recurse(op, child);

        // 親バッグに無い頂点がスコープから外れる
        let diff: Vec<u32> = child
            .vertices
            .iter()
            .filter(|&v| !bag.vertices.has(v))
            .collect();

        let mut left_over = child.vertices.clone();
        for v in diff {
            child_table = op.delete_operator(left_over.index(v), &child_table);
            left_over.remove(v);
        }

        // 子の残り列 → 親の列位置の対応表
        let a_to_b: Vec<usize> = (0..left_over.len())
            .map(|i| bag.vertices.index(left_over.at(i)))
            .collect();

        table = op.table_fusion(&a_to_b, &child_table, &table);
    }

    for &(u, v) in &bag.edges {
        table = op.join_operator(bag.vertices.index(u), bag.vertices.index(v), &table);
    }
    table
}

/// 木分解全体を畳み込み、根の頂点を全て削除して最終重みを返す。
pub fn transfer<Op: Operators>(op: &Op, root: &Bag) -> Op::Weight {
    let mut table = recurse(op, root);

    let mut left_over = root.vertices.clone();
    for v in root.vertices.iter() {
        table = op.delete_operator(left_over.index(v), &table);
        left_over.remove(v);
    }
    op.final_weight(table)
}
