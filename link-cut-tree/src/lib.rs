pub mod operation;

mod arena;

use std::{collections::VecDeque, ops::AddAssign};

use arena::{Direction, Node, NIL};
use operation::{Commutative, Operator};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LinkCutError {
    #[error("vertex {0} is out of range")]
    VertexOutOfRange(usize),
    #[error("vertices {0} and {1} are already in the same tree")]
    AlreadyConnected(usize, usize),
    #[error("vertex {0} is the root of its tree and has no parent edge")]
    CutAtRoot(usize),
    #[error("vertices {0} and {1} are in different trees")]
    Disconnected(usize, usize),
}

#[derive(Debug, Clone)]
pub struct LinkCutTree<T, Q, OP> {
    nodes: Vec<Node<T, Q>>,
    op: OP,
}

impl<T, Q, OP> LinkCutTree<T, Q, OP> {
    pub const fn new(op: OP) -> Self {
        Self {
            nodes: Vec::new(),
            op,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, v: usize) -> Option<&T> {
        self.nodes.get(v).map(|node| &node.value)
    }

    fn check_vertex(&self, v: usize) -> Result<(), LinkCutError> {
        if v < self.nodes.len() {
            Ok(())
        } else {
            Err(LinkCutError::VertexOutOfRange(v))
        }
    }

    /// `v`がその補助木の根かどうかを判定する
    fn is_aux_root(&self, v: usize) -> bool {
        let parent = self.nodes[v].parent;
        parent == NIL || (self.nodes[parent].left != v && self.nodes[parent].right != v)
    }

    fn direction(&self, parent: usize, child: usize) -> Direction {
        if self.nodes[parent].left == child {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// 反転フラグを子に押し下げる。子ポインタを読む前に必ず呼ぶ。
    fn propagate(&mut self, v: usize) {
        let node = &mut self.nodes[v];
        if !node.reverse {
            return;
        }
        node.reverse = false;
        std::mem::swap(&mut node.left, &mut node.right);
        let (left, right) = (node.left, node.right);
        if left != NIL {
            self.nodes[left].reverse ^= true;
        }
        if right != NIL {
            self.nodes[right].reverse ^= true;
        }
    }
}

impl<T, Q, OP> LinkCutTree<T, Q, OP>
where
    OP: Operator<ValT = T, QValT = Q>,
{
    pub fn from_iter_op<I>(iter: I, op: OP) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let nodes = iter
            .into_iter()
            .map(|value| {
                let query = op.val_to_query(&value);
                Node::new(value, query)
            })
            .collect();
        Self { nodes, op }
    }

    /// 隣接リストから森を構築する。`root`から幅優先で辿れない頂点は孤立した根のまま残る。
    pub fn from_graph_op<I>(
        values: I,
        graph: &[Vec<usize>],
        root: usize,
        op: OP,
    ) -> Result<Self, LinkCutError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::from_iter_op(values, op);
        assert_eq!(
            tree.nodes.len(),
            graph.len(),
            "value count must match vertex count"
        );
        tree.check_vertex(root)?;
        for neighbors in graph {
            for &to in neighbors {
                tree.check_vertex(to)?;
            }
        }
        let prev = bfs_prev(graph, root);
        for to in 0..graph.len() {
            let now = prev[to];
            if now == NIL {
                continue;
            }
            tree.link_raw(now, to);
        }
        Ok(tree)
    }

    fn update_from_child(&mut self, i: usize) {
        let node = &self.nodes[i];
        let (left, right) = (node.left, node.right);
        let mid = self.op.val_to_query(&node.value);
        let query = match (left, right) {
            (NIL, NIL) => mid,
            (left, NIL) => self.op.operate(&self.nodes[left].query, &mid),
            (NIL, right) => self.op.operate(&mid, &self.nodes[right].query),
            (left, right) => self.op.operate(
                &self.op.operate(&self.nodes[left].query, &mid),
                &self.nodes[right].query,
            ),
        };
        self.nodes[i].query = query;
    }

    /// `dir`側の子を持ち上げる回転。新しい根は元の根の親ポインタを
    /// (実辺でもpath-parentでも) そのまま引き継ぐ。
    fn rotate(&mut self, node: usize, dir: Direction) -> usize {
        let new_root = self.nodes[node].child(dir);
        let shifted = self.nodes[new_root].child(dir.opposite());

        // 子の更新
        self.nodes[node].set_child(dir, shifted);
        self.nodes[new_root].set_child(dir.opposite(), node);
        if shifted != NIL {
            self.nodes[shifted].parent = node;
        }

        // 親の更新
        let outer = self.nodes[node].parent;
        self.nodes[new_root].parent = outer;
        self.nodes[node].parent = new_root;

        // outerの子の更新 (nodeが実子だった場合のみ)
        if outer != NIL {
            if self.nodes[outer].left == node {
                self.nodes[outer].left = new_root;
            } else if self.nodes[outer].right == node {
                self.nodes[outer].right = new_root;
            }
        }

        // 値の更新
        self.update_from_child(node);
        self.update_from_child(new_root);
        new_root
    }

    /// `v`を補助木の根に持ってくる
    fn splay(&mut self, v: usize) {
        self.propagate(v);
        while !self.is_aux_root(v) {
            let parent = self.nodes[v].parent;
            if self.is_aux_root(parent) {
                // zig
                self.propagate(parent);
                self.propagate(v);
                let dir = self.direction(parent, v);
                self.rotate(parent, dir);
                break;
            }
            let grand = self.nodes[parent].parent;
            self.propagate(grand);
            self.propagate(parent);
            self.propagate(v);
            let parent_dir = self.direction(grand, parent);
            let dir = self.direction(parent, v);
            if dir == parent_dir {
                // zig-zig
                self.rotate(grand, parent_dir);
                self.rotate(parent, dir);
            } else {
                // zig-zag
                self.rotate(parent, dir);
                self.rotate(grand, parent_dir);
            }
        }
    }

    /// 根から`v`までのパスを全て1本の補助木に繋げる
    ///
    /// # Returns
    /// 最後のsplay前に`v`側の部分木の根だった頂点
    fn expose(&mut self, v: usize) -> usize {
        let mut prev = NIL;
        let mut current = v;
        while current != NIL {
            self.splay(current);
            self.nodes[current].right = prev;
            self.update_from_child(current);
            prev = current;
            current = self.nodes[current].parent;
        }
        self.splay(v);
        prev
    }

    fn leftmost(&mut self, v: usize) -> usize {
        let mut current = v;
        self.propagate(current);
        let mut next = self.nodes[current].left;
        while next != NIL {
            current = next;
            self.propagate(current);
            next = self.nodes[current].left;
        }
        self.splay(current);
        current
    }

    fn find_root(&mut self, v: usize) -> usize {
        self.expose(v);
        self.leftmost(v)
    }

    fn link_raw(&mut self, u: usize, v: usize) {
        self.expose(u);
        self.expose(v);
        self.nodes[u].right = v;
        self.nodes[v].parent = u;
        self.update_from_child(u);
    }

    /// 辺`(u, v)`を追加する。`u`は根に近い方の頂点で、`v`はその木の根であること。
    /// 任意の2頂点を繋ぐ場合は`merge`を使う。
    pub fn link(&mut self, u: usize, v: usize) -> Result<(), LinkCutError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if self.find_root(u) == self.find_root(v) {
            return Err(LinkCutError::AlreadyConnected(u, v));
        }
        self.link_raw(u, v);
        Ok(())
    }

    /// 辺`(v, parent(v))`を削除する
    pub fn cut(&mut self, v: usize) -> Result<(), LinkCutError> {
        self.check_vertex(v)?;
        self.expose(v);
        let left = self.nodes[v].left;
        if left == NIL {
            return Err(LinkCutError::CutAtRoot(v));
        }
        self.nodes[left].parent = NIL;
        self.nodes[v].left = NIL;
        self.update_from_child(v);
        Ok(())
    }

    /// `v`の属する木の根を求める
    pub fn root_of(&mut self, v: usize) -> Result<usize, LinkCutError> {
        self.check_vertex(v)?;
        Ok(self.find_root(v))
    }

    pub fn connected(&mut self, u: usize, v: usize) -> Result<bool, LinkCutError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        Ok(self.find_root(u) == self.find_root(v))
    }

    /// 現在の根に対する`u`と`v`の最小共通祖先を求める。
    /// `evert`で根が動くと答えも変わることに注意。
    pub fn lowest_common_ancestor(&mut self, u: usize, v: usize) -> Result<usize, LinkCutError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        let root_u = self.find_root(u);
        let lca = self.expose(v);
        let root_v = self.leftmost(v);
        if root_u == root_v {
            Ok(lca)
        } else {
            Err(LinkCutError::Disconnected(u, v))
        }
    }

    /// `value[v] += delta`と加算する
    pub fn add(&mut self, v: usize, delta: T) -> Result<(), LinkCutError>
    where
        T: AddAssign,
    {
        self.check_vertex(v)?;
        self.expose(v);
        self.nodes[v].value += delta;
        self.update_from_child(v);
        Ok(())
    }

    /// `value[v] = value`に変更する
    pub fn update(&mut self, v: usize, value: T) -> Result<(), LinkCutError> {
        self.check_vertex(v)?;
        self.expose(v);
        self.nodes[v].value = value;
        self.update_from_child(v);
        Ok(())
    }
}

impl<T, Q, OP> LinkCutTree<T, Q, OP>
where
    OP: Operator<ValT = T, QValT = Q> + Commutative,
{
    fn evert_raw(&mut self, v: usize) {
        self.expose(v);
        self.nodes[v].reverse ^= true;
        self.propagate(v);
    }

    /// 頂点`v`を根にする
    pub fn evert(&mut self, v: usize) -> Result<(), LinkCutError> {
        self.check_vertex(v)?;
        self.evert_raw(v);
        Ok(())
    }

    /// `v`から`u`に向かう最初の辺を削除して木を2つに分ける
    pub fn split(&mut self, u: usize, v: usize) -> Result<(), LinkCutError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if self.find_root(u) != self.find_root(v) {
            return Err(LinkCutError::Disconnected(u, v));
        }
        self.evert_raw(u);
        self.cut(v)
    }

    /// 辺`(u, v)`を追加して2つの木を併合する。`u`, `v`の順序は関係ない。
    pub fn merge(&mut self, u: usize, v: usize) -> Result<(), LinkCutError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if self.find_root(u) == self.find_root(v) {
            return Err(LinkCutError::AlreadyConnected(u, v));
        }
        self.evert_raw(u);
        self.link_raw(v, u);
        Ok(())
    }

    /// `u`と`v`のパス上の集約値を求める。`u`が新しい根になる。
    pub fn query(&mut self, u: usize, v: usize) -> Result<Q, LinkCutError>
    where
        Q: Clone,
    {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if self.find_root(u) != self.find_root(v) {
            return Err(LinkCutError::Disconnected(u, v));
        }
        self.evert_raw(u);
        self.expose(v);
        Ok(self.nodes[v].query.clone())
    }
}

impl<T, Q, OP: Default> Default for LinkCutTree<T, Q, OP> {
    fn default() -> Self {
        Self::new(OP::default())
    }
}

fn bfs_prev(graph: &[Vec<usize>], root: usize) -> Vec<usize> {
    let mut prev = vec![NIL; graph.len()];
    let mut seen = vec![false; graph.len()];
    seen[root] = true;
    let mut queue = VecDeque::from([root]);
    while let Some(now) = queue.pop_front() {
        for &to in &graph[now] {
            if !seen[to] {
                seen[to] = true;
                prev[to] = now;
                queue.push_back(to);
            }
        }
    }
    prev
}
