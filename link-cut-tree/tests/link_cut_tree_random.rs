use link_cut_tree::{operation::Add, LinkCutError, LinkCutTree};
use rand::{rngs::ThreadRng, Rng};
use union_find::UnionFind;

const NONE: usize = usize::MAX;

/// 親配列で森をそのまま持つ愚直な比較対象
struct Naive {
    parent: Vec<usize>,
    values: Vec<i64>,
}

impl Naive {
    fn new(values: Vec<i64>) -> Self {
        Self {
            parent: vec![NONE; values.len()],
            values,
        }
    }

    fn root_of(&self, v: usize) -> usize {
        let mut current = v;
        while self.parent[current] != NONE {
            current = self.parent[current];
        }
        current
    }

    fn connected(&self, u: usize, v: usize) -> bool {
        self.root_of(u) == self.root_of(v)
    }

    fn ancestors(&self, v: usize) -> Vec<usize> {
        let mut chain = vec![v];
        let mut current = v;
        while self.parent[current] != NONE {
            current = self.parent[current];
            chain.push(current);
        }
        chain
    }

    fn evert(&mut self, v: usize) {
        let chain = self.ancestors(v);
        for pair in chain.windows(2) {
            self.parent[pair[1]] = pair[0];
        }
        self.parent[v] = NONE;
    }

    fn merge(&mut self, u: usize, v: usize) {
        self.evert(u);
        self.parent[u] = v;
    }

    fn split(&mut self, u: usize, v: usize) {
        self.evert(u);
        self.parent[v] = NONE;
    }

    fn lca(&self, u: usize, v: usize) -> usize {
        let up = self.ancestors(u);
        let mut current = v;
        loop {
            if up.contains(&current) {
                return current;
            }
            current = self.parent[current];
        }
    }

    fn query(&mut self, u: usize, v: usize) -> i64 {
        self.evert(u);
        let mut sum = 0;
        let mut current = v;
        loop {
            sum += self.values[current];
            if current == u {
                break;
            }
            current = self.parent[current];
        }
        sum
    }
}

fn random_test_once(rng: &mut ThreadRng) {
    let n = rng.gen_range(2..=40);
    let values = (0..n)
        .map(|_| rng.gen_range(-1_000_000..=1_000_000i64))
        .collect::<Vec<_>>();
    let mut naive = Naive::new(values.clone());
    let mut tree = LinkCutTree::from_iter_op(values, Add::new());

    for _ in 0..200 {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        match rng.gen_range(0..10) {
            0 | 1 => {
                if naive.connected(u, v) {
                    assert_eq!(tree.merge(u, v), Err(LinkCutError::AlreadyConnected(u, v)));
                } else {
                    tree.merge(u, v).unwrap();
                    naive.merge(u, v);
                }
            }
            2 => {
                if naive.parent[v] != NONE {
                    continue;
                }
                if naive.connected(u, v) {
                    assert_eq!(tree.link(u, v), Err(LinkCutError::AlreadyConnected(u, v)));
                } else {
                    tree.link(u, v).unwrap();
                    naive.parent[v] = u;
                }
            }
            3 => {
                if naive.parent[v] == NONE {
                    assert_eq!(tree.cut(v), Err(LinkCutError::CutAtRoot(v)));
                } else {
                    tree.cut(v).unwrap();
                    naive.parent[v] = NONE;
                }
            }
            4 => {
                if naive.parent[v] == NONE {
                    continue;
                }
                let parent = naive.parent[v];
                tree.split(parent, v).unwrap();
                naive.split(parent, v);
            }
            5 => {
                tree.evert(v).unwrap();
                naive.evert(v);
            }
            6 => {
                let x = rng.gen_range(-1_000_000..=1_000_000i64);
                if rng.gen_bool(0.5) {
                    tree.add(v, x).unwrap();
                    naive.values[v] += x;
                } else {
                    tree.update(v, x).unwrap();
                    naive.values[v] = x;
                }
            }
            7 => {
                if naive.connected(u, v) {
                    let expected = naive.query(u, v);
                    assert_eq!(tree.query(u, v), Ok(expected));
                } else {
                    assert_eq!(tree.query(u, v), Err(LinkCutError::Disconnected(u, v)));
                }
            }
            8 => {
                if naive.connected(u, v) {
                    assert_eq!(tree.lowest_common_ancestor(u, v), Ok(naive.lca(u, v)));
                } else {
                    assert_eq!(
                        tree.lowest_common_ancestor(u, v),
                        Err(LinkCutError::Disconnected(u, v))
                    );
                }
            }
            _ => {
                assert_eq!(tree.connected(u, v), Ok(naive.connected(u, v)));
                let root = tree.root_of(u).unwrap();
                assert_eq!(root, naive.root_of(u));
                assert_eq!(tree.root_of(u), Ok(root));
            }
        }
    }

    let mut uf = UnionFind::new(n);
    for (v, &parent) in naive.parent.iter().enumerate() {
        if parent != NONE {
            uf.unite(v, parent);
        }
    }
    let roots = naive.parent.iter().filter(|&&parent| parent == NONE).count();
    assert_eq!(uf.components(), roots);
    for u in 0..n {
        for v in 0..n {
            assert_eq!(tree.connected(u, v), Ok(uf.same(u, v)));
        }
    }
}

#[test]
fn link_cut_tree_random_test() {
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        random_test_once(&mut rng);
    }
}
