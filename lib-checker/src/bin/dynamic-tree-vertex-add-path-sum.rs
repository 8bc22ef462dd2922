// https://judge.yosupo.jp/problem/dynamic_tree_vertex_add_path_sum
use link_cut_tree::{operation::Add, LinkCutTree};
use proconio::input;

fn main() {
    input! {
        n: usize,
        q: usize,
        a: [i64; n],
        edges: [(usize, usize); n - 1],
    }
    let mut graph = vec![vec![]; n];
    for &(u, v) in &edges {
        graph[u].push(v);
        graph[v].push(u);
    }
    let mut tree = LinkCutTree::from_graph_op(a, &graph, 0, Add::new()).unwrap();
    let mut ans = Vec::new();
    for _ in 0..q {
        input! { t: u8 }
        match t {
            0 => {
                input! { u: usize, v: usize, w: usize, x: usize }
                tree.split(u, v).unwrap();
                tree.merge(w, x).unwrap();
            }
            1 => {
                input! { p: usize, x: i64 }
                tree.add(p, x).unwrap();
            }
            _ => {
                input! { u: usize, v: usize }
                ans.push(tree.query(u, v).unwrap());
            }
        }
    }
    let ans = ans
        .into_iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    println!("{ans}");
}
