// https://onlinejudge.u-aizu.ac.jp/problems/GRL_5_C
use link_cut_tree::{operation::Noop, LinkCutTree};
use proconio::input;

fn main() {
    input! { n: usize }
    let mut graph = vec![vec![]; n];
    for parent in 0..n {
        input! { k: usize, children: [usize; k] }
        for child in children {
            graph[parent].push(child);
        }
    }
    let mut tree = LinkCutTree::from_graph_op(vec![(); n], &graph, 0, Noop::new()).unwrap();
    input! { q: usize }
    for _ in 0..q {
        input! { u: usize, v: usize }
        println!("{}", tree.lowest_common_ancestor(u, v).unwrap());
    }
}
