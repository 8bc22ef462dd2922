// https://judge.yosupo.jp/problem/unionfind
use proconio::input;
use union_find::UnionFind;

fn main() {
    input! { n: usize, q: usize }
    let mut uf = UnionFind::new(n);
    for _ in 0..q {
        input! { t: u8, u: usize, v: usize }
        match t {
            0 => {
                uf.unite(u, v);
            }
            _ => println!("{}", u8::from(uf.same(u, v))),
        }
    }
}
