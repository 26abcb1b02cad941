//! 区間クエリ・順序付き多重集合・グラフ・剰余演算のためのライブラリ
//!
//! どの構造体もスレッド間で共有して書き換えることは想定していない.
//! 失敗し得る操作は`Result`を返し, 呼び出し側の誤りは`debug_assert!`で検出する.

pub mod dijkstra;
pub mod directedgraph;
pub mod error;
pub mod graph;
pub mod imos;
pub mod kruskal;
pub mod lazysegtree;
pub mod modfactorial;
pub mod modint;
pub mod multiset;
pub mod number;
pub mod prefixsum;
pub mod rollinghash;
pub mod segmenttree;
pub mod topologicalsort;
pub mod unionfind;
pub mod util;
pub mod weightedunionfind;

pub use error::{Error, Result};
