use std::cmp::Ordering;

use super::error::{Error, Result};

struct Node<T> {
    val: T,
    left: u32,
    right: u32,
    height: u32,
    size: u32,
}

/// AVL木による順序付き多重集合
///
/// ノードは配列上に置かれ, 32bitの番号で参照される. 番号`k`のノードは`nodes[k - 1]`にあり, `0`は空を表す.
/// 等しい値は挿入順に依存した順序で並ぶ.
///
/// 削除されたノードの場所は再利用されるまで空き番号の列に積まれる.
pub struct MultiSet<T> {
    nodes: Vec<Node<T>>,
    free: Vec<u32>,
    root: u32,
}

impl<T> MultiSet<T> {
    /// 空の多重集合を作る
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![],
            free: vec![],
            root: 0,
        }
    }

    /// 要素数を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.size(self.root)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root == 0
    }

    /// 全ての要素を削除する
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = 0;
    }

    fn node(&self, k: u32) -> &Node<T> {
        &self.nodes[k as usize - 1]
    }

    fn node_mut(&mut self, k: u32) -> &mut Node<T> {
        &mut self.nodes[k as usize - 1]
    }

    fn height(&self, k: u32) -> u32 {
        if k == 0 {
            0
        } else {
            self.node(k).height
        }
    }

    fn size(&self, k: u32) -> usize {
        if k == 0 {
            0
        } else {
            self.node(k).size as usize
        }
    }

    fn bias(&self, k: u32) -> i64 {
        if k == 0 {
            return 0;
        }
        let n = self.node(k);
        i64::from(self.height(n.left)) - i64::from(self.height(n.right))
    }

    fn alloc(&mut self, val: T) -> u32 {
        let node = Node {
            val,
            left: 0,
            right: 0,
            height: 1,
            size: 1,
        };
        if let Some(k) = self.free.pop() {
            *self.node_mut(k) = node;
            k
        } else {
            self.nodes.push(node);
            self.nodes.len() as u32
        }
    }

    fn update(&mut self, k: u32) {
        let (l, r) = (self.node(k).left, self.node(k).right);
        let height = 1 + self.height(l).max(self.height(r));
        let size = 1 + self.size(l) + self.size(r);
        let n = self.node_mut(k);
        n.height = height;
        n.size = size as u32;
    }

    fn rotate_right(&mut self, k: u32) -> u32 {
        let l = self.node(k).left;
        self.node_mut(k).left = self.node(l).right;
        self.node_mut(l).right = k;
        self.update(k);
        self.update(l);
        l
    }

    fn rotate_left(&mut self, k: u32) -> u32 {
        let r = self.node(k).right;
        self.node_mut(k).right = self.node(r).left;
        self.node_mut(r).left = k;
        self.update(k);
        self.update(r);
        r
    }

    /// 高さと大きさを計算し直し, 偏りが2以上なら回転して, 部分木の新しい根を返す.
    fn balance(&mut self, k: u32) -> u32 {
        self.update(k);
        let b = self.bias(k);
        if b >= 2 {
            let l = self.node(k).left;
            if self.bias(l) < 0 {
                let nl = self.rotate_left(l);
                self.node_mut(k).left = nl;
            }
            self.rotate_right(k)
        } else if b <= -2 {
            let r = self.node(k).right;
            if self.bias(r) > 0 {
                let nr = self.rotate_right(r);
                self.node_mut(k).right = nr;
            }
            self.rotate_left(k)
        } else {
            k
        }
    }

    /// 部分木`k`から最大のノードを切り離し, `(新しい根, 切り離したノード)`を返す.
    fn detach_max(&mut self, k: u32) -> (u32, u32) {
        let r = self.node(k).right;
        if r == 0 {
            return (self.node(k).left, k);
        }
        let (nr, max) = self.detach_max(r);
        self.node_mut(k).right = nr;
        (self.balance(k), max)
    }

    fn swap_values(&mut self, a: u32, b: u32) {
        let (a, b) = (a as usize - 1, b as usize - 1);
        let (lo, hi) = (a.min(b), a.max(b));
        let (x, y) = self.nodes.split_at_mut(hi);
        std::mem::swap(&mut x[lo].val, &mut y[0].val);
    }

    /// 小さい方から`index`番目 (0-indexed) の要素を返す.
    ///
    /// `index >= self.len()`なら`Error::OutOfRange`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn get(&self, mut index: usize) -> Result<&T> {
        if index >= self.len() {
            return Err(Error::out_of_range(index, self.len()));
        }
        let mut k = self.root;
        loop {
            let n = self.node(k);
            let ls = self.size(n.left);
            match index.cmp(&ls) {
                Ordering::Less => k = n.left,
                Ordering::Equal => return Ok(&n.val),
                Ordering::Greater => {
                    index -= ls + 1;
                    k = n.right;
                }
            }
        }
    }

    /// 最小の要素を返す. 空なら`Error::OutOfRange`.
    pub fn min(&self) -> Result<&T> {
        self.get(0)
    }

    /// 最大の要素を返す. 空なら`Error::OutOfRange`.
    pub fn max(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(Error::out_of_range(0, 0));
        }
        let mut k = self.root;
        while self.node(k).right != 0 {
            k = self.node(k).right;
        }
        Ok(&self.node(k).val)
    }

    /// 昇順に要素を列挙するイテレータを返す
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            set: self,
            stack: vec![],
            rest: self.len(),
        };
        iter.push_left(self.root);
        iter
    }

    fn collect_rev(&self, k: u32, out: &mut Vec<T>)
    where
        T: Clone,
    {
        if k == 0 {
            return;
        }
        let n = self.node(k);
        self.collect_rev(n.right, out);
        out.push(n.val.clone());
        self.collect_rev(n.left, out);
    }

    /// 全ての要素を昇順に並べた列を返す.
    #[must_use]
    pub fn order_ascending(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// 全ての要素を降順に並べた列を返す.
    #[must_use]
    pub fn order_descending(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        self.collect_rev(self.root, &mut out);
        out
    }
}

impl<T: Ord> MultiSet<T> {
    fn insert_at(&mut self, k: u32, val: T) -> u32 {
        if k == 0 {
            return self.alloc(val);
        }
        if val < self.node(k).val {
            let l = self.node(k).left;
            let l = self.insert_at(l, val);
            self.node_mut(k).left = l;
        } else {
            let r = self.node(k).right;
            let r = self.insert_at(r, val);
            self.node_mut(k).right = r;
        }
        self.balance(k)
    }

    /// 要素`val`を追加する.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn insert(&mut self, val: T) {
        self.root = self.insert_at(self.root, val);
    }

    fn remove_at(&mut self, k: u32, val: &T) -> (u32, bool) {
        if k == 0 {
            return (0, false);
        }
        let removed = match val.cmp(&self.node(k).val) {
            Ordering::Less => {
                let l = self.node(k).left;
                let (l, removed) = self.remove_at(l, val);
                self.node_mut(k).left = l;
                removed
            }
            Ordering::Greater => {
                let r = self.node(k).right;
                let (r, removed) = self.remove_at(r, val);
                self.node_mut(k).right = r;
                removed
            }
            Ordering::Equal => {
                let (l, r) = (self.node(k).left, self.node(k).right);
                if l == 0 || r == 0 {
                    self.free.push(k);
                    return (if l == 0 { r } else { l }, true);
                }
                // 左部分木の最大値 (直前の要素) と入れ替えてから, そのノードを消す
                let (nl, pred) = self.detach_max(l);
                self.swap_values(k, pred);
                self.free.push(pred);
                self.node_mut(k).left = nl;
                true
            }
        };
        (self.balance(k), removed)
    }

    /// 要素`val`を1つだけ削除する. 削除できたら`true`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn remove(&mut self, val: &T) -> bool {
        let (root, removed) = self.remove_at(self.root, val);
        self.root = root;
        removed
    }

    /// 要素`val`が含まれるか判定する.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    pub fn contains(&self, val: &T) -> bool {
        let mut k = self.root;
        while k != 0 {
            let n = self.node(k);
            match val.cmp(&n.val) {
                Ordering::Less => k = n.left,
                Ordering::Equal => return true,
                Ordering::Greater => k = n.right,
            }
        }
        false
    }

    /// `val`と等しい要素のうち最も小さい順位を返す. 無ければ`None`.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    pub fn index_of(&self, val: &T) -> Option<usize> {
        let mut k = self.root;
        let mut offset = 0;
        let mut found = None;
        while k != 0 {
            let n = self.node(k);
            match val.cmp(&n.val) {
                Ordering::Less => k = n.left,
                Ordering::Equal => {
                    found = Some(offset + self.size(n.left));
                    k = n.left;
                }
                Ordering::Greater => {
                    offset += self.size(n.left) + 1;
                    k = n.right;
                }
            }
        }
        found
    }

    /// `val`以上の要素のうち最も小さい順位を返す. 無ければ`self.len()`.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    pub fn lower_bound(&self, val: &T) -> usize {
        let mut k = self.root;
        let mut count = 0;
        while k != 0 {
            let n = self.node(k);
            if n.val < *val {
                count += self.size(n.left) + 1;
                k = n.right;
            } else {
                k = n.left;
            }
        }
        count
    }

    /// `val`以上の最小の要素を返す. 無ければ`fallback`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    pub fn lower_bound_value(&self, val: &T, fallback: T) -> T
    where
        T: Clone,
    {
        let mut k = self.root;
        let mut found = None;
        while k != 0 {
            let n = self.node(k);
            if n.val < *val {
                k = n.right;
            } else {
                found = Some(&n.val);
                k = n.left;
            }
        }
        found.cloned().unwrap_or(fallback)
    }
}

/// `MultiSet`の要素を昇順に辿るイテレータ
pub struct Iter<'a, T> {
    set: &'a MultiSet<T>,
    stack: Vec<u32>,
    rest: usize,
}

impl<T> Iter<'_, T> {
    fn push_left(&mut self, mut k: u32) {
        while k != 0 {
            self.stack.push(k);
            k = self.set.node(k).left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let k = self.stack.pop()?;
        let set = self.set;
        let n = set.node(k);
        self.push_left(n.right);
        self.rest -= 1;
        Some(&n.val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rest, Some(self.rest))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a MultiSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> Default for MultiSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for MultiSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<T: Ord> FromIterator<T> for MultiSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for MultiSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
