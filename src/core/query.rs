//! Generic query operators over Rust iterators.
//!
//! Joins, cross products and set operations return lazy iterators; nothing is
//! evaluated until the caller iterates. Operators that need to see a whole
//! input first (ordering, grouping, the lookup side of a join) buffer it when
//! called.

use crate::utils::error::{QueryError, Result};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering>;

/// Multi-key ordering. Keys are applied in the order they were added; later
/// keys only break ties left by earlier ones.
pub struct OrderBy<T> {
    keys: Vec<Comparator<T>>,
}

impl<T> OrderBy<T> {
    pub fn ascending<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        Self { keys: Vec::new() }.then_by(key, Direction::Ascending)
    }

    pub fn descending<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        Self { keys: Vec::new() }.then_by(key, Direction::Descending)
    }

    pub fn then_ascending<K, F>(self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        self.then_by(key, Direction::Ascending)
    }

    pub fn then_descending<K, F>(self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        self.then_by(key, Direction::Descending)
    }

    pub fn then_by<K, F>(mut self, key: F, direction: Direction) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        self.keys.push(Box::new(move |a, b| {
            let ordering = key(a).cmp(&key(b));
            match direction {
                Direction::Ascending => ordering,
                Direction::Descending => ordering.reverse(),
            }
        }));
        self
    }

    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        self.keys
            .iter()
            .map(|cmp| cmp(a, b))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    /// Collect and stable-sort the input.
    pub fn sorted<I>(&self, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut items: Vec<T> = items.into_iter().collect();
        items.sort_by(|a, b| self.compare(a, b));
        items
    }
}

/// Every pair of `left × right` satisfying `predicate`, left-major.
pub fn cross_where<'a, A, B, P>(
    left: &'a [A],
    right: &'a [B],
    predicate: P,
) -> impl Iterator<Item = (&'a A, &'a B)> + 'a
where
    P: Fn(&A, &B) -> bool + 'a,
{
    let predicate = Rc::new(predicate);
    left.iter().flat_map(move |a| {
        let predicate = Rc::clone(&predicate);
        right
            .iter()
            .filter(move |b| (*predicate)(a, b))
            .map(move |b| (a, b))
    })
}

fn build_lookup<'a, R, K, F>(right: &'a [R], key: F) -> HashMap<K, Vec<&'a R>>
where
    K: Eq + Hash,
    F: Fn(&R) -> K,
{
    let mut lookup: HashMap<K, Vec<&'a R>> = HashMap::new();
    for item in right {
        lookup.entry(key(item)).or_default().push(item);
    }
    lookup
}

/// Inner equi-join: one pair per (left, right) with equal keys.
pub fn inner_join<'a, L, R, K, FL, FR>(
    left: &'a [L],
    right: &'a [R],
    left_key: FL,
    right_key: FR,
) -> impl Iterator<Item = (&'a L, &'a R)> + 'a
where
    K: Eq + Hash + 'a,
    FL: Fn(&L) -> K + 'a,
    FR: Fn(&R) -> K,
{
    group_join(left, right, left_key, right_key)
        .flat_map(|(l, matches)| matches.into_iter().map(move |r| (l, r)))
}

/// Group join: exactly one row per left element with all of its matches.
pub fn group_join<'a, L, R, K, FL, FR>(
    left: &'a [L],
    right: &'a [R],
    left_key: FL,
    right_key: FR,
) -> impl Iterator<Item = (&'a L, Vec<&'a R>)> + 'a
where
    K: Eq + Hash + 'a,
    FL: Fn(&L) -> K + 'a,
    FR: Fn(&R) -> K,
{
    let lookup = build_lookup(right, right_key);
    left.iter().map(move |l| {
        let matches = lookup.get(&left_key(l)).cloned().unwrap_or_default();
        (l, matches)
    })
}

/// Left outer join, flattened. Left elements without a match yield a single
/// row with `None` on the right.
pub fn left_join<'a, L, R, K, FL, FR>(
    left: &'a [L],
    right: &'a [R],
    left_key: FL,
    right_key: FR,
) -> impl Iterator<Item = (&'a L, Option<&'a R>)> + 'a
where
    K: Eq + Hash + 'a,
    FL: Fn(&L) -> K + 'a,
    FR: Fn(&R) -> K,
{
    group_join(left, right, left_key, right_key).flat_map(|(l, matches)| {
        let rows: Vec<(&'a L, Option<&'a R>)> = if matches.is_empty() {
            vec![(l, None)]
        } else {
            matches.into_iter().map(|r| (l, Some(r))).collect()
        };
        rows
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<K, T> {
    pub key: K,
    pub items: Vec<T>,
}

impl<K, T> Group<K, T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Partition by key. Groups come out in first-appearance order of their key
/// and keep the input order of their members.
pub fn group_by<T, K, I, F>(items: I, key: F) -> Vec<Group<K, T>>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Group<K, T>> = Vec::new();

    for item in items {
        let k = key(&item);
        match index.get(&k) {
            Some(&position) => groups[position].items.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push(Group {
                    key: k,
                    items: vec![item],
                });
            }
        }
    }

    groups
}

/// Distinct elements of either input.
pub fn union<T, A, B>(first: A, second: B) -> impl Iterator<Item = T>
where
    T: Eq + Hash + Clone,
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(move |item| seen.insert(item.clone()))
}

/// Distinct elements of `first` that also appear in `second`.
pub fn intersect<T, A, B>(first: A, second: B) -> impl Iterator<Item = T>
where
    T: Eq + Hash + Clone,
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
{
    let other: HashSet<T> = second.into_iter().collect();
    let mut seen = HashSet::new();
    first
        .into_iter()
        .filter(move |item| other.contains(item) && seen.insert(item.clone()))
}

/// Distinct elements of `first` that do not appear in `second`.
pub fn except<T, A, B>(first: A, second: B) -> impl Iterator<Item = T>
where
    T: Eq + Hash + Clone,
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
{
    let other: HashSet<T> = second.into_iter().collect();
    let mut seen = HashSet::new();
    first
        .into_iter()
        .filter(move |item| !other.contains(item) && seen.insert(item.clone()))
}

pub fn first<T, I>(items: I, what: &str) -> Result<T>
where
    I: IntoIterator<Item = T>,
{
    items.into_iter().next().ok_or_else(|| QueryError::NoMatch {
        what: what.to_string(),
    })
}

pub fn first_where<T, I, P>(items: I, predicate: P, what: &str) -> Result<T>
where
    I: IntoIterator<Item = T>,
    P: FnMut(&T) -> bool,
{
    first_or_none(items, predicate).ok_or_else(|| QueryError::NoMatch {
        what: what.to_string(),
    })
}

/// `None` is the "no value" outcome, not an error.
pub fn first_or_none<T, I, P>(items: I, predicate: P) -> Option<T>
where
    I: IntoIterator<Item = T>,
    P: FnMut(&T) -> bool,
{
    items.into_iter().find(predicate)
}

/// Exactly one match, or `NoMatch` / `MultipleMatches`. Scans the whole input
/// so the reported count is exact.
pub fn single_where<T, I, P>(items: I, mut predicate: P, what: &str) -> Result<T>
where
    I: IntoIterator<Item = T>,
    P: FnMut(&T) -> bool,
{
    let mut found = None;
    let mut count = 0usize;

    for item in items {
        if predicate(&item) {
            count += 1;
            if found.is_none() {
                found = Some(item);
            }
        }
    }

    match (found, count) {
        (Some(item), 1) => Ok(item),
        (None, _) => Err(QueryError::NoMatch {
            what: what.to_string(),
        }),
        (Some(_), count) => Err(QueryError::MultipleMatches {
            what: what.to_string(),
            count,
        }),
    }
}

pub fn single<T, I>(items: I, what: &str) -> Result<T>
where
    I: IntoIterator<Item = T>,
{
    single_where(items, |_| true, what)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        group: &'static str,
        score: i32,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, group: "b", score: 30 },
            Row { id: 2, group: "a", score: 10 },
            Row { id: 3, group: "b", score: 10 },
            Row { id: 4, group: "c", score: 20 },
            Row { id: 5, group: "a", score: 30 },
            Row { id: 6, group: "a", score: 10 },
        ]
    }

    #[test]
    fn test_filter_is_exact_subset() {
        let input = rows();
        let output: Vec<&Row> = input.iter().filter(|r| r.score >= 20).collect();

        assert!(output.iter().all(|r| r.score >= 20));
        assert_eq!(
            output.len(),
            input.iter().filter(|r| r.score >= 20).count()
        );
        assert!(output.iter().all(|r| input.contains(r)));
    }

    #[test]
    fn test_order_by_primary_then_secondary() {
        let order = OrderBy::descending(|r: &Row| r.score).then_ascending(|r: &Row| r.group);
        let sorted = order.sorted(rows());

        assert_eq!(sorted.len(), rows().len());
        for pair in sorted.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                assert!(pair[0].group <= pair[1].group);
            }
        }
        let ids: Vec<u32> = sorted.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 1, 4, 2, 6, 3]);
    }

    #[test]
    fn test_order_by_is_stable_on_full_ties() {
        let order = OrderBy::ascending(|r: &Row| r.group);
        let ids: Vec<u32> = order.sorted(rows()).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 5, 6, 1, 3, 4]);
    }

    #[test]
    fn test_cross_where_is_left_major() {
        let a = [1, 2, 3];
        let b = [2, 3];
        let pairs: Vec<(i32, i32)> = cross_where(&a, &b, |x, y| x < y)
            .map(|(x, y)| (*x, *y))
            .collect();
        assert_eq!(pairs, vec![(1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_cross_where_without_filter_is_full_product() {
        let a = [1, 2, 3];
        let b = ["x", "y"];
        assert_eq!(cross_where(&a, &b, |_, _| true).count(), 6);
    }

    #[test]
    fn test_group_join_sizes_match_inner_join() {
        let left = ["a", "b", "z"];
        let right = rows();

        let inner = inner_join(&left, &right, |l| *l, |r| r.group).count();
        let grouped: Vec<_> = group_join(&left, &right, |l| *l, |r| r.group).collect();

        assert_eq!(grouped.len(), left.len());
        assert_eq!(grouped.iter().map(|(_, m)| m.len()).sum::<usize>(), inner);
        assert_eq!(inner, 5);
        assert!(grouped[2].1.is_empty());
    }

    #[test]
    fn test_inner_join_keeps_left_then_right_order() {
        let left = ["b", "a"];
        let right = rows();
        let ids: Vec<(&str, u32)> = inner_join(&left, &right, |l| *l, |r| r.group)
            .map(|(l, r)| (*l, r.id))
            .collect();
        assert_eq!(ids, vec![("b", 1), ("b", 3), ("a", 2), ("a", 5), ("a", 6)]);
    }

    #[test]
    fn test_left_join_emits_sentinel_once() {
        let left = ["c", "z", "a"];
        let right = rows();
        let joined: Vec<(&str, Option<u32>)> = left_join(&left, &right, |l| *l, |r| r.group)
            .map(|(l, r)| (*l, r.map(|r| r.id)))
            .collect();

        assert_eq!(
            joined,
            vec![
                ("c", Some(4)),
                ("z", None),
                ("a", Some(2)),
                ("a", Some(5)),
                ("a", Some(6)),
            ]
        );
        for l in left {
            assert!(joined.iter().any(|(k, _)| *k == l));
        }
    }

    #[test]
    fn test_group_by_first_appearance_and_nesting() {
        let groups = group_by(rows(), |r| r.group);
        let keys: Vec<&str> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(groups[1].len(), 3);

        let nested: Vec<Group<i32, Row>> = group_by(groups[1].items.clone(), |r| r.score);
        assert_eq!(nested.len(), 2);
        assert_eq!(nested[0].key, 10);
        assert_eq!(nested[0].items.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 6]);
    }

    #[test]
    fn test_set_identities() {
        let a = vec!['c', 'a', 'b', 'a', 'd'];
        let b = vec!['d', 'e', 'c', 'e'];

        let mut ab: Vec<char> = union(a.clone(), b.clone()).collect();
        let mut ba: Vec<char> = union(b.clone(), a.clone()).collect();
        ab.sort();
        ba.sort();
        assert_eq!(ab, ba);
        assert_eq!(ab, vec!['a', 'b', 'c', 'd', 'e']);

        let both: Vec<char> = intersect(a.clone(), b.clone()).collect();
        assert_eq!(both, vec!['c', 'd']);
        assert!(both.iter().all(|x| a.contains(x) && b.contains(x)));

        let only_a: Vec<char> = except(a.clone(), b.clone()).collect();
        assert_eq!(only_a, vec!['a', 'b']);
        assert!(only_a.iter().all(|x| !b.contains(x)));
    }

    #[test]
    fn test_first_variants() {
        let input = rows();
        assert_eq!(first(&input, "row").unwrap().id, 1);
        assert_eq!(first_where(&input, |r| r.group == "c", "row in c").unwrap().id, 4);
        assert!(first_or_none(&input, |r| r.group == "q").is_none());

        let empty: Vec<Row> = Vec::new();
        assert!(matches!(first(empty, "row"), Err(QueryError::NoMatch { .. })));
    }

    #[test]
    fn test_single_outcomes() {
        let input = rows();

        assert_eq!(single_where(&input, |r| r.id == 4, "row 4").unwrap().id, 4);

        match single_where(&input, |r| r.group == "a", "row in a") {
            Err(QueryError::MultipleMatches { count, .. }) => assert_eq!(count, 3),
            other => panic!("expected MultipleMatches, got {:?}", other),
        }

        assert!(matches!(
            single_where(&input, |r| r.id == 99, "row 99"),
            Err(QueryError::NoMatch { .. })
        ));
        assert!(matches!(
            single(&input, "row"),
            Err(QueryError::MultipleMatches { count: 6, .. })
        ));
    }
}
