use std::collections::{BTreeMap, btree_map};

use crate::record::Record;

/// Measurements bucketed by key. Keys iterate in ascending order; values
/// keep the order they were pushed in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GroupTable {
    groups: BTreeMap<i64, Vec<i64>>,
}

impl GroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups field 2 of every record by field 0.
    pub fn from_records(records: &[Record]) -> Self {
        let mut table = Self::new();
        for record in records {
            table.push(record.vertex_count, record.time);
        }
        table
    }

    pub fn push(&mut self, key: i64, value: i64) {
        self.groups.entry(key).or_default().push(value);
    }

    pub fn get(&self, key: i64) -> Option<&[i64]> {
        self.groups.get(&key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.groups.iter(),
        }
    }
}

pub struct Iter<'a> {
    inner: btree_map::Iter<'a, i64, Vec<i64>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (i64, &'a [i64]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, values)| (*key, values.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a GroupTable {
    type Item = (i64, &'a [i64]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(vertex_count: i64, time: i64) -> Record {
        Record {
            vertex_count,
            probability: None,
            time,
            timestamp: None,
        }
    }

    #[test]
    fn groups_in_file_order_without_dedup() {
        let table = GroupTable::from_records(&[
            record(5, 10),
            record(3, 100),
            record(5, 10),
            record(3, 98),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(5), Some(&[10, 10][..]));
        assert_eq!(table.get(3), Some(&[100, 98][..]));
        assert_eq!(table.get(4), None);
    }

    #[test]
    fn iterates_keys_ascending() {
        let table = GroupTable::from_records(&[record(30, 1), record(10, 2), record(20, 3)]);
        let keys: Vec<_> = table.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![10, 20, 30]);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = GroupTable::from_records(&[]);
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
    }
}
