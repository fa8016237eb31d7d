//! Open-addressing hash table keyed by station label.

use xxhash_rust::xxh3::xxh3_64;

const INITIAL_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
struct Entry<T> {
    hash: u64,
    key: String,
    value: T,
}

/// Linear-probing table with a power-of-two slot count.
#[derive(Debug, Clone)]
pub struct StationTable<T> {
    table: Vec<Option<Entry<T>>>,
    len: usize,
}

impl<T> Default for StationTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StationTable<T> {
    pub fn new() -> Self {
        Self {
            table: empty_slots(INITIAL_CAPACITY),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    fn find_slot(&self, key: &str, hash: u64) -> usize {
        let mask = self.table.len() - 1;
        let mut slot = hash as usize & mask;
        loop {
            match &self.table[slot] {
                Some(entry) if entry.hash != hash || entry.key != key => {
                    slot = (slot + 1) & mask;
                }
                _ => return slot,
            }
        }
    }

    pub fn get_or_insert_with<F>(&mut self, key: &str, default: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.reserve_one();
        let hash = xxh3_64(key.as_bytes());
        let slot = self.find_slot(key, hash);
        if self.table[slot].is_none() {
            self.len += 1;
        }
        let entry = self.table[slot].get_or_insert_with(|| Entry {
            hash,
            key: key.to_string(),
            value: default(),
        });
        &mut entry.value
    }

    /// Consumes the table, yielding `(key, value)` pairs in slot order.
    pub fn into_entries(self) -> impl Iterator<Item = (String, T)> {
        self.table
            .into_iter()
            .flatten()
            .map(|entry| (entry.key, entry.value))
    }

    // Keeps the load factor at or below 3/4 after the next insertion.
    fn reserve_one(&mut self) {
        if (self.len + 1) * 4 <= self.table.len() * 3 {
            return;
        }
        let new_cap = self.table.len() * 2;
        let old = std::mem::replace(&mut self.table, empty_slots(new_cap));
        for entry in old.into_iter().flatten() {
            let slot = self.find_slot(&entry.key, entry.hash);
            self.table[slot] = Some(entry);
        }
    }
}

fn empty_slots<T>(count: usize) -> Vec<Option<Entry<T>>> {
    std::iter::repeat_with(|| None).take(count).collect()
}
