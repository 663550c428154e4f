//! Exact-match side of the dual index.
//!
//! The directory only relies on the key-value contract below; the
//! hashing/bucket strategy behind it carries no algorithmic weight
//! here. The trait seam also lets tests inject misbehaving
//! implementations to exercise divergence detection.

/// Key-value contract for the exact-match index
pub trait ExactIndex {
    /// Upsert a phone number under a name
    fn insert(&mut self, name: &str, phone: &str);

    fn lookup(&self, name: &str) -> Option<&str>;

    /// Remove an entry; true iff one existed
    fn delete(&mut self, name: &str) -> bool;

    /// Replace the phone for `name` only if the stored phone equals
    /// `expected_phone`. Returns false when the entry is absent or the
    /// precondition fails.
    fn update(&mut self, name: &str, expected_phone: &str, new_phone: &str) -> bool;

    /// Number of live entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hash-map-backed default implementation
#[derive(Debug, Default)]
pub struct HashIndex {
    entries: std::collections::HashMap<String, String>,
}

impl HashIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExactIndex for HashIndex {
    fn insert(&mut self, name: &str, phone: &str) {
        self.entries.insert(name.to_string(), phone.to_string());
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    fn delete(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    fn update(&mut self, name: &str, expected_phone: &str, new_phone: &str) -> bool {
        match self.entries.get_mut(name) {
            Some(phone) if phone == expected_phone => {
                *phone = new_phone.to_string();
                true
            }
            _ => false,
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
