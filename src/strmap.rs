#![allow(unsafe_code)]

use std::mem;

#[derive(Debug, Default)]
pub(crate) struct StrMap<T> {
    keys: Vec<Box<str>>,
    values: Vec<T>,
}

impl<T> StrMap<T> {
    pub(crate) fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    pub(crate) fn find(&self, key: &str) -> Option<&T> {
        match self.find_index(key) {
            Ok(i) => Some(unsafe { self.values.get_unchecked(i) }),
            Err(_) => None,
        }
    }

    pub(crate) fn find_mut(&mut self, key: &str) -> Option<&mut T> {
        match self.find_index(key) {
            Ok(i) => Some(unsafe { self.values.get_unchecked_mut(i) }),
            Err(_) => None,
        }
    }

    pub(crate) fn insert(&mut self, key: &str, value: T) -> Option<T> {
        match self.find_index(key) {
            Ok(i) => {
                let slot = unsafe { self.values.get_unchecked_mut(i) };
                Some(mem::replace(slot, value))
            }
            Err(i) => {
                self.keys.insert(i, key.into());
                self.values.insert(i, value);
                None
            }
        }
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<T> {
        match self.find_index(key) {
            Ok(i) => {
                self.keys.remove(i);
                Some(self.values.remove(i))
            }
            Err(_) => None,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
    }

    fn find_index(&self, key: &str) -> Result<usize, usize> {
        self.keys.binary_search_by(|probe| (**probe).cmp(key))
    }
}
