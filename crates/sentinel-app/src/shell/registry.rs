//! Process-scoped single-instance slot for the kiosk window.
//!
//! Replaces an ambient nullable global with an owned optional handle and
//! explicit create/destroy/is_present operations. At most one value
//! exists at any time.

pub struct SingleSlot<T> {
    inner: Option<T>,
}

impl<T> SingleSlot<T> {
    pub const fn empty() -> Self {
        Self { inner: None }
    }

    /// Install a value. Returns the displaced value if one was present;
    /// the caller decides whether displacement is an error.
    pub fn create(&mut self, value: T) -> Option<T> {
        self.inner.replace(value)
    }

    /// Take the value out, leaving the slot empty.
    pub fn destroy(&mut self) -> Option<T> {
        self.inner.take()
    }

    pub fn is_present(&self) -> bool {
        self.inner.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.inner.as_ref()
    }
}
