use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Reactive value cell with interior mutability.
///
/// `Signal<T>` uses `Arc<RwLock<T>>` internally, making it cheap to clone:
/// every clone observes the same value. Each write bumps a version counter,
/// which derived cells use to decide whether they must recompute.
///
/// Writes replace the whole value; there is no in-place partial mutation of
/// a snapshot another reader may hold.
///
/// # Example
///
/// ```
/// use minivest::signal::Signal;
///
/// let count = Signal::new(1);
/// let before = count.version();
///
/// count.update(|v| *v += 1);
/// assert_eq!(count.get(), 2);
/// assert!(count.version() > before);
/// ```
#[derive(Debug)]
pub struct Signal<T> {
    inner: Arc<RwLock<T>>,
    version: Arc<AtomicU64>,
}

impl<T> Signal<T> {
    /// Create a new signal with the given value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            version: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// Read the current value through a closure without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&*guard),
            Err(poisoned) => f(&*poisoned.into_inner()),
        }
    }

    /// Set a new value
    pub fn set(&self, value: T) {
        self.update(|v| *v = value);
    }

    /// Update the value using a closure
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut *guard);
        self.version.fetch_add(1, Ordering::SeqCst);
    }

    /// Update the value using a fallible closure, holding the write lock
    /// for the whole read-modify-write. The version is bumped only on `Ok`.
    pub fn try_update<E>(&self, f: impl FnOnce(&mut T) -> Result<(), E>) -> Result<(), E> {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut *guard)?;
        self.version.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Number of writes since creation
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// A read-only view sharing this signal's value
    pub fn read_only(&self) -> ReadSignal<T> {
        ReadSignal {
            source: self.clone(),
        }
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            version: Arc::clone(&self.version),
        }
    }
}

impl<T: Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Read-only view of a [`Signal`].
///
/// Observes every write made through the originating signal but cannot
/// write itself.
#[derive(Debug)]
pub struct ReadSignal<T> {
    source: Signal<T>,
}

impl<T> ReadSignal<T> {
    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.source.get()
    }

    /// Read the current value through a closure without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.source.with(f)
    }

    /// Number of writes to the underlying signal
    pub fn version(&self) -> u64 {
        self.source.version()
    }
}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}
