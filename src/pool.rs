//! Entity pools: arena storage for mesh elements.
//!
//! A [`Pool`] owns all elements of one kind (vertices, edges or faces) and
//! hands out stable integer [handles][crate::handle] for them. Elements are
//! stored in a [`StableVec`][stable_vec::StableVec], so killing an element
//! leaves a hole that a later allocation may fill: handles of dead elements
//! are reused, while handles of live elements never move.
//!
//! # No generation tags
//!
//! A reused slot carries no memory of its prior occupant. A handle that
//! outlives its element and is used after the slot was filled again will
//! silently refer to the new element — the pool cannot detect this. Callers
//! must treat a killed handle as poisoned and drop all copies of it. Adding
//! a per-slot generation counter would close this gap at the cost of wider
//! handles; this layer deliberately does not.

use std::{fmt, marker::PhantomData, ops};

use failure::Fail;
use stable_vec::{
    StableVec,
    core::DefaultCore,
    iter::{Indices, Iter as SvIter},
};

use crate::{
    handle::{hsize, Handle, MeshElement},
    util::Empty,
};


/// The error raised when a pool cannot satisfy an allocation.
///
/// This is the only error kind of this crate. Everything else that can go
/// wrong (killing a dead handle, reading an unset cross-reference) is a
/// violation of a documented caller contract and panics instead of being
/// reported as a runtime error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
#[fail(display = "{} pool exhausted (capacity: {})", element, capacity)]
pub struct AllocationError {
    /// The kind of element the failed allocation asked for.
    pub element: MeshElement,

    /// The capacity of the exhausted pool.
    pub capacity: hsize,
}


/// Configuration of a single entity pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolConfig {
    /// Maximum number of simultaneously live elements. `None` means
    /// unbounded: [`Pool::make`] then never fails. A bound turns the pool
    /// into an entity budget, which engines use to cap the size of a
    /// subdivision built from untrusted input.
    pub capacity: Option<hsize>,

    /// Number of element slots to preallocate.
    pub reserve: hsize,
}


/// An arena of elements of one kind, addressed by handles of type `H`.
///
/// `T` is the data stored per element. The pool zero-initializes new
/// elements via [`Empty`] and drops the data again when the element is
/// killed, so `T`'s `Drop` impl is the element destructor.
#[derive(Clone)]
pub struct Pool<H: Handle, T> {
    items: StableVec<T>,
    capacity: Option<hsize>,
    _dummy: PhantomData<H>,
}

impl<H: Handle, T> Pool<H, T> {
    /// Creates an empty, unbounded pool.
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Creates an empty pool as described by `config`.
    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            items: StableVec::with_capacity(config.reserve as usize),
            capacity: config.capacity,
            _dummy: PhantomData,
        }
    }

    /// Allocates a new, empty element and returns its handle.
    ///
    /// Fails if and only if a configured capacity is exhausted. The handle
    /// of an element killed earlier may be returned again for a different
    /// element.
    pub fn make(&mut self) -> Result<H, AllocationError>
    where
        T: Empty,
    {
        if let Some(capacity) = self.capacity {
            if self.num_elements() >= capacity {
                return Err(AllocationError {
                    element: H::ELEMENT,
                    capacity,
                });
            }
        }

        Ok(H::from_usize(self.items.push(T::empty())))
    }

    /// Releases the element referred to by `handle` and drops its data.
    ///
    /// The slot becomes available for reuse by a later [`make`][Self::make].
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not refer to a live element of this pool.
    /// Killing twice or killing a handle obtained from a different pool is
    /// a programming error, not a runtime condition.
    pub fn kill(&mut self, handle: H) {
        if self.items.remove(handle.to_usize()).is_none() {
            panic!("no live element for handle '{:?}'", handle);
        }
    }

    /// Kills every live element. Idempotent; the pool remains usable and
    /// keeps its capacity settings.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Checks if `handle` refers to a live element of this pool.
    pub fn contains(&self, handle: H) -> bool {
        self.items.has_element_at(handle.to_usize())
    }

    /// Returns a reference to the element's data, or `None` if `handle` is
    /// not live.
    pub fn get(&self, handle: H) -> Option<&T> {
        self.items.get(handle.to_usize())
    }

    /// Returns a mutable reference to the element's data, or `None` if
    /// `handle` is not live.
    pub fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.items.get_mut(handle.to_usize())
    }

    /// Returns the number of live elements.
    pub fn num_elements(&self) -> hsize {
        self.items.num_elements() as hsize
    }

    /// Checks if this pool contains no live elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the configured capacity, `None` meaning unbounded.
    pub fn capacity(&self) -> Option<hsize> {
        self.capacity
    }

    /// Changes the capacity. Lowering it below the current number of live
    /// elements does not kill anything; it only makes further `make` calls
    /// fail until enough elements were killed.
    pub fn set_capacity(&mut self, capacity: Option<hsize>) {
        self.capacity = capacity;
    }

    /// Reserves memory for `additional` more elements.
    pub fn reserve(&mut self, additional: hsize) {
        self.items.reserve(additional as usize);
    }

    /// Returns an iterator over the handles of all live elements. Handles
    /// are yielded with increasing index value.
    pub fn handles(&self) -> Handles<'_, H, T> {
        Handles {
            iter: self.items.indices(),
            _dummy: PhantomData,
        }
    }

    /// Returns an iterator over all live elements and their handles.
    pub fn iter(&self) -> Iter<'_, H, T> {
        Iter {
            iter: self.items.iter(),
            _dummy: PhantomData,
        }
    }
}

impl<H: Handle, T> ops::Index<H> for Pool<H, T> {
    type Output = T;
    fn index(&self, handle: H) -> &Self::Output {
        match self.get(handle) {
            Some(data) => data,
            None => panic!("no live element for handle '{:?}'", handle),
        }
    }
}

impl<H: Handle, T> ops::IndexMut<H> for Pool<H, T> {
    fn index_mut(&mut self, handle: H) -> &mut Self::Output {
        match self.get_mut(handle) {
            Some(data) => data,
            None => panic!("no live element for handle '{:?}'", handle),
        }
    }
}

impl<H: Handle, T> Empty for Pool<H, T> {
    fn empty() -> Self {
        Self::new()
    }
}

impl<H: Handle, T: fmt::Debug> fmt::Debug for Pool<H, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}


/// Iterator over the handles of the live elements of a pool. Yields handles
/// with increasing index value.
#[derive(Debug, Clone)]
pub struct Handles<'a, H: Handle, T> {
    iter: Indices<'a, T, DefaultCore<T>>,
    _dummy: PhantomData<H>,
}

impl<'a, H: Handle, T> Iterator for Handles<'a, H, T> {
    type Item = H;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(H::from_usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Iterator over the live elements of a pool and their handles. Yields
/// elements with increasing handle index value.
#[derive(Debug, Clone)]
pub struct Iter<'a, H: Handle, T> {
    iter: SvIter<'a, T, DefaultCore<T>>,
    _dummy: PhantomData<H>,
}

impl<'a, H: Handle, T> Iterator for Iter<'a, H, T> {
    type Item = (H, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(idx, data)| (H::from_usize(idx), data))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}
