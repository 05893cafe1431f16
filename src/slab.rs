use std::mem;
use std::ops::{Index, IndexMut};

#[cfg(test)]
use static_assertions::const_assert_eq;

/// An index into a slab, or "null"
///
/// This type is essentially `Option<usize>`. The value usize::MAX is
/// reserved to represent `None` or "null".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Ptr(usize);

// We've designed `Ptr` to use as little space as possible to help with cache
#[cfg(test)]
const_assert_eq!(mem::size_of::<Ptr>(), 8);
// Using `Option<usize>` directly would use more space.
#[cfg(test)]
const_assert_eq!(mem::size_of::<Option<usize>>(), 16);

impl Default for Ptr {
    #[inline(always)]
    fn default() -> Self {
        Self::null()
    }
}

impl Ptr {
    #[inline(always)]
    #[allow(dead_code)] // May be useful later
    pub fn new(index: usize) -> Option<Self> {
        if index == usize::MAX {
            None
        } else {
            Some(Ptr(index))
        }
    }

    #[inline(always)]
    pub fn null() -> Self {
        Ptr(usize::MAX)
    }

    // Methods on this type must be `#[inline]` to help the compiler see that the `Option` values
    // are only intermediate values used to make writing code easier. Instead of checking for `None`
    // and then `usize::MAX`, we want the compiler to just check the latter.
    #[inline(always)]
    pub fn into_index(self) -> Option<usize> {
        let Ptr(index) = self;
        if index == usize::MAX {
            None
        } else {
            Some(index)
        }
    }

    #[inline(always)]
    pub fn is_null(self) -> bool {
        self.0 == usize::MAX
    }
}

#[derive(Debug, Clone)]
enum Entry<T> {
    Occupied(T),
    /// The index of the next entry in the free list or `Ptr::null()` if this
    /// is the last entry in the free list
    Free { next: Ptr },
}

/// An allocation primitive similar to `Vec`, but implemented to reuse space from removed entries.
///
/// Items are kept contiguously in memory, but indexes are not shifted when an individual item is
/// removed. Instead of always pushing items after the previously pushed item, this data structure
/// will reuse space from previously removed entries when possible. This makes removal cheaper than
/// a standard `Vec<T>`.
///
/// Every entry is tagged, so indexing an entry that was previously removed is detected and treated
/// as a broken invariant in the caller: it panics rather than yielding stale data.
#[derive(Debug, Clone)]
pub struct Slab<T> {
    entries: Vec<Entry<T>>,
    /// The index of the first entry in the free list or Ptr::null() if the free list is empty
    ///
    /// The free list is a linked list stored in `entries` that is used as a stack to track which
    /// entries have space that can be reused in calls to `push`.
    free_list_head: Ptr,
    /// The length of the free list
    free_len: usize,
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self {
            entries: Vec::default(),
            free_list_head: Ptr::null(),
            free_len: 0,
        }
    }
}

impl<T> Slab<T> {
    /// Creates an empty slab
    ///
    /// The slab is initially created with a capacity of 0, so it will not allocate until it is
    /// first inserted into.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty slab with the specified capacity.
    ///
    /// The slab will be able to hold at least `capacity` elements without reallocating. If
    /// `capacity` is 0, the slab will not allocate.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Returns the number of entries in the slab that contain values
    ///
    /// This is the number of items pushed minus the number of items removed
    pub fn len(&self) -> usize {
        self.entries.len() - self.free_len
    }

    /// Returns true if the slab is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements the slab can hold without reallocating.
    ///
    /// This number is a lower bound; the slab might be able to hold more, but is guaranteed to be
    /// able to hold at least this many.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Returns a reference to the value at the given index, or `None` if the index is null, out of
    /// bounds, or points at a removed entry
    pub fn get(&self, index: Ptr) -> Option<&T> {
        match self.entries.get(index.into_index()?) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Pushes a value into the slab and returns the index at which it was inserted.
    ///
    /// The item may be inserted at the end of the list, or in the space from an item that was
    /// previously removed. Indexes returned from this method remain valid until the entry is
    /// removed or the slab is cleared.
    pub fn push(&mut self, value: T) -> Ptr {
        // Check if we can reuse some space from the free list
        if let Some(free_list_head) = self.free_list_head.into_index() {
            let entry = &mut self.entries[free_list_head];

            // Update the free list to point to the next free list entry
            let next_free = match *entry {
                Entry::Free { next } => next,
                // The free list only ever links to free entries
                Entry::Occupied(_) => unreachable!("free list pointed at an occupied entry"),
            };
            self.free_list_head = next_free;
            self.free_len -= 1;

            *entry = Entry::Occupied(value);

            return Ptr(free_list_head);
        }

        let index = self.entries.len();
        // Since we store `Ptr` internally, we can't have usize::MAX as a valid index into the slab
        if index >= usize::MAX {
            panic!("cannot have more than usize::MAX - 1 entries in slab");
        }

        self.entries.push(Entry::Occupied(value));

        Ptr(index)
    }

    /// Removes an item from the slab, returning its value.
    ///
    /// Note that this method has no effect on the allocated capacity of the slab.
    ///
    /// The space for the item will be reused in future calls to `push`. This does not move or
    /// modify any other entries in the slab. Their indexes remain the same and can still be used.
    ///
    /// # Panics
    ///
    /// Panics if the index is null, out of bounds, or was already removed.
    pub fn remove(&mut self, index: Ptr) -> T {
        let index = match index.into_index() {
            Some(index) => index,
            None => panic!("attempt to remove the null entry"),
        };

        // Retrieve the value in this entry by swapping in a free entry
        let prev_entry = mem::replace(&mut self.entries[index], Entry::Free {
            next: self.free_list_head,
        });

        self.free_list_head = Ptr(index);
        self.free_len += 1;

        match prev_entry {
            Entry::Occupied(value) => value,
            Entry::Free {..} => panic!("attempt to remove an entry that was already removed"),
        }
    }

    /// Clears the slab, removing all values.
    ///
    /// Note that this method has no effect on the allocated capacity of the slab.
    ///
    /// This invalidates all previous indexes returned from `push`.
    pub fn clear(&mut self) {
        // Clearing `entries` has the effect of marking every entry as free without affecting the
        // allocated capacity. The free list must be cleared too so we don't end up indexing out of
        // bounds into the now empty `entries`.
        self.entries.clear();
        self.free_list_head = Ptr::null();
        self.free_len = 0;
    }

    /// Reserves capacity for at least `additional` more elements to be inserted in the slab.
    ///
    /// The collection may reserve more space to avoid frequent reallocations. After calling
    /// reserve, capacity will be greater than or equal to `self.len() + additional`. Does nothing
    /// if capacity is already sufficient.
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional)
    }

    /// Shrinks the capacity of the slab as much as possible.
    ///
    /// It will drop down as close as possible to the length but may still be greater.
    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit()
    }
}

impl<T> Index<Ptr> for Slab<T> {
    type Output = T;

    fn index(&self, index: Ptr) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("indexed a null or removed slab entry"),
        }
    }
}

impl<T> IndexMut<Ptr> for Slab<T> {
    fn index_mut(&mut self, index: Ptr) -> &mut T {
        let index = match index.into_index() {
            Some(index) => index,
            None => panic!("indexed a null or removed slab entry"),
        };
        match self.entries.get_mut(index) {
            Some(Entry::Occupied(value)) => value,
            _ => panic!("indexed a null or removed slab entry"),
        }
    }
}
