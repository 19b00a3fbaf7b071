#![doc = include_str!("../README.md")]
#![no_std]
#![cfg_attr(feature = "allocator_api", feature(allocator_api))]

use allocator_api2::boxed::Box;
use core::fmt;

pub use allocator_api2::alloc::Allocator;
pub use allocator_api2::alloc::Global;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PUBLIC TYPE AND TRAIT DEFINITIONS                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// A singly-linked list of values of type `T`, with nodes placed in the
/// allocator `A`.
///
/// The list owns its nodes as a strict chain, each node owning its successor.
/// Only the head link is stored; length and tail position are found by
/// traversal.

pub struct List<T, A: Allocator = Global> {
  head: Link<T, A>,
  allocator: A,
}

/// The error returned by [`try_get`](List::try_get) when the requested index
/// is not less than the length of the list.

#[derive(Clone, Copy)]
pub struct IndexError;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PRIVATE TYPE AND TRAIT DEFINITIONS                                         //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

type Link<T, A> = Option<Box<Node<T, A>, A>>;

struct Node<T, A: Allocator> {
  value: T,
  next: Link<T, A>,
}

enum Error {
  OutOfBounds { index: usize, len: usize },
}

enum Panicked { }

trait Fail: Sized {
  fn fail<T>(_: Error) -> Result<T, Self>;
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// UTILITY FUNCTIONS                                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

#[inline(always)]
fn unwrap<T>(x: Result<T, Panicked>) -> T {
  match x { Ok(x) => x, Err(e) => match e { } }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Fail                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl Fail for Panicked {
  #[inline(never)]
  #[cold]
  fn fail<T>(e: Error) -> Result<T, Self> {
    match e {
      Error::OutOfBounds { index, len } =>
        panic!("clevis: index {} is out of bounds for a list of length {}!", index, len),
    }
  }
}

impl Fail for IndexError {
  #[inline(always)]
  fn fail<T>(_: Error) -> Result<T, Self> {
    Err(IndexError)
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// List                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

fn lookup<'a, T, A, E>(list: &'a List<T, A>, index: usize) -> Result<&'a T, E>
where
  A: Allocator,
  E: Fail,
{
  let mut cursor = list.head.as_deref();
  let mut n = 0;

  while let Some(node) = cursor {
    if n == index {
      return Ok(&node.value);
    }

    n = n + 1;
    cursor = node.next.as_deref();
  }

  // `n` is now the length of the whole chain.

  E::fail(Error::OutOfBounds { index, len: n })
}

impl<T> List<T, Global> {
  /// Creates an empty list whose nodes will be placed in the global
  /// allocator.

  pub fn new() -> Self {
    Self::new_in(Global)
  }
}

impl<T, A: Allocator> List<T, A> {
  /// Creates an empty list whose nodes will be placed in the given
  /// allocator.

  pub fn new_in(allocator: A) -> Self {
    List { head: None, allocator }
  }

  /// A reference to the list's allocator.

  pub fn allocator(&self) -> &A {
    &self.allocator
  }

  /// Appends a value at the tail of the list.
  ///
  /// The tail is found by walking the chain from the head, so this takes
  /// time linear in the length of the list and allocates one node.

  pub fn push(&mut self, value: T)
  where
    A: Clone
  {
    let node = Box::new_in(Node { value, next: None }, self.allocator.clone());

    let mut cursor = &mut self.head;

    while let Some(node) = cursor {
      cursor = &mut node.next;
    }

    *cursor = Some(node);
  }

  /// Removes the first node whose value is equal to the given value,
  /// relinking its predecessor to its successor.
  ///
  /// Returns `false`, leaving the list unchanged, if no node matches.

  pub fn remove(&mut self, value: &T) -> bool
  where
    T: PartialEq
  {
    if self.head.as_deref().is_some_and(|node| node.value == *value) {
      if let Some(mut node) = self.head.take() {
        self.head = node.next.take();
      }

      return true;
    }

    // Walk the predecessor of each candidate so a matched node can be
    // excised by relinking the predecessor's next link.

    let mut cursor = self.head.as_deref_mut();

    while let Some(node) = cursor {
      if node.next.as_deref().is_some_and(|next| next.value == *value) {
        if let Some(mut matched) = node.next.take() {
          node.next = matched.next.take();
        }

        return true;
      }

      cursor = node.next.as_deref_mut();
    }

    false
  }

  /// Returns a reference to the value at the given 0-based index, found by
  /// walking `index` links from the head.
  ///
  /// # Panics
  ///
  /// Panics if `index` is not less than the length of the list.

  #[inline(always)]
  pub fn get(&self, index: usize) -> &T {
    unwrap(lookup(self, index))
  }

  /// Returns a reference to the value at the given 0-based index, found by
  /// walking `index` links from the head.
  ///
  /// # Errors
  ///
  /// An error is returned if `index` is not less than the length of the
  /// list.

  #[inline(always)]
  pub fn try_get(&self, index: usize) -> Result<&T, IndexError> {
    lookup(self, index)
  }

  /// The number of values in the list, counted by walking the whole chain.

  pub fn len(&self) -> usize {
    let mut cursor = self.head.as_deref();
    let mut n = 0;

    while let Some(node) = cursor {
      n = n + 1;
      cursor = node.next.as_deref();
    }

    n
  }

  /// Whether the list has no values.

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.head.is_none()
  }

  /// Removes every value from the list.
  ///
  /// The chain is released link by link, not by recursive drop, so clearing
  /// an arbitrarily long list cannot overflow the stack.

  pub fn clear(&mut self) {
    let mut link = self.head.take();

    while let Some(mut node) = link {
      link = node.next.take();
    }
  }
}

impl<T, A: Allocator> Drop for List<T, A> {
  fn drop(&mut self) {
    self.clear()
  }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for List<T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut f = f.debug_list();
    let mut cursor = self.head.as_deref();

    while let Some(node) = cursor {
      let _ = f.entry(&node.value);
      cursor = node.next.as_deref();
    }

    f.finish()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// IndexError                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl fmt::Debug for IndexError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("IndexError").finish()
  }
}

impl fmt::Display for IndexError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("index out of bounds")
  }
}
