use std::{
    alloc::Layout,
    fmt,
    ops::{Deref, DerefMut},
    ptr::NonNull,
};

use crate::DEFAULTALIGN;

enum Release {
    Global { base: NonNull<u8>, layout: Layout },
    Native(unsafe fn(NonNull<f64>)),
}

/// Aligned, exclusively owned block of `f64` samples.
///
/// Either allocated by this crate at [`DEFAULTALIGN`] (optionally shifted by a
/// byte offset) or handed over by a native engine together with the function
/// that releases it.
pub struct AlignedBuf {
    ptr: NonNull<f64>,
    len: usize,
    release: Release,
}

unsafe impl Send for AlignedBuf {}
unsafe impl Sync for AlignedBuf {}

impl AlignedBuf {
    /// Allocates `len` zeroed samples aligned to [`DEFAULTALIGN`] bytes.
    pub fn zeroed(len: usize) -> Self {
        Self::zeroed_at_offset(len, 0)
    }

    /// Allocates `len` zeroed samples whose first element sits `byte_offset`
    /// bytes past a [`DEFAULTALIGN`] boundary.
    ///
    /// # Panics
    ///
    /// - If `byte_offset` is not a multiple of `size_of::<f64>()` or is not
    ///   smaller than [`DEFAULTALIGN`].
    /// - If the requested size overflows `isize`.
    pub fn zeroed_at_offset(len: usize, byte_offset: usize) -> Self {
        assert!(
            byte_offset.is_multiple_of(size_of::<f64>()) && byte_offset < DEFAULTALIGN,
            "byte_offset={byte_offset} must be a multiple of {} below {DEFAULTALIGN}",
            size_of::<f64>()
        );
        let bytes: usize = (len * size_of::<f64>() + byte_offset)
            .next_multiple_of(DEFAULTALIGN)
            .max(DEFAULTALIGN);
        let Ok(layout) = Layout::from_size_align(bytes, DEFAULTALIGN) else {
            panic!("allocation of {len} samples overflows");
        };
        unsafe {
            let Some(base) = NonNull::new(std::alloc::alloc_zeroed(layout)) else {
                std::alloc::handle_alloc_error(layout)
            };
            let ptr: NonNull<f64> = base.add(byte_offset).cast::<f64>();
            Self {
                ptr,
                len,
                release: Release::Global { base, layout },
            }
        }
    }

    /// Wraps memory allocated by a native engine.
    ///
    /// # Safety
    ///
    /// `ptr` must point to `len` initialised `f64` values exclusively owned by
    /// the returned buffer, valid until `free(ptr)` runs on drop.
    pub unsafe fn from_raw_parts(ptr: NonNull<f64>, len: usize, free: unsafe fn(NonNull<f64>)) -> Self {
        Self {
            ptr,
            len,
            release: Release::Native(free),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_ptr(&self) -> *const f64 {
        self.ptr.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut f64 {
        self.ptr.as_ptr()
    }
}

impl Deref for AlignedBuf {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl DerefMut for AlignedBuf {
    fn deref_mut(&mut self) -> &mut [f64] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for AlignedBuf {
    fn drop(&mut self) {
        match self.release {
            Release::Global { base, layout } => unsafe { std::alloc::dealloc(base.as_ptr(), layout) },
            Release::Native(free) => unsafe { free(self.ptr) },
        }
    }
}

impl fmt::Debug for AlignedBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AlignedBuf(len={}, ptr={:p})", self.len, self.ptr)
    }
}

/// Memory behind one plane of a [`Signal`](crate::layouts::Signal).
#[derive(Debug)]
pub enum Storage {
    /// Ordinary heap vector; alignment is whatever the allocator produced.
    Managed(Vec<f64>),
    /// Aligned buffer, typically allocated by the engine.
    Native(AlignedBuf),
}

impl Storage {
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Storage::Native(_))
    }

    pub fn as_slice(&self) -> &[f64] {
        match self {
            Storage::Managed(v) => v,
            Storage::Native(b) => b,
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        match self {
            Storage::Managed(v) => v,
            Storage::Native(b) => b,
        }
    }

    pub fn as_ptr(&self) -> *const f64 {
        self.as_slice().as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut f64 {
        self.as_mut_slice().as_mut_ptr()
    }
}

impl From<Vec<f64>> for Storage {
    fn from(v: Vec<f64>) -> Self {
        Storage::Managed(v)
    }
}

impl From<AlignedBuf> for Storage {
    fn from(b: AlignedBuf) -> Self {
        Storage::Native(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_aligned;

    #[test]
    fn zeroed_is_aligned_and_zero() {
        let buf: AlignedBuf = AlignedBuf::zeroed(33);
        assert!(is_aligned(buf.as_ptr()));
        assert_eq!(buf.len(), 33);
        assert!(buf.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn offset_shifts_start() {
        let buf: AlignedBuf = AlignedBuf::zeroed_at_offset(8, 8);
        assert_eq!((buf.as_ptr() as usize) % DEFAULTALIGN, 8);
        assert_eq!(buf.len(), 8);
    }

    #[test]
    #[should_panic]
    fn offset_must_be_sample_multiple() {
        let _ = AlignedBuf::zeroed_at_offset(8, 3);
    }

    #[test]
    fn storage_write_keeps_identity() {
        let mut s: Storage = AlignedBuf::zeroed(4).into();
        let ptr: *const f64 = s.as_ptr();
        s.as_mut_slice().copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(s.as_ptr(), ptr);
        assert_eq!(s.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert!(s.is_native());
    }
}
