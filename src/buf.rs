use tinyvec::ArrayVec;

use crate::error::BufError;

/// What a [`BoundedBuf`] does with bytes that do not fit.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverflowPolicy {
    /// Refuse the whole write and leave the buffer as it was.
    Reject,
    /// Keep what fits and drop the tail of the write.
    #[default]
    Truncate,
}

/// Fixed-capacity byte buffer. Never grows past `N`.
#[derive(Default, Debug, Copy, Clone)]
pub struct BoundedBuf<const N: usize> {
    bytes: ArrayVec<[u8; N]>,
    policy: OverflowPolicy,
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for BoundedBuf<N> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.bytes.as_slice())
    }
}

impl<const N: usize> core::ops::Deref for BoundedBuf<N> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.bytes.as_slice()
    }
}

impl<const N: usize> BoundedBuf<N> {
    pub fn new(policy: OverflowPolicy) -> Self {
        Self {
            bytes: ArrayVec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn spare(&self) -> usize {
        N - self.bytes.len()
    }

    pub fn is_full(&self) -> bool {
        self.bytes.len() == N
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Appends `data` according to the buffer's [`OverflowPolicy`].
    ///
    /// Returns how many bytes were stored.
    pub fn extend_from_slice(&mut self, data: &[u8]) -> Result<usize, BufError> {
        let fits = data.len().min(self.spare());
        if fits < data.len() && self.policy == OverflowPolicy::Reject {
            return Err(BufError::Overflow {
                rejected: data.len(),
            });
        }
        self.bytes.extend_from_slice(&data[..fits]);
        Ok(fits)
    }

    /// Unused capacity, to be filled in place and then [`commit`](Self::commit)ted.
    pub fn spare_mut(&mut self) -> &mut [u8] {
        self.bytes.grab_spare_slice_mut()
    }

    /// Marks `n` bytes written through [`spare_mut`](Self::spare_mut) as part of the buffer.
    pub fn commit(&mut self, n: usize) {
        let len = self.bytes.len() + n.min(self.spare());
        self.bytes.set_len(len);
    }

    /// Drops `n` bytes from the front, shifting the rest down.
    pub fn consume(&mut self, n: usize) {
        let len = self.bytes.len();
        let n = n.min(len);
        self.bytes.as_mut_slice().copy_within(n..len, 0);
        self.bytes.truncate(len - n);
    }
}
