/*!
A growable bit vector whose width is chosen at runtime.

[`BitVec`] is the state-set representation used by the automaton builder and by
the matching engine: a set over positions `0..len` packed into storage words
("chunks"). The chunk type is a parameter so that behaviour next to chunk
boundaries can be exercised with small words, but every user in this crate
goes through the `u64` default.

Storage is allowed to extend past the logical length. The bits living there
are kept at zero after every mutation, which is what makes chunk-wise
comparison, hashing, [`BitVec::none`] and right shifts sound.
*/

use std::{
    fmt,
    hash::Hash,
    ops::{
        BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, ShlAssign, Shr,
        ShrAssign,
    },
    str::FromStr,
};

use thiserror::Error;

/// A storage word of a [`BitVec`].
pub trait Chunk:
    Copy
    + Eq
    + Hash
    + fmt::Debug
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + BitAndAssign
    + BitOrAssign
    + BitXorAssign
    + Shl<usize, Output = Self>
    + Shr<usize, Output = Self>
{
    /// Number of bits held by one chunk.
    const BITS: usize;
    const ZERO: Self;
    const ONE: Self;
    const ALL: Self;

    fn count_ones(self) -> u32;

    fn trailing_zeros(self) -> u32;
}

macro_rules! impl_chunk {
    ($($ty:ty),*) => {
        $(
            impl Chunk for $ty {
                const BITS: usize = <$ty>::BITS as usize;
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const ALL: Self = <$ty>::MAX;

                fn count_ones(self) -> u32 {
                    <$ty>::count_ones(self)
                }

                fn trailing_zeros(self) -> u32 {
                    <$ty>::trailing_zeros(self)
                }
            }
        )*
    };
}

impl_chunk!(u8, u16, u32, u64, u128, usize);

/// Returned when an index is not below the length of the vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("BitVec::{op}(): index (which is {index}) >= len (which is {len})")]
pub struct OutOfRange {
    /// Name of the operation that was refused.
    pub op: &'static str,
    pub index: usize,
    pub len: usize,
}

/// Returned by [`BitVec::from_str`] on anything other than `0` and `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid bit {found:?} at offset {offset}")]
pub struct ParseBitVecError {
    pub offset: usize,
    pub found: char,
}

/// A dynamic-length sequence of bits.
///
/// Bit `i` is stored in chunk `i / C::BITS`, at bit `i % C::BITS` of that
/// chunk. Binary operators combine the overlapping prefix of both operands
/// and never change the length of the left-hand side.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitVec<C: Chunk = u64> {
    len: usize,
    chunks: Vec<C>,
}

impl<C: Chunk> BitVec<C> {
    /// Creates a vector of `len` bits, all equal to `fill`.
    pub fn new(len: usize, fill: bool) -> Self {
        let chunk = if fill { C::ALL } else { C::ZERO };
        let mut bits = BitVec {
            len,
            chunks: vec![chunk; Self::chunks_for(len)],
        };
        bits.clear_tail();
        bits
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the bit at `index`.
    pub fn test(&self, index: usize) -> Result<bool, OutOfRange> {
        self.check("test", index)?;
        Ok(self.get(index))
    }

    /// Like [`BitVec::test`], but an out of range index simply reads as unset.
    pub fn contains(&self, index: usize) -> bool {
        index < self.len && self.get(index)
    }

    pub fn set(&mut self, index: usize, value: bool) -> Result<&mut Self, OutOfRange> {
        self.check("set", index)?;
        self.put(index, value);
        Ok(self)
    }

    pub fn reset(&mut self, index: usize) -> Result<&mut Self, OutOfRange> {
        self.check("reset", index)?;
        self.put(index, false);
        Ok(self)
    }

    pub fn flip(&mut self, index: usize) -> Result<&mut Self, OutOfRange> {
        self.check("flip", index)?;
        let (chunk, mask) = Self::locate(index);
        self.chunks[chunk] ^= mask;
        Ok(self)
    }

    pub fn set_all(&mut self) -> &mut Self {
        self.chunks.fill(C::ALL);
        self.clear_tail();
        self
    }

    pub fn reset_all(&mut self) -> &mut Self {
        self.chunks.fill(C::ZERO);
        self
    }

    pub fn flip_all(&mut self) -> &mut Self {
        for chunk in &mut self.chunks {
            *chunk = !*chunk;
        }
        self.clear_tail();
        self
    }

    /// Returns true when no bit is set.
    pub fn none(&self) -> bool {
        self.chunks.iter().all(|&chunk| chunk == C::ZERO)
    }

    pub fn any(&self) -> bool {
        !self.none()
    }

    pub fn count_ones(&self) -> usize {
        self.chunks
            .iter()
            .map(|&chunk| chunk.count_ones() as usize)
            .sum()
    }

    /// Grows or shrinks the vector. Bits exposed by growing take `fill`.
    pub fn resize(&mut self, len: usize, fill: bool) -> &mut Self {
        if fill && len > self.len {
            let mask = self.tail_mask();
            if let Some(last) = self.chunks.last_mut() {
                *last |= !mask;
            }
        }
        let chunk = if fill { C::ALL } else { C::ZERO };
        self.chunks.resize(Self::chunks_for(len), chunk);
        self.len = len;
        self.clear_tail();
        self
    }

    /// Drops every bit, leaving an empty vector.
    pub fn clear(&mut self) -> &mut Self {
        self.len = 0;
        self.chunks.clear();
        self
    }

    /// Iterates over the indices of set bits, in ascending order.
    pub fn ones(&self) -> Ones<'_, C> {
        Ones {
            chunks: &self.chunks,
            current: C::ZERO,
            base: 0,
            consumed: 0,
        }
    }

    fn chunks_for(len: usize) -> usize {
        len.div_ceil(C::BITS)
    }

    fn locate(index: usize) -> (usize, C) {
        (index / C::BITS, C::ONE << (index % C::BITS))
    }

    /// Mask of the bits of the last chunk that are inside the vector.
    fn tail_mask(&self) -> C {
        match self.len % C::BITS {
            0 => C::ALL,
            used => !(C::ALL << used),
        }
    }

    fn clear_tail(&mut self) {
        let mask = self.tail_mask();
        if let Some(last) = self.chunks.last_mut() {
            *last &= mask;
        }
    }

    fn check(&self, op: &'static str, index: usize) -> Result<(), OutOfRange> {
        if index < self.len {
            Ok(())
        } else {
            Err(OutOfRange {
                op,
                index,
                len: self.len,
            })
        }
    }

    // Callers guarantee `index < self.len`.
    fn get(&self, index: usize) -> bool {
        let (chunk, mask) = Self::locate(index);
        self.chunks[chunk] & mask != C::ZERO
    }

    // Callers guarantee `index < self.len`.
    fn put(&mut self, index: usize, value: bool) {
        let (chunk, mask) = Self::locate(index);
        if value {
            self.chunks[chunk] |= mask;
        } else {
            self.chunks[chunk] &= !mask;
        }
    }

    /// Moves bit `i` to `i + n`.
    fn shift_up(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        if n >= self.len {
            self.reset_all();
            return;
        }
        let (words, bits) = (n / C::BITS, n % C::BITS);
        for i in (0..self.chunks.len()).rev() {
            self.chunks[i] = if i < words {
                C::ZERO
            } else {
                let mut chunk = self.chunks[i - words] << bits;
                if bits > 0 && i > words {
                    chunk |= self.chunks[i - words - 1] >> (C::BITS - bits);
                }
                chunk
            };
        }
        self.clear_tail();
    }

    /// Moves bit `i` to `i - n`. Relies on the tail being clear.
    fn shift_down(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        if n >= self.len {
            self.reset_all();
            return;
        }
        let (words, bits) = (n / C::BITS, n % C::BITS);
        let count = self.chunks.len();
        for i in 0..count {
            let src = i + words;
            self.chunks[i] = if src < count {
                let mut chunk = self.chunks[src] >> bits;
                if bits > 0 && src + 1 < count {
                    chunk |= self.chunks[src + 1] << (C::BITS - bits);
                }
                chunk
            } else {
                C::ZERO
            };
        }
    }
}

impl<C: Chunk> Default for BitVec<C> {
    fn default() -> Self {
        BitVec {
            len: 0,
            chunks: Vec::new(),
        }
    }
}

impl<C: Chunk> FromIterator<bool> for BitVec<C> {
    /// Collects bits in index order, the first item becoming bit 0.
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = BitVec::default();
        for value in iter {
            if bits.len % C::BITS == 0 {
                bits.chunks.push(C::ZERO);
            }
            let index = bits.len;
            bits.len += 1;
            bits.put(index, value);
        }
        bits
    }
}

/// Iterator over the set bits of a [`BitVec`], see [`BitVec::ones`].
#[derive(Debug, Clone)]
pub struct Ones<'a, C: Chunk> {
    chunks: &'a [C],
    current: C,
    base: usize,
    consumed: usize,
}

impl<C: Chunk> Iterator for Ones<'_, C> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != C::ZERO {
                let bit = self.current.trailing_zeros() as usize;
                self.current ^= C::ONE << bit;
                return Some(self.base + bit);
            }
            let (&chunk, rest) = self.chunks.split_first()?;
            self.chunks = rest;
            self.current = chunk;
            self.base = self.consumed * C::BITS;
            self.consumed += 1;
        }
    }
}

impl<C: Chunk> BitAndAssign<&BitVec<C>> for BitVec<C> {
    /// A shorter right-hand side only filters the bits it covers.
    fn bitand_assign(&mut self, rhs: &BitVec<C>) {
        let shorter = rhs.len < self.len;
        let last = rhs.chunks.len().wrapping_sub(1);
        let filler = !rhs.tail_mask();
        for (i, (chunk, &other)) in self.chunks.iter_mut().zip(&rhs.chunks).enumerate() {
            *chunk &= if shorter && i == last {
                other | filler
            } else {
                other
            };
        }
    }
}

impl<C: Chunk> BitOrAssign<&BitVec<C>> for BitVec<C> {
    fn bitor_assign(&mut self, rhs: &BitVec<C>) {
        for (chunk, &other) in self.chunks.iter_mut().zip(&rhs.chunks) {
            *chunk |= other;
        }
        self.clear_tail();
    }
}

impl<C: Chunk> BitXorAssign<&BitVec<C>> for BitVec<C> {
    fn bitxor_assign(&mut self, rhs: &BitVec<C>) {
        for (chunk, &other) in self.chunks.iter_mut().zip(&rhs.chunks) {
            *chunk ^= other;
        }
        self.clear_tail();
    }
}

impl<C: Chunk> BitAnd<&BitVec<C>> for BitVec<C> {
    type Output = BitVec<C>;

    fn bitand(mut self, rhs: &BitVec<C>) -> BitVec<C> {
        self &= rhs;
        self
    }
}

impl<C: Chunk> BitOr<&BitVec<C>> for BitVec<C> {
    type Output = BitVec<C>;

    fn bitor(mut self, rhs: &BitVec<C>) -> BitVec<C> {
        self |= rhs;
        self
    }
}

impl<C: Chunk> BitXor<&BitVec<C>> for BitVec<C> {
    type Output = BitVec<C>;

    fn bitxor(mut self, rhs: &BitVec<C>) -> BitVec<C> {
        self ^= rhs;
        self
    }
}

impl<C: Chunk> Not for BitVec<C> {
    type Output = BitVec<C>;

    fn not(mut self) -> BitVec<C> {
        self.flip_all();
        self
    }
}

impl<C: Chunk> Not for &BitVec<C> {
    type Output = BitVec<C>;

    fn not(self) -> BitVec<C> {
        !self.clone()
    }
}

impl<C: Chunk> ShlAssign<usize> for BitVec<C> {
    fn shl_assign(&mut self, n: usize) {
        self.shift_up(n);
    }
}

impl<C: Chunk> ShrAssign<usize> for BitVec<C> {
    fn shr_assign(&mut self, n: usize) {
        self.shift_down(n);
    }
}

impl<C: Chunk> Shl<usize> for BitVec<C> {
    type Output = BitVec<C>;

    fn shl(mut self, n: usize) -> BitVec<C> {
        self <<= n;
        self
    }
}

impl<C: Chunk> Shr<usize> for BitVec<C> {
    type Output = BitVec<C>;

    fn shr(mut self, n: usize) -> BitVec<C> {
        self >>= n;
        self
    }
}

impl<C: Chunk> Shl<usize> for &BitVec<C> {
    type Output = BitVec<C>;

    fn shl(self, n: usize) -> BitVec<C> {
        self.clone() << n
    }
}

impl<C: Chunk> Shr<usize> for &BitVec<C> {
    type Output = BitVec<C>;

    fn shr(self, n: usize) -> BitVec<C> {
        self.clone() >> n
    }
}

impl<C: Chunk> fmt::Display for BitVec<C> {
    /// Renders the most significant bit first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in (0..self.len).rev() {
            f.write_str(if self.get(index) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl<C: Chunk> fmt::Debug for BitVec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitVec({})", self)
    }
}

impl<C: Chunk> FromStr for BitVec<C> {
    type Err = ParseBitVecError;

    /// Parses the [`fmt::Display`] rendering, most significant bit first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        let mut bits = BitVec::new(len, false);
        for (offset, found) in s.chars().enumerate() {
            match found {
                '0' => {}
                '1' => bits.put(len - 1 - offset, true),
                _ => return Err(ParseBitVecError { offset, found }),
            }
        }
        Ok(bits)
    }
}
