/// Fixed-capacity byte window; pushing into a full window evicts the oldest
/// byte.
#[derive(Debug, Clone)]
pub struct RollingByteWindow<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> RollingByteWindow<N> {
    pub fn new() -> Self {
        Self {
            bytes: [0u8; N],
            len: 0,
        }
    }

    pub fn push(&mut self, byte: u8) {
        if self.len < N {
            self.bytes[self.len] = byte;
            self.len += 1;
        } else {
            self.bytes.copy_within(1.., 0);
            self.bytes[N - 1] = byte;
        }
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes currently held, oldest first.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl<const N: usize> Default for RollingByteWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}
