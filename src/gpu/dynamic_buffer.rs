//! Dynamic GPU buffer management with automatic resizing
//!
//! Provides buffers that grow automatically when data exceeds capacity,
//! using a 2x growth strategy to minimize reallocations.

/// A GPU buffer that can grow dynamically
///
/// Uses a 2x growth strategy when capacity is exceeded.
/// Never shrinks (GPU buffers cannot be resized in place).
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize, // Capacity in bytes
    len: usize,      // Current data length in bytes
    usage: wgpu::BufferUsages,
    label: String,
}

/// Capacity after growing to hold `needed` bytes: 2x, minimum +1KB.
fn grown_capacity(needed: usize, capacity: usize) -> usize {
    if needed <= capacity {
        capacity
    } else {
        (needed * 2).max(capacity + 1024)
    }
}

impl DynamicBuffer {
    /// Buffer with the given initial byte capacity.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = initial_capacity.max(64); // Minimum 64 bytes

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            capacity,
            len: 0,
            usage,
            label: label.to_owned(),
        }
    }

    /// Write data to buffer, growing if necessary
    ///
    /// Returns `true` if buffer was reallocated
    pub fn write<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let data_bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = data_bytes.len();
        let new_capacity = grown_capacity(needed, self.capacity);

        let reallocated = new_capacity != self.capacity;
        if reallocated {
            log::debug!(
                "growing {} from {} to {new_capacity} bytes",
                self.label,
                self.capacity
            );
            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: new_capacity as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            self.capacity = new_capacity;
        }

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, data_bytes);
        }
        self.len = needed;

        reallocated
    }

    /// The underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bytes written by the last [`write`](Self::write).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated size in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_without_growing() {
        assert_eq!(grown_capacity(64, 64), 64);
        assert_eq!(grown_capacity(0, 64), 64);
    }

    #[test]
    fn grows_by_at_least_one_kilobyte() {
        assert_eq!(grown_capacity(65, 64), 64 + 1024);
        assert_eq!(grown_capacity(13_000, 64), 26_000);
    }
}
