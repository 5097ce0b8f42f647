//! Hand-off of animated frames to the external renderer

use crate::controller::FrameResult;
use crate::field::ParticleField;
use crate::particle::ParticleInstanceGpu;
use mote_core::Result;

/// Draw data for one frame, consumed by the renderer
pub struct ParticleDrawData<'a> {
    pub frame: &'a FrameResult,
    pub instances: &'a [ParticleInstanceGpu],
}

impl ParticleDrawData<'_> {
    /// Raw bytes of the instance buffer for upload
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.instances)
    }
}

/// Receives each finished frame for compositing
pub trait FrameSink {
    fn present(&mut self, data: &ParticleDrawData<'_>) -> Result<()>;
}

/// Repack `field` into `buffer`, reusing its allocation
pub fn pack_instances(field: &ParticleField, buffer: &mut Vec<ParticleInstanceGpu>) {
    buffer.clear();
    buffer.extend(field.instances().iter().map(ParticleInstanceGpu::from_instance));
}

#[cfg(test)]
mod tests {
    use super::*;
    use mote_core::FieldConfig;

    #[test]
    fn packed_buffer_matches_field() {
        let config = FieldConfig {
            ring_count: 20,
            halo_count: 5,
            ..FieldConfig::default()
        };
        let field = ParticleField::from_config(&config, 9);
        let mut buffer = Vec::new();
        pack_instances(&field, &mut buffer);
        assert_eq!(buffer.len(), field.len());

        let halo_flags = buffer.iter().filter(|g| g.flags[0] == 1.0).count();
        assert_eq!(halo_flags, 5);

        // Repacking reuses the buffer without growing it
        let cap = buffer.capacity();
        pack_instances(&field, &mut buffer);
        assert_eq!(buffer.capacity(), cap);
        assert_eq!(buffer.len(), field.len());
    }
}
