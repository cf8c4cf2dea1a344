use candle_core::Device;
use tracing::debug;

use super::error::EmbeddingError;

/// Picks the inference device: Metal, then CUDA (when compiled in), then CPU.
///
/// A GPU backend that is compiled in but fails to initialize is logged and skipped.
pub fn select_device() -> Result<Device, EmbeddingError> {
    if let Some(device) = gpu_device() {
        return Ok(device);
    }
    debug!("Sentence encoder running on CPU");
    Ok(Device::Cpu)
}

#[cfg(any(feature = "metal", feature = "cuda"))]
fn gpu_device() -> Option<Device> {
    let candidates: &[(&str, fn(usize) -> candle_core::Result<Device>)] = &[
        #[cfg(feature = "metal")]
        ("metal", Device::new_metal),
        #[cfg(feature = "cuda")]
        ("cuda", Device::new_cuda),
    ];

    for (backend, open) in candidates {
        match open(0) {
            Ok(device) => {
                tracing::info!(backend, "Sentence encoder using GPU");
                return Some(device);
            }
            Err(e) => tracing::warn!(backend, error = %e, "GPU backend unavailable"),
        }
    }
    None
}

#[cfg(not(any(feature = "metal", feature = "cuda")))]
fn gpu_device() -> Option<Device> {
    None
}

/// Short label for logs.
pub fn device_label(device: &Device) -> &'static str {
    match device {
        Device::Cpu => "cpu",
        Device::Cuda(_) => "cuda",
        Device::Metal(_) => "metal",
    }
}
