//! GPU utilization probe.
//!
//! Reads device 0 utilization through NVML when the `nvml` feature is
//! enabled. Missing drivers or devices are never an error for callers:
//! the probe simply reports no reading.

#[cfg(feature = "nvml")]
use nvml_wrapper::Nvml;
use tracing::{debug, info};

/// Source of the optional GPU reading.
pub struct GpuProbe {
    #[cfg(feature = "nvml")]
    nvml: Option<Nvml>,
}

impl GpuProbe {
    /// Initialize the probe. NVML is loaded once here; failure leaves the
    /// probe permanently empty.
    #[cfg(feature = "nvml")]
    pub fn new() -> Self {
        let nvml = match Nvml::init() {
            Ok(nvml) => match nvml.device_count() {
                Ok(count) if count > 0 => {
                    info!(devices = count, "NVML initialized");
                    Some(nvml)
                }
                Ok(_) => {
                    info!("NVML initialized but no GPU is enumerable");
                    None
                }
                Err(e) => {
                    debug!(error = %e, "NVML device enumeration failed");
                    None
                }
            },
            Err(e) => {
                info!(error = %e, "NVML unavailable, GPU reading disabled");
                None
            }
        };
        Self { nvml }
    }

    #[cfg(not(feature = "nvml"))]
    pub fn new() -> Self {
        info!("built without NVML support, GPU reading disabled");
        Self {}
    }

    /// A probe that never reports a reading.
    pub fn disabled() -> Self {
        Self {
            #[cfg(feature = "nvml")]
            nvml: None,
        }
    }

    /// Current utilization of the first GPU in percent.
    #[cfg(feature = "nvml")]
    pub fn utilization(&self) -> Option<f32> {
        let nvml = self.nvml.as_ref()?;
        let device = match nvml.device_by_index(0) {
            Ok(device) => device,
            Err(e) => {
                debug!(error = %e, "GPU device lookup failed");
                return None;
            }
        };
        match device.utilization_rates() {
            Ok(rates) => Some(rates.gpu as f32),
            Err(e) => {
                debug!(error = %e, "GPU utilization query failed");
                None
            }
        }
    }

    #[cfg(not(feature = "nvml"))]
    pub fn utilization(&self) -> Option<f32> {
        None
    }
}

impl Default for GpuProbe {
    fn default() -> Self {
        Self::new()
    }
}
