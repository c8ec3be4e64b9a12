//! TorchScript inference backend.
//!
//! Loads the trained artifact once via libtorch and runs one forward pass
//! per request. The output shape is probed with a dummy forward at load time
//! so a mismatched artifact version fails at startup, not mid-request.

use tch::{kind::Kind, CModule, Device, Tensor};

use super::{grid_from_flat, InferenceBackend, InferenceError, InputShape, InputTensor, OutputShape, PredictionGrid};

/// Inference backend backed by a TorchScript `CModule`.
pub struct TorchBackend {
    module: CModule,
    device: Device,
    input: InputShape,
    output: OutputShape,
}

impl TorchBackend {
    /// Load the artifact and verify it honors the shape contract.
    pub fn load(path: &str, input: InputShape, output: OutputShape) -> Result<Self, InferenceError> {
        let device = Device::Cpu;

        let module = CModule::load_on_device(path, device)
            .map_err(|e| InferenceError::Load(format!("{path}: {e}")))?;

        // Probe with a dummy forward so a wrong artifact fails at startup.
        let dummy = Tensor::zeros(input.dims(), (Kind::Float, device));
        let probed = module
            .forward_ts(&[dummy])
            .map_err(|e| InferenceError::Forward(e.to_string()))?;
        if probed.size() != output.dims() {
            return Err(InferenceError::OutputShape(probed.size()));
        }

        tracing::info!(
            path,
            input = ?input.dims(),
            output = ?output.dims(),
            "loaded TorchScript model"
        );

        Ok(Self {
            module,
            device,
            input,
            output,
        })
    }
}

impl InferenceBackend for TorchBackend {
    fn predict(&self, input: &InputTensor) -> Result<PredictionGrid, InferenceError> {
        let expected = self.input.element_count();
        if input.data.len() != expected {
            return Err(InferenceError::InputSize {
                got: input.data.len(),
                expected,
            });
        }

        let tensor = Tensor::from_slice(&input.data)
            .reshape(self.input.dims())
            .to_device(self.device);

        let out = self
            .module
            .forward_ts(&[tensor])
            .map_err(|e| InferenceError::Forward(e.to_string()))?;
        if out.size() != self.output.dims() {
            return Err(InferenceError::OutputShape(out.size()));
        }

        let flat_tensor = out.flatten(0, -1).to_kind(Kind::Float);
        let flat: Vec<f32> =
            Vec::try_from(&flat_tensor).map_err(|e| InferenceError::Forward(e.to_string()))?;

        Ok(grid_from_flat(&flat, &self.output))
    }

    fn output_shape(&self) -> OutputShape {
        self.output
    }
}
