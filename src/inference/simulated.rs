//! Pseudo-random stand-in for the trained model artifact.
//!
//! Used in demo deployments and development where the real TorchScript
//! artifact (and libtorch) is not available. The output honors the same
//! tensor contract as the real backend; the values are noise.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{grid_from_flat, InferenceBackend, InferenceError, InputTensor, OutputShape, PredictionGrid};

/// Simulated inference backend producing uniform noise in `[0, 1)`.
pub struct SimulatedBackend {
    shape: OutputShape,
    seed: Option<u64>,
}

impl SimulatedBackend {
    /// Backend with entropy-seeded output.
    pub fn new(shape: OutputShape) -> Self {
        Self { shape, seed: None }
    }

    /// Backend whose output is the same on every call. Deterministic runs
    /// for demos and tests.
    pub fn with_seed(shape: OutputShape, seed: u64) -> Self {
        Self {
            shape,
            seed: Some(seed),
        }
    }
}

impl InferenceBackend for SimulatedBackend {
    fn predict(&self, input: &InputTensor) -> Result<PredictionGrid, InferenceError> {
        let expected = input.shape.element_count();
        if input.data.len() != expected {
            return Err(InferenceError::InputSize {
                got: input.data.len(),
                expected,
            });
        }

        let flat: Vec<f32> = match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                (0..self.shape.element_count()).map(|_| rng.gen()).collect()
            }
            None => {
                let mut rng = rand::thread_rng();
                (0..self.shape.element_count()).map(|_| rng.gen()).collect()
            }
        };

        Ok(grid_from_flat(&flat, &self.shape))
    }

    fn output_shape(&self) -> OutputShape {
        self.shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::InputShape;

    fn shapes() -> (InputShape, OutputShape) {
        (
            InputShape {
                sequence_length: 6,
                patch_height: 13,
                patch_width: 13,
                channels: 7,
            },
            OutputShape {
                horizon_count: 3,
                patch_height: 13,
                patch_width: 13,
            },
        )
    }

    #[test]
    fn test_output_matches_contract() {
        let (input_shape, output_shape) = shapes();
        let backend = SimulatedBackend::new(output_shape);
        let grid = backend.predict(&InputTensor::random(input_shape)).unwrap();

        assert_eq!(grid.len(), 3);
        for horizon in &grid {
            assert_eq!(horizon.len(), 13);
            for row in horizon {
                assert_eq!(row.len(), 13);
            }
        }
    }

    #[test]
    fn test_seeded_backend_is_deterministic() {
        let (input_shape, output_shape) = shapes();
        let backend = SimulatedBackend::with_seed(output_shape, 42);
        let input = InputTensor::random(input_shape);

        assert_eq!(backend.predict(&input).unwrap(), backend.predict(&input).unwrap());
    }

    #[test]
    fn test_rejects_wrong_input_size() {
        let (input_shape, output_shape) = shapes();
        let backend = SimulatedBackend::new(output_shape);
        let input = InputTensor {
            shape: input_shape,
            data: vec![0.0; 3],
        };

        match backend.predict(&input) {
            Err(InferenceError::InputSize { got, expected }) => {
                assert_eq!(got, 3);
                assert_eq!(expected, input_shape.element_count());
            }
            other => panic!("expected InputSize error, got {other:?}"),
        }
    }
}
