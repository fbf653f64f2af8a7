use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::math::error::ConfigurationError;
use crate::math::mesh::MeshBuffers;
use crate::math::params::{ParameterInput, SurfaceParameters};
use crate::math::tessellate::{MeshTessellator, RenderMode};

pub enum MeshCommand {
    Regenerate {
        input: ParameterInput,
        mode: RenderMode,
    },
    Stop,
}

pub enum MeshResult {
    Mesh {
        params: SurfaceParameters,
        buffers: MeshBuffers,
    },
    Error(ConfigurationError),
}

/// Runs regeneration on a worker thread so the interactive thread only
/// submits parameter edits and polls for finished meshes. Requests are handled
/// one at a time, in submission order.
pub struct MeshEngine {
    tx_cmd: Sender<MeshCommand>,
    rx_result: Receiver<MeshResult>,
    last_error: Arc<Mutex<Option<ConfigurationError>>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl MeshEngine {
    pub fn new(tessellator: MeshTessellator) -> Self {
        let (tx_cmd, rx_cmd) = channel::unbounded::<MeshCommand>();
        let (tx_result, rx_result) = channel::bounded::<MeshResult>(2);
        let last_error = Arc::new(Mutex::new(None));
        let last_error_clone = Arc::clone(&last_error);

        let thread_handle = thread::spawn(move || {
            mesh_thread(tessellator, rx_cmd, tx_result, last_error_clone);
        });

        Self {
            tx_cmd,
            rx_result,
            last_error,
            thread_handle: Some(thread_handle),
        }
    }

    pub fn regenerate(&self, input: ParameterInput, mode: RenderMode) {
        let _ = self.tx_cmd.send(MeshCommand::Regenerate { input, mode });
    }

    pub fn try_recv_result(&self) -> Option<MeshResult> {
        self.rx_result.try_recv().ok()
    }

    /// Blocks until the next result is available or the worker has exited.
    pub fn recv_result(&self) -> Option<MeshResult> {
        self.rx_result.recv().ok()
    }

    pub fn last_error(&self) -> Option<ConfigurationError> {
        self.last_error.lock().clone()
    }

    pub fn stop(&self) {
        let _ = self.tx_cmd.send(MeshCommand::Stop);
    }
}

impl Default for MeshEngine {
    fn default() -> Self {
        Self::new(MeshTessellator::default())
    }
}

impl Drop for MeshEngine {
    fn drop(&mut self) {
        let _ = self.tx_cmd.send(MeshCommand::Stop);
        if let Some(handle) = self.thread_handle.take() {
            // unread results would otherwise keep the worker blocked on send
            while !handle.is_finished() {
                let _ = self.rx_result.recv_timeout(Duration::from_millis(10));
            }
            let _ = handle.join();
        }
    }
}

fn mesh_thread(
    tessellator: MeshTessellator,
    rx_cmd: Receiver<MeshCommand>,
    tx_result: Sender<MeshResult>,
    last_error: Arc<Mutex<Option<ConfigurationError>>>,
) {
    loop {
        let cmd = match rx_cmd.recv() {
            Ok(c) => c,
            Err(_) => return,
        };

        match cmd {
            MeshCommand::Regenerate { input, mode } => {
                *last_error.lock() = None;

                match SurfaceParameters::try_from(input) {
                    Ok(params) => {
                        let buffers = tessellator.tessellate(&params, mode);
                        if tx_result.send(MeshResult::Mesh { params, buffers }).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "rejected surface parameters");
                        *last_error.lock() = Some(e.clone());
                        if tx_result.send(MeshResult::Error(e)).is_err() {
                            return;
                        }
                    }
                }
            }
            MeshCommand::Stop => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regenerates_off_thread() {
        let engine = MeshEngine::default();
        engine.regenerate(ParameterInput::default(), RenderMode::Wireframe);

        match engine.recv_result() {
            Some(MeshResult::Mesh { params, buffers }) => {
                assert_eq!(params, SurfaceParameters::default());
                let MeshBuffers::Wireframe(mesh) = buffers else {
                    panic!("expected wireframe mesh");
                };
                assert_eq!(mesh.rows, 22);
                assert_eq!(mesh.columns, 361);
            }
            _ => panic!("expected a mesh"),
        }
        assert!(engine.last_error().is_none());
    }

    #[test]
    fn invalid_input_reports_error_and_keeps_running() {
        let engine = MeshEngine::default();
        let bad = ParameterInput {
            beta_step: 0.0,
            ..ParameterInput::default()
        };
        engine.regenerate(bad, RenderMode::Shaded);
        assert!(matches!(
            engine.recv_result(),
            Some(MeshResult::Error(ConfigurationError::NonPositive { .. }))
        ));
        assert!(engine.last_error().is_some());

        engine.regenerate(ParameterInput::default(), RenderMode::Shaded);
        assert!(matches!(engine.recv_result(), Some(MeshResult::Mesh { .. })));
        assert!(engine.last_error().is_none());
    }

    #[test]
    fn results_arrive_in_submission_order() {
        let engine = MeshEngine::default();
        let coarse = ParameterInput {
            alpha_step: 0.5,
            beta_step: 90.0,
            ..ParameterInput::default()
        };
        engine.regenerate(coarse, RenderMode::Wireframe);
        engine.regenerate(ParameterInput::default(), RenderMode::Wireframe);

        let first = engine.recv_result();
        let second = engine.recv_result();
        let step = |result: Option<MeshResult>| match result {
            Some(MeshResult::Mesh { params, .. }) => Some(params.beta_step()),
            _ => None,
        };
        assert_eq!(step(first), Some(90.0));
        assert_eq!(step(second), Some(1.0));
    }
}
