use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;

use syncgate::errors::{Result, SyncgateError};
use syncgate::exec::{Invocation, OutputSinks, ProcessOutput, SyncBackend};

/// Scripted response for one backend call.
#[derive(Debug, Clone)]
pub enum FakeResponse {
    /// Resolve successfully with this output.
    Output(ProcessOutput),
    /// Fail as if the command exited with this status code.
    Fail { code: i32, stderr: String },
}

/// A fake backend that:
/// - records every invocation it receives
/// - returns scripted responses in order (empty success once the script
///   runs out)
/// - can be gated so invocations stay "in flight" until the test releases
///   them with `gate.add_permits(..)`.
pub struct FakeSyncBackend {
    invocations: Arc<Mutex<Vec<Invocation>>>,
    script: Mutex<VecDeque<FakeResponse>>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeSyncBackend {
    pub fn new(invocations: Arc<Mutex<Vec<Invocation>>>) -> Self {
        Self {
            invocations,
            script: Mutex::new(VecDeque::new()),
            gate: None,
        }
    }

    /// Queue a response; responses are consumed in FIFO order.
    pub fn with_response(self, response: FakeResponse) -> Self {
        self.script.lock().unwrap().push_back(response);
        self
    }

    /// Queue a successful response with the given stdout.
    pub fn with_stdout(self, stdout: &str) -> Self {
        self.with_response(FakeResponse::Output(ProcessOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
        }))
    }

    /// Hold every invocation until the test adds a permit to `gate`.
    ///
    /// Create the gate with `Arc::new(Semaphore::new(0))` and release one
    /// held invocation per `gate.add_permits(1)`.
    pub fn with_gate(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }
}

impl SyncBackend for FakeSyncBackend {
    fn run(
        &self,
        invocation: Invocation,
        sinks: OutputSinks,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutput>> + Send + '_>> {
        // Record at call time so tests can observe an in-flight invocation
        // even while the gate holds it open.
        {
            let mut guard = self.invocations.lock().unwrap();
            guard.push(invocation.clone());
        }

        let response = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(FakeResponse::Output(ProcessOutput::default()));

        let gate = self.gate.clone();

        Box::pin(async move {
            if let Some(gate) = gate {
                if let Ok(permit) = gate.acquire().await {
                    permit.forget();
                }
            }

            match response {
                FakeResponse::Output(output) => {
                    if let Some(sink) = sinks.stdout {
                        let _ = sink.send(output.stdout.clone().into_bytes()).await;
                    }
                    Ok(output)
                }
                FakeResponse::Fail { code, stderr } => Err(SyncgateError::CommandFailed {
                    program: invocation.program,
                    code,
                    stderr,
                }),
            }
        })
    }
}
