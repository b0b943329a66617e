//! Worker-thread host for a single COM driver
//!
//! COM objects created in a single threaded apartment must be called from
//! the thread that created them. `ComDriver` owns such a thread and forwards
//! every request to it over a channel, handing the result back through a
//! oneshot reply.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::{AscomError, AscomResult, ComActivator};

/// Command sent to the COM worker thread
enum ComCommand {
    Get(String, Vec<Value>, oneshot::Sender<AscomResult<Value>>),
    Set(String, Value, oneshot::Sender<AscomResult<()>>),
    Call(String, Vec<Value>, oneshot::Sender<AscomResult<Value>>),
    Release(oneshot::Sender<()>),
}

/// Handle to a COM driver living on its own apartment thread.
///
/// Dropping the handle closes the command channel, which lets the worker
/// release the driver object and leave its apartment.
#[derive(Debug)]
pub struct ComDriver {
    prog_id: String,
    sender: mpsc::Sender<ComCommand>,
    released: AtomicBool,
}

impl ComDriver {
    /// Start a worker thread and activate `prog_id` on it.
    ///
    /// Returns once the driver object exists, or with the activation error.
    pub async fn activate(prog_id: &str, activator: Arc<dyn ComActivator>) -> AscomResult<Self> {
        let (tx, mut rx) = mpsc::channel::<ComCommand>(32);
        let (ready_tx, ready_rx) = oneshot::channel::<AscomResult<()>>();
        let worker_prog_id = prog_id.to_string();

        thread::Builder::new()
            .name(format!("com-{}", prog_id))
            .spawn(move || {
                if let Err(e) = activator.enter_thread() {
                    tracing::error!("Failed to init COM on worker thread for {}: {}", worker_prog_id, e);
                    let _ = ready_tx.send(Err(e));
                    return;
                }

                let mut object = match activator.activate(&worker_prog_id) {
                    Ok(object) => {
                        let _ = ready_tx.send(Ok(()));
                        object
                    }
                    Err(e) => {
                        tracing::error!("Failed to create COM driver {}: {}", worker_prog_id, e);
                        let _ = ready_tx.send(Err(e));
                        activator.leave_thread();
                        return;
                    }
                };

                let mut release_reply = None;
                while let Some(cmd) = rx.blocking_recv() {
                    match cmd {
                        ComCommand::Get(member, args, reply) => {
                            let _ = reply.send(object.get(&member, &args));
                        }
                        ComCommand::Set(member, value, reply) => {
                            let _ = reply.send(object.set(&member, &value));
                        }
                        ComCommand::Call(member, args, reply) => {
                            let _ = reply.send(object.call(&member, &args));
                        }
                        ComCommand::Release(reply) => {
                            release_reply = Some(reply);
                            break;
                        }
                    }
                }

                drop(object);
                activator.leave_thread();
                tracing::debug!("COM driver {} released", worker_prog_id);

                if let Some(reply) = release_reply {
                    let _ = reply.send(());
                }
            })
            .map_err(|e| AscomError::Activation {
                prog_id: prog_id.to_string(),
                reason: format!("cannot start worker thread: {}", e),
            })?;

        ready_rx.await.map_err(|_| AscomError::WorkerStopped)??;
        tracing::info!("Created COM driver {}", prog_id);

        Ok(Self {
            prog_id: prog_id.to_string(),
            sender: tx,
            released: AtomicBool::new(false),
        })
    }

    pub fn prog_id(&self) -> &str {
        &self.prog_id
    }

    /// Read a property (or call a parameterised read-only method)
    pub async fn get(&self, member: &str, args: Vec<Value>) -> AscomResult<Value> {
        self.request(|reply| ComCommand::Get(member.to_string(), args, reply)).await?
    }

    /// Write a property
    pub async fn set(&self, member: &str, value: Value) -> AscomResult<()> {
        self.request(|reply| ComCommand::Set(member.to_string(), value, reply)).await?
    }

    /// Call a method
    pub async fn call(&self, member: &str, args: Vec<Value>) -> AscomResult<Value> {
        self.request(|reply| ComCommand::Call(member.to_string(), args, reply)).await?
    }

    /// Release the driver object and stop the worker. Safe to call repeatedly.
    pub async fn release(&self) -> AscomResult<()> {
        if self.released.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let (tx, rx) = oneshot::channel();
        if self.sender.send(ComCommand::Release(tx)).await.is_err() {
            // Worker already gone
            return Ok(());
        }
        let _ = rx.await;
        Ok(())
    }

    pub fn is_released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> ComCommand,
    ) -> AscomResult<T> {
        if self.is_released() {
            return Err(AscomError::Released);
        }
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(build(tx))
            .await
            .map_err(|_| AscomError::WorkerStopped)?;
        rx.await.map_err(|_| AscomError::WorkerStopped)
    }
}
