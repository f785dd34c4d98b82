//! `LocalSpawn` adapter over the Leptos task executor.

use futures::future::LocalFutureObj;
use futures::task::{LocalSpawn, SpawnError};

/// Spawns onto the current thread's Leptos executor (`spawn_local` in the
/// browser).
#[derive(Clone, Copy, Debug, Default)]
pub struct LeptosSpawner;

impl LocalSpawn for LeptosSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        leptos::task::spawn_local(future);
        Ok(())
    }
}

