use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::domain::cart::Cart;

/// In-process carts, one per authenticated user, created on first touch.
///
/// Each operation runs to completion under the lock, so cart mutations are
/// atomic with respect to each other; nothing awaits while holding it.
/// Carts live for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct CartRegistry {
    carts: Mutex<HashMap<Uuid, Cart>>,
}

impl CartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the user's cart, creating an empty cart if the user
    /// has none yet.
    pub fn with_cart<T>(&self, user_id: Uuid, f: impl FnOnce(&mut Cart) -> T) -> T {
        let mut carts = self.carts.lock().unwrap_or_else(|e| e.into_inner());
        f(carts.entry(user_id).or_default())
    }

    /// A point-in-time copy of the user's cart, for rendering or checkout
    /// snapshotting.
    pub fn view(&self, user_id: Uuid) -> Cart {
        let carts = self.carts.lock().unwrap_or_else(|e| e.into_inner());
        carts.get(&user_id).cloned().unwrap_or_default()
    }
}
