#![cfg(loom)]

mod refcount;
mod registry;
