//! Browser-facing helpers shared by the core and the pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser seams (storage, dialogs, title, navigation, task spawning) live
//! here behind small traits so the request pipeline can run natively in tests.

pub mod document;
pub mod feedback;
pub mod guard;
pub mod navigation;
pub mod spawn;
pub mod token_storage;
