//! Interrupt-side plumbing between the codec DMA and the engine.
//!
//! ## Components
//!
//! | Item | Context | Description |
//! |------|---------|-------------|
//! | [`BlockScheduler`] | DMA ISR | Owns the rx/tx double buffers, alternates halves |
//! | [`PingPong`] | DMA ISR | Which half is ready |
//! | [`SharedSelection`] | foreground → ISR | Atomic effect word the handler dispatches on |
//!
//! ## DMA Buffer Layout
//!
//! Both directions use a circular `[i16; 1024]` buffer split in two halves of
//! 512 samples. In stereo the samples are interleaved `L, R, L, R, ...`, so a
//! half carries 256 frames. The DMA fires a half-transfer and a
//! transfer-complete interrupt; each one hands the half it just left to
//! [`BlockScheduler::on_block_ready()`].

pub mod scheduler;
pub mod selection;

pub use scheduler::{BlockScheduler, PingPong};
pub use selection::SharedSelection;
