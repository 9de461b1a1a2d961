//! Ping-pong hand-off between DMA halves and the engine.
//!
//! ## Buffer layout
//!
//! ```text
//!            rx (codec → DMA)                     tx (DMA → codec)
//! ┌────────────────┬────────────────┐   ┌────────────────┬────────────────┐
//! │ Ping: 0..512   │ Pong: 512..1024│   │ Ping: 0..512   │ Pong: 512..1024│
//! └────────────────┴────────────────┘   └────────────────┴────────────────┘
//! ```
//!
//! The DMA engine streams through both buffers continuously and raises an
//! interrupt every time it finishes one half. The handler calls
//! [`BlockScheduler::on_block_ready()`], which processes the half the DMA
//! just left while the hardware works on the other one.
//!
//! The handler does no lifecycle work: it reads the published effect word
//! and dispatches. Initialization, cleanup, preset changes and the pitch
//! overlay switch happen in the foreground, on the engine, under the
//! application's lock (an RTIC shared resource or a `cortex-m` critical
//! section).
//!
//! ## Usage from an interrupt handler
//!
//! ```ignore
//! static SELECTION: SharedSelection = SharedSelection::new();
//!
//! // DMA half/full-transfer interrupt
//! fn dma_isr(cx: dma_isr::Context) {
//!     cx.shared.engine.lock(|engine| {
//!         cx.local.scheduler.on_block_ready(engine, &SELECTION);
//!     });
//! }
//!
//! // Button handler, foreground
//! cx.shared.engine.lock(|engine| {
//!     engine.set_reverb_preset(ReverbPresetId::Stage);
//!     SELECTION.select(engine, EffectKind::Reverb);
//! });
//! ```

use core::ops::Range;

use crate::constants::{AUDIO_BLOCK_SIZE, AUDIO_BUFFER_SIZE};
use crate::engine::AudioEngine;

use super::selection::SharedSelection;

/// Which half of the double buffer is ready for processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PingPong {
    /// First half, samples `0..AUDIO_BLOCK_SIZE`.
    #[default]
    Ping,
    /// Second half, samples `AUDIO_BLOCK_SIZE..AUDIO_BUFFER_SIZE`.
    Pong,
}

impl PingPong {
    /// The other half.
    pub const fn toggle(self) -> Self {
        match self {
            PingPong::Ping => PingPong::Pong,
            PingPong::Pong => PingPong::Ping,
        }
    }

    /// Sample range of this half inside a double buffer.
    pub const fn range(self) -> Range<usize> {
        match self {
            PingPong::Ping => 0..AUDIO_BLOCK_SIZE,
            PingPong::Pong => AUDIO_BLOCK_SIZE..AUDIO_BUFFER_SIZE,
        }
    }
}

/// Owns the receive and transmit double buffers and alternates halves.
pub struct BlockScheduler {
    rx: [i16; AUDIO_BUFFER_SIZE],
    tx: [i16; AUDIO_BUFFER_SIZE],
    next: PingPong,
    blocks: u32,
}

impl BlockScheduler {
    /// Silent buffers, first interrupt handles [`PingPong::Ping`].
    pub const fn new() -> Self {
        BlockScheduler {
            rx: [0; AUDIO_BUFFER_SIZE],
            tx: [0; AUDIO_BUFFER_SIZE],
            next: PingPong::Ping,
            blocks: 0,
        }
    }

    /// Receive buffer, filled by the input DMA.
    pub fn rx_mut(&mut self) -> &mut [i16; AUDIO_BUFFER_SIZE] {
        &mut self.rx
    }

    /// Transmit buffer, drained by the output DMA.
    pub fn tx(&self) -> &[i16; AUDIO_BUFFER_SIZE] {
        &self.tx
    }

    /// Half the next interrupt will process.
    pub fn next_half(&self) -> PingPong {
        self.next
    }

    /// Blocks processed so far (wraps).
    pub fn blocks_processed(&self) -> u32 {
        self.blocks
    }

    /// Handle one DMA half-transfer interrupt.
    ///
    /// Reads the published effect, runs the engine over the ready half with
    /// it, and flips to the other half. Returns the half that was processed.
    pub fn on_block_ready(
        &mut self,
        engine: &mut AudioEngine,
        selection: &SharedSelection,
    ) -> PingPong {
        let half = self.next;
        self.next = half.toggle();

        let kind = selection.effect();
        let range = half.range();
        engine.process_block(kind, &self.rx[range.clone()], &mut self.tx[range]);
        self.blocks = self.blocks.wrapping_add(1);
        half
    }
}

impl Default for BlockScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::EffectKind;

    #[test]
    fn halves_alternate() {
        let mut scheduler = BlockScheduler::new();
        let mut engine = AudioEngine::new();
        let selection = SharedSelection::new();
        let seen: [PingPong; 4] =
            core::array::from_fn(|_| scheduler.on_block_ready(&mut engine, &selection));
        assert_eq!(
            seen,
            [PingPong::Ping, PingPong::Pong, PingPong::Ping, PingPong::Pong]
        );
        assert_eq!(scheduler.blocks_processed(), 4);
    }

    #[test]
    fn only_the_ready_half_is_written() {
        let mut scheduler = BlockScheduler::new();
        let mut engine = AudioEngine::new();
        let selection = SharedSelection::new();
        scheduler.rx_mut().fill(1234);

        assert_eq!(scheduler.on_block_ready(&mut engine, &selection), PingPong::Ping);
        assert!(scheduler.tx()[PingPong::Ping.range()].iter().all(|&s| s == 1234));
        assert!(scheduler.tx()[PingPong::Pong.range()].iter().all(|&s| s == 0));

        assert_eq!(scheduler.on_block_ready(&mut engine, &selection), PingPong::Pong);
        assert!(scheduler.tx().iter().all(|&s| s == 1234));
    }

    #[test]
    fn handler_never_initializes_an_effect() {
        let mut scheduler = BlockScheduler::new();
        let mut engine = AudioEngine::new();
        let selection = SharedSelection::new();
        scheduler.rx_mut().fill(10_000);

        // Word published without the foreground lifecycle: dispatch degrades
        // to loopback and the reverb stays untouched
        selection.publish(EffectKind::Reverb);
        scheduler.on_block_ready(&mut engine, &selection);
        assert!(!engine.controller().is_initialized(EffectKind::Reverb));
        assert_eq!(engine.reverb().memory_used(), 0);
        assert!(scheduler.tx()[PingPong::Ping.range()].iter().all(|&s| s == 10_000));
        assert_eq!(engine.current_effect(), EffectKind::Loopback);
    }

    #[test]
    fn ranges_cover_the_buffer() {
        assert_eq!(PingPong::Ping.range().len(), AUDIO_BLOCK_SIZE);
        assert_eq!(PingPong::Ping.range().end, PingPong::Pong.range().start);
        assert_eq!(PingPong::Pong.range().end, AUDIO_BUFFER_SIZE);
        assert_eq!(PingPong::Pong.toggle(), PingPong::Ping);
    }
}
