//! Inbound command queue.
//!
//! Manual commands arrive on the network listener task; the control
//! loop consumes them between ticks. The two never run the controller
//! concurrently: the listener only parses and enqueues, and the main
//! loop drains the queue before each tick, so every state mutation
//! happens on one task.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ UDP listener │────▶│ Command queue│────▶│  Main loop   │
//! │ (producer)   │     │ (lock-free)  │     │ (consumer)   │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

use crate::app::commands::ManualCommand;

/// Maximum number of pending commands.
/// Power of 2 for cheap ring-buffer wraparound.
const COMMAND_QUEUE_CAP: usize = 32;

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// The listener task writes (produce), the main loop reads (consume).
// Atomic head/tail indices enforce the SPSC discipline; the buffer
// lives in a static so both tasks can reach it without a handle.

static QUEUE_HEAD: AtomicU8 = AtomicU8::new(0);
static QUEUE_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: COMMAND_BUFFER has exactly one writer (push_command, listener
// task) and one reader (pop_command, main loop). Each slot is written
// before the head index is released and read before the tail index is
// released, so the two tasks never touch the same slot concurrently.
static mut COMMAND_BUFFER: [u8; COMMAND_QUEUE_CAP] = [0; COMMAND_QUEUE_CAP];

/// Push a command into the queue.
/// Returns `false` if the queue is full (command dropped).
pub fn push_command(command: ManualCommand) -> bool {
    let head = QUEUE_HEAD.load(Ordering::Relaxed);
    let tail = QUEUE_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % COMMAND_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full.
    }

    // SAFETY: single producer; see COMMAND_BUFFER above.
    unsafe {
        COMMAND_BUFFER[head as usize] = command_to_u8(command);
    }

    QUEUE_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next command from the queue.
/// Called from the main loop (single consumer).
pub fn pop_command() -> Option<ManualCommand> {
    let tail = QUEUE_TAIL.load(Ordering::Relaxed);
    let head = QUEUE_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    // SAFETY: single consumer; see COMMAND_BUFFER above.
    let raw = unsafe { COMMAND_BUFFER[tail as usize] };
    QUEUE_TAIL.store((tail + 1) % COMMAND_QUEUE_CAP as u8, Ordering::Release);

    command_from_u8(raw)
}

/// Drain all pending commands into a callback, FIFO order.
pub fn drain_commands(mut handler: impl FnMut(ManualCommand)) {
    while let Some(command) = pop_command() {
        handler(command);
    }
}

/// Number of pending commands.
pub fn queue_len() -> usize {
    let head = QUEUE_HEAD.load(Ordering::Relaxed) as usize;
    let tail = QUEUE_TAIL.load(Ordering::Relaxed) as usize;
    (head + COMMAND_QUEUE_CAP - tail) % COMMAND_QUEUE_CAP
}

// ── Internal ──────────────────────────────────────────────────

fn command_to_u8(command: ManualCommand) -> u8 {
    match command {
        ManualCommand::Auto => 0,
        ManualCommand::Dark => 1,
        ManualCommand::On => 2,
        ManualCommand::Boost => 3,
        ManualCommand::Off => 4,
    }
}

fn command_from_u8(raw: u8) -> Option<ManualCommand> {
    match raw {
        0 => Some(ManualCommand::Auto),
        1 => Some(ManualCommand::Dark),
        2 => Some(ManualCommand::On),
        3 => Some(ManualCommand::Boost),
        4 => Some(ManualCommand::Off),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Mutex, MutexGuard};

    // The queue is process-global and the test harness is threaded, so
    // every test takes this lock and drains before touching the queue.
    static QUEUE_LOCK: Mutex<()> = Mutex::new(());

    fn exclusive() -> MutexGuard<'static, ()> {
        let guard = QUEUE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        drain_commands(|_| {});
        guard
    }

    #[test]
    fn fifo_order_preserved() {
        let _guard = exclusive();
        assert!(push_command(ManualCommand::On));
        assert!(push_command(ManualCommand::Boost));
        assert!(push_command(ManualCommand::Off));

        let mut drained = Vec::new();
        drain_commands(|c| drained.push(c));
        assert_eq!(
            drained,
            vec![ManualCommand::On, ManualCommand::Boost, ManualCommand::Off]
        );
    }

    #[test]
    fn full_queue_drops_pushes() {
        let _guard = exclusive();
        // Capacity is CAP-1 slots (one slot distinguishes full from empty).
        for _ in 0..COMMAND_QUEUE_CAP - 1 {
            assert!(push_command(ManualCommand::Auto));
        }
        assert!(!push_command(ManualCommand::Off));
        assert_eq!(queue_len(), COMMAND_QUEUE_CAP - 1);
        drain_commands(|_| {});
    }

    #[test]
    fn roundtrips_every_command() {
        let _guard = exclusive();
        for command in [
            ManualCommand::Auto,
            ManualCommand::Dark,
            ManualCommand::On,
            ManualCommand::Boost,
            ManualCommand::Off,
        ] {
            assert!(push_command(command));
            assert_eq!(pop_command(), Some(command));
        }
        assert_eq!(pop_command(), None);
    }
}
