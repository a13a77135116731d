use std::time::{Duration, Instant};

use colored::Colorize;
use smallvec::SmallVec;

use padpointer_gamepad::Button;

use super::filter::FilteredInput;
use super::geometry::Point;
use super::sink::{PointerSink, SinkResult};
use super::translate::{PointerState, Translation};
use crate::print_debug;

/// Pointer-up and click that finish an A press.
#[derive(Debug, Clone)]
struct PendingRelease<T> {
    target: T,
    position: Point,
    due: Instant,
}

/// Emits synthetic events for a translated frame and keeps the delayed
/// half of clicks until they are due.
#[derive(Debug)]
pub struct Dispatcher<T> {
    click_delay: Duration,
    pending: SmallVec<[PendingRelease<T>; 2]>,
}

impl<T: Clone> Dispatcher<T> {
    pub fn new(click_delay: Duration) -> Self {
        Self {
            click_delay,
            pending: SmallVec::new(),
        }
    }

    pub fn set_click_delay(&mut self, delay: Duration) {
        self.click_delay = delay;
    }

    /// Dispatch one frame. Must only be called while active.
    pub fn dispatch<S>(
        &mut self,
        translation: &Translation,
        input: &FilteredInput,
        state: &PointerState,
        sink: &mut S,
        now: Instant,
    ) where
        S: PointerSink<Target = T>,
    {
        let pos = state.position;

        if translation.moved {
            if let Some(target) = sink.element_at(pos) {
                report("pointer move", sink.pointer_move(&target, pos));
                report("pointer enter", sink.pointer_enter(&target, pos));
            }
        }

        if translation.step_scroll != 0.0 {
            report("step scroll", sink.scroll_by(translation.step_scroll));
        }
        if translation.stick_scroll != 0.0 {
            report("stick scroll", sink.scroll_by(translation.stick_scroll));
        }

        if input.was_pressed(Button::A) {
            if let Some(target) = sink.element_at(pos) {
                if report("pointer down", sink.pointer_down(&target, pos)) {
                    self.pending.push(PendingRelease {
                        target,
                        position: pos,
                        due: now + self.click_delay,
                    });
                }
            }
        }

        if input.was_pressed(Button::B) {
            if let Some(target) = sink.element_at(pos) {
                report("context menu", sink.context_menu(&target, pos));
            }
        }
    }

    /// Finish every click whose delay has elapsed, oldest first. Targets the
    /// sink no longer considers live are skipped.
    pub fn flush_due<S>(&mut self, sink: &mut S, now: Instant) -> usize
    where
        S: PointerSink<Target = T>,
    {
        let mut fired = 0;
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due > now {
                i += 1;
                continue;
            }
            let release = self.pending.remove(i);
            if !sink.is_live(&release.target) {
                print_debug!("skip pointer up for detached target");
                continue;
            }
            report("pointer up", sink.pointer_up(&release.target, release.position));
            report("click", sink.click(&release.target));
            fired += 1;
        }
        fired
    }

    /// Earliest moment a pending click is due.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|release| release.due).min()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drop every pending click. Returns how many were dropped.
    pub fn cancel_pending(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }
}

fn report(event: &str, result: SinkResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            print_debug!("{event} dispatch failed: {e}");
            false
        }
    }
}
