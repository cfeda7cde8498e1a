//! Inbound report queue
//!
//! Bus callbacks may run in an interrupt or on another executor. They push
//! [`BusReport`]s into a bounded queue guarded by a critical section, and the
//! poll loop drains it through [`ReportProcessor`], so the strip state is
//! only ever touched from one place.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Instant;
use heapless::Deque;

use crate::bus::{BusReport, EventBus};
use crate::strip::RgbwStrip;
use crate::{AnalogInput, StripDriver};

/// Error returned when the queue has no room for another report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub BusReport);

/// Bounded queue of inbound bus reports
pub struct ReportQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<BusReport, SIZE>>>,
}

impl<const SIZE: usize> ReportQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for the bus callback side.
    pub const fn sender(&self) -> ReportSender<'_, SIZE> {
        ReportSender { queue: self }
    }

    /// Get a receiver handle for the poll loop.
    pub const fn receiver(&self) -> ReportReceiver<'_, SIZE> {
        ReportReceiver { queue: self }
    }

    /// Queue a report.
    ///
    /// Returns `Err(QueueFull(report))` if the queue is full.
    pub fn try_send(&self, report: BusReport) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(report).map_err(QueueFull)
        })
    }

    /// Take the oldest report, if any.
    pub fn try_receive(&self) -> Option<BusReport> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for ReportQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half of a [`ReportQueue`].
#[derive(Clone, Copy)]
pub struct ReportSender<'a, const SIZE: usize> {
    queue: &'a ReportQueue<SIZE>,
}

impl<const SIZE: usize> ReportSender<'_, SIZE> {
    /// Queue a report, logging and dropping it when the queue is full.
    pub fn try_send(&self, report: BusReport) -> Result<(), QueueFull> {
        self.queue.try_send(report).inspect_err(|err| {
            log!("bus: inbound queue full, dropping {:?}", err.0);
        })
    }
}

/// Receiving half of a [`ReportQueue`].
#[derive(Clone, Copy)]
pub struct ReportReceiver<'a, const SIZE: usize> {
    queue: &'a ReportQueue<SIZE>,
}

impl<const SIZE: usize> ReportReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Option<BusReport> {
        self.queue.try_receive()
    }
}

/// Feeds queued reports into a strip from the poll loop
pub struct ReportProcessor<'a, const SIZE: usize> {
    reports: ReportReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> ReportProcessor<'a, SIZE> {
    pub const fn new(reports: ReportReceiver<'a, SIZE>) -> Self {
        Self { reports }
    }

    /// Drain all queued reports into `strip` (non-blocking)
    ///
    /// Returns the number of reports handled.
    pub fn process_pending<D, A, B>(
        &mut self,
        strip: &mut RgbwStrip<D, A>,
        now: Instant,
        bus: &mut B,
    ) -> usize
    where
        D: StripDriver,
        A: AnalogInput,
        B: EventBus,
    {
        let mut handled = 0;
        while let Some(report) = self.reports.try_receive() {
            strip.handle_report(report, now, bus);
            handled += 1;
        }
        handled
    }
}
