/// Opaque id of a requested frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(pub u64);

/// Host primitive that delivers a callback before the next repaint
pub trait TickSource {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel(&mut self, handle: FrameHandle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
    Paused,
}

/// Drives one simulation tick per frame while the host is visible.
///
/// Each accepted frame schedules the next one. Hiding the host cancels the
/// pending frame; showing it again schedules a fresh one and the simulation
/// carries on from where it stopped.
pub struct FrameScheduler {
    state: SchedulerState,
    pending: Option<FrameHandle>,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Stopped,
            pending: None,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[allow(dead_code)]
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Begin ticking. Ignored unless stopped.
    pub fn start<T: TickSource + ?Sized>(&mut self, source: &mut T) {
        if self.state == SchedulerState::Stopped {
            self.state = SchedulerState::Running;
            self.pending = Some(source.request_frame());
            log::debug!("Frame scheduler started");
        }
    }

    /// Stop ticking and drop any pending frame
    pub fn stop<T: TickSource + ?Sized>(&mut self, source: &mut T) {
        self.cancel_pending(source);
        self.state = SchedulerState::Stopped;
    }

    /// Pause on hide, resume on show. Pausing a stopped scheduler is a no-op.
    pub fn set_visible<T: TickSource + ?Sized>(&mut self, visible: bool, source: &mut T) {
        match (self.state, visible) {
            (SchedulerState::Running, false) => {
                self.cancel_pending(source);
                self.state = SchedulerState::Paused;
                log::info!("Paused simulation");
            }
            (SchedulerState::Paused, true) => {
                self.state = SchedulerState::Running;
                self.pending = Some(source.request_frame());
                log::info!("Resumed simulation");
            }
            _ => {}
        }
    }

    /// Called when the host delivers a frame. Returns true if a tick should
    /// run now; the next frame is already requested in that case.
    pub fn on_frame<T: TickSource + ?Sized>(&mut self, handle: FrameHandle, source: &mut T) -> bool {
        if self.state != SchedulerState::Running || self.pending != Some(handle) {
            log::trace!("Ignoring stale frame {:?}", handle);
            return false;
        }
        self.pending = Some(source.request_frame());
        true
    }

    fn cancel_pending<T: TickSource + ?Sized>(&mut self, source: &mut T) {
        if let Some(handle) = self.pending.take() {
            source.cancel(handle);
        }
    }
}
