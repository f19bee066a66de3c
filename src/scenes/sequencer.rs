use std::future::Future;

/// Enabled state of the previous/next controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControls {
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

/// A validated navigation target that has not been committed yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a pending step does nothing until it is committed"]
pub struct PendingStep {
    index: usize,
}

impl PendingStep {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Owns the cursor over a fixed number of scenes.
///
/// Navigation is two-phase: [`Sequencer::begin`] validates a target, the
/// caller renders it, and only [`Sequencer::commit`] moves the cursor. A
/// render that fails is simply never committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequencer {
    cursor: usize,
    len: usize,
}

impl Sequencer {
    pub fn new(len: usize) -> Self {
        Self { cursor: 0, len }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Validate `target`; anything outside `0..len` yields nothing
    pub fn begin(&self, target: isize) -> Option<PendingStep> {
        usize::try_from(target)
            .ok()
            .filter(|index| *index < self.len)
            .map(|index| PendingStep { index })
    }

    pub fn commit(&mut self, step: PendingStep) -> NavControls {
        self.cursor = step.index;
        log::info!("Now showing step {} of {}", self.cursor + 1, self.len);
        self.controls()
    }

    pub fn controls(&self) -> NavControls {
        NavControls {
            previous_enabled: self.cursor > 0,
            next_enabled: self.cursor + 1 < self.len,
        }
    }

    pub fn previous_target(&self) -> isize {
        self.cursor as isize - 1
    }

    pub fn next_target(&self) -> isize {
        self.cursor as isize + 1
    }

    /// Render `target` and move the cursor there once the render succeeds.
    ///
    /// Returns `Ok(None)` without touching anything when `target` is out of
    /// range. A render error is returned as-is and the cursor stays put.
    pub async fn go_to_step<F, Fut, T, E>(&mut self, target: isize, render: F) -> Result<Option<T>, E>
    where
        F: FnOnce(usize) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let Some(step) = self.begin(target) else {
            log::debug!("Ignoring navigation to step {}", target);
            return Ok(None);
        };
        let rendered = render(step.index()).await?;
        self.commit(step);
        Ok(Some(rendered))
    }
}
