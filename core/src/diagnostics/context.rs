/// Stack of internal stage names active at a point of the pipeline.
///
/// Every frame pushed on entry to a stage must be popped on every exit from
/// it, failures included. Errors take a snapshot while the failing frame is
/// still on the stack.
#[derive(Debug, Default, Clone)]
pub struct Trail {
    frames: Vec<&'static str>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: &'static str) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<&'static str> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Copy of the active frames, outermost first.
    pub fn snapshot(&self) -> Vec<&'static str> {
        self.frames.clone()
    }
}
