//! Pending tasks between `start` and `execute`

/// Ordered, append-only collection of units of work
#[derive(Debug)]
pub struct TaskBatch<U> {
    tasks: Vec<U>,
}

impl<U> TaskBatch<U> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn push(&mut self, task: U) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Take every pending task, leaving the batch empty
    pub fn drain(&mut self) -> Vec<U> {
        std::mem::take(&mut self.tasks)
    }
}

impl<U> Default for TaskBatch<U> {
    fn default() -> Self {
        Self::new()
    }
}
