//! Units of work and the queue that orders them.
//!
//! Evaluation is not implemented yet; stepping a task simply retires the
//! tree it was started with, so the bookkeeping around starting, reusing
//! and ordering tasks can be exercised on its own.

use tracing::debug;

use crate::language::{Node, RuntimeError};
use crate::parsing::{parse, ParsingError};

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    priority: i32,
    suspended: bool,
    completed: bool,
    tree: Option<Node>,
    result: Option<Node>,
}

impl Task {
    pub fn new(priority: i32) -> Task {
        Task {
            priority,
            suspended: false,
            completed: false,
            tree: None,
            result: None,
        }
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn suspended(&self) -> bool {
        self.suspended
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn result(&self) -> Option<&Node> {
        self.result
            .as_ref()
    }

    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }

    /// Give the task a tree to work on. A task holds one tree at a time.
    pub fn start(&mut self, tree: Node) -> Result<(), RuntimeError> {
        if self
            .tree
            .is_some()
        {
            return Err(RuntimeError::TaskInUse(
                tree.location()
                    .clone(),
            ));
        }
        self.tree = Some(tree);
        self.completed = false;
        self.result = None;
        Ok(())
    }

    /// Do one unit of work, returning whether there is more to do.
    pub fn step(&mut self) -> bool {
        if self.suspended {
            return self
                .tree
                .is_some();
        }
        if let Some(tree) = self
            .tree
            .take()
        {
            self.result = Some(tree);
            self.completed = true;
        }
        false
    }

    fn runnable(&self) -> bool {
        !self.suspended
            && self
                .tree
                .is_some()
    }
}

/// Tasks ordered by descending priority; equal priorities keep the order
/// they were started in.
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Scheduler {
        Scheduler::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn start_task(&mut self, priority: i32, tree: Node) -> &mut Task {
        let mut task = Task::new(priority);
        task.tree = Some(tree);

        let index = self
            .tasks
            .partition_point(|other| other.priority >= priority);
        debug!("Starting task at priority {} (position {})", priority, index);
        self.tasks
            .insert(index, task);
        &mut self.tasks[index]
    }

    /// Parse `text` and start a task for the resulting tree.
    pub fn start_source(
        &mut self,
        priority: i32,
        text: &str,
        filename: &str,
    ) -> Result<&mut Task, ParsingError> {
        let tree = parse(text, filename)?;
        Ok(self.start_task(priority, tree))
    }

    /// Step the highest-priority task that can run. Returns false once
    /// nothing is runnable.
    pub fn step(&mut self) -> bool {
        match self
            .tasks
            .iter_mut()
            .find(|task| task.runnable())
        {
            Some(task) => {
                task.step();
                true
            }
            None => false,
        }
    }
}
