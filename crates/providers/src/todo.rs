//! To-do list kept in the key-value store

use std::sync::Arc;

use async_trait::async_trait;
use jarvis::{
    CapabilityError, CapabilityResult, KeyValueStore, KeyValueStoreExt, StoreError, TodoList,
    TodoOp,
};

/// Store key holding the task list
pub const TODO_KEY: &str = "todo";

pub struct StoreTodoList {
    store: Arc<dyn KeyValueStore>,
}

impl StoreTodoList {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> CapabilityResult<Vec<String>> {
        Ok(self
            .store
            .get_as::<Vec<String>>(TODO_KEY)
            .map_err(store_error)?
            .unwrap_or_default())
    }
}

fn store_error(e: StoreError) -> CapabilityError {
    tracing::error!("To-do store failed: {}", e);
    CapabilityError::failed(e.to_string())
}

/// Spoken summary of the task list
pub fn describe_tasks(tasks: &[String]) -> String {
    match tasks.len() {
        0 => "Your to-do list is empty.".to_string(),
        1 => format!("You have one task on your to-do list: {}.", tasks[0]),
        n => {
            let items: Vec<String> = tasks
                .iter()
                .enumerate()
                .map(|(i, task)| format!("{}. {}", i + 1, task))
                .collect();
            format!("You have {} tasks on your to-do list: {}.", n, items.join(", "))
        }
    }
}

#[async_trait]
impl TodoList for StoreTodoList {
    async fn todo(&self, op: TodoOp) -> CapabilityResult<String> {
        match op {
            TodoOp::Add(task) => {
                let mut tasks = self.load()?;
                tasks.push(task.clone());
                self.store.set_as(TODO_KEY, &tasks).map_err(store_error)?;
                Ok(format!("Added '{}' to your to-do list.", task))
            }
            TodoOp::List => Ok(describe_tasks(&self.load()?)),
            TodoOp::Clear => {
                self.store.clear(TODO_KEY).map_err(store_error)?;
                Ok("Your to-do list has been cleared.".to_string())
            }
        }
    }

    async fn tasks(&self) -> CapabilityResult<Vec<String>> {
        self.load()
    }
}
