use crate::error::Result;
use std::sync::Arc;

pub trait Logger: Send + Sync {
    fn info(&self, message: &str) -> Result<()>;
    fn error(&self, message: &str) -> Result<()>;
    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger>;
}

pub fn join_namespace(current: Option<&str>, namespace: &str) -> String {
    match current {
        Some(current) => format!("{}:{}", current, namespace),
        None => namespace.to_string(),
    }
}
