/// One selectable task as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListing {
    pub id: String,
    pub display_name: String,
}

/// Ordered task list supplied by the backend. Passed through as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCatalog {
    tasks: Vec<TaskListing>,
}

impl TaskCatalog {
    pub fn new(tasks: Vec<TaskListing>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[TaskListing] {
        &self.tasks
    }

    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.tasks
            .iter()
            .find(|task| task.id == id)
            .map(|task| task.display_name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

impl FromIterator<(String, String)> for TaskCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(id, display_name)| TaskListing { id, display_name })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keeps_backend_order_and_duplicates() {
        let catalog: TaskCatalog = [
            ("b".to_string(), "Second".to_string()),
            ("a".to_string(), "First".to_string()),
            ("a".to_string(), "Again".to_string()),
        ]
        .into_iter()
        .collect();

        let ids: Vec<&str> = catalog.tasks().iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "a"]);
        assert_eq!(catalog.display_name("a"), Some("First"));
        assert_eq!(catalog.display_name("missing"), None);
    }
}
