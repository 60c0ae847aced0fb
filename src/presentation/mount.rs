//! Shared rendering container for a group's timers

use std::sync::{Arc, Mutex, PoisonError};

use crate::id::{GroupId, TimerId};

/// One line of the canvas, owned by a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub owner: TimerId,
    pub text: String,
}

/// Text canvas that presentations attach their rows to.
///
/// Cheap to clone; all clones share the same rows.
#[derive(Debug, Clone)]
pub struct MountPoint {
    inner: Arc<MountInner>,
}

#[derive(Debug)]
struct MountInner {
    id: String,
    selector: String,
    rows: Mutex<Vec<Row>>,
}

impl MountPoint {
    pub fn new(group_id: &GroupId, selector: &str) -> Self {
        Self {
            inner: Arc::new(MountInner {
                id: format!("{}-wrapper", group_id),
                selector: selector.to_string(),
                rows: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Host-side name of the container this mount renders into.
    pub fn selector(&self) -> &str {
        &self.inner.selector
    }

    /// Append a row for `owner`, or replace its text if already attached.
    pub fn attach(&self, owner: &TimerId, text: String) {
        let mut rows = self.rows();
        match rows.iter_mut().find(|row| &row.owner == owner) {
            Some(row) => row.text = text,
            None => rows.push(Row {
                owner: owner.clone(),
                text,
            }),
        }
    }

    /// Replace the text of `owner`'s row. Returns false if it is not attached.
    pub fn write(&self, owner: &TimerId, text: String) -> bool {
        match self.rows().iter_mut().find(|row| &row.owner == owner) {
            Some(row) => {
                row.text = text;
                true
            }
            None => false,
        }
    }

    /// Remove `owner`'s row. Returns false if it was not attached.
    pub fn detach(&self, owner: &TimerId) -> bool {
        let mut rows = self.rows();
        let before = rows.len();
        rows.retain(|row| &row.owner != owner);
        rows.len() != before
    }

    /// Copy of the current rows, top to bottom.
    pub fn snapshot(&self) -> Vec<Row> {
        self.rows().clone()
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    /// All rows joined by newlines.
    pub fn render(&self) -> String {
        self.rows()
            .iter()
            .map(|row| row.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn rows(&self) -> std::sync::MutexGuard<'_, Vec<Row>> {
        self.inner.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (TimerId, TimerId) {
        (TimerId::parse("aaaa1111").unwrap(), TimerId::parse("bbbb2222").unwrap())
    }

    #[test]
    fn id_derives_from_group() {
        let group = GroupId::parse("abc123").unwrap();
        let mount = MountPoint::new(&group, "timers");
        assert_eq!(mount.id(), "abc123-wrapper");
        assert_eq!(mount.selector(), "timers");
    }

    #[test]
    fn rows_keep_attach_order() {
        let (a, b) = ids();
        let mount = MountPoint::new(&GroupId::parse("abc123").unwrap(), "timers");
        mount.attach(&a, "first".into());
        mount.attach(&b, "second".into());
        assert!(mount.write(&a, "first!".into()));

        assert_eq!(mount.render(), "first!\nsecond");
    }

    #[test]
    fn detach_removes_only_owner() {
        let (a, b) = ids();
        let mount = MountPoint::new(&GroupId::parse("abc123").unwrap(), "timers");
        mount.attach(&a, "first".into());
        mount.attach(&b, "second".into());

        assert!(mount.detach(&a));
        assert!(!mount.detach(&a));
        assert!(!mount.write(&a, "gone".into()));
        assert_eq!(mount.snapshot(), vec![Row { owner: b, text: "second".into() }]);
    }
}
